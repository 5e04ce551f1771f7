//! Image-only PDF assembly
//!
//! Uses lopdf to build a fresh document where every page carries a single
//! full-page image XObject.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::CompressError;
use crate::model::Quality;
use crate::raster::encode_jpeg;

use super::rasterizer::RenderedPage;

/// Resource name of the page image inside each page
const PAGE_IMAGE: &str = "Im0";

pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<Object>,
    /// Document-wide MediaBox, taken from the first page
    default_media_box: Option<Vec<Object>>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            default_media_box: None,
        }
    }

    /// Append `page` as a new last page, JPEG-encoded at `quality`.
    ///
    /// The raster is dropped before returning, so only the encoded bytes stay
    /// alive across pages.
    pub fn add_page(&mut self, page: RenderedPage, quality: Quality) -> Result<(), CompressError> {
        let RenderedPage {
            width_pt,
            height_pt,
            raster,
        } = page;

        let (px_width, px_height) = raster.dimensions();
        let mut image_dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => px_width as i64,
            "Height" => px_height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        let image_stream = match encode_jpeg(&raster, quality) {
            Ok(jpeg) => {
                image_dict.set("Filter", "DCTDecode");
                let mut stream = Stream::new(image_dict, jpeg);
                stream.allows_compression = false;
                stream
            }
            Err(e) => {
                // Raw RGB, deflated when the document is saved
                log::warn!(
                    "JPEG encoding of {}x{} page failed ({}), embedding lossless",
                    px_width,
                    px_height,
                    e
                );
                Stream::new(image_dict, raster.into_raw())
            }
        };
        let image_id = self.doc.add_object(image_stream);

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Real(width_pt),
                        0.into(),
                        0.into(),
                        Object::Real(height_pt),
                        0.into(),
                        0.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(PAGE_IMAGE.as_bytes().to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_bytes = content
            .encode()
            .map_err(|e| CompressError::Encode(format!("Failed to encode page content: {}", e)))?;
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content_bytes));

        let media_box = media_box(width_pt, height_pt);
        if self.default_media_box.is_none() {
            self.default_media_box = Some(media_box.clone());
        }

        let mut xobjects = Dictionary::new();
        xobjects.set(PAGE_IMAGE, image_id);
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => media_box,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });
        self.kids.push(page_id.into());
        Ok(())
    }

    /// Close the page tree and serialize the document
    pub fn finish(mut self) -> Result<Vec<u8>, CompressError> {
        let count = self.kids.len() as i64;
        let mut pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
        };
        if let Some(media_box) = self.default_media_box {
            pages.set("MediaBox", media_box);
        }
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| CompressError::Encode(format!("Failed to save PDF: {}", e)))?;
        Ok(output)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn media_box(width_pt: f32, height_pt: f32) -> Vec<Object> {
    vec![0.into(), 0.into(), Object::Real(width_pt), Object::Real(height_pt)]
}
