//! Delivery-side URL rewriting for the media CDN
//!
//! Uploaded assets are stored once; smaller variants are requested by
//! injecting transformation parameters into the delivery URL.

const CDN_HOST: &str = "res.cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";

/// Rewrite a CDN URL to request automatic format and quality, optionally
/// limited to `width` pixels. Non-CDN URLs are returned unchanged.
pub fn optimize_delivery_url(url: &str, width: Option<u32>) -> String {
    if url.is_empty() || !url.contains(CDN_HOST) {
        return url.to_string();
    }

    let mut transforms = vec!["f_auto".to_string(), "q_auto".to_string()];
    if let Some(width) = width.filter(|&w| w > 0) {
        transforms.push(format!("w_{}", width));
        transforms.push("c_limit".to_string());
    }

    url.replacen(
        UPLOAD_SEGMENT,
        &format!("{}{}/", UPLOAD_SEGMENT, transforms.join(",")),
        1,
    )
}
