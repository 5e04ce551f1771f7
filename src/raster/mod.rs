//! Image size-budget compression

pub mod compressor;
pub mod encode;
pub mod geometry;

pub use compressor::{compress_image, image_plan};
pub use encode::{encode_frame, encode_jpeg, encode_png, Encoded};
pub use geometry::{fit_within, target_dimensions};
