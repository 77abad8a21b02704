pub mod image;
pub mod payload;

pub use image::{ImageReference, split_image};
pub use payload::{Payload, classify, is_json_object};
