pub mod attributes;
pub mod gemini;
pub mod image;
pub mod request;

pub use attributes::*;
pub use image::*;
pub use request::*;
