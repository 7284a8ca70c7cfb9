pub mod image_ratio;
pub mod image_size;
pub mod image_style;
