pub mod generated_image;
pub mod image_option;
