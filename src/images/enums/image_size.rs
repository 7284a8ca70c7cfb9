use crate::images::models::image_option::ImageOption;

#[non_exhaustive]
pub struct ImageSize;

impl ImageSize {
    pub const SMALL: &'static str = "small";
    pub const MEDIUM: &'static str = "medium";
    pub const LARGE: &'static str = "large";

    pub const DEFAULT: &'static str = Self::MEDIUM;

    pub const OPTIONS: [ImageOption; 3] = [
        ImageOption::new(Self::SMALL, "Small", "512x512 pixels"),
        ImageOption::new(Self::MEDIUM, "Medium", "1024x1024 pixels"),
        ImageOption::new(Self::LARGE, "Large", "1536x1536 pixels"),
    ];
}
