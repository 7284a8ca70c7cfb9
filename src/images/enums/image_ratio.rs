use crate::images::models::image_option::ImageOption;

#[non_exhaustive]
pub struct ImageRatio;

impl ImageRatio {
    pub const SQUARE: &'static str = "1:1";
    pub const WIDESCREEN: &'static str = "16:9";
    pub const VERTICAL: &'static str = "9:16";
    pub const STANDARD: &'static str = "4:3";
    pub const PORTRAIT: &'static str = "3:4";
    pub const CINEMATIC: &'static str = "21:9";

    pub const OPTIONS: [ImageOption; 6] = [
        ImageOption::new(Self::SQUARE, "Square", "1024x1024 pixels"),
        ImageOption::new(Self::WIDESCREEN, "Widescreen", "1920x1080 pixels"),
        ImageOption::new(Self::VERTICAL, "Vertical", "1080x1920 pixels"),
        ImageOption::new(Self::STANDARD, "Standard", "1440x1080 pixels"),
        ImageOption::new(Self::PORTRAIT, "Portrait", "1080x1440 pixels"),
        ImageOption::new(Self::CINEMATIC, "Cinematic", "2560x1080 pixels"),
    ];
}
