use crate::images::models::image_option::ImageOption;

#[non_exhaustive]
pub struct ImageStyle;

impl ImageStyle {
    pub const REALISTIC: &'static str = "realistic";
    pub const ARTISTIC: &'static str = "artistic";
    pub const CARTOON: &'static str = "cartoon";
    pub const DIGITAL_ART: &'static str = "digital_art";
    pub const THREE_D: &'static str = "3d";

    pub const DEFAULT: &'static str = Self::REALISTIC;

    pub const OPTIONS: [ImageOption; 5] = [
        ImageOption::new(Self::REALISTIC, "Realistic", "Photorealistic images"),
        ImageOption::new(Self::ARTISTIC, "Artistic", "Artistic and creative style"),
        ImageOption::new(Self::CARTOON, "Cartoon", "Cartoon and animated style"),
        ImageOption::new(Self::DIGITAL_ART, "Digital Art", "Digital artwork style"),
        ImageOption::new(Self::THREE_D, "3D Render", "3D rendered images"),
    ];
}
