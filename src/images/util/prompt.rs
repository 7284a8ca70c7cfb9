use std::collections::HashMap;

use crate::images::enums::{image_ratio::ImageRatio, image_size::ImageSize, image_style::ImageStyle};

pub const QUALITY_SUFFIX: &str =
    "ultra high definition, crystal clear, sharp details, professional quality, HD";

lazy_static! {
    static ref STYLE_DESCRIPTORS: HashMap<&'static str, &'static str> = HashMap::from([
        (
            ImageStyle::REALISTIC,
            "photorealistic, ultra high quality, detailed, professional photography, HD",
        ),
        (
            ImageStyle::ARTISTIC,
            "artistic, creative, expressive, painterly style, high definition",
        ),
        (
            ImageStyle::CARTOON,
            "cartoon style, animated, colorful, fun, HD quality",
        ),
        (
            ImageStyle::DIGITAL_ART,
            "digital art, concept art, detailed, vibrant colors, HD",
        ),
        (
            ImageStyle::THREE_D,
            "3D rendered, ultra high quality 3D art, detailed modeling, HD",
        ),
    ]);

    static ref ASPECT_DESCRIPTORS: HashMap<&'static str, &'static str> = HashMap::from([
        (ImageRatio::SQUARE, "square format, 1024x1024 resolution"),
        (
            ImageRatio::WIDESCREEN,
            "widescreen landscape format, 1920x1080 resolution",
        ),
        (
            ImageRatio::VERTICAL,
            "vertical portrait format, 1080x1920 resolution",
        ),
        (ImageRatio::STANDARD, "standard format, 1440x1080 resolution"),
        (ImageRatio::PORTRAIT, "portrait format, 1080x1440 resolution"),
        (
            ImageRatio::CINEMATIC,
            "ultra wide cinematic format, 2560x1080 resolution",
        ),
        (ImageSize::SMALL, "512x512 resolution"),
        (ImageSize::MEDIUM, "1024x1024 resolution"),
        (ImageSize::LARGE, "1536x1536 resolution"),
    ]);
}

pub fn style_descriptor(style: &str) -> Option<&'static str> {
    STYLE_DESCRIPTORS.get(style).copied()
}

/// `aspect` is either a ratio id ("16:9") or a size id ("large").
pub fn aspect_descriptor(aspect: &str) -> Option<&'static str> {
    ASPECT_DESCRIPTORS.get(aspect).copied()
}

/// Appends the style and aspect descriptors, when known, and the quality
/// suffix to the user prompt. Unknown ids contribute nothing.
pub fn enhance_prompt(prompt: &str, style: &str, aspect: &str) -> String {
    let mut enhanced = prompt.to_string();

    if let Some(descriptor) = style_descriptor(style) {
        enhanced.push_str(", ");
        enhanced.push_str(descriptor);
    }

    if let Some(descriptor) = aspect_descriptor(aspect) {
        enhanced.push_str(", ");
        enhanced.push_str(descriptor);
    }

    enhanced.push_str(", ");
    enhanced.push_str(QUALITY_SUFFIX);

    enhanced
}

/// First `max_chars` characters of `text`, for log lines.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
