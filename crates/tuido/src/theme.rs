#![forbid(unsafe_code)]

//! Color palette.

use tuido_render::Rgb;

/// Accent colors.
pub mod accent {
    use super::Rgb;

    pub const PRIMARY: Rgb = Rgb::new(97, 175, 239);
    pub const SUCCESS: Rgb = Rgb::new(152, 195, 121);
    pub const ERROR: Rgb = Rgb::new(220, 60, 60);
    pub const WARN: Rgb = Rgb::new(229, 192, 123);
}

/// Foreground colors.
pub mod fg {
    use super::Rgb;

    pub const PRIMARY: Rgb = Rgb::new(220, 223, 228);
    pub const MUTED: Rgb = Rgb::new(130, 137, 151);
}

/// Priority tag colors.
pub mod priority {
    use super::Rgb;

    pub const LOW: Rgb = Rgb::new(130, 137, 151);
    pub const MEDIUM: Rgb = Rgb::new(229, 192, 123);
    pub const HIGH: Rgb = Rgb::new(224, 108, 117);
}
