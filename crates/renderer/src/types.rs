use std::path::PathBuf;

/// Where the image quad sits inside the overlay window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Keep the quad centered in the window, following resizes.
    #[default]
    Centered,
    /// Center the quad on a fixed pixel of the window (origin top-left, y down).
    Pixels { center_x: u32, center_y: u32 },
}

/// Controls how the image file is turned into texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    /// Resample the decoded image to exactly this size before upload.
    pub resize: Option<(u32, u32)>,
    /// Store rows bottom-up, matching the GL texture convention.
    pub flip_vertical: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            resize: None,
            flip_vertical: true,
        }
    }
}

/// Immutable configuration passed to the overlay at start-up.
///
/// `OverlayConfig` mirrors CLI flags: which image to show, how large the
/// overlay window should be, and where inside it the image lands.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Raster image displayed by the overlay.
    pub image_path: PathBuf,
    /// Window size in physical pixels.
    pub surface_size: (u32, u32),
    pub placement: Placement,
    pub texture: TextureOptions,
    /// Let mouse input pass through the overlay to the windows beneath it.
    pub click_through: bool,
    pub title: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("assets/test.png"),
            surface_size: (800, 600),
            placement: Placement::default(),
            texture: TextureOptions::default(),
            click_through: false,
            title: "Overlay".to_string(),
        }
    }
}
