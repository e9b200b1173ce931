use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// The windowing system or GPU context could not be brought up.
    #[error("failed to initialise overlay: {0}")]
    Initialization(String),
    #[error("failed to load image {}: {source}", path.display())]
    AssetLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("image is {width}x{height} but the GPU supports at most {limit}x{limit}")]
    AssetTooLarge { width: u32, height: u32, limit: u32 },
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
