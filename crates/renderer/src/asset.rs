use std::path::Path;

use image::imageops::{flip_vertical_in_place, FilterType};
use image::{GenericImageView, RgbaImage};

use crate::error::OverlayError;
use crate::types::TextureOptions;

/// Decodes `path` into RGBA8 pixels ready for upload.
///
/// The optional resize runs before the flip so the flipped rows always match
/// the final texture height.
pub fn load_image(path: &Path, options: &TextureOptions) -> Result<RgbaImage, OverlayError> {
    let image = image::open(path).map_err(|source| OverlayError::AssetLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let (width, height) = image.dimensions();
    tracing::debug!(path = %path.display(), width, height, "decoded overlay image");

    let image = match options.resize {
        Some((w, h)) if w > 0 && h > 0 && (w, h) != (width, height) => {
            tracing::debug!(width = w, height = h, "resizing overlay image");
            image.resize_exact(w, h, FilterType::Triangle)
        }
        _ => image,
    };

    let mut rgba = image.to_rgba8();
    if options.flip_vertical {
        flip_vertical_in_place(&mut rgba);
    }
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 128]);

    // 4x4 image whose top half is red and bottom half is blue.
    fn write_split_png(dir: &Path) -> std::path::PathBuf {
        let image = RgbaImage::from_fn(4, 4, |_, y| if y < 2 { RED } else { BLUE });
        let path = dir.join("split.png");
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn flips_rows_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_split_png(dir.path());

        let rgba = load_image(&path, &TextureOptions::default()).unwrap();
        assert_eq!(rgba.dimensions(), (4, 4));
        assert_eq!(*rgba.get_pixel(0, 0), BLUE);
        assert_eq!(*rgba.get_pixel(0, 3), RED);
    }

    #[test]
    fn keeps_row_order_without_flip() {
        let dir = TempDir::new().unwrap();
        let path = write_split_png(dir.path());
        let options = TextureOptions {
            resize: None,
            flip_vertical: false,
        };

        let rgba = load_image(&path, &options).unwrap();
        assert_eq!(*rgba.get_pixel(0, 0), RED);
        assert_eq!(*rgba.get_pixel(3, 3), BLUE);
    }

    #[test]
    fn resizes_to_requested_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = write_split_png(dir.path());
        let options = TextureOptions {
            resize: Some((500, 500)),
            flip_vertical: true,
        };

        let rgba = load_image(&path, &options).unwrap();
        assert_eq!(rgba.dimensions(), (500, 500));
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let dir = TempDir::new().unwrap();
        let err = load_image(&dir.path().join("nope.png"), &TextureOptions::default())
            .unwrap_err();
        assert!(matches!(err, OverlayError::AssetLoad { .. }));
        assert!(err.to_string().contains("nope.png"));
    }

    #[test]
    fn undecodable_file_is_an_asset_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let err = load_image(&path, &TextureOptions::default()).unwrap_err();
        assert!(matches!(err, OverlayError::AssetLoad { .. }));
    }
}
