use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use tiny_skia::Pixmap;

/// Writes the accumulated canvas as an 8-bit RGBA PNG. The pixmap stores
/// premultiplied alpha; PNG wants straight alpha, so pixels are
/// demultiplied on the way out.
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let image = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| anyhow!("pixmap dimensions do not match pixel data"))?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

/// Timestamped filename in the working directory, used when no explicit
/// output path is given.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "drawing_{}.png",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixmapSurface;

    #[test]
    fn saved_png_round_trips_dimensions_and_backdrop() {
        let surface = PixmapSurface::new(24, 16).expect("surface");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("canvas.png");

        save_png(surface.pixmap(), &path).expect("save");

        let reloaded = image::open(&path).expect("reload").to_rgba8();
        assert_eq!(reloaded.dimensions(), (24, 16));
        assert_eq!(reloaded.get_pixel(0, 0), &image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn save_fails_for_missing_directory() {
        let surface = PixmapSurface::new(4, 4).expect("surface");
        let result = save_png(surface.pixmap(), Path::new("/nonexistent/dir/out.png"));
        assert!(result.is_err());
    }

    #[test]
    fn default_output_path_is_a_png_in_the_working_directory() {
        let path = default_output_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("drawing_")));
        assert!(path.parent().is_some_and(|p| p.as_os_str().is_empty()));
    }
}
