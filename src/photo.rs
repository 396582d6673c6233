//! Single-image handle: open, inspect, scale and save.

use crate::error::{Error, Result};
use image::{DynamicImage, imageops::FilterType};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// An image file and, once opened, its decoded pixel buffer.
#[derive(Debug)]
pub struct ImageHandle {
    path: PathBuf,
    image: Option<DynamicImage>,
}

impl ImageHandle {
    /// Creates an unopened handle for `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            image: None,
        }
    }

    /// Opens and decodes the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns an image error if the file is unreadable or not a supported format.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut handle = Self::new(path);
        handle.load()?;
        Ok(handle)
    }

    /// Decodes the file into memory, replacing any loaded buffer.
    ///
    /// # Errors
    ///
    /// Returns an image error if the file is unreadable or not a supported format.
    pub fn load(&mut self) -> Result<()> {
        let data = fs::read(&self.path).map_err(|e| Error::image(&self.path, e))?;
        let image = image::load_from_memory(&data).map_err(|e| Error::image(&self.path, e))?;

        trace!(
            "Loaded {} ({}x{})",
            self.path.display(),
            image.width(),
            image.height()
        );
        self.image = Some(image);
        Ok(())
    }

    /// Path this handle reads from and saves to by default.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true once the image has been decoded.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.image.is_some()
    }

    fn loaded(&self) -> Result<&DynamicImage> {
        self.image.as_ref().ok_or_else(|| {
            Error::illegal_state(format!("image '{}' is not open", self.path.display()))
        })
    }

    /// Pixel width of the loaded buffer.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open.
    pub fn width(&self) -> Result<u32> {
        Ok(self.loaded()?.width())
    }

    /// Pixel height of the loaded buffer.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open.
    pub fn height(&self) -> Result<u32> {
        Ok(self.loaded()?.height())
    }

    /// Returns true if width equals height.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open.
    pub fn is_square(&self) -> Result<bool> {
        let image = self.loaded()?;
        Ok(image.width() == image.height())
    }

    /// Resizes the buffer to `target_width`, keeping the aspect ratio.
    ///
    /// The new height is truncated, not rounded: a 1600x900 image scaled to
    /// 400 becomes 400x225, a 3x2 image scaled to 2 becomes 2x1.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open, or a
    /// validation error if `target_width` is zero.
    pub fn scale(&mut self, target_width: u32) -> Result<()> {
        if target_width == 0 {
            return Err(Error::validation("target width must be greater than 0"));
        }

        let image = self.loaded()?;
        let (width, height) = (image.width(), image.height());
        if width == target_width {
            return Ok(());
        }

        let target_height = scaled_height(width, height, target_width);
        trace!(
            "Scaling {} from {}x{} to {}x{}",
            self.path.display(),
            width,
            height,
            target_width,
            target_height
        );

        let resized = image.resize_exact(target_width, target_height, RESIZE_FILTER);
        self.image = Some(resized);
        Ok(())
    }

    /// Writes the buffer back to the handle's own path.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open, or an image
    /// error if encoding fails.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.path)
    }

    /// Writes the buffer to `path`, format chosen by its extension.
    ///
    /// # Errors
    ///
    /// Returns an illegal state error if the image is not open, or an image
    /// error if encoding fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.loaded()?
            .save(path)
            .map_err(|e| Error::image(path, e))
    }
}

/// Height after scaling `width` to `target_width`, truncated and never zero.
///
/// Integer arithmetic keeps square images square at every size.
fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = u64::from(height) * u64::from(target_width) / u64::from(width);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// Opens `path`, scales it to `width` and saves it in place.
///
/// # Errors
///
/// Returns an error if the image cannot be decoded or re-encoded.
pub fn scale_file(path: &Path, width: u32) -> Result<()> {
    let mut handle = ImageHandle::open(path)?;
    handle.scale(width)?;
    handle.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use image::RgbImage;

    fn write_image(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_scaled_height_truncates() {
        assert_eq!(scaled_height(1600, 900, 400), 225);
        assert_eq!(scaled_height(3, 2, 2), 1);
        assert_eq!(scaled_height(1000, 333, 400), 133);
        assert_eq!(scaled_height(1000, 1, 10), 1);
    }

    #[test]
    fn test_scaled_height_keeps_squares_square() {
        assert_eq!(scaled_height(1078, 1078, 200), 200);
        assert_eq!(scaled_height(97, 97, 400), 400);
        for side in 200..8000 {
            assert_eq!(scaled_height(side, side, 200), 200, "side {side}");
        }
    }

    #[test]
    fn test_open_and_inspect() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("square.png");
        write_image(file.path(), 80, 80);

        let handle = ImageHandle::open(file.path()).unwrap();
        assert!(handle.is_open());
        assert_eq!(handle.width().unwrap(), 80);
        assert!(handle.is_square().unwrap());
    }

    #[test]
    fn test_scale_and_save() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("wide.png");
        write_image(file.path(), 1600, 900);

        scale_file(file.path(), 400).unwrap();

        let handle = ImageHandle::open(file.path()).unwrap();
        assert_eq!(handle.width().unwrap(), 400);
        assert_eq!(handle.height().unwrap(), 225);
        assert!(!handle.is_square().unwrap());
    }

    #[test]
    fn test_rescale_same_width_is_noop() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("thumb.png");
        write_image(file.path(), 200, 200);

        let mut handle = ImageHandle::open(file.path()).unwrap();
        handle.scale(200).unwrap();
        assert_eq!(handle.width().unwrap(), 200);
        assert_eq!(handle.height().unwrap(), 200);
    }

    #[test]
    fn test_unopened_handle_is_illegal_state() {
        let mut handle = ImageHandle::new("never-opened.jpg");
        assert!(!handle.is_open());
        assert!(handle.is_square().unwrap_err().is_illegal_state());
        assert!(handle.scale(400).unwrap_err().is_illegal_state());
        assert!(handle.save().unwrap_err().is_illegal_state());
    }

    #[test]
    fn test_zero_width_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("tiny.png");
        write_image(file.path(), 10, 10);

        let mut handle = ImageHandle::open(file.path()).unwrap();
        assert!(handle.scale(0).unwrap_err().is_validation());
    }

    #[test]
    fn test_open_non_image_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("notes.jpg");
        file.write_str("definitely not a jpeg").unwrap();

        let err = ImageHandle::open(file.path()).unwrap_err();
        assert!(err.is_io());
        assert!(err.to_string().contains("notes.jpg"));
    }
}
