//! Loading and saving images through the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{ImageView, OwnedImage};
use crate::util::{LocMatchError, LocMatchResult};
use image::{DynamicImage, GrayImage, ImageError};
use std::path::Path;

/// Creates a borrowed view from a grayscale image buffer.
pub fn view_from_gray_image(img: &GrayImage) -> LocMatchResult<ImageView<'_, u8>> {
    ImageView::from_slice(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Creates an owned grayscale image from a dynamic image.
///
/// Colour input is reduced with the `image` crate's Rec. 709 luma weights, so
/// values can differ by a level or two from a Rec. 601 (0.299/0.587/0.114)
/// conversion.
pub fn owned_from_dynamic_image(img: &DynamicImage) -> LocMatchResult<OwnedImage> {
    let gray = img.to_luma8();
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    OwnedImage::new(gray.into_raw(), width, height)
}

/// Converts an owned image into an `image` crate buffer.
pub fn gray_image_from_owned(img: &OwnedImage) -> LocMatchResult<GrayImage> {
    let width = u32::try_from(img.width()).map_err(|_| LocMatchError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    let height = u32::try_from(img.height()).map_err(|_| LocMatchError::InvalidDimensions {
        width: img.width(),
        height: img.height(),
    })?;
    GrayImage::from_raw(width, height, img.data().to_vec()).ok_or(LocMatchError::BufferTooSmall {
        needed: img.width() * img.height(),
        got: img.data().len(),
    })
}

/// Loads an image from disk without changing its colour layout.
///
/// Missing files map to [`LocMatchError::FileNotFound`], undecodable ones to
/// [`LocMatchError::Decode`], and images with a zero dimension to
/// [`LocMatchError::InvalidInput`].
pub fn load_image<P: AsRef<Path>>(path: P) -> LocMatchResult<DynamicImage> {
    let path = path.as_ref();
    let display = path.display().to_string();
    if !path.exists() {
        return Err(LocMatchError::FileNotFound { path: display });
    }
    let img = image::open(path).map_err(|err| match err {
        ImageError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            LocMatchError::FileNotFound {
                path: display.clone(),
            }
        }
        other => LocMatchError::Decode {
            path: display.clone(),
            reason: other.to_string(),
        },
    })?;
    if img.width() == 0 || img.height() == 0 {
        return Err(LocMatchError::InvalidInput("decoded image is empty"));
    }
    Ok(img)
}

/// Loads an image from disk and converts it to a grayscale owned image.
pub fn load_gray_image<P: AsRef<Path>>(path: P) -> LocMatchResult<OwnedImage> {
    let img = load_image(path)?;
    owned_from_dynamic_image(&img)
}

/// Writes a grayscale image; the format follows the file extension.
pub fn save_gray_image<P: AsRef<Path>>(img: &OwnedImage, path: P) -> LocMatchResult<()> {
    let gray = gray_image_from_owned(img)?;
    save_image(&DynamicImage::ImageLuma8(gray), path)
}

/// Writes any dynamic image; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(img: &DynamicImage, path: P) -> LocMatchResult<()> {
    img.save(path.as_ref())
        .map_err(|err| LocMatchError::ImageIo {
            reason: format!("{}: {err}", path.as_ref().display()),
        })
}
