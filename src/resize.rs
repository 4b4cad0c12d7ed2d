//! Width handling and the resize step.
//!
//! The resize itself is delegated to the `image` crate; this module owns the
//! surrounding conventions: how a raw width argument is normalized and how
//! the resized copy is named.

use std::path::Path;

use image::imageops::FilterType;

use crate::error::{ImagePublishError, Result};

/// Normalizes a raw width argument into a bare pixel count.
///
/// Strips a trailing `px` unit suffix and surrounding whitespace, then parses
/// the remainder as a positive integer. `"600"` and `"600px"` normalize to
/// the same value.
///
/// # Arguments
/// * `raw` - Width as given by the caller (e.g. "600" or "600px")
///
/// # Returns
/// * `Ok(width)` - The bare numeric pixel width
/// * `Err` - If the value is empty, non-numeric, or zero
pub fn normalize_width(raw: &str) -> Result<u32> {
    let bare = raw.trim().trim_end_matches("px").trim();

    let width = bare.parse::<u32>().map_err(|_| {
        ImagePublishError::invalid_argument(format!("width '{}' is not a pixel count", raw))
    })?;

    if width == 0 {
        return Err(ImagePublishError::invalid_argument(
            "width must be greater than zero",
        ));
    }

    Ok(width)
}

/// Derives the file name for the resized copy of a source image.
///
/// The resized copy is named `{stem}_{width}.{ext}`, e.g. `chart.png` at
/// width 600 becomes `chart_600.png`.
///
/// # Arguments
/// * `source` - Path to the source image
/// * `width` - Normalized pixel width
///
/// # Returns
/// * `Ok(name)` - The resized copy's file name
/// * `Err` - If the source has no stem or no extension
pub fn resized_file_name(source: &Path, width: u32) -> Result<String> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            ImagePublishError::invalid_argument(format!(
                "'{}' has no usable file name",
                source.display()
            ))
        })?;

    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            ImagePublishError::invalid_argument(format!(
                "'{}' has no file extension to derive the image format from",
                source.display()
            ))
        })?;

    Ok(format!("{}_{}.{}", stem, width, ext))
}

/// Decodes the source image, scales it to the given width, and writes the
/// result.
///
/// Height is scaled proportionally; the output format follows the
/// destination's file extension.
///
/// # Arguments
/// * `source` - Path to the source image
/// * `dest` - Path the resized copy is written to
/// * `width` - Target pixel width
pub fn resize_to_width(source: &Path, dest: &Path, width: u32) -> Result<()> {
    let img = image::open(source)?;
    let resized = img.resize(width, u32::MAX, FilterType::Lanczos3);
    resized.save(dest)?;
    Ok(())
}
