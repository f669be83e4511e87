//! Intensity grid extraction
//!
//! Decoded images are reduced to their first channel and stored column-major,
//! so iterating the backing slice visits pixels in the same order as an outer
//! loop over columns with an inner loop over rows.

use crate::error::NormalizeError;
use crate::types::Dimensions;
use image::{DynamicImage, ImageBuffer, Pixel};
use std::path::Path;

/// Immutable width x height grid of first-channel intensities, indexed by (column, row)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    data: Box<[u16]>,
}

impl IntensityGrid {
    /// Build a grid from column-major values
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `data.len() != width * height`
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Result<Self, NormalizeError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(NormalizeError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data: data.into_boxed_slice(),
        })
    }

    /// Build a grid from a list of columns, each holding `height` values
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the columns are ragged
    pub fn from_columns(columns: Vec<Vec<u16>>) -> Result<Self, NormalizeError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);

        if columns.iter().any(|column| column.len() != height) {
            return Err(NormalizeError::ShapeMismatch {
                expected: width * height,
                actual: columns.iter().map(Vec::len).sum(),
            });
        }

        let data: Vec<u16> = columns.into_iter().flatten().collect();
        Self::new(width, height, data)
    }

    /// Extract channel 0 of every pixel
    ///
    /// 8- and 16-bit buffers keep their stored values. Float images are
    /// quantized to 16 bits first.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(buf) => first_channel(buf),
            DynamicImage::ImageLumaA8(buf) => first_channel(buf),
            DynamicImage::ImageRgb8(buf) => first_channel(buf),
            DynamicImage::ImageRgba8(buf) => first_channel(buf),
            DynamicImage::ImageLuma16(buf) => first_channel(buf),
            DynamicImage::ImageLumaA16(buf) => first_channel(buf),
            DynamicImage::ImageRgb16(buf) => first_channel(buf),
            DynamicImage::ImageRgba16(buf) => first_channel(buf),
            other => first_channel(&other.to_rgba16()),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Intensity at (column, row), `None` when out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<u16> {
        if column >= self.width || row >= self.height {
            return None;
        }
        Some(self.data[column * self.height + row])
    }

    /// All intensities in scan order (column-major)
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[u16] {
        &self.data
    }
}

/// Open and decode an image file into an intensity grid
///
/// # Errors
///
/// Returns `Decode` if the file cannot be opened or is not a supported image
pub fn load_grid(path: &Path) -> Result<IntensityGrid, NormalizeError> {
    let image = image::open(path).map_err(|source| NormalizeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );

    Ok(IntensityGrid::from_image(&image))
}

fn first_channel<P>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>) -> IntensityGrid
where
    P: Pixel,
    P::Subpixel: Into<u16>,
{
    let (width, height) = buffer.dimensions();
    let mut data: Vec<u16> = Vec::with_capacity(width as usize * height as usize);

    for x in 0..width {
        for y in 0..height {
            data.push(buffer.get_pixel(x, y).channels()[0].into());
        }
    }

    IntensityGrid {
        width: width as usize,
        height: height as usize,
        data: data.into_boxed_slice(),
    }
}
