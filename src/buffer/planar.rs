//! Planar pixel buffer: an RGB image stored as three monochrome planes.
use super::traits::BufferView;
use super::{check_dims, PLANAR_CHANNELS};
use crate::error::ImageError;
use crate::pixel::{Mono, PixelFormat};
use crate::pool::{self, PoolBlock};

/// Owned three-plane buffer of monochrome elements.
///
/// Plane `c` spans indices `[c·W·H, (c+1)·W·H)` of the backing block; row
/// `r` of plane `c` starts at `c·W·H + r·W`. Planes 0/1/2 hold the R/G/B
/// channels of the image.
pub struct PlanarBuffer<S> {
    width: usize,
    height: usize,
    data: PoolBlock<S>,
}

impl<S: Mono> PlanarBuffer<S> {
    /// Lease a `width × height × 3` buffer from the pool. Contents are
    /// unspecified until written.
    pub fn new(width: usize, height: usize) -> Result<Self, ImageError> {
        check_dims(width, height)?;
        Ok(Self {
            width,
            height,
            data: pool::rent(PLANAR_CHANNELS * width * height),
        })
    }

    /// Build a buffer by copying `source`, which must hold exactly
    /// `3 · width · height` elements in channel-then-row-major order.
    pub fn from_slice(width: usize, height: usize, source: &[S]) -> Result<Self, ImageError> {
        check_dims(width, height)?;
        let expected = PLANAR_CHANNELS * width * height;
        if source.len() != expected {
            return Err(ImageError::ShapeMismatch {
                expected,
                actual: source.len(),
            });
        }
        let mut data = pool::rent(expected);
        data.copy_from_slice(source);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn channels(&self) -> usize {
        PLANAR_CHANNELS
    }

    /// Format tag of this buffer.
    pub fn pixel_format(&self) -> PixelFormat {
        S::PLANAR_FORMAT
    }

    fn check_channel(&self, c: usize) -> Result<(), ImageError> {
        if c >= PLANAR_CHANNELS {
            return Err(ImageError::InvalidArgument(format!(
                "channel {c} outside channel count {PLANAR_CHANNELS}"
            )));
        }
        Ok(())
    }

    /// Borrow plane `c`, exactly `width · height` elements.
    pub fn channel(&self, c: usize) -> Result<&[S], ImageError> {
        self.check_channel(c)?;
        let plane = self.width * self.height;
        Ok(&self.data[c * plane..(c + 1) * plane])
    }

    /// Mutably borrow plane `c`.
    pub fn channel_mut(&mut self, c: usize) -> Result<&mut [S], ImageError> {
        self.check_channel(c)?;
        let plane = self.width * self.height;
        Ok(&mut self.data[c * plane..(c + 1) * plane])
    }

    /// Borrow plane `c` as a read-only single-plane view.
    pub fn channel_view(&self, c: usize) -> Result<PlaneView<'_, S>, ImageError> {
        Ok(PlaneView {
            width: self.width,
            height: self.height,
            data: self.channel(c)?,
        })
    }

    /// Borrow row `y` of plane `c`, exactly `width` elements.
    pub fn row(&self, c: usize, y: usize) -> Result<&[S], ImageError> {
        let plane = self.channel(c)?;
        if y >= self.height {
            return Err(ImageError::InvalidArgument(format!(
                "row {y} outside height {}",
                self.height
            )));
        }
        let start = y * self.width;
        Ok(&plane[start..start + self.width])
    }

    /// Value at `(x, y)` of plane `c`.
    pub fn get(&self, c: usize, x: usize, y: usize) -> Result<S, ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::InvalidArgument(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        Ok(self.channel(c)?[y * self.width + x])
    }

    /// Store `value` at `(x, y)` of plane `c`.
    pub fn set(&mut self, c: usize, x: usize, y: usize, value: S) -> Result<(), ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::InvalidArgument(format!(
                "pixel ({x}, {y}) outside {}x{}",
                self.width, self.height
            )));
        }
        let width = self.width;
        self.channel_mut(c)?[y * width + x] = value;
        Ok(())
    }

    /// All three planes as one channel-then-row-major slice.
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [S] {
        &mut self.data
    }
}

impl<S: Mono> Clone for PlanarBuffer<S> {
    fn clone(&self) -> Self {
        let mut data = pool::rent(self.data.len());
        data.copy_from_slice(&self.data);
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl<S: Mono> PartialEq for PlanarBuffer<S> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && *self.data == *other.data
    }
}

impl<S: Mono> std::fmt::Debug for PlanarBuffer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanarBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.pixel_format())
            .finish()
    }
}

/// Read-only view of one plane of a [`PlanarBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct PlaneView<'a, S> {
    width: usize,
    height: usize,
    data: &'a [S],
}

impl<S: Mono> BufferView for PlaneView<'_, S> {
    type Pixel = S;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[S] {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_holds_three_planes() {
        let buffer = PlanarBuffer::<u8>::new(4, 2).unwrap();
        assert_eq!(buffer.as_slice().len(), 24);
        assert_eq!(buffer.channel(2).unwrap().len(), 8);
    }

    #[test]
    fn channel_addressing() {
        let source: Vec<u16> = (0..12).collect();
        let buffer = PlanarBuffer::from_slice(2, 2, &source).unwrap();
        assert_eq!(buffer.channel(0).unwrap(), &[0, 1, 2, 3]);
        assert_eq!(buffer.channel(1).unwrap(), &[4, 5, 6, 7]);
        assert_eq!(buffer.channel(2).unwrap(), &[8, 9, 10, 11]);
        assert_eq!(buffer.row(1, 1).unwrap(), &[6, 7]);
        assert_eq!(buffer.get(2, 1, 0).unwrap(), 9);
    }

    #[test]
    fn out_of_range_signals_invalid_argument() {
        let buffer = PlanarBuffer::<u8>::new(2, 2).unwrap();
        assert!(buffer.channel(3).is_err());
        assert!(buffer.row(0, 2).is_err());
        assert!(buffer.get(0, 2, 0).is_err());
    }

    #[test]
    fn wrong_source_length_is_a_shape_mismatch() {
        let err = PlanarBuffer::from_slice(2, 2, &[0u8; 11]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::ShapeMismatch {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn clone_is_deep_and_equality_structural() {
        let source: Vec<u8> = (0..12).collect();
        let original = PlanarBuffer::from_slice(2, 2, &source).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);
        copy.set(0, 0, 0, 200).unwrap();
        assert_ne!(copy, original);
    }

    #[test]
    fn plane_view_is_a_buffer_view() {
        let source: Vec<u8> = (0..12).collect();
        let buffer = PlanarBuffer::from_slice(2, 2, &source).unwrap();
        let view = buffer.channel_view(1).unwrap();
        assert_eq!(view.width(), 2);
        assert_eq!(view.at(1, 1), 7);
        assert_eq!(view.rows().count(), 2);
    }
}
