//! Erased pixel buffer: a tagged union over every supported shape.
//!
//! Decoders and the conversion engine hand buffers around without naming
//! the concrete element type; dispatch happens by matching the variant
//! rather than through reflection or `Any`.
use super::{PackedBuffer, PlanarBuffer};
use crate::pixel::{PixelFormat, Rgb, Rgb24, Rgb48};

/// An owned pixel buffer of any supported (layout, element kind) shape.
///
/// `Clone` leases fresh backing storage per variant, so a clone is a fully
/// independent deep copy.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyImageBuffer {
    PackedL8(PackedBuffer<u8>),
    PackedL16(PackedBuffer<u16>),
    PackedL(PackedBuffer<f32>),
    PackedRgb24(PackedBuffer<Rgb24>),
    PackedRgb48(PackedBuffer<Rgb48>),
    PackedRgb(PackedBuffer<Rgb>),
    PlanarL8(PlanarBuffer<u8>),
    PlanarL16(PlanarBuffer<u16>),
    PlanarL(PlanarBuffer<f32>),
}

impl AnyImageBuffer {
    pub fn width(&self) -> usize {
        match self {
            AnyImageBuffer::PackedL8(b) => b.width(),
            AnyImageBuffer::PackedL16(b) => b.width(),
            AnyImageBuffer::PackedL(b) => b.width(),
            AnyImageBuffer::PackedRgb24(b) => b.width(),
            AnyImageBuffer::PackedRgb48(b) => b.width(),
            AnyImageBuffer::PackedRgb(b) => b.width(),
            AnyImageBuffer::PlanarL8(b) => b.width(),
            AnyImageBuffer::PlanarL16(b) => b.width(),
            AnyImageBuffer::PlanarL(b) => b.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            AnyImageBuffer::PackedL8(b) => b.height(),
            AnyImageBuffer::PackedL16(b) => b.height(),
            AnyImageBuffer::PackedL(b) => b.height(),
            AnyImageBuffer::PackedRgb24(b) => b.height(),
            AnyImageBuffer::PackedRgb48(b) => b.height(),
            AnyImageBuffer::PackedRgb(b) => b.height(),
            AnyImageBuffer::PlanarL8(b) => b.height(),
            AnyImageBuffer::PlanarL16(b) => b.height(),
            AnyImageBuffer::PlanarL(b) => b.height(),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Format tag of the contained buffer.
    pub fn pixel_format(&self) -> PixelFormat {
        match self {
            AnyImageBuffer::PackedL8(_) => PixelFormat::Mono8,
            AnyImageBuffer::PackedL16(_) => PixelFormat::Mono16,
            AnyImageBuffer::PackedL(_) => PixelFormat::Mono,
            AnyImageBuffer::PackedRgb24(_) => PixelFormat::Rgb24Packed,
            AnyImageBuffer::PackedRgb48(_) => PixelFormat::Rgb48Packed,
            AnyImageBuffer::PackedRgb(_) => PixelFormat::RgbPacked,
            AnyImageBuffer::PlanarL8(_) => PixelFormat::Rgb888Planar,
            AnyImageBuffer::PlanarL16(_) => PixelFormat::Rgb161616Planar,
            AnyImageBuffer::PlanarL(_) => PixelFormat::RgbPlanar,
        }
    }

    pub fn is_color(&self) -> bool {
        self.pixel_format().is_color()
    }
}

impl From<PackedBuffer<u8>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<u8>) -> Self {
        AnyImageBuffer::PackedL8(buffer)
    }
}

impl From<PackedBuffer<u16>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<u16>) -> Self {
        AnyImageBuffer::PackedL16(buffer)
    }
}

impl From<PackedBuffer<f32>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<f32>) -> Self {
        AnyImageBuffer::PackedL(buffer)
    }
}

impl From<PackedBuffer<Rgb24>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<Rgb24>) -> Self {
        AnyImageBuffer::PackedRgb24(buffer)
    }
}

impl From<PackedBuffer<Rgb48>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<Rgb48>) -> Self {
        AnyImageBuffer::PackedRgb48(buffer)
    }
}

impl From<PackedBuffer<Rgb>> for AnyImageBuffer {
    fn from(buffer: PackedBuffer<Rgb>) -> Self {
        AnyImageBuffer::PackedRgb(buffer)
    }
}

impl From<PlanarBuffer<u8>> for AnyImageBuffer {
    fn from(buffer: PlanarBuffer<u8>) -> Self {
        AnyImageBuffer::PlanarL8(buffer)
    }
}

impl From<PlanarBuffer<u16>> for AnyImageBuffer {
    fn from(buffer: PlanarBuffer<u16>) -> Self {
        AnyImageBuffer::PlanarL16(buffer)
    }
}

impl From<PlanarBuffer<f32>> for AnyImageBuffer {
    fn from(buffer: PlanarBuffer<f32>) -> Self {
        AnyImageBuffer::PlanarL(buffer)
    }
}
