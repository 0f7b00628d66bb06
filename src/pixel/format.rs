//! The flat pixel-format tag and its (layout, element kind) bijection.
use super::PixelKind;
use crate::error::ImageError;

/// Channel organisation of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferLayout {
    /// One element per pixel in row-major order; the element itself may be
    /// a compound RGB triple.
    Packed,
    /// Three separately-stored monochrome planes.
    Planar,
}

/// Tag for the nine recognised (layout, element kind) combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Packed normalised-float luminance.
    Mono,
    /// Packed 8-bit luminance.
    Mono8,
    /// Packed 16-bit luminance.
    Mono16,
    /// Packed normalised-float RGB.
    RgbPacked,
    /// Packed 8-bit-per-channel RGB.
    Rgb24Packed,
    /// Packed 16-bit-per-channel RGB.
    Rgb48Packed,
    /// Three normalised-float planes.
    RgbPlanar,
    /// Three 8-bit planes.
    Rgb888Planar,
    /// Three 16-bit planes.
    Rgb161616Planar,
}

impl PixelFormat {
    /// Map a (layout, element kind) pair to its format tag.
    ///
    /// Planar layouts store monochrome elements only; pairing them with an
    /// RGB element kind is unsupported.
    pub fn from_parts(layout: BufferLayout, kind: PixelKind) -> Result<PixelFormat, ImageError> {
        match (layout, kind) {
            (BufferLayout::Packed, PixelKind::L) => Ok(PixelFormat::Mono),
            (BufferLayout::Packed, PixelKind::L8) => Ok(PixelFormat::Mono8),
            (BufferLayout::Packed, PixelKind::L16) => Ok(PixelFormat::Mono16),
            (BufferLayout::Packed, PixelKind::Rgb) => Ok(PixelFormat::RgbPacked),
            (BufferLayout::Packed, PixelKind::Rgb24) => Ok(PixelFormat::Rgb24Packed),
            (BufferLayout::Packed, PixelKind::Rgb48) => Ok(PixelFormat::Rgb48Packed),
            (BufferLayout::Planar, PixelKind::L) => Ok(PixelFormat::RgbPlanar),
            (BufferLayout::Planar, PixelKind::L8) => Ok(PixelFormat::Rgb888Planar),
            (BufferLayout::Planar, PixelKind::L16) => Ok(PixelFormat::Rgb161616Planar),
            (BufferLayout::Planar, kind) => Err(ImageError::UnsupportedFormat(format!(
                "no planar form for {kind:?}"
            ))),
        }
    }

    /// The (layout, element kind) pair behind this tag.
    pub fn parts(self) -> (BufferLayout, PixelKind) {
        match self {
            PixelFormat::Mono => (BufferLayout::Packed, PixelKind::L),
            PixelFormat::Mono8 => (BufferLayout::Packed, PixelKind::L8),
            PixelFormat::Mono16 => (BufferLayout::Packed, PixelKind::L16),
            PixelFormat::RgbPacked => (BufferLayout::Packed, PixelKind::Rgb),
            PixelFormat::Rgb24Packed => (BufferLayout::Packed, PixelKind::Rgb24),
            PixelFormat::Rgb48Packed => (BufferLayout::Packed, PixelKind::Rgb48),
            PixelFormat::RgbPlanar => (BufferLayout::Planar, PixelKind::L),
            PixelFormat::Rgb888Planar => (BufferLayout::Planar, PixelKind::L8),
            PixelFormat::Rgb161616Planar => (BufferLayout::Planar, PixelKind::L16),
        }
    }

    /// Channel organisation of this format.
    pub fn layout(self) -> BufferLayout {
        self.parts().0
    }

    /// Element kind stored by this format.
    pub fn kind(self) -> PixelKind {
        self.parts().1
    }

    /// True for every RGB format, planar ones included (their three planes
    /// are the R/G/B channels of a colour image).
    pub fn is_color(self) -> bool {
        !matches!(
            self,
            PixelFormat::Mono | PixelFormat::Mono8 | PixelFormat::Mono16
        )
    }
}
