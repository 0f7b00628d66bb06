//! Pixel element kinds and the conversion rules between them.
//!
//! Six kinds are supported: three monochrome depths (`u8`, `u16`, and `f32`
//! normalised to [0, 1]) and three RGB depths ([`Rgb24`], [`Rgb48`], and the
//! normalised-float [`Rgb`]). Conversions are lossy by construction:
//! 8↔16-bit luminance moves by bit replication and truncation, float
//! luminance scales by the integer range (rounding on the way down), and
//! colour collapses to grey through the CCIR 601 weights
//! `0.299·R + 0.587·G + 0.114·B`, evaluated at the grey target's depth
//! after componentwise depth conversion. Values saturate at the
//! destination range and never wrap.
mod convert;
mod format;

pub use convert::{ConvertPixel, FromPixel};
pub use format::{BufferLayout, PixelFormat};

/// 8-bit-per-channel RGB element.
pub type Rgb24 = rgb::RGB<u8>;
/// 16-bit-per-channel RGB element.
pub type Rgb48 = rgb::RGB<u16>;
/// Normalised-float RGB element, components in [0, 1].
pub type Rgb = rgb::RGB<f32>;

/// Tag identifying one of the six supported element kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelKind {
    /// 8-bit luminance (`u8`).
    L8,
    /// 16-bit luminance (`u16`).
    L16,
    /// Normalised-float luminance (`f32` in [0, 1]).
    L,
    /// 8-bit-per-channel RGB.
    Rgb24,
    /// 16-bit-per-channel RGB.
    Rgb48,
    /// Normalised-float RGB.
    Rgb,
}

impl PixelKind {
    /// Whether this kind carries colour information.
    pub fn is_color(self) -> bool {
        matches!(self, PixelKind::Rgb24 | PixelKind::Rgb48 | PixelKind::Rgb)
    }

    /// Size of one element in bytes.
    pub fn bytes_per_element(self) -> usize {
        match self {
            PixelKind::L8 => 1,
            PixelKind::L16 => 2,
            PixelKind::L => 4,
            PixelKind::Rgb24 => 3,
            PixelKind::Rgb48 => 6,
            PixelKind::Rgb => 12,
        }
    }
}

pub(crate) mod sealed {
    use crate::buffer::{AnyImageBuffer, PackedBuffer, PlanarBuffer};

    /// Buffer-wrapping plumbing for the closed set of element kinds.
    pub trait Sealed: Sized {
        fn wrap_packed(buffer: PackedBuffer<Self>) -> AnyImageBuffer;
        fn packed_ref(any: &AnyImageBuffer) -> Option<&PackedBuffer<Self>>;
    }

    /// Plumbing for the kinds a planar buffer can store.
    pub trait SealedMono: Sealed {
        fn wrap_planar(buffer: PlanarBuffer<Self>) -> AnyImageBuffer;
        fn planar_ref(any: &AnyImageBuffer) -> Option<&PlanarBuffer<Self>>;
    }

    macro_rules! sealed_packed {
        ($ty:ty, $variant:ident) => {
            impl Sealed for $ty {
                fn wrap_packed(buffer: PackedBuffer<Self>) -> AnyImageBuffer {
                    AnyImageBuffer::$variant(buffer)
                }
                fn packed_ref(any: &AnyImageBuffer) -> Option<&PackedBuffer<Self>> {
                    match any {
                        AnyImageBuffer::$variant(buffer) => Some(buffer),
                        _ => None,
                    }
                }
            }
        };
    }

    macro_rules! sealed_planar {
        ($ty:ty, $variant:ident) => {
            impl SealedMono for $ty {
                fn wrap_planar(buffer: PlanarBuffer<Self>) -> AnyImageBuffer {
                    AnyImageBuffer::$variant(buffer)
                }
                fn planar_ref(any: &AnyImageBuffer) -> Option<&PlanarBuffer<Self>> {
                    match any {
                        AnyImageBuffer::$variant(buffer) => Some(buffer),
                        _ => None,
                    }
                }
            }
        };
    }

    sealed_packed!(u8, PackedL8);
    sealed_packed!(u16, PackedL16);
    sealed_packed!(f32, PackedL);
    sealed_packed!(super::Rgb24, PackedRgb24);
    sealed_packed!(super::Rgb48, PackedRgb48);
    sealed_packed!(super::Rgb, PackedRgb);

    sealed_planar!(u8, PlanarL8);
    sealed_planar!(u16, PlanarL16);
    sealed_planar!(f32, PlanarL);
}

/// A pixel element value.
///
/// Every kind can render itself as any other kind through the `to_*`
/// methods; the method for the element's own kind is the identity.
pub trait Pixel:
    sealed::Sealed + bytemuck::Pod + Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static
{
    /// Tag for this element kind.
    const KIND: PixelKind;
    /// Format of a packed buffer of this kind.
    const PACKED_FORMAT: PixelFormat;

    fn to_l8(self) -> u8;
    fn to_l16(self) -> u16;
    fn to_l(self) -> f32;
    fn to_rgb24(self) -> Rgb24;
    fn to_rgb48(self) -> Rgb48;
    fn to_rgb(self) -> Rgb;
}

/// Monochrome element kinds, the only kinds a planar buffer can store.
pub trait Mono: Pixel + ConvertPixel + sealed::SealedMono {
    /// Packed RGB element with this component depth.
    type Triple: Pixel + ConvertPixel;
    /// Format of a three-plane buffer of this kind.
    const PLANAR_FORMAT: PixelFormat;

    fn triple(r: Self, g: Self, b: Self) -> Self::Triple;
    fn components(triple: Self::Triple) -> [Self; 3];
}

impl Pixel for u8 {
    const KIND: PixelKind = PixelKind::L8;
    const PACKED_FORMAT: PixelFormat = PixelFormat::Mono8;

    #[inline]
    fn to_l8(self) -> u8 {
        self
    }
    #[inline]
    fn to_l16(self) -> u16 {
        // Bit replication: 0xAB -> 0xABAB.
        u16::from(self) * 257
    }
    #[inline]
    fn to_l(self) -> f32 {
        f32::from(self) / 255.0
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        Rgb24 {
            r: self,
            g: self,
            b: self,
        }
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        let v = self.to_l16();
        Rgb48 { r: v, g: v, b: v }
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        let v = self.to_l();
        Rgb { r: v, g: v, b: v }
    }
}

impl Pixel for u16 {
    const KIND: PixelKind = PixelKind::L16;
    const PACKED_FORMAT: PixelFormat = PixelFormat::Mono16;

    #[inline]
    fn to_l8(self) -> u8 {
        (self >> 8) as u8
    }
    #[inline]
    fn to_l16(self) -> u16 {
        self
    }
    #[inline]
    fn to_l(self) -> f32 {
        f32::from(self) / 65535.0
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        let v = self.to_l8();
        Rgb24 { r: v, g: v, b: v }
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        Rgb48 {
            r: self,
            g: self,
            b: self,
        }
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        let v = self.to_l();
        Rgb { r: v, g: v, b: v }
    }
}

impl Pixel for f32 {
    const KIND: PixelKind = PixelKind::L;
    const PACKED_FORMAT: PixelFormat = PixelFormat::Mono;

    #[inline]
    fn to_l8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0).round() as u8
    }
    #[inline]
    fn to_l16(self) -> u16 {
        (self.clamp(0.0, 1.0) * 65535.0).round() as u16
    }
    #[inline]
    fn to_l(self) -> f32 {
        self
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        let v = self.to_l8();
        Rgb24 { r: v, g: v, b: v }
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        let v = self.to_l16();
        Rgb48 { r: v, g: v, b: v }
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        Rgb {
            r: self,
            g: self,
            b: self,
        }
    }
}

impl Pixel for Rgb24 {
    const KIND: PixelKind = PixelKind::Rgb24;
    const PACKED_FORMAT: PixelFormat = PixelFormat::Rgb24Packed;

    #[inline]
    fn to_l8(self) -> u8 {
        // CCIR 601 luminance over the 8-bit range, truncated.
        (0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)) as u8
    }
    #[inline]
    fn to_l16(self) -> u16 {
        self.to_rgb48().to_l16()
    }
    #[inline]
    fn to_l(self) -> f32 {
        self.to_rgb().to_l()
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        self
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        Rgb48 {
            r: self.r.to_l16(),
            g: self.g.to_l16(),
            b: self.b.to_l16(),
        }
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r.to_l(),
            g: self.g.to_l(),
            b: self.b.to_l(),
        }
    }
}

impl Pixel for Rgb48 {
    const KIND: PixelKind = PixelKind::Rgb48;
    const PACKED_FORMAT: PixelFormat = PixelFormat::Rgb48Packed;

    #[inline]
    fn to_l8(self) -> u8 {
        self.to_rgb24().to_l8()
    }
    #[inline]
    fn to_l16(self) -> u16 {
        // CCIR 601 luminance over the 16-bit range, truncated.
        (0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b)) as u16
    }
    #[inline]
    fn to_l(self) -> f32 {
        self.to_rgb().to_l()
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        Rgb24 {
            r: self.r.to_l8(),
            g: self.g.to_l8(),
            b: self.b.to_l8(),
        }
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        self
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.r.to_l(),
            g: self.g.to_l(),
            b: self.b.to_l(),
        }
    }
}

impl Pixel for Rgb {
    const KIND: PixelKind = PixelKind::Rgb;
    const PACKED_FORMAT: PixelFormat = PixelFormat::RgbPacked;

    #[inline]
    fn to_l8(self) -> u8 {
        self.to_rgb24().to_l8()
    }
    #[inline]
    fn to_l16(self) -> u16 {
        self.to_rgb48().to_l16()
    }
    #[inline]
    fn to_l(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
    #[inline]
    fn to_rgb24(self) -> Rgb24 {
        Rgb24 {
            r: self.r.to_l8(),
            g: self.g.to_l8(),
            b: self.b.to_l8(),
        }
    }
    #[inline]
    fn to_rgb48(self) -> Rgb48 {
        Rgb48 {
            r: self.r.to_l16(),
            g: self.g.to_l16(),
            b: self.b.to_l16(),
        }
    }
    #[inline]
    fn to_rgb(self) -> Rgb {
        self
    }
}

impl Mono for u8 {
    type Triple = Rgb24;
    const PLANAR_FORMAT: PixelFormat = PixelFormat::Rgb888Planar;

    #[inline]
    fn triple(r: Self, g: Self, b: Self) -> Rgb24 {
        Rgb24 { r, g, b }
    }
    #[inline]
    fn components(triple: Rgb24) -> [Self; 3] {
        [triple.r, triple.g, triple.b]
    }
}

impl Mono for u16 {
    type Triple = Rgb48;
    const PLANAR_FORMAT: PixelFormat = PixelFormat::Rgb161616Planar;

    #[inline]
    fn triple(r: Self, g: Self, b: Self) -> Rgb48 {
        Rgb48 { r, g, b }
    }
    #[inline]
    fn components(triple: Rgb48) -> [Self; 3] {
        [triple.r, triple.g, triple.b]
    }
}

impl Mono for f32 {
    type Triple = Rgb;
    const PLANAR_FORMAT: PixelFormat = PixelFormat::RgbPlanar;

    #[inline]
    fn triple(r: Self, g: Self, b: Self) -> Rgb {
        Rgb { r, g, b }
    }
    #[inline]
    fn components(triple: Rgb) -> [Self; 3] {
        [triple.r, triple.g, triple.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_bit_replication() {
        assert_eq!(0x00u8.to_l16(), 0x0000);
        assert_eq!(0xABu8.to_l16(), 0xABAB);
        assert_eq!(0xFFu8.to_l16(), 0xFFFF);
        assert_eq!(0xABCDu16.to_l8(), 0xAB);
    }

    #[test]
    fn float_luminance_rounds_and_saturates() {
        assert_eq!(0.0f32.to_l8(), 0);
        assert_eq!(1.0f32.to_l8(), 255);
        assert_eq!(0.003_921_569f32.to_l8(), 1);
        assert_eq!(0.501_960_8f32.to_l8(), 128);
        // Out-of-range floats clamp instead of wrapping.
        assert_eq!(2.0f32.to_l8(), 255);
        assert_eq!((-1.0f32).to_l8(), 0);
        assert_eq!(1.5f32.to_l16(), 65535);
    }

    #[test]
    fn rgb_luminance_truncates_at_the_target_depth() {
        let red = Rgb24 { r: 255, g: 0, b: 0 };
        assert_eq!(red.to_l8(), 76);
        // Components widen before the weights apply.
        assert_eq!(red.to_l16(), 19594);

        let red16 = Rgb48 {
            r: 65535,
            g: 0,
            b: 0,
        };
        assert_eq!(red16.to_l16(), 19594);
        assert_eq!(red16.to_l8(), 76);

        let red_f = Rgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        };
        assert!((red_f.to_l() - 0.299).abs() < 1e-6);
        assert_eq!(red_f.to_l8(), 76);
    }

    #[test]
    fn grey_to_rgb_replicates() {
        assert_eq!(
            128u8.to_rgb24(),
            Rgb24 {
                r: 128,
                g: 128,
                b: 128
            }
        );
        assert_eq!(
            0x80u8.to_rgb48(),
            Rgb48 {
                r: 0x8080,
                g: 0x8080,
                b: 0x8080
            }
        );
    }

    #[test]
    fn rgb_depth_conversion_is_componentwise() {
        let c = Rgb24 { r: 1, g: 2, b: 3 };
        assert_eq!(
            c.to_rgb48(),
            Rgb48 {
                r: 257,
                g: 514,
                b: 771
            }
        );
        assert_eq!(c.to_rgb48().to_rgb24(), c);
    }

    #[test]
    fn element_sizes() {
        assert_eq!(PixelKind::L8.bytes_per_element(), 1);
        assert_eq!(PixelKind::L16.bytes_per_element(), 2);
        assert_eq!(PixelKind::L.bytes_per_element(), 4);
        assert_eq!(PixelKind::Rgb24.bytes_per_element(), 3);
        assert_eq!(PixelKind::Rgb48.bytes_per_element(), 6);
        assert_eq!(PixelKind::Rgb.bytes_per_element(), 12);
    }
}
