//! Ordered conversion table between element kinds.
//!
//! `FromPixel<P>` is the target-directed face of the `to_*` methods on
//! [`Pixel`]: one impl per ordered (source, target) pair, so generic code
//! can name exactly the conversions it needs.
use super::{Pixel, Rgb, Rgb24, Rgb48};

/// Construction of this element kind from another.
pub trait FromPixel<P>: Sized {
    fn from_pixel(pixel: P) -> Self;
}

macro_rules! from_pixel {
    ($dst:ty: $($src:ty => $to:ident),+ $(,)?) => {
        $(
            impl FromPixel<$src> for $dst {
                #[inline]
                fn from_pixel(pixel: $src) -> Self {
                    pixel.$to()
                }
            }
        )+
    };
}

from_pixel!(u8:
    u8 => to_l8, u16 => to_l8, f32 => to_l8,
    Rgb24 => to_l8, Rgb48 => to_l8, Rgb => to_l8,
);
from_pixel!(u16:
    u8 => to_l16, u16 => to_l16, f32 => to_l16,
    Rgb24 => to_l16, Rgb48 => to_l16, Rgb => to_l16,
);
from_pixel!(f32:
    u8 => to_l, u16 => to_l, f32 => to_l,
    Rgb24 => to_l, Rgb48 => to_l, Rgb => to_l,
);
from_pixel!(Rgb24:
    u8 => to_rgb24, u16 => to_rgb24, f32 => to_rgb24,
    Rgb24 => to_rgb24, Rgb48 => to_rgb24, Rgb => to_rgb24,
);
from_pixel!(Rgb48:
    u8 => to_rgb48, u16 => to_rgb48, f32 => to_rgb48,
    Rgb24 => to_rgb48, Rgb48 => to_rgb48, Rgb => to_rgb48,
);
from_pixel!(Rgb:
    u8 => to_rgb, u16 => to_rgb, f32 => to_rgb,
    Rgb24 => to_rgb, Rgb48 => to_rgb, Rgb => to_rgb,
);

/// Element kinds constructible from every other kind.
///
/// All six supported kinds qualify; the alias exists so conversion targets
/// can be named with a single bound.
pub trait ConvertPixel:
    Pixel
    + FromPixel<u8>
    + FromPixel<u16>
    + FromPixel<f32>
    + FromPixel<Rgb24>
    + FromPixel<Rgb48>
    + FromPixel<Rgb>
{
}

impl<T> ConvertPixel for T where
    T: Pixel
        + FromPixel<u8>
        + FromPixel<u16>
        + FromPixel<f32>
        + FromPixel<Rgb24>
        + FromPixel<Rgb48>
        + FromPixel<Rgb>
{
}
