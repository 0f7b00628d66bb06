//! Pixel-buffer conversion engine.
//!
//! Produces a packed or planar rendition of any source buffer in any
//! element kind. Element-only changes map each element through the rules in
//! [`crate::pixel`]; layout changes split packed RGB triples across planes
//! (or replicate a grey channel into all three) and interleave planes back,
//! collapsing to grey by luminance when the target is monochrome. Combined
//! changes are fused but bit-identical to element-only followed by
//! layout-only. The engine never mutates its source and never caches; the
//! image facade memoises results.
use log::debug;

use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer, PlanarBuffer};
use crate::error::ImageError;
use crate::pixel::{ConvertPixel, FromPixel, Mono, Pixel, PixelFormat};

/// Render `source` as a packed buffer of element kind `T`.
///
/// The output has the source's dimensions. Planar sources interleave; a
/// monochrome target collapses colour by luminance.
pub fn to_packed<T: ConvertPixel>(source: &AnyImageBuffer) -> Result<PackedBuffer<T>, ImageError> {
    match source {
        AnyImageBuffer::PackedL8(b) => map_packed(b),
        AnyImageBuffer::PackedL16(b) => map_packed(b),
        AnyImageBuffer::PackedL(b) => map_packed(b),
        AnyImageBuffer::PackedRgb24(b) => map_packed(b),
        AnyImageBuffer::PackedRgb48(b) => map_packed(b),
        AnyImageBuffer::PackedRgb(b) => map_packed(b),
        AnyImageBuffer::PlanarL8(b) => interleave(b),
        AnyImageBuffer::PlanarL16(b) => interleave(b),
        AnyImageBuffer::PlanarL(b) => interleave(b),
    }
}

/// Render `source` as a three-plane buffer of element kind `S`.
///
/// RGB sources split channel-by-channel {R→0, G→1, B→2}; monochrome
/// sources replicate the grey value into all three planes.
pub fn to_planar<S: Mono>(source: &AnyImageBuffer) -> Result<PlanarBuffer<S>, ImageError> {
    match source {
        AnyImageBuffer::PackedL8(b) => replicate(b),
        AnyImageBuffer::PackedL16(b) => replicate(b),
        AnyImageBuffer::PackedL(b) => replicate(b),
        AnyImageBuffer::PackedRgb24(b) => split(b),
        AnyImageBuffer::PackedRgb48(b) => split(b),
        AnyImageBuffer::PackedRgb(b) => split(b),
        AnyImageBuffer::PlanarL8(b) => map_planar(b),
        AnyImageBuffer::PlanarL16(b) => map_planar(b),
        AnyImageBuffer::PlanarL(b) => map_planar(b),
    }
}

/// Render `source` in `target` format, erased.
///
/// An identity request deep-copies the source.
pub fn convert(source: &AnyImageBuffer, target: PixelFormat) -> Result<AnyImageBuffer, ImageError> {
    if source.pixel_format() == target {
        return Ok(source.clone());
    }
    debug!("converting {:?} to {target:?}", source.pixel_format());
    Ok(match target {
        PixelFormat::Mono8 => AnyImageBuffer::PackedL8(to_packed(source)?),
        PixelFormat::Mono16 => AnyImageBuffer::PackedL16(to_packed(source)?),
        PixelFormat::Mono => AnyImageBuffer::PackedL(to_packed(source)?),
        PixelFormat::Rgb24Packed => AnyImageBuffer::PackedRgb24(to_packed(source)?),
        PixelFormat::Rgb48Packed => AnyImageBuffer::PackedRgb48(to_packed(source)?),
        PixelFormat::RgbPacked => AnyImageBuffer::PackedRgb(to_packed(source)?),
        PixelFormat::Rgb888Planar => AnyImageBuffer::PlanarL8(to_planar(source)?),
        PixelFormat::Rgb161616Planar => AnyImageBuffer::PlanarL16(to_planar(source)?),
        PixelFormat::RgbPlanar => AnyImageBuffer::PlanarL(to_planar(source)?),
    })
}

fn map_packed<S, T>(source: &PackedBuffer<S>) -> Result<PackedBuffer<T>, ImageError>
where
    S: Pixel,
    T: Pixel + FromPixel<S>,
{
    let mut out = PackedBuffer::new(source.width(), source.height())?;
    for (dst, src) in out.as_mut_slice().iter_mut().zip(source.as_slice()) {
        *dst = T::from_pixel(*src);
    }
    Ok(out)
}

fn interleave<S, T>(source: &PlanarBuffer<S>) -> Result<PackedBuffer<T>, ImageError>
where
    S: Mono,
    T: Pixel + FromPixel<S::Triple>,
{
    let (width, height) = source.size();
    let pixels = width * height;
    let mut out = PackedBuffer::new(width, height)?;
    let (r, rest) = source.as_slice().split_at(pixels);
    let (g, b) = rest.split_at(pixels);
    for (i, dst) in out.as_mut_slice().iter_mut().enumerate() {
        *dst = T::from_pixel(S::triple(r[i], g[i], b[i]));
    }
    Ok(out)
}

fn replicate<P, S>(source: &PackedBuffer<P>) -> Result<PlanarBuffer<S>, ImageError>
where
    P: Pixel,
    S: Mono + FromPixel<P>,
{
    let (width, height) = source.size();
    let pixels = width * height;
    let mut out = PlanarBuffer::new(width, height)?;
    let planes = out.as_mut_slice();
    for (i, src) in source.as_slice().iter().enumerate() {
        let grey = S::from_pixel(*src);
        planes[i] = grey;
        planes[pixels + i] = grey;
        planes[2 * pixels + i] = grey;
    }
    Ok(out)
}

fn split<P, S>(source: &PackedBuffer<P>) -> Result<PlanarBuffer<S>, ImageError>
where
    P: Pixel,
    S: Mono,
    S::Triple: FromPixel<P>,
{
    let (width, height) = source.size();
    let pixels = width * height;
    let mut out = PlanarBuffer::new(width, height)?;
    let planes = out.as_mut_slice();
    for (i, src) in source.as_slice().iter().enumerate() {
        let [r, g, b] = S::components(<S::Triple>::from_pixel(*src));
        planes[i] = r;
        planes[pixels + i] = g;
        planes[2 * pixels + i] = b;
    }
    Ok(out)
}

fn map_planar<A, S>(source: &PlanarBuffer<A>) -> Result<PlanarBuffer<S>, ImageError>
where
    A: Mono,
    S: Mono + FromPixel<A>,
{
    let mut out = PlanarBuffer::new(source.width(), source.height())?;
    for (dst, src) in out.as_mut_slice().iter_mut().zip(source.as_slice()) {
        *dst = S::from_pixel(*src);
    }
    Ok(out)
}
