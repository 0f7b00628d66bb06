//! Filters on the image facade: grayscale, mirroring, binarisation, and
//! resizing. Each produces a new owned image and leaves the source intact.
use super::Image;
use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer, PlanarBuffer, PLANAR_CHANNELS};
use crate::convert;
use crate::error::ImageError;
use crate::pixel::{Mono, Pixel, PixelFormat, PixelKind, Rgb};
use crate::resample::{self, ResizeOptions};

/// Thresholding criterion for [`Image::binarize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinarizeMode {
    /// Compare each pixel's luminance against the threshold.
    Luminance,
    /// Compare each pixel's saturation `(max − min) / max` against it.
    Saturation,
}

impl Image {
    /// Collapse to luminance, packed, at the source's component depth.
    ///
    /// Planar sources weigh all three planes; a monochrome source comes
    /// back as a plain copy.
    pub fn grayscale(&self) -> Result<Image, ImageError> {
        let root = self.root()?;
        let target = match root.pixel_format().kind() {
            PixelKind::L8 | PixelKind::Rgb24 => PixelFormat::Mono8,
            PixelKind::L16 | PixelKind::Rgb48 => PixelFormat::Mono16,
            PixelKind::L | PixelKind::Rgb => PixelFormat::Mono,
        };
        Ok(Image::new(convert::convert(&root, target)?))
    }

    /// Flip left-to-right.
    pub fn mirror_horizontal(&self) -> Result<Image, ImageError> {
        self.mirrored(true)
    }

    /// Flip top-to-bottom.
    pub fn mirror_vertical(&self) -> Result<Image, ImageError> {
        self.mirrored(false)
    }

    fn mirrored(&self, horizontal: bool) -> Result<Image, ImageError> {
        let root = self.root()?;
        let flipped = match &*root {
            AnyImageBuffer::PackedL8(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PackedL16(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PackedL(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PackedRgb24(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PackedRgb48(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PackedRgb(b) => mirror_packed(b, horizontal)?.into(),
            AnyImageBuffer::PlanarL8(b) => mirror_planar(b, horizontal)?.into(),
            AnyImageBuffer::PlanarL16(b) => mirror_planar(b, horizontal)?.into(),
            AnyImageBuffer::PlanarL(b) => mirror_planar(b, horizontal)?.into(),
        };
        Ok(Image::new(flipped))
    }

    /// Threshold to a two-level `Mono8` image (0 or 255).
    ///
    /// `threshold` must lie in [0, 1]; it compares against normalised
    /// luminance or saturation depending on `mode`. Monochrome sources
    /// have zero saturation everywhere.
    pub fn binarize(&self, threshold: f32, mode: BinarizeMode) -> Result<Image, ImageError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ImageError::InvalidArgument(format!(
                "threshold {threshold} outside [0, 1]"
            )));
        }
        let root = self.root()?;
        let (width, height) = root.size();
        let mut out = PackedBuffer::<u8>::new(width, height)?;
        match mode {
            BinarizeMode::Luminance => {
                let luma = convert::to_packed::<f32>(&root)?;
                for (dst, v) in out.as_mut_slice().iter_mut().zip(luma.as_slice()) {
                    *dst = if *v >= threshold { 255 } else { 0 };
                }
            }
            BinarizeMode::Saturation => {
                let rgb = convert::to_packed::<Rgb>(&root)?;
                for (dst, c) in out.as_mut_slice().iter_mut().zip(rgb.as_slice()) {
                    *dst = if saturation(*c) >= threshold { 255 } else { 0 };
                }
            }
        }
        Ok(Image::new(out.into()))
    }

    /// Resample the root to `width × height`, preserving its format.
    pub fn resize(
        &self,
        width: usize,
        height: usize,
        options: &ResizeOptions,
    ) -> Result<Image, ImageError> {
        let root = self.root()?;
        Ok(Image::new(resample::resize(&root, width, height, options)?))
    }
}

fn saturation(c: Rgb) -> f32 {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    if max <= 0.0 {
        0.0
    } else {
        (max - min) / max
    }
}

fn mirror_packed<T: Pixel>(
    source: &PackedBuffer<T>,
    horizontal: bool,
) -> Result<PackedBuffer<T>, ImageError> {
    let (width, height) = source.size();
    let mut out = PackedBuffer::new(width, height)?;
    for y in 0..height {
        let src = source.row(if horizontal { y } else { height - 1 - y })?;
        let dst = out.row_mut(y)?;
        if horizontal {
            for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
                *d = *s;
            }
        } else {
            dst.copy_from_slice(src);
        }
    }
    Ok(out)
}

fn mirror_planar<S: Mono>(
    source: &PlanarBuffer<S>,
    horizontal: bool,
) -> Result<PlanarBuffer<S>, ImageError> {
    let (width, height) = source.size();
    let mut out = PlanarBuffer::new(width, height)?;
    for c in 0..PLANAR_CHANNELS {
        for y in 0..height {
            let src = source.row(c, if horizontal { y } else { height - 1 - y })?;
            let plane = out.channel_mut(c)?;
            let dst = &mut plane[y * width..(y + 1) * width];
            if horizontal {
                for (d, s) in dst.iter_mut().zip(src.iter().rev()) {
                    *d = *s;
                }
            } else {
                dst.copy_from_slice(src);
            }
        }
    }
    Ok(out)
}
