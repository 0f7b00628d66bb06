//! Resampling engine: nearest-neighbour, bilinear, and bicubic resizers.
//!
//! Kernels run row-by-row over the destination; rows are independent, so
//! with `max_parallelism > 1` (and the `parallel` feature) they execute on
//! a bounded worker pool that joins before the call returns. Planar
//! buffers resample channel-by-channel with the scalar kernel.
mod kernels;
mod options;

pub use kernels::Sample;
pub use options::{ResizeMethod, ResizeOptions};

#[cfg(feature = "parallel")]
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer, PlanarBuffer, PLANAR_CHANNELS};
use crate::error::ImageError;
use crate::pixel::{Mono, Pixel};

/// Resize a packed buffer to `width × height`.
pub fn resize_packed<T>(
    source: &PackedBuffer<T>,
    width: usize,
    height: usize,
    options: &ResizeOptions,
) -> Result<PackedBuffer<T>, ImageError>
where
    T: Pixel + Sample,
{
    let mut out = PackedBuffer::new(width, height)?;
    resize_rows(source, out.as_mut_slice(), width, height, options);
    Ok(out)
}

/// Resize a planar buffer to `width × height`, one plane at a time.
pub fn resize_planar<S>(
    source: &PlanarBuffer<S>,
    width: usize,
    height: usize,
    options: &ResizeOptions,
) -> Result<PlanarBuffer<S>, ImageError>
where
    S: Mono + Sample,
{
    let mut out = PlanarBuffer::new(width, height)?;
    for c in 0..PLANAR_CHANNELS {
        let plane = source.channel_view(c)?;
        resize_rows(&plane, out.channel_mut(c)?, width, height, options);
    }
    Ok(out)
}

/// Resize an erased buffer, preserving its layout and element kind.
pub fn resize(
    source: &AnyImageBuffer,
    width: usize,
    height: usize,
    options: &ResizeOptions,
) -> Result<AnyImageBuffer, ImageError> {
    Ok(match source {
        AnyImageBuffer::PackedL8(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PackedL16(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PackedL(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PackedRgb24(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PackedRgb48(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PackedRgb(b) => resize_packed(b, width, height, options)?.into(),
        AnyImageBuffer::PlanarL8(b) => resize_planar(b, width, height, options)?.into(),
        AnyImageBuffer::PlanarL16(b) => resize_planar(b, width, height, options)?.into(),
        AnyImageBuffer::PlanarL(b) => resize_planar(b, width, height, options)?.into(),
    })
}

fn resize_rows<V>(
    source: &V,
    dst: &mut [V::Pixel],
    target_width: usize,
    target_height: usize,
    options: &ResizeOptions,
) where
    V: BufferView + Sync,
    V::Pixel: Sample + Send + Sync,
{
    let fill = |(y, row): (usize, &mut [V::Pixel])| match options.method {
        ResizeMethod::NearestNeighbour => {
            kernels::nearest_row(source, row, y, target_width, target_height)
        }
        ResizeMethod::Bilinear => {
            kernels::bilinear_row(source, row, y, target_width, target_height)
        }
        ResizeMethod::Bicubic => kernels::bicubic_row(source, row, y, target_width, target_height),
    };

    #[cfg(feature = "parallel")]
    if options.max_parallelism > 1 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(options.max_parallelism)
            .build()
        {
            Ok(pool) => {
                pool.install(|| dst.par_chunks_mut(target_width).enumerate().for_each(fill));
                return;
            }
            Err(err) => warn!("row-parallel resize unavailable ({err}); running sequentially"),
        }
    }

    dst.chunks_mut(target_width).enumerate().for_each(fill);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb24;

    fn gradient_u8() -> PackedBuffer<u8> {
        PackedBuffer::from_slice(2, 2, &[10u8, 20, 30, 40]).unwrap()
    }

    #[test]
    fn nearest_same_size_is_identity() {
        let source = gradient_u8();
        let out = resize_packed(&source, 2, 2, &ResizeOptions::default()).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn nearest_upscale_repeats_source_pixels() {
        let source = gradient_u8();
        let out = resize_packed(&source, 4, 4, &ResizeOptions::default()).unwrap();
        assert_eq!(out.row(0).unwrap(), &[10, 10, 20, 20]);
        assert_eq!(out.row(3).unwrap(), &[30, 30, 40, 40]);
    }

    #[test]
    fn bilinear_constant_image_stays_constant() {
        let source = PackedBuffer::from_slice(4, 4, &[128u8; 16]).unwrap();
        let out = resize_packed(&source, 2, 2, &ResizeOptions::new(ResizeMethod::Bilinear)).unwrap();
        assert_eq!(out.as_slice(), &[128u8; 4]);
    }

    #[test]
    fn bicubic_constant_image_stays_constant() {
        let source = PackedBuffer::from_slice(3, 3, &[0.25f32; 9]).unwrap();
        let out = resize_packed(&source, 7, 5, &ResizeOptions::new(ResizeMethod::Bicubic)).unwrap();
        for v in out.as_slice() {
            assert!((v - 0.25).abs() < 1e-6);
        }
    }

    #[test]
    fn output_dimensions_match_the_request() {
        let source = gradient_u8();
        for method in [
            ResizeMethod::NearestNeighbour,
            ResizeMethod::Bilinear,
            ResizeMethod::Bicubic,
        ] {
            for (w, h) in [(1, 1), (3, 5), (8, 2)] {
                let out = resize_packed(&source, w, h, &ResizeOptions::new(method)).unwrap();
                assert_eq!(out.size(), (w, h));
            }
        }
    }

    #[test]
    fn zero_target_dimensions_are_rejected() {
        let source = gradient_u8();
        assert!(matches!(
            resize_packed(&source, 0, 2, &ResizeOptions::default()),
            Err(ImageError::InvalidArgument(_))
        ));
    }

    #[test]
    fn planar_resize_works_per_channel() {
        let mut planes = Vec::new();
        for base in [0u8, 100, 200] {
            planes.extend((0..4).map(|i| base + i));
        }
        let source = PlanarBuffer::from_slice(2, 2, &planes).unwrap();
        let out = resize_planar(&source, 1, 1, &ResizeOptions::default()).unwrap();
        assert_eq!(out.channel(0).unwrap(), &[0]);
        assert_eq!(out.channel(1).unwrap(), &[100]);
        assert_eq!(out.channel(2).unwrap(), &[200]);
    }

    #[test]
    fn erased_resize_preserves_format() {
        let source = AnyImageBuffer::from(
            PackedBuffer::from_slice(
                2,
                1,
                &[Rgb24 { r: 1, g: 2, b: 3 }, Rgb24 { r: 4, g: 5, b: 6 }],
            )
            .unwrap(),
        );
        let out = resize(&source, 4, 4, &ResizeOptions::new(ResizeMethod::Bilinear)).unwrap();
        assert_eq!(out.pixel_format(), source.pixel_format());
        assert_eq!(out.size(), (4, 4));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let pixels: Vec<u8> = (0..64).map(|i| (i * 3) as u8).collect();
        let source = PackedBuffer::from_slice(8, 8, &pixels).unwrap();
        for method in [
            ResizeMethod::NearestNeighbour,
            ResizeMethod::Bilinear,
            ResizeMethod::Bicubic,
        ] {
            let sequential =
                resize_packed(&source, 5, 7, &ResizeOptions::new(method)).unwrap();
            let parallel = resize_packed(
                &source,
                5,
                7,
                &ResizeOptions::new(method).with_max_parallelism(4),
            )
            .unwrap();
            assert_eq!(parallel, sequential);
        }
    }
}
