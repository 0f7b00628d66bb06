mod common;

use common::synthetic_image::{checkerboard_u8, gradient_rgb24};
use image_torque::{
    BufferView, Image, PackedBuffer, PixelFormat, PlanarBuffer, ResizeMethod, ResizeOptions,
};

#[test]
fn nearest_identity_resize_copies_the_source() {
    let source = PackedBuffer::from_slice(2, 2, &[10u8, 20, 30, 40]).unwrap();
    let image = Image::new(source.clone().into());
    let resized = image
        .resize(2, 2, &ResizeOptions::new(ResizeMethod::NearestNeighbour))
        .unwrap();
    assert_eq!(
        resized.as_packed::<u8>().unwrap().as_slice(),
        source.as_slice()
    );
}

#[test]
fn bilinear_downscale_of_constant_image_is_constant() {
    let image = Image::new(PackedBuffer::from_slice(4, 4, &[128u8; 16]).unwrap().into());
    let resized = image
        .resize(2, 2, &ResizeOptions::new(ResizeMethod::Bilinear))
        .unwrap();
    assert_eq!(resized.as_packed::<u8>().unwrap().as_slice(), &[128u8; 4]);
}

#[test]
fn bicubic_constant_image_is_constant() {
    let image = Image::new(PackedBuffer::from_slice(5, 5, &[200u8; 25]).unwrap().into());
    let resized = image
        .resize(9, 3, &ResizeOptions::new(ResizeMethod::Bicubic))
        .unwrap();
    assert_eq!(resized.as_packed::<u8>().unwrap().as_slice(), &[200u8; 27]);
}

#[test]
fn every_method_yields_the_requested_dimensions() {
    let image = Image::new(
        PackedBuffer::from_slice(8, 6, &checkerboard_u8(8, 6, 2))
            .unwrap()
            .into(),
    );
    for method in [
        ResizeMethod::NearestNeighbour,
        ResizeMethod::Bilinear,
        ResizeMethod::Bicubic,
    ] {
        for (w, h) in [(1, 1), (3, 9), (16, 2)] {
            let resized = image.resize(w, h, &ResizeOptions::new(method)).unwrap();
            assert_eq!(resized.size().unwrap(), (w, h));
        }
    }
}

#[test]
fn rgb_resize_keeps_the_format() {
    let image = Image::new(
        PackedBuffer::from_slice(6, 6, &gradient_rgb24(6, 6))
            .unwrap()
            .into(),
    );
    let resized = image
        .resize(3, 3, &ResizeOptions::new(ResizeMethod::Bilinear))
        .unwrap();
    assert_eq!(resized.pixel_format().unwrap(), PixelFormat::Rgb24Packed);
}

#[test]
fn planar_roots_resize_channel_by_channel() {
    let mut planes = Vec::new();
    for base in [10u8, 120, 240] {
        planes.extend(std::iter::repeat(base).take(16));
    }
    let image = Image::new(PlanarBuffer::from_slice(4, 4, &planes).unwrap().into());
    let resized = image
        .resize(2, 2, &ResizeOptions::new(ResizeMethod::Bilinear))
        .unwrap();
    assert_eq!(resized.pixel_format().unwrap(), PixelFormat::Rgb888Planar);
    let view = resized.as_planar::<u8>().unwrap();
    assert_eq!(view.channel(0).unwrap(), &[10; 4]);
    assert_eq!(view.channel(1).unwrap(), &[120; 4]);
    assert_eq!(view.channel(2).unwrap(), &[240; 4]);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_hint_does_not_change_the_result() {
    let image = Image::new(
        PackedBuffer::from_slice(16, 16, &checkerboard_u8(16, 16, 3))
            .unwrap()
            .into(),
    );
    for method in [
        ResizeMethod::NearestNeighbour,
        ResizeMethod::Bilinear,
        ResizeMethod::Bicubic,
    ] {
        let sequential = image.resize(7, 11, &ResizeOptions::new(method)).unwrap();
        let parallel = image
            .resize(
                7,
                11,
                &ResizeOptions::new(method).with_max_parallelism(8),
            )
            .unwrap();
        assert_eq!(
            sequential.as_packed::<u8>().unwrap().as_slice(),
            parallel.as_packed::<u8>().unwrap().as_slice()
        );
    }
}
