mod common;

use common::synthetic_image::gradient_rgb24;
use image_torque::{
    BufferView, Image, ImageError, PackedBuffer, PixelFormat, PlanarBuffer, Rgb24,
};

#[test]
fn packed_rgb_planar_view_splits_channels() {
    let pixels = [
        Rgb24 { r: 0, g: 0, b: 0 },
        Rgb24 { r: 1, g: 2, b: 3 },
        Rgb24 { r: 4, g: 5, b: 6 },
        Rgb24 {
            r: 255,
            g: 255,
            b: 255,
        },
    ];
    let image = Image::new(PackedBuffer::from_slice(2, 2, &pixels).unwrap().into());

    let planar = image.as_planar::<u8>().unwrap();
    assert_eq!(planar.channel(0).unwrap(), &[0, 1, 4, 255]);
    assert_eq!(planar.channel(1).unwrap(), &[0, 2, 5, 255]);
    assert_eq!(planar.channel(2).unwrap(), &[0, 3, 6, 255]);
}

#[test]
fn normalised_float_converts_to_l8() {
    let image = Image::new(
        PackedBuffer::from_slice(2, 2, &[0.0f32, 0.003_921_569, 0.501_960_8, 1.0])
            .unwrap()
            .into(),
    );
    let l8 = image.as_packed::<u8>().unwrap();
    assert_eq!(l8.as_slice(), &[0, 1, 128, 255]);
}

#[test]
fn grayscale_of_pure_red_is_76() {
    let image = Image::new(
        PackedBuffer::from_slice(1, 1, &[Rgb24 { r: 255, g: 0, b: 0 }])
            .unwrap()
            .into(),
    );
    let grey = image.grayscale().unwrap();
    assert_eq!(grey.as_packed::<u8>().unwrap().get(0, 0).unwrap(), 76);
}

#[test]
fn repeated_views_share_one_buffer() {
    let image = Image::new(
        PackedBuffer::from_slice(4, 4, &gradient_rgb24(4, 4))
            .unwrap()
            .into(),
    );
    let a = image.as_packed::<u16>().unwrap();
    let b = image.as_packed::<u16>().unwrap();
    assert!(a.same_buffer(&b));

    let pa = image.as_planar::<f32>().unwrap();
    let pb = image.as_planar::<f32>().unwrap();
    assert!(pa.same_buffer(&pb));
}

#[test]
fn released_images_reject_views() {
    let image = Image::new(
        PackedBuffer::from_slice(2, 2, &gradient_rgb24(2, 2))
            .unwrap()
            .into(),
    );
    image.release();
    assert!(matches!(image.as_packed::<u8>(), Err(ImageError::Disposed)));
    assert!(matches!(image.as_planar::<u8>(), Err(ImageError::Disposed)));
    assert!(matches!(image.pixel_format(), Err(ImageError::Disposed)));
    // Releasing again is harmless.
    image.release();
}

#[test]
fn equality_is_an_equivalence_over_root_state() {
    let make = || {
        Image::new(
            PackedBuffer::from_slice(3, 2, &gradient_rgb24(3, 2))
                .unwrap()
                .into(),
        )
    };
    let a = make();
    let b = make();
    let c = make();
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_eq!(b, c);
    assert_eq!(a, c);

    let different = Image::new(
        PackedBuffer::from_slice(2, 3, &gradient_rgb24(2, 3))
            .unwrap()
            .into(),
    );
    assert_ne!(a, different);
}

#[test]
fn planar_roots_interleave_on_demand() {
    let planes: Vec<u16> = (0..12).map(|v| v * 1000).collect();
    let image = Image::new(PlanarBuffer::from_slice(2, 2, &planes).unwrap().into());
    assert_eq!(image.pixel_format().unwrap(), PixelFormat::Rgb161616Planar);
    assert!(image.is_color().unwrap());

    let packed = image.as_packed::<image_torque::Rgb48>().unwrap();
    assert_eq!(
        packed.get(0, 0).unwrap(),
        image_torque::Rgb48 {
            r: 0,
            g: 4000,
            b: 8000
        }
    );
}

#[test]
fn grayscaled_planar_view_has_three_identical_planes() {
    let image = Image::new(
        PackedBuffer::from_slice(2, 2, &gradient_rgb24(2, 2))
            .unwrap()
            .into(),
    );
    let grey = image.grayscale().unwrap();
    let planes = grey.as_planar::<u8>().unwrap();
    let first = planes.channel(0).unwrap().to_vec();
    assert_eq!(planes.channel(1).unwrap(), &first[..]);
    assert_eq!(planes.channel(2).unwrap(), &first[..]);
}
