//! Synthetic pixel data shared by the integration tests.
use image_torque::Rgb24;

/// Checkerboard of `cell`-square tiles over two arbitrary pixel values.
pub fn checkerboard<T: Copy>(width: usize, height: usize, cell: usize, dark: T, light: T) -> Vec<T> {
    assert!(cell > 0, "cell size must be positive");
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x / cell + y / cell) % 2 == 0 {
                    dark
                } else {
                    light
                }
            })
        })
        .collect()
}

/// High-contrast luminance checkerboard.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    checkerboard(width, height, cell, 16, 230)
}

/// Deterministic RGB ramp: every pixel differs from its neighbours.
pub fn gradient_rgb24(width: usize, height: usize) -> Vec<Rgb24> {
    let mut img = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            img.push(Rgb24 {
                r: (x * 31) as u8,
                g: (y * 57) as u8,
                b: ((x + y) * 13) as u8,
            });
        }
    }
    img
}
