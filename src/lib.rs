#![doc = include_str!("../README.md")]

// Public modules (stable surface)
pub mod buffer;
pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod image;
pub mod pixel;
pub mod pool;
pub mod resample;

// --- High-level re-exports -------------------------------------------------

// Main entry points: the image facade and its codec registry.
pub use crate::codec::{BmpCodec, Codec, JpegCodec, PngCodec};
pub use crate::config::Configuration;
pub use crate::error::ImageError;
pub use crate::image::{BinarizeMode, Image, PackedView, PlanarView};

// Buffer model.
pub use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer, PlanarBuffer, PlaneView};

// Pixel element kinds and formats.
pub use crate::pixel::{
    BufferLayout, ConvertPixel, FromPixel, Mono, Pixel, PixelFormat, PixelKind, Rgb, Rgb24, Rgb48,
};

// Resampling surface.
pub use crate::resample::{ResizeMethod, ResizeOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use image_torque::prelude::*;
///
/// # fn main() -> Result<(), ImageError> {
/// let image = Image::load_path("photo.png", &Configuration::default())?;
/// let thumb = image.resize(64, 64, &ResizeOptions::new(ResizeMethod::Bilinear))?;
/// thumb.save_path("thumb.png", &Configuration::default())?;
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer, PlanarBuffer};
    pub use crate::config::Configuration;
    pub use crate::error::ImageError;
    pub use crate::image::{BinarizeMode, Image};
    pub use crate::pixel::{PixelFormat, Rgb, Rgb24, Rgb48};
    pub use crate::resample::{ResizeMethod, ResizeOptions};
}
