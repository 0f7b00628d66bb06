//! Pixel buffers: owned packed and planar containers plus borrowed views.
//!
//! Components
//! - `packed`: owned `PackedBuffer<T>` with one (possibly compound) element
//!   per pixel in row-major order.
//! - `planar`: owned `PlanarBuffer<S>` storing an RGB image as three
//!   monochrome planes, and the borrowed `PlaneView` over one plane.
//! - `traits`: the read-only `BufferView` abstraction shared by packed
//!   buffers and planar channels.
//! - `any`: the `AnyImageBuffer` tagged union erasing the concrete shape.
//!
//! Every buffer leases its backing block from the process-wide pool and
//! returns it on drop. Cloning leases a fresh block and deep-copies;
//! equality is structural over dimensions and elements.
mod any;
mod packed;
mod planar;
mod traits;

pub use self::any::AnyImageBuffer;
pub use self::packed::PackedBuffer;
pub use self::planar::{PlanarBuffer, PlaneView};
pub use self::traits::BufferView;

use crate::error::ImageError;

/// Channel count of every planar buffer.
pub const PLANAR_CHANNELS: usize = 3;

pub(crate) fn check_dims(width: usize, height: usize) -> Result<(), ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidArgument(format!(
            "dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}
