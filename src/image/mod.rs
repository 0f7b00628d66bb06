//! Image facade: a root buffer plus memoised conversions and the
//! user-facing operations built on top of them.
mod io;
mod ops;

pub use ops::BinarizeMode;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::{Arc, Mutex};

use crate::buffer::{AnyImageBuffer, PackedBuffer, PlanarBuffer};
use crate::convert;
use crate::error::ImageError;
use crate::pixel::{BufferLayout, ConvertPixel, Mono, PixelFormat, PixelKind};

type CacheKey = (BufferLayout, PixelKind);

/// An in-memory image.
///
/// Owns the authoritative *root* buffer a decoder produced (or that was
/// handed in directly) plus a cache of converted renditions keyed by
/// (layout, element kind). The root registers under its own key, so asking
/// for the representation the decoder produced returns it without copying.
///
/// Concurrent view requests are safe. Two racing misses for the same key
/// may both run the conversion engine; the first insertion wins and the
/// loser's buffer drops immediately.
pub struct Image {
    inner: Mutex<Option<Cache>>,
}

struct Cache {
    root: Arc<AnyImageBuffer>,
    converted: HashMap<CacheKey, Arc<AnyImageBuffer>>,
}

impl Image {
    /// Take ownership of a root buffer.
    pub fn new(root: AnyImageBuffer) -> Self {
        let key = root.pixel_format().parts();
        let root = Arc::new(root);
        let mut converted = HashMap::new();
        converted.insert(key, Arc::clone(&root));
        Self {
            inner: Mutex::new(Some(Cache { root, converted })),
        }
    }

    pub(crate) fn root(&self) -> Result<Arc<AnyImageBuffer>, ImageError> {
        let guard = self.inner.lock().expect("image mutex poisoned");
        guard
            .as_ref()
            .map(|cache| Arc::clone(&cache.root))
            .ok_or(ImageError::Disposed)
    }

    pub fn width(&self) -> Result<usize, ImageError> {
        Ok(self.root()?.width())
    }

    pub fn height(&self) -> Result<usize, ImageError> {
        Ok(self.root()?.height())
    }

    pub fn size(&self) -> Result<(usize, usize), ImageError> {
        Ok(self.root()?.size())
    }

    /// Format of the root buffer.
    pub fn pixel_format(&self) -> Result<PixelFormat, ImageError> {
        Ok(self.root()?.pixel_format())
    }

    pub fn is_color(&self) -> Result<bool, ImageError> {
        Ok(self.root()?.is_color())
    }

    /// Packed rendition of element kind `T`, converted on first request
    /// and cached for the image's lifetime.
    pub fn as_packed<T: ConvertPixel>(&self) -> Result<PackedView<T>, ImageError> {
        let key = (BufferLayout::Packed, T::KIND);
        let root = {
            let guard = self.inner.lock().expect("image mutex poisoned");
            let cache = guard.as_ref().ok_or(ImageError::Disposed)?;
            if let Some(hit) = cache.converted.get(&key) {
                return Ok(PackedView {
                    owner: Arc::clone(hit),
                    _marker: PhantomData,
                });
            }
            Arc::clone(&cache.root)
        };

        // Convert outside the lock; a racing caller may insert first, in
        // which case the fresh buffer drops and the stored one wins.
        let fresh = T::wrap_packed(convert::to_packed::<T>(&root)?);
        let mut guard = self.inner.lock().expect("image mutex poisoned");
        let cache = guard.as_mut().ok_or(ImageError::Disposed)?;
        let stored = cache
            .converted
            .entry(key)
            .or_insert_with(|| Arc::new(fresh));
        Ok(PackedView {
            owner: Arc::clone(stored),
            _marker: PhantomData,
        })
    }

    /// Planar rendition of element kind `S`, converted on first request
    /// and cached for the image's lifetime.
    pub fn as_planar<S: Mono>(&self) -> Result<PlanarView<S>, ImageError> {
        let key = (BufferLayout::Planar, S::KIND);
        let root = {
            let guard = self.inner.lock().expect("image mutex poisoned");
            let cache = guard.as_ref().ok_or(ImageError::Disposed)?;
            if let Some(hit) = cache.converted.get(&key) {
                return Ok(PlanarView {
                    owner: Arc::clone(hit),
                    _marker: PhantomData,
                });
            }
            Arc::clone(&cache.root)
        };

        let fresh = S::wrap_planar(convert::to_planar::<S>(&root)?);
        let mut guard = self.inner.lock().expect("image mutex poisoned");
        let cache = guard.as_mut().ok_or(ImageError::Disposed)?;
        let stored = cache
            .converted
            .entry(key)
            .or_insert_with(|| Arc::new(fresh));
        Ok(PlanarView {
            owner: Arc::clone(stored),
            _marker: PhantomData,
        })
    }

    /// Drop the root and every cached buffer. Idempotent; subsequent
    /// operations fail with [`ImageError::Disposed`]. Outstanding views
    /// keep their own buffer alive but the image hands out no new ones.
    pub fn release(&self) {
        *self.inner.lock().expect("image mutex poisoned") = None;
    }

    pub fn is_released(&self) -> bool {
        self.inner.lock().expect("image mutex poisoned").is_none()
    }
}

impl From<AnyImageBuffer> for Image {
    fn from(root: AnyImageBuffer) -> Self {
        Image::new(root)
    }
}

/// Equality over the immutable observables only: dimensions, format, and
/// root contents. Converted caches are derived state and do not
/// participate. Released images compare unequal; their contents can no
/// longer be witnessed.
impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        match (self.root(), other.root()) {
            (Ok(a), Ok(b)) => *a == *b,
            _ => false,
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.root() {
            Ok(root) => f
                .debug_struct("Image")
                .field("width", &root.width())
                .field("height", &root.height())
                .field("format", &root.pixel_format())
                .finish(),
            Err(_) => f.write_str("Image(released)"),
        }
    }
}

/// Read-only handle to a cached packed buffer.
///
/// Cheap to clone; clones share the underlying buffer. Dereferences to
/// [`PackedBuffer`] for pixel access.
pub struct PackedView<T> {
    owner: Arc<AnyImageBuffer>,
    _marker: PhantomData<T>,
}

impl<T: ConvertPixel> PackedView<T> {
    /// Whether two views read the same underlying buffer (identity, not
    /// just equality).
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.owner, &other.owner)
    }
}

impl<T: ConvertPixel> Deref for PackedView<T> {
    type Target = PackedBuffer<T>;

    fn deref(&self) -> &PackedBuffer<T> {
        T::packed_ref(&self.owner).expect("cache entry matches its key")
    }
}

impl<T> Clone for PackedView<T> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            _marker: PhantomData,
        }
    }
}

impl<T: ConvertPixel> std::fmt::Debug for PackedView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PackedView").field(&**self).finish()
    }
}

/// Read-only handle to a cached planar buffer.
pub struct PlanarView<S> {
    owner: Arc<AnyImageBuffer>,
    _marker: PhantomData<S>,
}

impl<S: Mono> PlanarView<S> {
    /// Whether two views read the same underlying buffer.
    pub fn same_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.owner, &other.owner)
    }
}

impl<S: Mono> Deref for PlanarView<S> {
    type Target = PlanarBuffer<S>;

    fn deref(&self) -> &PlanarBuffer<S> {
        S::planar_ref(&self.owner).expect("cache entry matches its key")
    }
}

impl<S> Clone for PlanarView<S> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            _marker: PhantomData,
        }
    }
}

impl<S: Mono> std::fmt::Debug for PlanarView<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PlanarView").field(&**self).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Rgb24;

    fn rgb_image() -> Image {
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
        Image::new(PackedBuffer::from_slice(2, 2, &pixels).unwrap().into())
    }

    #[test]
    fn root_registers_under_its_own_key() {
        let image = rgb_image();
        let a = image.as_packed::<Rgb24>().unwrap();
        let b = image.as_packed::<Rgb24>().unwrap();
        assert!(a.same_buffer(&b));
        assert_eq!(a.get(1, 0).unwrap(), Rgb24 { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn converted_views_are_cached_by_identity() {
        let image = rgb_image();
        let first = image.as_packed::<u8>().unwrap();
        let second = image.as_packed::<u8>().unwrap();
        assert!(first.same_buffer(&second));

        let planar_a = image.as_planar::<u8>().unwrap();
        let planar_b = image.as_planar::<u8>().unwrap();
        assert!(planar_a.same_buffer(&planar_b));
    }

    #[test]
    fn metadata_delegates_to_the_root() {
        let image = rgb_image();
        assert_eq!(image.size().unwrap(), (2, 2));
        assert_eq!(image.pixel_format().unwrap(), PixelFormat::Rgb24Packed);
        assert!(image.is_color().unwrap());
    }

    #[test]
    fn release_is_idempotent_and_rejects_later_calls() {
        let image = rgb_image();
        image.release();
        image.release();
        assert!(image.is_released());
        assert!(matches!(image.as_packed::<u8>(), Err(ImageError::Disposed)));
        assert!(matches!(image.width(), Err(ImageError::Disposed)));
    }

    #[test]
    fn equality_ignores_the_converted_cache() {
        let a = rgb_image();
        let b = rgb_image();
        let _ = a.as_packed::<u8>().unwrap();
        assert_eq!(a, b);

        a.release();
        assert_ne!(a, b);
    }

    #[test]
    fn concurrent_views_resolve_to_one_buffer() {
        let image = std::sync::Arc::new(rgb_image());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let image = std::sync::Arc::clone(&image);
                std::thread::spawn(move || image.as_packed::<u16>().unwrap())
            })
            .collect();
        let views: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for view in &views[1..] {
            assert!(view.same_buffer(&views[0]));
        }
    }
}
