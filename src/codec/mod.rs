//! Codec contract and header-sniff dispatch.
//!
//! A codec advertises how many header bytes it needs, recognises its magic
//! in those bytes, and decodes/encodes through narrow stream interfaces.
//! Detection reads up to the configured header size, rewinds the stream,
//! and walks the registered codecs in order; the first match wins.
mod bmp;
mod jpeg;
mod png;

pub use bmp::BmpCodec;
pub use jpeg::JpegCodec;
pub use png::PngCodec;

use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::Arc;

use log::debug;

use crate::buffer::{AnyImageBuffer, BufferView, PackedBuffer};
use crate::error::ImageError;
use crate::pixel::{Rgb, Rgb24, Rgb48};

/// One image format's decode/encode implementation.
pub trait Codec: Send + Sync {
    /// Lower-case tag, also the encoder type this codec claims.
    fn name(&self) -> &'static str;

    /// Header bytes needed by [`Codec::matches`].
    fn header_size(&self) -> usize;

    /// Whether `header` carries this format's magic. `header` may be
    /// shorter than [`Codec::header_size`] for tiny streams.
    fn matches(&self, header: &[u8]) -> bool;

    /// Whether this codec encodes the given lower-case tag.
    fn can_encode(&self, encoder_type: &str) -> bool;

    /// Decode the stream into an owned buffer.
    fn decode(&self, reader: &mut dyn Read) -> Result<AnyImageBuffer, ImageError>;

    /// Encode `buffer` to the stream. `quality` is in [1, 100]; lossless
    /// encoders ignore it.
    fn encode(
        &self,
        writer: &mut dyn Write,
        buffer: &AnyImageBuffer,
        encoder_type: &str,
        quality: u8,
    ) -> Result<(), ImageError>;
}

/// Pick the first codec whose magic matches the stream header.
///
/// Reads up to `max_header_size` bytes and rewinds the stream to its
/// starting position before returning. An empty stream and a header no
/// codec recognises both surface [`ImageError::InvalidData`].
pub fn detect<'a, R: Read + Seek>(
    codecs: &'a [Arc<dyn Codec>],
    stream: &mut R,
    max_header_size: usize,
) -> Result<&'a dyn Codec, ImageError> {
    let start = stream.stream_position()?;
    let mut header = vec![0u8; max_header_size];
    let mut filled = 0;
    while filled < header.len() {
        let read = stream.read(&mut header[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    stream.seek(SeekFrom::Start(start))?;
    let header = &header[..filled];

    if header.is_empty() {
        return Err(ImageError::InvalidData("empty stream".into()));
    }
    for codec in codecs {
        let want = codec.header_size().min(header.len());
        if codec.matches(&header[..want]) {
            debug!("header matched the {} codec", codec.name());
            return Ok(codec.as_ref());
        }
    }
    Err(ImageError::InvalidData(
        "no codec recognised the stream header".into(),
    ))
}

pub(crate) fn map_image_error(err: image::ImageError) -> ImageError {
    match err {
        image::ImageError::IoError(e) => ImageError::Io(e),
        image::ImageError::Unsupported(e) => ImageError::UnsupportedFormat(e.to_string()),
        other => ImageError::InvalidData(other.to_string()),
    }
}

/// Map a decoded [`image::DynamicImage`] onto an owned buffer, preferring
/// the lossless representation and falling back to 8-bit RGB.
pub(crate) fn buffer_from_dynamic(img: image::DynamicImage) -> Result<AnyImageBuffer, ImageError> {
    use image::DynamicImage;

    let (width, height) = (img.width() as usize, img.height() as usize);
    Ok(match img {
        DynamicImage::ImageLuma8(b) => PackedBuffer::from_slice(width, height, b.as_raw())?.into(),
        DynamicImage::ImageLumaA8(b) => {
            let grey = image::DynamicImage::ImageLumaA8(b).to_luma8();
            PackedBuffer::from_slice(width, height, grey.as_raw())?.into()
        }
        DynamicImage::ImageLuma16(b) => PackedBuffer::from_slice(width, height, b.as_raw())?.into(),
        DynamicImage::ImageLumaA16(b) => {
            let grey = image::DynamicImage::ImageLumaA16(b).to_luma16();
            PackedBuffer::from_slice(width, height, grey.as_raw())?.into()
        }
        DynamicImage::ImageRgb8(b) => {
            let pixels: &[Rgb24] = bytemuck::cast_slice(b.as_raw());
            PackedBuffer::from_slice(width, height, pixels)?.into()
        }
        DynamicImage::ImageRgb16(b) => {
            let pixels: &[Rgb48] = bytemuck::cast_slice(b.as_raw());
            PackedBuffer::from_slice(width, height, pixels)?.into()
        }
        DynamicImage::ImageRgb32F(b) => {
            let pixels: &[Rgb] = bytemuck::cast_slice(b.as_raw());
            PackedBuffer::from_slice(width, height, pixels)?.into()
        }
        DynamicImage::ImageRgba16(b) => {
            let rgb = image::DynamicImage::ImageRgba16(b).to_rgb16();
            let pixels: &[Rgb48] = bytemuck::cast_slice(rgb.as_raw());
            PackedBuffer::from_slice(width, height, pixels)?.into()
        }
        other => {
            let rgb = other.to_rgb8();
            let pixels: &[Rgb24] = bytemuck::cast_slice(rgb.as_raw());
            PackedBuffer::from_slice(width, height, pixels)?.into()
        }
    })
}

/// Build an [`image::DynamicImage`] from one of the four packed integer
/// shapes the save path produces.
pub(crate) fn dynamic_from_buffer(
    buffer: &AnyImageBuffer,
) -> Result<image::DynamicImage, ImageError> {
    Ok(match buffer {
        AnyImageBuffer::PackedL8(b) => {
            let raw = b.as_slice().to_vec();
            let img = image::GrayImage::from_raw(b.width() as u32, b.height() as u32, raw)
                .expect("backing length matches dimensions");
            image::DynamicImage::ImageLuma8(img)
        }
        AnyImageBuffer::PackedL16(b) => {
            let raw = b.as_slice().to_vec();
            let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(
                b.width() as u32,
                b.height() as u32,
                raw,
            )
            .expect("backing length matches dimensions");
            image::DynamicImage::ImageLuma16(img)
        }
        AnyImageBuffer::PackedRgb24(b) => {
            let raw: Vec<u8> = bytemuck::cast_slice(b.as_slice()).to_vec();
            let img = image::RgbImage::from_raw(b.width() as u32, b.height() as u32, raw)
                .expect("backing length matches dimensions");
            image::DynamicImage::ImageRgb8(img)
        }
        AnyImageBuffer::PackedRgb48(b) => {
            let raw: Vec<u16> = bytemuck::cast_slice(b.as_slice()).to_vec();
            let img = image::ImageBuffer::<image::Rgb<u16>, Vec<u16>>::from_raw(
                b.width() as u32,
                b.height() as u32,
                raw,
            )
            .expect("backing length matches dimensions");
            image::DynamicImage::ImageRgb16(img)
        }
        other => {
            return Err(ImageError::UnsupportedFormat(format!(
                "cannot encode {:?} directly",
                other.pixel_format()
            )))
        }
    })
}
