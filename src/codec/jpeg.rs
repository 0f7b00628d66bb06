//! JPEG adapter over the `image` crate.
use std::io::{Cursor, Read, Write};

use super::{buffer_from_dynamic, dynamic_from_buffer, map_image_error, Codec};
use crate::buffer::AnyImageBuffer;
use crate::convert;
use crate::error::ImageError;
use crate::pixel::PixelFormat;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// JPEG decode/encode. Honours the quality parameter; 16-bit inputs
/// narrow to 8 bits before encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct JpegCodec;

impl Codec for JpegCodec {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn header_size(&self) -> usize {
        JPEG_MAGIC.len()
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(&JPEG_MAGIC)
    }

    fn can_encode(&self, encoder_type: &str) -> bool {
        encoder_type == "jpeg" || encoder_type == "jpg"
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<AnyImageBuffer, ImageError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let img = image::load_from_memory_with_format(&data, image::ImageFormat::Jpeg)
            .map_err(map_image_error)?;
        buffer_from_dynamic(img)
    }

    fn encode(
        &self,
        writer: &mut dyn Write,
        buffer: &AnyImageBuffer,
        encoder_type: &str,
        quality: u8,
    ) -> Result<(), ImageError> {
        if !self.can_encode(encoder_type) {
            return Err(ImageError::UnsupportedFormat(format!(
                "jpeg codec cannot encode '{encoder_type}'"
            )));
        }
        let narrowed;
        let eight_bit = match buffer.pixel_format() {
            PixelFormat::Mono16 => {
                narrowed = convert::convert(buffer, PixelFormat::Mono8)?;
                &narrowed
            }
            PixelFormat::Rgb48Packed => {
                narrowed = convert::convert(buffer, PixelFormat::Rgb24Packed)?;
                &narrowed
            }
            _ => buffer,
        };
        let img = dynamic_from_buffer(eight_bit)?;
        let mut encoded = Cursor::new(Vec::new());
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, quality);
        img.write_with_encoder(encoder).map_err(map_image_error)?;
        writer.write_all(&encoded.into_inner())?;
        Ok(())
    }
}
