//! BMP adapter over the `image` crate.
use std::io::{Cursor, Read, Write};

use super::{buffer_from_dynamic, dynamic_from_buffer, map_image_error, Codec};
use crate::buffer::AnyImageBuffer;
use crate::convert;
use crate::error::ImageError;
use crate::pixel::PixelFormat;

const BMP_MAGIC: [u8; 2] = *b"BM";

/// BMP decode/encode. The container has no 16-bit form, so deep inputs
/// narrow to 8 bits before encoding; the quality parameter is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct BmpCodec;

impl Codec for BmpCodec {
    fn name(&self) -> &'static str {
        "bmp"
    }

    fn header_size(&self) -> usize {
        BMP_MAGIC.len()
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(&BMP_MAGIC)
    }

    fn can_encode(&self, encoder_type: &str) -> bool {
        encoder_type == "bmp"
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<AnyImageBuffer, ImageError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let img = image::load_from_memory_with_format(&data, image::ImageFormat::Bmp)
            .map_err(map_image_error)?;
        buffer_from_dynamic(img)
    }

    fn encode(
        &self,
        writer: &mut dyn Write,
        buffer: &AnyImageBuffer,
        encoder_type: &str,
        _quality: u8,
    ) -> Result<(), ImageError> {
        if encoder_type != "bmp" {
            return Err(ImageError::UnsupportedFormat(format!(
                "bmp codec cannot encode '{encoder_type}'"
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
        img.write_to(&mut encoded, image::ImageFormat::Bmp)
            .map_err(map_image_error)?;
        writer.write_all(&encoded.into_inner())?;
        Ok(())
    }
}
