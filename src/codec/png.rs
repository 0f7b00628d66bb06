//! PNG adapter over the `image` crate.
use std::io::{Cursor, Read, Write};

use super::{buffer_from_dynamic, dynamic_from_buffer, map_image_error, Codec};
use crate::buffer::AnyImageBuffer;
use crate::error::ImageError;

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG decode/encode. Lossless; ignores the quality parameter.
#[derive(Clone, Copy, Debug, Default)]
pub struct PngCodec;

impl Codec for PngCodec {
    fn name(&self) -> &'static str {
        "png"
    }

    fn header_size(&self) -> usize {
        PNG_MAGIC.len()
    }

    fn matches(&self, header: &[u8]) -> bool {
        header.starts_with(&PNG_MAGIC)
    }

    fn can_encode(&self, encoder_type: &str) -> bool {
        encoder_type == "png"
    }

    fn decode(&self, reader: &mut dyn Read) -> Result<AnyImageBuffer, ImageError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let img = image::load_from_memory_with_format(&data, image::ImageFormat::Png)
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
        if encoder_type != "png" {
            return Err(ImageError::UnsupportedFormat(format!(
                "png codec cannot encode '{encoder_type}'"
            )));
        }
        let img = dynamic_from_buffer(buffer)?;
        let mut encoded = Cursor::new(Vec::new());
        img.write_to(&mut encoded, image::ImageFormat::Png)
            .map_err(map_image_error)?;
        writer.write_all(&encoded.into_inner())?;
        Ok(())
    }
}
