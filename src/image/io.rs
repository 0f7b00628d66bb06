//! Stream and path I/O for the image facade.
//!
//! Loading sniffs the stream header against the configured codecs and hands
//! the stream to the first match. Saving converts the root to the packed
//! representation its depth calls for, then encodes with the codec that
//! claims the encoder tag (derived from the file extension for path
//! saves).
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use log::debug;

use crate::codec;
use crate::config::Configuration;
use crate::convert;
use crate::error::ImageError;
use crate::pixel::PixelFormat;

use super::Image;

/// Default encode quality when none is given.
pub const DEFAULT_QUALITY: u8 = 80;

impl Image {
    /// Decode an image from a seekable stream using `config`'s codecs.
    pub fn load<R: Read + Seek>(
        reader: &mut R,
        config: &Configuration,
    ) -> Result<Image, ImageError> {
        let codec = codec::detect(&config.codecs, reader, config.max_header_size)?;
        debug!("decoding stream with the {} codec", codec.name());
        let root = codec.decode(reader)?;
        Ok(Image::new(root))
    }

    /// Decode an image from a file.
    pub fn load_path(path: impl AsRef<Path>, config: &Configuration) -> Result<Image, ImageError> {
        let file = File::open(path)?;
        Self::load(&mut BufReader::new(file), config)
    }

    /// Encode to a stream with an explicit encoder tag and quality.
    ///
    /// The tag is matched case-insensitively against the configured codecs;
    /// quality must lie in [1, 100] (ignored by lossless encoders).
    pub fn save<W: Write>(
        &self,
        writer: &mut W,
        config: &Configuration,
        encoder_type: &str,
        quality: u8,
    ) -> Result<(), ImageError> {
        if !(1..=100).contains(&quality) {
            return Err(ImageError::InvalidArgument(format!(
                "quality {quality} outside [1, 100]"
            )));
        }
        let tag = encoder_type.to_ascii_lowercase();
        let codec = config
            .codecs
            .iter()
            .find(|codec| codec.can_encode(&tag))
            .ok_or_else(|| ImageError::UnsupportedFormat(format!("no codec encodes '{tag}'")))?;

        let root = self.root()?;
        let prepared = convert::convert(&root, save_format(root.pixel_format()))?;
        codec.encode(writer, &prepared, &tag, quality)
    }

    /// Encode to a file, deriving the encoder tag from the extension and
    /// using the default quality.
    pub fn save_path(&self, path: impl AsRef<Path>, config: &Configuration) -> Result<(), ImageError> {
        self.save_path_with(path, config, DEFAULT_QUALITY)
    }

    /// Encode to a file with an explicit quality.
    pub fn save_path_with(
        &self,
        path: impl AsRef<Path>,
        config: &Configuration,
        quality: u8,
    ) -> Result<(), ImageError> {
        let path = path.as_ref();
        let tag = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                ImageError::UnsupportedFormat(format!(
                    "cannot derive an encoder from '{}'",
                    path.display()
                ))
            })?;
        let mut writer = BufWriter::new(File::create(path)?);
        self.save(&mut writer, config, &tag, quality)?;
        writer.flush()?;
        Ok(())
    }
}

/// Packed representation an image converts to before encoding.
fn save_format(format: PixelFormat) -> PixelFormat {
    match format {
        PixelFormat::Mono | PixelFormat::Mono8 => PixelFormat::Mono8,
        PixelFormat::Mono16 => PixelFormat::Mono16,
        PixelFormat::RgbPacked
        | PixelFormat::RgbPlanar
        | PixelFormat::Rgb24Packed
        | PixelFormat::Rgb888Planar => PixelFormat::Rgb24Packed,
        PixelFormat::Rgb48Packed | PixelFormat::Rgb161616Planar => PixelFormat::Rgb48Packed,
    }
}
