//! Codec registry and JSON-file configuration.
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::Deserialize;

use crate::codec::{BmpCodec, Codec, JpegCodec, PngCodec};
use crate::error::ImageError;

/// Header bytes sniffed for codec detection when nothing else is set.
pub const DEFAULT_MAX_HEADER_SIZE: usize = 512;

/// Runtime codec registry used by load and save.
#[derive(Clone)]
pub struct Configuration {
    /// Bytes read from the stream for codec detection.
    pub max_header_size: usize,
    /// Codecs tested in registration order; first match wins.
    pub codecs: Vec<Arc<dyn Codec>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            codecs: vec![Arc::new(PngCodec), Arc::new(BmpCodec), Arc::new(JpegCodec)],
        }
    }
}

impl Configuration {
    /// Registry with no codecs; add them with [`Configuration::with_codec`].
    pub fn empty() -> Self {
        Self {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            codecs: Vec::new(),
        }
    }

    pub fn with_max_header_size(mut self, max_header_size: usize) -> Self {
        self.max_header_size = max_header_size;
        self
    }

    /// Append a codec; detection order follows registration order.
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codecs.push(codec);
        self
    }

    /// Resolve a parsed config file into a registry.
    pub fn from_file(file: &ConfigFile) -> Result<Self, ImageError> {
        let mut configuration = Configuration::empty().with_max_header_size(file.max_header_size);
        for name in &file.codecs {
            let tag = name.to_ascii_lowercase();
            let codec: Arc<dyn Codec> = match tag.as_str() {
                "png" => Arc::new(PngCodec),
                "bmp" => Arc::new(BmpCodec),
                "jpeg" | "jpg" => Arc::new(JpegCodec),
                other => {
                    return Err(ImageError::UnsupportedFormat(format!(
                        "unknown codec '{other}'"
                    )))
                }
            };
            if let Some(options) = file.codec_options.get(&tag) {
                // Built-in codecs currently take no options.
                debug!("codec '{tag}' ignores options {options}");
            }
            configuration.codecs.push(codec);
        }
        Ok(configuration)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.codecs.iter().map(|c| c.name()).collect();
        f.debug_struct("Configuration")
            .field("max_header_size", &self.max_header_size)
            .field("codecs", &names)
            .finish()
    }
}

/// On-disk configuration: codec names in priority order plus pass-through
/// per-codec options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub max_header_size: usize,
    pub codecs: Vec<String>,
    /// Decoder-specific options handed to the named codec unchanged,
    /// keyed by the lower-case codec tag.
    pub codec_options: HashMap<String, serde_json::Value>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            codecs: vec!["png".into(), "bmp".into(), "jpeg".into()],
            codec_options: HashMap::new(),
        }
    }
}

/// Load a JSON configuration from disk.
pub fn load_config(path: &Path) -> Result<Configuration, ImageError> {
    let data = fs::read_to_string(path)?;
    let file: ConfigFile = serde_json::from_str(&data).map_err(|e| {
        ImageError::InvalidData(format!("failed to parse config {}: {e}", path.display()))
    })?;
    Configuration::from_file(&file)
}
