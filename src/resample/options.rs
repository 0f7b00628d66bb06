//! Options controlling a resize operation.
use serde::Deserialize;

/// Interpolation used when resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum ResizeMethod {
    /// Floor-mapped source lookup, no interpolation.
    #[default]
    NearestNeighbour,
    /// Four-corner linear interpolation.
    Bilinear,
    /// Catmull–Rom cubic Hermite over a 4×4 neighbourhood.
    Bicubic,
}

/// Options for the resampling engine.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ResizeOptions {
    /// Interpolation method.
    pub method: ResizeMethod,
    /// Upper bound on worker threads for row-parallel execution; 1 runs
    /// the whole resize on the caller's thread.
    pub max_parallelism: usize,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            method: ResizeMethod::NearestNeighbour,
            max_parallelism: 1,
        }
    }
}

impl ResizeOptions {
    pub fn new(method: ResizeMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_max_parallelism(mut self, max_parallelism: usize) -> Self {
        self.max_parallelism = max_parallelism;
        self
    }
}
