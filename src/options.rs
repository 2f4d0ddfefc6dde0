use serde_derive::{Deserialize, Serialize};

use crate::errors::Error;
use crate::function::StopBounds;

/// Options for mapping paints into PDF resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintOptions {
    /// Placement of the bounds between gradient segments
    #[serde(default)]
    pub stop_bounds: StopBounds,
    /// Share structurally equal graphics states and shadings
    #[serde(default = "default_deduplicate")]
    pub deduplicate: bool,
    /// Flate compress texture images (default encoder only)
    #[serde(default = "default_compress_images")]
    pub compress_images: bool,
}

fn default_deduplicate() -> bool {
    true
}

fn default_compress_images() -> bool {
    true
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            stop_bounds: StopBounds::default(),
            deduplicate: default_deduplicate(),
            compress_images: default_compress_images(),
        }
    }
}

impl PaintOptions {
    /// Parses options from JSON, missing fields take their default
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
