//! A recognizer backed by a JSON sidecar file.
//!
//! OCR engines live outside this crate, so the CLI consumes their output from
//! a sidecar file written next to the screenshot: a JSON document listing the
//! recognized blocks and, crucially, the origin convention of their bounding
//! boxes. Top-left-origin boxes are flipped at load time so everything past
//! this point speaks bottom-left.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{RecognizeError, RecognizeOptions, TextBlock, TextRecognizer};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::geometry::Rect;

/// The bounding-box origin convention declared by a sidecar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidecarOrigin {
    /// Boxes are already bottom-left origin (the pipeline convention).
    #[default]
    BottomLeft,
    /// Boxes are top-left origin and must be flipped at load.
    TopLeft,
}

/// On-disk shape of a sidecar file.
#[derive(Debug, Deserialize)]
struct SidecarFile {
    #[serde(default)]
    origin: SidecarOrigin,
    blocks: Vec<TextBlock>,
}

/// A [`TextRecognizer`] that replays blocks loaded from a sidecar file.
#[derive(Debug, Clone)]
pub struct SidecarRecognizer {
    blocks: Vec<TextBlock>,
}

impl SidecarRecognizer {
    /// Load recognized blocks from a JSON sidecar file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let file: SidecarFile =
            serde_json::from_str(&raw).map_err(|source| Error::SidecarParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_blocks(file.blocks, file.origin))
    }

    /// Build a recognizer from in-memory blocks with a declared origin.
    #[must_use]
    pub fn from_blocks(blocks: Vec<TextBlock>, origin: SidecarOrigin) -> Self {
        let blocks = blocks
            .into_iter()
            .map(|mut block| {
                if origin == SidecarOrigin::TopLeft {
                    // Normalized boxes live in the unit square.
                    block.bounding_box = Rect::from_top_left(block.bounding_box, 1.0);
                }
                block
            })
            .collect();
        Self { blocks }
    }

    /// The loaded blocks, in file order.
    #[must_use]
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }
}

#[async_trait]
impl TextRecognizer for SidecarRecognizer {
    fn name(&self) -> &'static str {
        "sidecar"
    }

    async fn recognize(
        &self,
        _frame: &Frame,
        _options: &RecognizeOptions,
    ) -> std::result::Result<Vec<TextBlock>, RecognizeError> {
        Ok(self.blocks.clone())
    }
}
