//! The text-recognition collaborator contract.
//!
//! Recognition itself is out of scope for this crate: the pipeline consumes
//! an external OCR engine through the [`TextRecognizer`] trait and never
//! inspects pixels for text on its own. The contract is one request, one
//! asynchronous response: an ordered list of [`TextBlock`]s or an error that
//! the orchestrator degrades to an empty result.
//!
//! Bounding boxes cross this boundary in **normalized unit-square
//! coordinates with a bottom-left origin**. Backends whose native convention
//! is top-left must flip through [`crate::geometry::Rect::from_top_left`]
//! before returning blocks; see [`sidecar`] for an example.

mod sidecar;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::frame::Frame;
use crate::geometry::Rect;

pub use sidecar::{SidecarOrigin, SidecarRecognizer};

/// A block of recognized text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// The recognized string.
    pub text: String,

    /// Recognition confidence in `[0, 1]`.
    pub confidence: f32,

    /// Bounding box in normalized unit-square coordinates, bottom-left
    /// origin.
    pub bounding_box: Rect,
}

/// Recognition accuracy requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    /// Favor speed over accuracy.
    Fast,
    /// Favor accuracy over speed. The default: detection quality depends on
    /// literal token strings surviving recognition.
    #[default]
    High,
}

/// Options passed with every recognition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizeOptions {
    /// Recognition languages, in preference order.
    pub languages: Vec<String>,

    /// Requested recognition accuracy.
    pub accuracy: Accuracy,

    /// Whether the backend may "correct" recognized words against a language
    /// model. Off by default: correction mangles keys and tokens.
    pub language_correction: bool,
}

impl Default for RecognizeOptions {
    fn default() -> Self {
        Self {
            languages: vec!["en-US".to_string()],
            accuracy: Accuracy::High,
            language_correction: false,
        }
    }
}

/// Errors a recognition backend can report.
///
/// The detection orchestrator never propagates these to its caller; they
/// degrade to an empty match list.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The backend failed to process the request.
    #[error("recognition backend failed: {0}")]
    Backend(String),

    /// The backend cannot handle this image.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),
}

/// An external text-recognition engine.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// The name of this backend (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Recognize text in the frame.
    ///
    /// Returns blocks in the backend's reading order; the orchestrator
    /// preserves that order in its output.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot produce a result at all.
    /// "No text found" is not an error: return an empty list.
    async fn recognize(
        &self,
        frame: &Frame,
        options: &RecognizeOptions,
    ) -> std::result::Result<Vec<TextBlock>, RecognizeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RecognizeOptions::default();
        assert_eq!(options.languages, vec!["en-US".to_string()]);
        assert_eq!(options.accuracy, Accuracy::High);
        assert!(!options.language_correction);
    }

    #[test]
    fn test_text_block_serde_round_trip() {
        let block = TextBlock {
            text: "password: hunter22".to_string(),
            confidence: 0.92,
            bounding_box: Rect::new(0.1, 0.2, 0.3, 0.05),
        };
        let json = serde_json::to_string(&block).unwrap();
        let back: TextBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }

    #[test]
    fn test_recognize_error_display() {
        let err = RecognizeError::Backend("engine crashed".to_string());
        assert!(err.to_string().contains("engine crashed"));
    }
}
