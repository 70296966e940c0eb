//! `snapscrub` - Sensitive-data detection and redaction for screenshots
//!
//! This library scans recognized screenshot text for sensitive information
//! (payment card numbers, API keys and tokens, passwords) and obscures the
//! offending regions before the image is shared. Text recognition itself is
//! an external collaborator consumed through the [`ocr::TextRecognizer`]
//! trait; this crate owns pattern matching, checksum validation, region
//! mapping, and pixel-level compositing.
//!
//! Detection is best-effort pattern matching, not a security guarantee.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod ocr;
pub mod redact;
pub mod scan;

pub use config::Config;
pub use detect::{DataCategory, TextDetector};
pub use error::{Error, Result};
pub use frame::Frame;
pub use geometry::{PointSize, Rect};
pub use logging::init_logging;
pub use redact::{apply_redaction, RedactionStyle};
pub use scan::{Match, MatchId, Scanner};
