//! Sensitive-data detection against recognized text.
//!
//! This module holds the detection half of the pipeline:
//!
//! - **Rule catalog**: immutable regex rules per data category, with invalid
//!   rules dropped at load time.
//!
//! - **Luhn validation**: the checksum gate that separates real card numbers
//!   from card-shaped digit runs.
//!
//! - **Text detector**: runs the whole catalog over a block of text and
//!   returns categorized candidates in a fixed, deterministic order.
//!
//! - **Masking**: partially-obscured renderings of matched text for review
//!   UIs.
//!
//! # Example
//!
//! ```
//! use snapscrub::detect::{DataCategory, TextDetector};
//!
//! let detector = TextDetector::new();
//! let candidates = detector.detect("password: hunter22");
//!
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].category, DataCategory::Password);
//! ```

mod catalog;
mod detector;
mod luhn;
mod mask;

pub use catalog::{builtin_rules, DataCategory, PatternRule};
pub use detector::{Candidate, CustomRule, TextDetector};
pub use luhn::luhn_valid;
pub use mask::masked_text;
