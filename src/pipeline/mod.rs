//! Pipeline stages shared by the image and PDF extractors.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ preprocess ──▶ strategy chain ──▶ postprocess
//! (bytes)   (image only)   (crate::strategy)   (text cleanup)
//! ```
//!
//! 1. [`input`]:      resolve `--file` / `--base64` / `--stdin` to bytes
//! 2. [`preprocess`]: RGB, downscale, contrast and sharpness; never fails
//! 3. [`postprocess`]: deterministic text cleanup applied by every strategy
//! 4. [`info`]:       optional image metadata for `--info`

pub mod info;
pub mod input;
pub mod postprocess;
pub mod preprocess;
