//! # Phone Feature
//!
//! E.164 normalization and numbering-plan validation.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod normalizer;

pub use normalizer::{PhoneNumberNormalizer, E164};
