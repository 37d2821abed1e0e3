//! Cross-text analysis.
//!
//! Each submodule computes one family of insights over a batch of
//! analysis records. None of them mutate their input.

pub mod emotion;
pub mod risk;
pub mod techniques;

pub use emotion::*;
pub use risk::*;
pub use techniques::*;
