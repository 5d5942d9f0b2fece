//! Data model for layout reconstruction.
//!
//! The model covers the three shapes the pipeline flows through: raw
//! positioned [`TextFragment`]s, geometrically grouped [`Line`]s, and
//! ephemeral [`ClassifiedLine`]s consumed by the assembler.

mod fragment;
mod line;

pub use fragment::TextFragment;
pub use line::{ClassifiedLine, Line};
