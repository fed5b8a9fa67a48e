//! Summary-card rendering: an 800x600 PNG of the mirror's headline
//! numbers, re-written after every refresh cycle.
//!
//! Text layout is pure and lives in [`layout`]; rasterization sits behind
//! the [`SummaryRenderer`](atlas_core::SummaryRenderer) trait so the
//! pipeline never depends on a font being present.

pub mod layout;
pub mod png;

pub use png::{locate_font, NoopRenderer, PngSummaryRenderer};
