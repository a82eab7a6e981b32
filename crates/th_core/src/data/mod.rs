//! Embedded game data.
//!
//! Ships the mode catalogue inside the binary so the engine never depends
//! on data files being installed next to it.

pub mod presets;

pub use presets::{get_mode_catalog, preset, ModeCatalog, ModePreset, ModeVariant};
