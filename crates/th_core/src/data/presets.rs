//! Mode catalogue loading.
//!
//! The catalogue YAML is embedded with `include_str!` at compile time and
//! parsed once on first access, so callers never touch the filesystem.
//!
//! ## Usage
//!
//! ```rust
//! use th_core::data::presets::{get_mode_catalog, preset};
//! use th_core::models::ModeKind;
//!
//! let catalog = get_mode_catalog();
//! println!("{} modes available", catalog.modes.len());
//!
//! let classic = preset(ModeKind::Classic).unwrap();
//! println!("{} needs {}+ players", classic.name, classic.min_players);
//! ```

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::models::{ModeConfig, ModeKind};

/// Mode catalogue YAML (compile-time embedded).
pub const MODE_PRESETS_YAML: &str = include_str!("../../../../data/mode_presets.yaml");

/// One selectable option set for a mode, as shown on the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeVariant {
    pub label: String,
    pub config: ModeConfig,
}

/// Catalogue entry for a single mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModePreset {
    /// Display name.
    pub name: String,
    /// Smallest roster the mode accepts.
    pub min_players: usize,
    /// Whether the mode offers two-team play.
    pub team_play: bool,
    /// Default options.
    pub config: ModeConfig,
    /// Alternative option sets; empty when the mode has nothing to tune.
    #[serde(default)]
    pub variants: Vec<ModeVariant>,
}

impl ModePreset {
    pub fn kind(&self) -> ModeKind {
        self.config.kind()
    }
}

/// The full mode catalogue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModeCatalog {
    pub modes: Vec<ModePreset>,
}

static MODE_CATALOG: OnceLock<ModeCatalog> = OnceLock::new();

/// Load the mode catalogue.
///
/// Parses the embedded YAML on first call, then returns the cached value.
///
/// # Panics
///
/// Panics if the YAML fails to parse (embedded at compile time, so this
/// cannot happen in a correct build).
pub fn get_mode_catalog() -> &'static ModeCatalog {
    MODE_CATALOG.get_or_init(|| {
        serde_yaml::from_str(MODE_PRESETS_YAML).expect("Failed to parse mode_presets.yaml")
    })
}

/// Catalogue entry for one mode, if present.
pub fn preset(kind: ModeKind) -> Option<&'static ModePreset> {
    get_mode_catalog().modes.iter().find(|p| p.kind() == kind)
}
