// Pokemon Duel Schema - Shared type definitions
// This crate holds the static data vocabulary used by the RON data files and
// the battle engine: elemental types, move records and species records.

pub use move_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod move_data;
pub mod pokemon_types;
pub mod species_data;
