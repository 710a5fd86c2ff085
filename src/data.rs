//! Species and move tables, loaded once and shared read-only.

use crate::errors::{
    BattleResult, ConfigError, MoveDataError, MoveDataResult, SpeciesDataError, SpeciesDataResult,
};
use schema::{MoveData, SpeciesData};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const BUILTIN_MOVES: &str = include_str!("../data/moves.ron");
const BUILTIN_SPECIES: &str = include_str!("../data/species.ron");

pub const MOVES_FILE: &str = "moves.ron";
pub const SPECIES_FILE: &str = "species.ron";

/// Lookup surface the battle setup needs. Unknown keys are errors, never defaults.
pub trait DataProvider {
    fn lookup_species(&self, name: &str) -> SpeciesDataResult<&SpeciesData>;
    fn lookup_move(&self, name: &str) -> MoveDataResult<Arc<MoveData>>;
}

fn key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The immutable species and move tables.
#[derive(Debug, Clone)]
pub struct Dex {
    moves: HashMap<String, Arc<MoveData>>,
    species: HashMap<String, SpeciesData>,
    // Load order, so index-based picks are stable for a given seed.
    species_order: Vec<String>,
}

impl Dex {
    /// Tables compiled into the binary.
    pub fn builtin() -> BattleResult<Self> {
        Self::from_ron(BUILTIN_MOVES, BUILTIN_SPECIES)
    }

    /// Reads `moves.ron` and `species.ron` from `dir`.
    pub fn load(dir: &Path) -> BattleResult<Self> {
        let read = |file: &str| {
            let path = dir.join(file);
            fs::read_to_string(&path).map_err(|err| ConfigError::Io {
                path,
                message: err.to_string(),
            })
        };
        let moves = read(MOVES_FILE)?;
        let species = read(SPECIES_FILE)?;
        tracing::debug!(dir = %dir.display(), "loading dex from disk");
        Self::from_ron(&moves, &species)
    }

    pub fn from_ron(moves: &str, species: &str) -> BattleResult<Self> {
        let moves: Vec<MoveData> = ron::from_str(moves)
            .map_err(|err| MoveDataError::MalformedData(err.to_string()))?;
        let species: Vec<SpeciesData> = ron::from_str(species)
            .map_err(|err| SpeciesDataError::MalformedData(err.to_string()))?;
        Self::from_parts(moves, species)
    }

    /// Builds the tables and checks that every species names four known moves.
    pub fn from_parts(moves: Vec<MoveData>, species: Vec<SpeciesData>) -> BattleResult<Self> {
        let mut move_table = HashMap::with_capacity(moves.len());
        for move_data in moves {
            let name = key(&move_data.name);
            if move_table.contains_key(&name) {
                return Err(MoveDataError::MalformedData(format!(
                    "duplicate move {}",
                    move_data.name
                ))
                .into());
            }
            move_table.insert(name, Arc::new(move_data));
        }

        let mut dex = Self {
            moves: move_table,
            species: HashMap::with_capacity(species.len()),
            species_order: Vec::with_capacity(species.len()),
        };

        for entry in species {
            if entry.moves.len() != 4 {
                return Err(SpeciesDataError::MalformedData(format!(
                    "{} has {} moves, expected 4",
                    entry.name,
                    entry.moves.len()
                ))
                .into());
            }
            dex.build_moveset(&entry)?;

            let name = key(&entry.name);
            if dex.species.contains_key(&name) {
                return Err(SpeciesDataError::MalformedData(format!(
                    "duplicate species {}",
                    entry.name
                ))
                .into());
            }
            dex.species_order.push(name.clone());
            dex.species.insert(name, entry);
        }

        tracing::debug!(
            moves = dex.moves.len(),
            species = dex.species.len(),
            "dex loaded"
        );
        Ok(dex)
    }

    pub fn species_count(&self) -> usize {
        self.species_order.len()
    }

    /// Species names in load order.
    pub fn species_names(&self) -> impl Iterator<Item = &str> {
        self.species_order
            .iter()
            .filter_map(|name| self.species.get(name))
            .map(|species| species.name.as_str())
    }

    pub fn species_by_index(&self, index: usize) -> SpeciesDataResult<&SpeciesData> {
        self.species_order
            .get(index)
            .and_then(|name| self.species.get(name))
            .ok_or(SpeciesDataError::SpeciesIndexNotFound(index))
    }

    /// Resolves a species' four move names.
    pub fn build_moveset(&self, species: &SpeciesData) -> MoveDataResult<[Arc<MoveData>; 4]> {
        let resolve = |index: usize| -> MoveDataResult<Arc<MoveData>> {
            let name = species.moves.get(index).ok_or_else(|| {
                MoveDataError::MalformedData(format!(
                    "{} is missing move slot {}",
                    species.name, index
                ))
            })?;
            self.lookup_move(name)
        };
        Ok([resolve(0)?, resolve(1)?, resolve(2)?, resolve(3)?])
    }
}

impl DataProvider for Dex {
    fn lookup_species(&self, name: &str) -> SpeciesDataResult<&SpeciesData> {
        self.species
            .get(&key(name))
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(name.to_string()))
    }

    fn lookup_move(&self, name: &str) -> MoveDataResult<Arc<MoveData>> {
        self.moves
            .get(&key(name))
            .cloned()
            .ok_or_else(|| MoveDataError::MoveNotFound(name.to_string()))
    }
}
