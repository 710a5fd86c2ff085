//! Pokemon Duel Battle Engine
//!
//! A two-combatant battle simulator with Generation 1 style mechanics:
//! integer damage math, primary status conditions, confusion, stat stages
//! and two-turn moves, driven one round at a time by a seeded random source.

pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod generator;
pub mod player;
pub mod pokemon;

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, MoveCategory, MoveData, MoveEffect, PokemonType, SpeciesData, StatType, Target,
    TypeMultiplier,
};

// --- From this crate's modules (`src/`) ---
pub use battle::engine::{Battle, BattleOutcome, BattleSide};
pub use battle::state::{BattleEvent, EventBus, EventSink, GameState, TurnRng};
pub use config::{BattleConfig, SpeedTieRule};
pub use data::{DataProvider, Dex};
pub use player::{HumanSelector, MoveSelector, RandomSelector};
pub use pokemon::{Combatant, StatBlock, Stats, StatusCondition};

pub use errors::{
    ActionError, BattleEngineError, BattleResult, ConfigError, MoveDataError, MoveDataResult,
    SpeciesDataError, SpeciesDataResult,
};
