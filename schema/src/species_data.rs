use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// HP, Attack, Defense, Special Attack, Special Defense, Speed.
    pub fn as_array(&self) -> [u16; 6] {
        [
            self.hp as u16,
            self.attack as u16,
            self.defense as u16,
            self.sp_attack as u16,
            self.sp_defense as u16,
            self.speed as u16,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub primary_type: PokemonType,
    #[serde(default)]
    pub secondary_type: Option<PokemonType>,
    pub base_stats: BaseStats,
    pub moves: Vec<String>, // exactly four move names, checked at load time
}
