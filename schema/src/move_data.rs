use crate::PokemonType;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// The five stage-modifiable stats. HP never takes stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum StatType {
    Attack,
    Defense,
    #[strum(to_string = "Special Attack")]
    SpecialAttack,
    #[strum(to_string = "Special Defense")]
    SpecialDefense,
    Speed,
}

impl StatType {
    /// Position of this stat in a five-slot stage array.
    pub fn stage_index(self) -> usize {
        match self {
            StatType::Attack => 0,
            StatType::Defense => 1,
            StatType::SpecialAttack => 2,
            StatType::SpecialDefense => 3,
            StatType::Speed => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    User,
    Target,
}

/// Closed set of effect tags a move can carry.
///
/// Chances are percentages; 100 means the effect is not rolled for.
/// Divisors are applied to damage dealt (recoil, drain) or to the user's
/// max HP (crash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveEffect {
    Flinch(u8),
    Burn(u8),
    Freeze(u8),
    Paralyze(u8),
    Poison(u8),
    BadlyPoison(u8),
    Sedate(u8),
    Confuse(u8),
    /// Chance to inflict one of Burn, Freeze or Paralysis, picked at random.
    TriAttack(u8),

    StatChange(Target, StatType, i8, u8), // target, stat, stages, chance %

    Recoil(u8),
    Drain(u8),
    Crash(u8),

    HighCrit,
    MultiHit, // 2-5 hits
    TwoHit,
    Recharge,
    ChargeUp,
    FocusEnergy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPattern {
    Single,
    Double,
    Multi,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    pub power: Option<u16>,
    /// `None` means the move never misses.
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub effects: Vec<MoveEffect>,
}

impl MoveData {
    pub fn is_high_crit(&self) -> bool {
        self.effects.contains(&MoveEffect::HighCrit)
    }

    pub fn is_charge_move(&self) -> bool {
        self.effects.contains(&MoveEffect::ChargeUp)
    }

    pub fn requires_recharge(&self) -> bool {
        self.effects.contains(&MoveEffect::Recharge)
    }

    pub fn hit_pattern(&self) -> HitPattern {
        if self.effects.contains(&MoveEffect::MultiHit) {
            HitPattern::Multi
        } else if self.effects.contains(&MoveEffect::TwoHit) {
            HitPattern::Double
        } else {
            HitPattern::Single
        }
    }

    pub fn crash_divisor(&self) -> Option<u8> {
        self.effects.iter().find_map(|effect| match effect {
            MoveEffect::Crash(divisor) => Some(*divisor),
            _ => None,
        })
    }
}
