use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
}

/// Outcome of one attacking type against one defending type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    /// Multiplier expressed in quarters so that damage math stays integral.
    pub fn quarters(self) -> u32 {
        match self {
            Effectiveness::NoEffect => 0,
            Effectiveness::NotVeryEffective => 2,
            Effectiveness::Neutral => 4,
            Effectiveness::SuperEffective => 8,
        }
    }
}

/// Combined multiplier of a move against a (possibly dual-typed) defender.
///
/// Stored in quarters: 0 = no effect, 1 = x0.25, 2 = x0.5, 4 = x1, 8 = x2, 16 = x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMultiplier {
    quarters: u32,
}

impl TypeMultiplier {
    pub const NEUTRAL: TypeMultiplier = TypeMultiplier { quarters: 4 };
    pub const IMMUNE: TypeMultiplier = TypeMultiplier { quarters: 0 };

    pub fn from_quarters(quarters: u32) -> Self {
        Self { quarters }
    }

    pub fn quarters(self) -> u32 {
        self.quarters
    }

    pub fn as_f32(self) -> f32 {
        self.quarters as f32 / 4.0
    }

    pub fn is_immune(self) -> bool {
        self.quarters == 0
    }

    pub fn is_super_effective(self) -> bool {
        self.quarters > 4
    }

    pub fn is_not_very_effective(self) -> bool {
        self.quarters > 0 && self.quarters < 4
    }
}

impl PokemonType {
    /// Looks up the offensive relationship of `self` attacking `defending`.
    pub fn effectiveness_against(self, defending: PokemonType) -> Effectiveness {
        use Effectiveness::*;
        use PokemonType::*;

        match (self, defending) {
            // Normal
            (Normal, Ghost) => NoEffect,
            (Normal, Rock) => NotVeryEffective,

            // Fire
            (Fire, Grass) | (Fire, Ice) | (Fire, Bug) => SuperEffective,
            (Fire, Water) | (Fire, Fire) | (Fire, Rock) | (Fire, Dragon) => NotVeryEffective,

            // Water
            (Water, Fire) | (Water, Ground) | (Water, Rock) => SuperEffective,
            (Water, Water) | (Water, Grass) | (Water, Dragon) => NotVeryEffective,

            // Grass
            (Grass, Water) | (Grass, Ground) | (Grass, Rock) => SuperEffective,
            (Grass, Fire)
            | (Grass, Grass)
            | (Grass, Poison)
            | (Grass, Flying)
            | (Grass, Bug)
            | (Grass, Dragon) => NotVeryEffective,

            // Electric
            (Electric, Water) | (Electric, Flying) => SuperEffective,
            (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => NotVeryEffective,
            (Electric, Ground) => NoEffect,

            // Ice
            (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => SuperEffective,
            (Ice, Fire) | (Ice, Water) | (Ice, Ice) => NotVeryEffective,

            // Fighting
            (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) => SuperEffective,
            (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug) => {
                NotVeryEffective
            }
            (Fighting, Ghost) => NoEffect,

            // Poison
            (Poison, Grass) => SuperEffective,
            (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => {
                NotVeryEffective
            }

            // Ground
            (Ground, Fire) | (Ground, Electric) | (Ground, Poison) => SuperEffective,
            (Ground, Grass) | (Ground, Bug) => NotVeryEffective,
            (Ground, Flying) => NoEffect,

            // Flying
            (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => SuperEffective,
            (Flying, Electric) | (Flying, Rock) => NotVeryEffective,

            // Psychic
            (Psychic, Fighting) | (Psychic, Poison) => SuperEffective,
            (Psychic, Psychic) => NotVeryEffective,

            // Bug
            (Bug, Grass) | (Bug, Psychic) => SuperEffective,
            (Bug, Fire) | (Bug, Fighting) | (Bug, Poison) | (Bug, Flying) | (Bug, Ghost) => {
                NotVeryEffective
            }

            // Rock
            (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => SuperEffective,
            (Rock, Fighting) | (Rock, Ground) => NotVeryEffective,

            // Ghost
            (Ghost, Psychic) | (Ghost, Ghost) => SuperEffective,
            (Ghost, Normal) => NoEffect,

            // Dragon
            (Dragon, Dragon) => SuperEffective,

            _ => Neutral,
        }
    }

    /// Combined multiplier against a defender with one or two types.
    /// A "no effect" matchup on either type yields exactly zero.
    pub fn multiplier_against(
        self,
        primary: PokemonType,
        secondary: Option<PokemonType>,
    ) -> TypeMultiplier {
        let first = self.effectiveness_against(primary);
        let second = secondary
            .map(|t| self.effectiveness_against(t))
            .unwrap_or(Effectiveness::Neutral);

        if first == Effectiveness::NoEffect || second == Effectiveness::NoEffect {
            return TypeMultiplier::IMMUNE;
        }
        TypeMultiplier::from_quarters(first.quarters() * second.quarters() / 4)
    }
}
