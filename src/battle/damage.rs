//! Hit, critical-hit and damage arithmetic.
//!
//! The base formula is floored, then critical x2, STAB x1.5, type
//! effectiveness and the random roll (85..=100)/100 are applied exactly as one
//! integer fraction and floored once at the end. A matchup with no effect
//! returns 0 before any critical or random roll is drawn.

use crate::battle::state::TurnRng;
use crate::pokemon::Combatant;
use schema::{HitPattern, MoveCategory, MoveData, StatType, TypeMultiplier};

const CONFUSION_POWER: u64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitDamage {
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: TypeMultiplier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub hit: bool,
    pub damage: u16,
    pub critical: bool,
    pub effectiveness: TypeMultiplier,
}

/// Accuracy check. Moves without an accuracy value never miss and draw nothing.
pub fn move_hits(move_data: &MoveData, rng: &mut TurnRng) -> bool {
    let Some(accuracy) = move_data.accuracy else {
        return true;
    };
    let roll = rng.range(0, 99, &format!("Accuracy check for {}", move_data.name));
    roll < accuracy as u32
}

pub fn type_multiplier(move_data: &MoveData, defender: &Combatant) -> TypeMultiplier {
    move_data
        .move_type
        .multiplier_against(defender.primary_type, defender.secondary_type)
}

pub fn is_stab(move_data: &MoveData, attacker: &Combatant) -> bool {
    attacker.has_type(move_data.move_type)
}

/// The N in a 1-in-N critical hit chance.
pub fn critical_hit_denominator(move_data: &MoveData, attacker: &Combatant) -> u32 {
    match (move_data.is_high_crit(), attacker.flags.crit_boost) {
        (true, true) => 2,
        (false, true) => 4,
        (true, false) => 8,
        (false, false) => 16,
    }
}

pub fn roll_critical_hit(move_data: &MoveData, attacker: &Combatant, rng: &mut TurnRng) -> bool {
    let denominator = critical_hit_denominator(move_data, attacker);
    rng.range(0, denominator - 1, "Critical hit check") == 0
}

fn offense_and_defense(
    category: MoveCategory,
    attacker: &Combatant,
    defender: &Combatant,
) -> (u64, u64) {
    let (offense, defense) = match category {
        MoveCategory::Special => (StatType::SpecialAttack, StatType::SpecialDefense),
        _ => (StatType::Attack, StatType::Defense),
    };
    (
        attacker.stats.stat(offense) as u64,
        defender.stats.stat(defense) as u64,
    )
}

/// `floor(42 * power * offense / (50 * defense)) + 2`
pub fn base_damage(power: u64, offense: u64, defense: u64) -> u64 {
    (42 * power * offense) / (50 * defense.max(1)) + 2
}

/// Pure damage for one hit given a decided critical flag and random roll.
pub fn calculate_hit_damage(
    move_data: &MoveData,
    attacker: &Combatant,
    defender: &Combatant,
    critical: bool,
    random_roll: u32,
) -> u16 {
    let effectiveness = type_multiplier(move_data, defender);
    let power = move_data.power.unwrap_or(0) as u64;
    if effectiveness.is_immune() || power == 0 {
        return 0;
    }

    let (offense, defense) = offense_and_defense(move_data.category, attacker, defender);
    let crit_factor = if critical { 2 } else { 1 };
    let stab_factor = if is_stab(move_data, attacker) { 3 } else { 2 };
    // base * crit * stab/2 * quarters/4 * roll/100
    let damage = base_damage(power, offense, defense)
        * crit_factor
        * stab_factor
        * effectiveness.quarters() as u64
        * random_roll as u64
        / (2 * 4 * 100);

    damage.min(u16::MAX as u64) as u16
}

/// Rolls critical hit and damage variance for one hit of an already-landed move.
pub fn roll_hit_damage(
    move_data: &MoveData,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut TurnRng,
) -> HitDamage {
    let effectiveness = type_multiplier(move_data, defender);
    if effectiveness.is_immune() {
        return HitDamage {
            damage: 0,
            critical: false,
            effectiveness,
        };
    }

    let critical = roll_critical_hit(move_data, attacker, rng);
    let random_roll = rng.range(85, 100, "Damage roll");
    HitDamage {
        damage: calculate_hit_damage(move_data, attacker, defender, critical, random_roll),
        critical,
        effectiveness,
    }
}

/// Accuracy check followed by a single hit's damage.
pub fn compute_damage(
    move_data: &MoveData,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut TurnRng,
) -> DamageOutcome {
    if !move_hits(move_data, rng) {
        return DamageOutcome {
            hit: false,
            damage: 0,
            critical: false,
            effectiveness: type_multiplier(move_data, defender),
        };
    }
    let hit = roll_hit_damage(move_data, attacker, defender, rng);
    DamageOutcome {
        hit: true,
        damage: hit.damage,
        critical: hit.critical,
        effectiveness: hit.effectiveness,
    }
}

/// How many times a landed move strikes. Multi-hit moves roll 1..=8:
/// 1-3 two hits, 4-6 three, 7 four, 8 five.
pub fn roll_hit_count(move_data: &MoveData, rng: &mut TurnRng) -> u8 {
    match move_data.hit_pattern() {
        HitPattern::Single => 1,
        HitPattern::Double => 2,
        HitPattern::Multi => match rng.range(1, 8, "Multi-hit count") {
            1..=3 => 2,
            4..=6 => 3,
            7 => 4,
            _ => 5,
        },
    }
}

/// Typeless 40-power hit using the combatant's own Attack against its own Defense.
pub fn confusion_damage(combatant: &Combatant) -> u16 {
    let attack = combatant.stats.stat(StatType::Attack) as u64;
    let defense = combatant.stats.stat(StatType::Defense) as u64;
    base_damage(CONFUSION_POWER, attack, defense).min(u16::MAX as u64) as u16
}
