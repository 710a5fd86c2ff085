//! Rolls a random level-100 individual of a species: EVs, IVs and nature.

use crate::data::Dex;
use crate::errors::{BattleResult, SpeciesDataError};
use crate::pokemon::{Combatant, Stats};
use rand::Rng;
use schema::StatType::{
    Attack as Atk, Defense as Def, SpecialAttack as SpA, SpecialDefense as SpD, Speed as Spe,
};
use schema::{MoveData, SpeciesData, StatType};
use std::sync::Arc;

pub const EV_BUDGET: u16 = 508;
pub const MAX_EV: u16 = 252;
pub const MAX_IV: u16 = 31;

/// A nature raises one non-HP stat by 10% and lowers another by 10%.
/// Neutral natures touch neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nature {
    pub name: &'static str,
    pub raised: Option<StatType>,
    pub lowered: Option<StatType>,
}

const fn nature(name: &'static str, raised: StatType, lowered: StatType) -> Nature {
    Nature {
        name,
        raised: Some(raised),
        lowered: Some(lowered),
    }
}

const fn neutral(name: &'static str) -> Nature {
    Nature {
        name,
        raised: None,
        lowered: None,
    }
}

pub const NATURES: [Nature; 25] = [
    neutral("Hardy"),
    nature("Lonely", Atk, Def),
    nature("Adamant", Atk, SpA),
    nature("Naughty", Atk, SpD),
    nature("Brave", Atk, Spe),
    nature("Bold", Def, Atk),
    neutral("Docile"),
    nature("Impish", Def, SpA),
    nature("Lax", Def, SpD),
    nature("Relaxed", Def, Spe),
    nature("Modest", SpA, Atk),
    nature("Mild", SpA, Def),
    neutral("Bashful"),
    nature("Rash", SpA, SpD),
    nature("Quiet", SpA, Spe),
    nature("Calm", SpD, Atk),
    nature("Gentle", SpD, Def),
    nature("Careful", SpD, SpA),
    neutral("Quirky"),
    nature("Sassy", SpD, Spe),
    nature("Timid", Spe, Atk),
    nature("Hasty", Spe, Def),
    nature("Jolly", Spe, SpA),
    nature("Naive", Spe, SpD),
    neutral("Serious"),
];

impl Nature {
    /// Applies the nature to an already computed non-HP stat, flooring.
    pub fn adjust(&self, stat: StatType, value: u16) -> u16 {
        let value = value as u32;
        let adjusted = if self.raised == Some(stat) {
            value * 11 / 10
        } else if self.lowered == Some(stat) {
            value * 9 / 10
        } else {
            value
        };
        adjusted as u16
    }
}

/// Six effort values sharing a 508 budget, none above 252.
pub fn roll_evs<R: Rng + ?Sized>(rng: &mut R) -> [u16; 6] {
    let mut evs = [0u16; 6];
    let mut remaining = EV_BUDGET;
    for (slot, ev) in evs.iter_mut().enumerate() {
        let cap = remaining.min(MAX_EV);
        *ev = if slot == 5 { cap } else { rng.random_range(0..=cap) };
        remaining -= *ev;
    }
    evs
}

pub fn roll_ivs<R: Rng + ?Sized>(rng: &mut R) -> [u16; 6] {
    std::array::from_fn(|_| rng.random_range(0..=MAX_IV))
}

/// Level-100 stats from base stats, IVs, EVs and nature.
///
/// HP is `2*base + iv + ev/4 + 115`; the others are `2*base + iv + ev/4 + 5`
/// before the nature multiplier.
pub fn compute_stats(base: [u16; 6], ivs: [u16; 6], evs: [u16; 6], nature: &Nature) -> Stats {
    let raw = |i: usize| 2 * base[i] + ivs[i] + evs[i] / 4;
    let non_hp = [
        StatType::Attack,
        StatType::Defense,
        StatType::SpecialAttack,
        StatType::SpecialDefense,
        StatType::Speed,
    ];

    let mut values = [raw(0) + 115, 0, 0, 0, 0, 0];
    for (offset, stat) in non_hp.into_iter().enumerate() {
        let i = offset + 1;
        values[i] = nature.adjust(stat, raw(i) + 5);
    }
    Stats::from_array(values)
}

/// Builds a fresh combatant for `species` with randomly rolled individual values.
pub fn generate_combatant<R: Rng + ?Sized>(
    species: &SpeciesData,
    moves: [Arc<MoveData>; 4],
    rng: &mut R,
) -> Combatant {
    let evs = roll_evs(rng);
    let ivs = roll_ivs(rng);
    let nature = &NATURES[rng.random_range(0..NATURES.len())];
    let stats = compute_stats(species.base_stats.as_array(), ivs, evs, nature);
    tracing::debug!(
        species = %species.name,
        nature = nature.name,
        ?evs,
        ?ivs,
        ?stats,
        "generated combatant"
    );
    Combatant::new(
        species.name.clone(),
        species.primary_type,
        species.secondary_type,
        stats,
        moves,
    )
}

/// Picks a species uniformly from the dex and generates it.
pub fn random_combatant<R: Rng + ?Sized>(dex: &Dex, rng: &mut R) -> BattleResult<Combatant> {
    if dex.species_count() == 0 {
        return Err(SpeciesDataError::Empty.into());
    }
    let species = dex.species_by_index(rng.random_range(0..dex.species_count()))?;
    let moves = dex.build_moveset(species)?;
    Ok(generate_combatant(species, moves, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BattleEngineError;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn by_name(name: &str) -> Nature {
        *NATURES
            .iter()
            .find(|nature| nature.name == name)
            .expect("known nature")
    }

    #[test]
    fn test_five_neutral_natures() {
        let neutral = NATURES.iter().filter(|n| n.raised.is_none()).count();
        assert_eq!(neutral, 5);
        assert!(NATURES
            .iter()
            .all(|n| n.raised.is_none() || n.raised != n.lowered));
    }

    #[rstest]
    #[case("neutral nature", "Hardy", [215, 105, 105, 105, 105, 105])]
    #[case("adamant raises attack, lowers sp. attack", "Adamant", [215, 115, 105, 94, 105, 105])]
    #[case("timid raises speed, lowers attack", "Timid", [215, 94, 105, 105, 105, 115])]
    fn test_compute_stats_flat_spread(
        #[case] desc: &str,
        #[case] nature: &str,
        #[case] expected: [u16; 6],
    ) {
        // base 50, IV 0, EV 0: HP = 100 + 115, others = 100 + 5
        let stats = compute_stats([50; 6], [0; 6], [0; 6], &by_name(nature));
        assert_eq!(stats, Stats::from_array(expected), "{}", desc);
    }

    #[test]
    fn test_compute_stats_counts_ivs_and_evs() {
        let stats = compute_stats(
            [80, 82, 83, 100, 100, 80],
            [31, 0, 10, 20, 30, 31],
            [252, 4, 0, 252, 0, 0],
            &by_name("Serious"),
        );
        assert_eq!(stats, Stats::from_array([369, 170, 181, 288, 235, 196]));
    }

    #[test]
    fn test_random_combatant_comes_from_dex() {
        let dex = Dex::builtin().expect("builtin dex");
        let mut rng = StdRng::seed_from_u64(3);
        let mon = random_combatant(&dex, &mut rng).expect("combatant");
        assert!(dex.species_names().any(|name| name == mon.name));
        assert_eq!(mon.current_hp(), mon.max_hp());
    }

    #[test]
    fn test_random_combatant_from_empty_dex() {
        let dex = Dex::from_parts(Vec::new(), Vec::new()).expect("empty dex");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            random_combatant(&dex, &mut rng).unwrap_err(),
            BattleEngineError::SpeciesData(SpeciesDataError::Empty)
        );
    }

    proptest! {
        #[test]
        fn prop_evs_respect_budget(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let evs = roll_evs(&mut rng);
            prop_assert!(evs.iter().sum::<u16>() <= EV_BUDGET);
            prop_assert!(evs.iter().all(|&ev| ev <= MAX_EV));
        }

        #[test]
        fn prop_ivs_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            prop_assert!(roll_ivs(&mut rng).iter().all(|&iv| iv <= MAX_IV));
        }
    }
}
