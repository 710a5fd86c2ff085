use schema::{MoveData, PokemonType, StatType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

/// The six battle stats of a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl Stats {
    /// HP, Attack, Defense, Special Attack, Special Defense, Speed.
    pub fn from_array(values: [u16; 6]) -> Self {
        Self {
            hp: values[0],
            attack: values[1],
            defense: values[2],
            sp_attack: values[3],
            sp_defense: values[4],
            speed: values[5],
        }
    }

    pub fn get(&self, stat: StatType) -> u16 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.sp_attack,
            StatType::SpecialDefense => self.sp_defense,
            StatType::Speed => self.speed,
        }
    }

    fn get_mut(&mut self, stat: StatType) -> &mut u16 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpecialAttack => &mut self.sp_attack,
            StatType::SpecialDefense => &mut self.sp_defense,
            StatType::Speed => &mut self.speed,
        }
    }
}

/// Result of asking a [`StatBlock`] to move a stat by some stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageChange {
    Changed { old_stage: i8, new_stage: i8 },
    /// The stage counter already sits at the limit in the requested direction.
    AtLimit,
}

/// Fixed stats from creation plus the battle-time values derived from them.
///
/// `current` moves in response to stage changes and status penalties but
/// always stays within `[floor(base / 6), base * 6]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    base: Stats,
    current: Stats,
    stages: [i8; 5],
}

impl StatBlock {
    pub fn new(base: Stats) -> Self {
        Self {
            base,
            current: base,
            stages: [0; 5],
        }
    }

    pub fn max_hp(&self) -> u16 {
        self.base.hp
    }

    pub fn stat(&self, stat: StatType) -> u16 {
        self.current.get(stat)
    }

    pub fn stage(&self, stat: StatType) -> i8 {
        self.stages[stat.stage_index()]
    }

    pub fn bounds(&self, stat: StatType) -> (u16, u16) {
        let base = self.base.get(stat);
        (base / 6, base.saturating_mul(6))
    }

    /// Net change to the current stat for moving `stages` stages.
    ///
    /// Attack uses its own asymmetric rule: boosts add `floor(base * n / 2)`,
    /// drops remove `floor(2 * base / (n + 2))`. Every other stat moves by
    /// `floor(base * stages / 6)`.
    pub fn stage_delta(base: u16, stat: StatType, stages: i8) -> i32 {
        let base = base as i32;
        let stages = stages as i32;
        match stat {
            StatType::Attack if stages > 0 => base * stages / 2,
            StatType::Attack if stages < 0 => -((2 * base) / (-stages + 2)),
            StatType::Attack => 0,
            _ => (base * stages).div_euclid(6),
        }
    }

    /// Moves a stat by `stages`, clamping the stage counter to [-6, 6] and the
    /// resulting stat to its bounds. Only the stages actually applied count
    /// towards the net change.
    pub fn apply_stage_change(&mut self, stat: StatType, stages: i8) -> StageChange {
        let old_stage = self.stage(stat);
        let new_stage = (old_stage + stages).clamp(MIN_STAGE, MAX_STAGE);
        if new_stage == old_stage {
            return StageChange::AtLimit;
        }
        self.stages[stat.stage_index()] = new_stage;

        let delta = Self::stage_delta(self.base.get(stat), stat, new_stage - old_stage);
        let updated = self.current.get(stat) as i32 + delta;
        self.set_clamped(stat, updated.max(0) as u32);

        StageChange::Changed {
            old_stage,
            new_stage,
        }
    }

    /// Divides the current stat, rounding up.
    pub(crate) fn divide_current(&mut self, stat: StatType, divisor: u16) {
        let value = self.current.get(stat) as u32;
        self.set_clamped(stat, value.div_ceil(divisor as u32));
    }

    pub(crate) fn multiply_current(&mut self, stat: StatType, factor: u16) {
        let value = self.current.get(stat) as u32;
        self.set_clamped(stat, value * factor as u32);
    }

    fn set_clamped(&mut self, stat: StatType, value: u32) {
        let (low, high) = self.bounds(stat);
        *self.current.get_mut(stat) = value.clamp(low as u32, high as u32) as u16;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCondition {
    #[default]
    Healthy,
    Paralysis,
    Poison,
    BadlyPoisoned,
    Burn,
    Sleep,
    Freeze,
}

impl StatusCondition {
    pub fn deals_chip_damage(self) -> bool {
        matches!(
            self,
            StatusCondition::Burn | StatusCondition::Poison | StatusCondition::BadlyPoisoned
        )
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusCondition::Healthy => "healthy",
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Poison => "poison",
            StatusCondition::BadlyPoisoned => "bad poison",
            StatusCondition::Burn => "burn",
            StatusCondition::Sleep => "sleep",
            StatusCondition::Freeze => "freeze",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Confusion {
    pub active: bool,
    pub turns: u8,
}

#[derive(Clone, Debug, Default)]
pub struct TurnFlags {
    pub flinched: bool,
    pub recharging: bool,
    /// Move stored by the first turn of a two-turn move.
    pub charging: Option<Arc<MoveData>>,
    pub crit_boost: bool,
}

/// One side's creature for the whole battle. Created once, mutated in place.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub stats: StatBlock,
    current_hp: u16,
    pub status: StatusCondition,
    pub inflicted_turns: u8,
    pub confusion: Confusion,
    pub flags: TurnFlags,
    moves: [Arc<MoveData>; 4],
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        primary_type: PokemonType,
        secondary_type: Option<PokemonType>,
        stats: Stats,
        moves: [Arc<MoveData>; 4],
    ) -> Self {
        Self {
            name: name.into(),
            primary_type,
            secondary_type,
            current_hp: stats.hp,
            stats: StatBlock::new(stats),
            status: StatusCondition::Healthy,
            inflicted_turns: 0,
            confusion: Confusion::default(),
            flags: TurnFlags::default(),
            moves,
        }
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u16 {
        self.stats.max_hp()
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_type(&self, pokemon_type: PokemonType) -> bool {
        self.primary_type == pokemon_type || self.secondary_type == Some(pokemon_type)
    }

    pub fn moves(&self) -> &[Arc<MoveData>; 4] {
        &self.moves
    }

    pub fn move_at(&self, index: usize) -> Option<&Arc<MoveData>> {
        self.moves.get(index)
    }

    /// Sets HP directly, clamped to [0, max HP].
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Removes up to `amount` HP and returns how much was actually lost.
    pub fn apply_damage(&mut self, amount: u16) -> u16 {
        let lost = amount.min(self.current_hp);
        self.current_hp -= lost;
        lost
    }

    /// Restores up to `amount` HP and returns how much was actually gained.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let gained = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += gained;
        gained
    }

    /// Applies a primary status. Only legal from Healthy; returns false
    /// otherwise. Burn halves current Attack and Paralysis quarters current
    /// Speed, both rounding up.
    pub fn set_status(&mut self, status: StatusCondition) -> bool {
        if self.status != StatusCondition::Healthy || status == StatusCondition::Healthy {
            return false;
        }
        match status {
            StatusCondition::Burn => self.stats.divide_current(StatType::Attack, 2),
            StatusCondition::Paralysis => self.stats.divide_current(StatType::Speed, 4),
            _ => {}
        }
        self.status = status;
        self.inflicted_turns = 0;
        true
    }

    /// Returns the combatant to Healthy, reversing the Burn or Paralysis
    /// penalty. Calling it on a healthy combatant changes nothing.
    pub fn cure_status(&mut self) -> Option<StatusCondition> {
        let previous = self.status;
        match previous {
            StatusCondition::Healthy => return None,
            StatusCondition::Burn => self.stats.multiply_current(StatType::Attack, 2),
            StatusCondition::Paralysis => self.stats.multiply_current(StatType::Speed, 4),
            _ => {}
        }
        self.status = StatusCondition::Healthy;
        self.inflicted_turns = 0;
        Some(previous)
    }

    pub fn change_stat_stage(&mut self, stat: StatType, stages: i8) -> StageChange {
        self.stats.apply_stage_change(stat, stages)
    }

    /// Starts confusion. Returns false if already confused.
    pub fn confuse(&mut self) -> bool {
        if self.confusion.active {
            return false;
        }
        self.confusion = Confusion {
            active: true,
            turns: 0,
        };
        true
    }

    pub fn end_confusion(&mut self) {
        self.confusion = Confusion::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use schema::MoveCategory;

    fn tackle() -> Arc<MoveData> {
        Arc::new(MoveData {
            name: "Tackle".to_string(),
            move_type: PokemonType::Normal,
            category: MoveCategory::Physical,
            power: Some(40),
            accuracy: Some(100),
            effects: Vec::new(),
        })
    }

    fn combatant(stats: [u16; 6]) -> Combatant {
        let tackle = tackle();
        Combatant::new(
            "Testmon",
            PokemonType::Normal,
            None,
            Stats::from_array(stats),
            [tackle.clone(), tackle.clone(), tackle.clone(), tackle],
        )
    }

    #[rstest]
    #[case("defense +1", 120, StatType::Defense, 1, 20)]
    #[case("defense -1", 120, StatType::Defense, -1, -20)]
    #[case("speed -1 floors down", 100, StatType::Speed, -1, -17)]
    #[case("attack +1", 120, StatType::Attack, 1, 60)]
    #[case("attack +2", 120, StatType::Attack, 2, 120)]
    #[case("attack -1", 120, StatType::Attack, -1, -80)]
    #[case("attack -2", 120, StatType::Attack, -2, -60)]
    fn test_stage_delta(
        #[case] desc: &str,
        #[case] base: u16,
        #[case] stat: StatType,
        #[case] stages: i8,
        #[case] expected: i32,
    ) {
        assert_eq!(StatBlock::stage_delta(base, stat, stages), expected, "{}", desc);
    }

    #[test]
    fn test_stage_counter_blocks_at_limit() {
        let mut mon = combatant([100, 100, 100, 100, 100, 100]);
        for _ in 0..3 {
            assert!(matches!(
                mon.change_stat_stage(StatType::Defense, 2),
                StageChange::Changed { .. }
            ));
        }
        assert_eq!(mon.stats.stage(StatType::Defense), 6);
        assert_eq!(mon.change_stat_stage(StatType::Defense, 1), StageChange::AtLimit);
    }

    #[test]
    fn test_attack_drop_clamps_to_floor() {
        let mut mon = combatant([100, 90, 100, 100, 100, 100]);
        mon.change_stat_stage(StatType::Attack, -1); // 90 - 60 = 30
        assert_eq!(mon.stats.stat(StatType::Attack), 30);
        mon.change_stat_stage(StatType::Attack, -1); // 30 - 60 -> clamped to 15
        assert_eq!(mon.stats.stat(StatType::Attack), 15);
    }

    #[test]
    fn test_burn_halves_attack_and_cure_restores() {
        let mut mon = combatant([100, 101, 100, 100, 100, 100]);
        assert!(mon.set_status(StatusCondition::Burn));
        assert_eq!(mon.stats.stat(StatType::Attack), 51);
        assert!(!mon.set_status(StatusCondition::Poison));

        assert_eq!(mon.cure_status(), Some(StatusCondition::Burn));
        assert_eq!(mon.stats.stat(StatType::Attack), 102);
        assert_eq!(mon.cure_status(), None);
        assert_eq!(mon.stats.stat(StatType::Attack), 102);
    }

    #[test]
    fn test_paralysis_quarters_speed() {
        let mut mon = combatant([100, 100, 100, 100, 100, 90]);
        mon.set_status(StatusCondition::Paralysis);
        assert_eq!(mon.stats.stat(StatType::Speed), 23);
        mon.cure_status();
        assert_eq!(mon.stats.stat(StatType::Speed), 92);
    }

    #[test]
    fn test_confusion_does_not_stack() {
        let mut mon = combatant([100; 6]);
        assert!(mon.confuse());
        mon.confusion.turns = 3;
        assert!(!mon.confuse());
        assert_eq!(mon.confusion.turns, 3);
        mon.end_confusion();
        assert_eq!(mon.confusion, Confusion::default());
    }

    fn stat_strategy() -> impl Strategy<Value = StatType> {
        prop_oneof![
            Just(StatType::Attack),
            Just(StatType::Defense),
            Just(StatType::SpecialAttack),
            Just(StatType::SpecialDefense),
            Just(StatType::Speed),
        ]
    }

    proptest! {
        #[test]
        fn prop_current_stat_stays_in_bounds(
            base in 1u16..=400,
            changes in proptest::collection::vec((stat_strategy(), -2i8..=2), 0..40),
        ) {
            let mut mon = combatant([base; 6]);
            for (stat, stages) in changes {
                mon.change_stat_stage(stat, stages);
                let value = mon.stats.stat(stat);
                prop_assert!(value >= base / 6);
                prop_assert!(value <= base * 6);
                prop_assert!((-6..=6).contains(&mon.stats.stage(stat)));
            }
        }

        #[test]
        fn prop_hp_stays_in_bounds(
            max_hp in 1u16..=700,
            ops in proptest::collection::vec((any::<bool>(), 0u16..=1000), 0..50),
        ) {
            let mut mon = combatant([max_hp, 50, 50, 50, 50, 50]);
            for (is_damage, amount) in ops {
                if is_damage {
                    mon.apply_damage(amount);
                } else {
                    mon.heal(amount);
                }
                prop_assert!(mon.current_hp() <= mon.max_hp());
            }
        }
    }
}
