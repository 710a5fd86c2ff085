use crate::battle::engine::{Battle, BattleSide};
use crate::battle::state::TurnRng;
use crate::config::{BattleConfig, SpeedTieRule};
use crate::data::{DataProvider, Dex};
use crate::errors::{ActionError, BattleResult};
use crate::player::MoveSelector;
use crate::pokemon::{Combatant, Stats, StatusCondition};
use schema::{MoveData, PokemonType};
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

/// The built-in dex, loaded once per test binary.
pub fn dex() -> &'static Dex {
    static DEX: OnceLock<Dex> = OnceLock::new();
    DEX.get_or_init(|| match Dex::builtin() {
        Ok(dex) => dex,
        Err(err) => panic!("Failed to load built-in dex: {}", err),
    })
}

/// Looks up a move from the built-in data by name.
pub fn move_named(name: &str) -> Arc<MoveData> {
    match dex().lookup_move(name) {
        Ok(move_data) => move_data,
        Err(err) => panic!("Failed to load move {}: {}", name, err),
    }
}

/// A builder for test combatants with flat stats and chosen moves.
///
/// # Example
/// ```ignore
/// let mon = TestCombatantBuilder::new("Pikachu", PokemonType::Electric)
///     .with_moves(&["Thunderbolt"])
///     .with_status(StatusCondition::Paralysis)
///     .build();
/// ```
pub struct TestCombatantBuilder {
    name: String,
    primary_type: PokemonType,
    secondary_type: Option<PokemonType>,
    stats: [u16; 6],
    moves: Vec<String>,
    status: Option<StatusCondition>,
    current_hp: Option<u16>,
}

impl TestCombatantBuilder {
    /// All six stats default to 100 and every slot holds Tackle.
    pub fn new(name: &str, primary_type: PokemonType) -> Self {
        Self {
            name: name.to_string(),
            primary_type,
            secondary_type: None,
            stats: [100; 6],
            moves: Vec::new(),
            status: None,
            current_hp: None,
        }
    }

    pub fn with_secondary_type(mut self, secondary: PokemonType) -> Self {
        self.secondary_type = Some(secondary);
        self
    }

    /// HP, Attack, Defense, Special Attack, Special Defense, Speed.
    pub fn with_stats(mut self, stats: [u16; 6]) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_speed(mut self, speed: u16) -> Self {
        self.stats[5] = speed;
        self
    }

    /// Fills the move slots in order; unfilled slots repeat the first move.
    pub fn with_moves(mut self, moves: &[&str]) -> Self {
        self.moves = moves.iter().map(|name| name.to_string()).collect();
        self
    }

    /// Applies the status through the normal infliction path, penalties included.
    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_hp(mut self, hp: u16) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self) -> Combatant {
        let names: Vec<&str> = if self.moves.is_empty() {
            vec!["Tackle"]
        } else {
            self.moves.iter().map(String::as_str).collect()
        };
        let slot = |index: usize| move_named(names.get(index).copied().unwrap_or(names[0]));
        let moves = [slot(0), slot(1), slot(2), slot(3)];

        let mut combatant = Combatant::new(
            self.name,
            self.primary_type,
            self.secondary_type,
            Stats::from_array(self.stats),
            moves,
        );
        if let Some(status) = self.status {
            combatant.set_status(status);
        }
        if let Some(hp) = self.current_hp {
            combatant.set_hp(hp);
        }
        combatant
    }
}

/// Replays a fixed list of move slots, then reports that it ran out.
pub struct ScriptedSelector {
    choices: VecDeque<usize>,
}

impl ScriptedSelector {
    pub fn new(choices: Vec<usize>) -> Self {
        Self {
            choices: choices.into(),
        }
    }

    /// Picks the same slot for `turns` turns.
    pub fn repeat(index: usize, turns: usize) -> Self {
        Self::new(vec![index; turns])
    }
}

impl MoveSelector for ScriptedSelector {
    fn choose_move(&mut self, _user: &Combatant, _opponent: &Combatant) -> BattleResult<usize> {
        self.choices
            .pop_front()
            .ok_or_else(|| ActionError::NoInput("script exhausted".to_string()).into())
    }
}

/// Side one is "Player 1", side two "Player 2". Speed ties go to side one so
/// scripted RNG lists never need a coin-flip value.
pub fn create_test_battle(
    p1: Combatant,
    p1_choices: Vec<usize>,
    p2: Combatant,
    p2_choices: Vec<usize>,
    rng: TurnRng,
) -> Battle {
    let config = BattleConfig {
        speed_tie: SpeedTieRule::PlayerOneFirst,
        ..BattleConfig::default()
    };
    create_test_battle_with_config(p1, p1_choices, p2, p2_choices, rng, config)
}

pub fn create_test_battle_with_config(
    p1: Combatant,
    p1_choices: Vec<usize>,
    p2: Combatant,
    p2_choices: Vec<usize>,
    rng: TurnRng,
    config: BattleConfig,
) -> Battle {
    Battle::new(
        BattleSide::new("Player 1", p1, Box::new(ScriptedSelector::new(p1_choices))),
        BattleSide::new("Player 2", p2, Box::new(ScriptedSelector::new(p2_choices))),
        rng,
        config,
    )
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
