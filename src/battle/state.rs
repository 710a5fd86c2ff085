use crate::pokemon::StatusCondition;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::{StatType, TypeMultiplier};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// `fainted` is the side whose combatant reached 0 HP.
    Over { winner: usize, fainted: usize },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle Management
    BattleStarted {
        players: [String; 2],
        pokemon: [String; 2],
    },
    TurnStarted {
        turn_number: u32,
    },
    CombatantStatus {
        owner: String,
        pokemon: String,
        hp: u16,
        max_hp: u16,
    },

    // Moves
    MoveUsed {
        pokemon: String,
        move_name: String,
    },
    MoveCharging {
        pokemon: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
    },
    CriticalHit,
    AttackTypeEffectiveness {
        multiplier: TypeMultiplier,
    },
    MultiHit {
        hits: u8,
    },
    MoveFailed,
    MoveHadNoEffect {
        target: String,
    },

    // Damage and Healing
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    RecoilDamage {
        pokemon: String,
        damage: u16,
    },
    CrashDamage {
        pokemon: String,
        damage: u16,
    },
    HpDrained {
        pokemon: String,
        from: String,
        amount: u16,
    },
    PokemonFainted {
        owner: String,
        pokemon: String,
    },

    // Status Conditions
    StatusApplied {
        target: String,
        status: StatusCondition,
    },
    StatusRemoved {
        target: String,
        status: StatusCondition,
    },
    StatusDamage {
        target: String,
        status: StatusCondition,
        damage: u16,
        remaining_hp: u16,
    },
    ConfusionApplied {
        target: String,
    },
    ConfusionCheck {
        target: String,
    },
    ConfusionEnded {
        target: String,
    },
    ConfusionSelfHit {
        target: String,
        damage: u16,
    },
    CritBoostApplied {
        target: String,
    },

    // Stat Changes
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        rising: bool,
    },

    // Action Prevention
    ActionFailed {
        pokemon: String,
        reason: ActionFailureReason,
    },

    // Battle End
    PlayerDefeated {
        player: String,
    },
    BattleEnded {
        winner: String,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    IsAsleep,
    IsFrozen,
    IsParalyzed,
    IsRecharging,
    IsFlinching,
}

impl BattleEvent {
    /// Formats the event into the line shown to players.
    /// Returns None for events that should not produce visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { players, pokemon } => Some(format!(
                "{} has {}. {} has {}.",
                players[0], pokemon[0], players[1], pokemon[1]
            )),
            BattleEvent::TurnStarted { turn_number } => {
                Some(format!("=== Turn {} ===", turn_number))
            }
            BattleEvent::CombatantStatus {
                owner,
                pokemon,
                hp,
                max_hp,
            } => Some(format!("{}'s {}: {}/{} HP", owner, pokemon, hp, max_hp)),

            BattleEvent::MoveUsed { pokemon, move_name } => {
                Some(format!("{} used {}!", pokemon, move_name))
            }
            BattleEvent::MoveCharging { pokemon, move_name } => {
                Some(format!("{} is charging up {}!", pokemon, move_name))
            }
            BattleEvent::MoveMissed { .. } => Some("The attack missed!".to_string()),
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::AttackTypeEffectiveness { multiplier } => {
                if multiplier.is_immune() {
                    Some("It had no effect!".to_string())
                } else if multiplier.is_super_effective() {
                    Some("It's super effective!".to_string())
                } else if multiplier.is_not_very_effective() {
                    Some("It's not very effective...".to_string())
                } else {
                    None
                }
            }
            BattleEvent::MultiHit { hits } => Some(format!("It hit {} times", hits)),
            BattleEvent::MoveFailed => Some("But it failed!".to_string()),
            BattleEvent::MoveHadNoEffect { .. } => Some("It had no effect!".to_string()),

            BattleEvent::DamageDealt { .. } => None,
            BattleEvent::RecoilDamage { pokemon, .. } => {
                Some(format!("{} is hit with recoil!", pokemon))
            }
            BattleEvent::CrashDamage { pokemon, .. } => {
                Some(format!("{} kept going and crashed!", pokemon))
            }
            BattleEvent::HpDrained { from, .. } => {
                Some(format!("{} had its energy drained!", from))
            }
            BattleEvent::PokemonFainted { pokemon, .. } => Some(format!("{} fainted.", pokemon)),

            BattleEvent::StatusApplied { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_applied(*status)
            )),
            BattleEvent::StatusRemoved { target, status } => Some(format!(
                "{} {}",
                target,
                Self::format_status_removed(*status)
            )),
            BattleEvent::StatusDamage { target, status, .. } => match status {
                StatusCondition::Burn => Some(format!("{} is hurt by its burn!", target)),
                _ => Some(format!("{} is hurt by poison!", target)),
            },
            BattleEvent::ConfusionApplied { target } => {
                Some(format!("{} became confused!", target))
            }
            BattleEvent::ConfusionCheck { target } => Some(format!("{} is confused!", target)),
            BattleEvent::ConfusionEnded { target } => {
                Some(format!("{} snapped out of confusion!", target))
            }
            BattleEvent::ConfusionSelfHit { target, .. } => {
                Some(format!("{} hit itself in confusion!", target))
            }
            BattleEvent::CritBoostApplied { target } => {
                Some(format!("{} is getting pumped!", target))
            }

            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let verb = if new_stage > old_stage { "rose" } else { "fell" };
                Some(format!("{}'s {} {}!", target, stat, verb))
            }
            BattleEvent::StatChangeBlocked {
                target,
                stat,
                rising,
            } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, direction))
            }

            BattleEvent::ActionFailed { pokemon, reason } => Some(format!(
                "{} {}",
                pokemon,
                Self::format_action_failure_reason(*reason)
            )),

            BattleEvent::PlayerDefeated { player } => Some(format!("{} lost!", player)),
            BattleEvent::BattleEnded { winner } => Some(format!("{} won the battle!", winner)),
        }
    }

    fn format_status_applied(status: StatusCondition) -> &'static str {
        match status {
            StatusCondition::Sleep => "fell asleep!",
            StatusCondition::Poison => "was poisoned!",
            StatusCondition::BadlyPoisoned => "was badly poisoned!",
            StatusCondition::Burn => "was burned!",
            StatusCondition::Freeze => "was frozen solid!",
            StatusCondition::Paralysis => "is paralyzed! It may be unable to move!",
            StatusCondition::Healthy => "is healthy.",
        }
    }

    fn format_status_removed(status: StatusCondition) -> &'static str {
        match status {
            StatusCondition::Sleep => "woke up!",
            StatusCondition::Freeze => "thawed out!",
            StatusCondition::Burn => "was cured of its burn!",
            StatusCondition::Paralysis => "was cured of paralysis!",
            _ => "was cured of its poison!",
        }
    }

    fn format_action_failure_reason(reason: ActionFailureReason) -> &'static str {
        match reason {
            ActionFailureReason::IsAsleep => "is fast asleep!",
            ActionFailureReason::IsFrozen => "is frozen solid!",
            ActionFailureReason::IsParalyzed => "is fully paralyzed!",
            ActionFailureReason::IsRecharging => "must recharge!",
            ActionFailureReason::IsFlinching => "flinched!",
        }
    }
}

/// Receiver for the narrative events the engine emits while resolving a battle.
pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

/// Event sink that collects every event in order.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Drains the collected events, leaving the bus empty.
    pub fn take(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Formatted lines of every visible event.
    pub fn formatted(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(?event, "battle event");
        self.push(event);
    }
}

impl std::fmt::Display for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u32>, index: usize },
    Seeded(StdRng),
}

/// Source of every random draw the battle makes.
///
/// Draws are inclusive ranges tagged with a reason so scripted runs can be
/// traced step by step.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Replays `outcomes` in order. Each value must lie in the range requested
    /// by the draw that consumes it.
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Draws a value in `low..=high`.
    pub fn range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                let Some(&outcome) = outcomes.get(*index) else {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                };
                *index += 1;
                debug_assert!(
                    (low..=high).contains(&outcome),
                    "scripted value {} outside {}..={} for '{}'",
                    outcome,
                    low,
                    high,
                    reason
                );
                outcome
            }
            RngSource::Seeded(rng) => rng.random_range(low..=high),
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);
        tracing::debug!(outcome, low, high, reason, "rng draw");

        outcome
    }

    /// Number of scripted values not yet consumed. Always 0 for seeded sources.
    pub fn remaining(&self) -> usize {
        match &self.source {
            RngSource::Scripted { outcomes, index } => outcomes.len() - index,
            RngSource::Seeded(_) => 0,
        }
    }
}
