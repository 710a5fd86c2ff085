//! Applies a move's consequences to the two combatants.
//!
//! Damaging moves go through `damage_effects`, status infliction and the
//! crit-boost flag through `status_effects`, stage changes through
//! `stat_effects`. Every effect tag is matched exhaustively here.

mod damage_effects;
mod stat_effects;
mod status_effects;

use crate::battle::damage::move_hits;
use crate::battle::state::{BattleEvent, EventSink, TurnRng};
use crate::pokemon::{Combatant, StatusCondition};
use schema::{MoveCategory, MoveData, MoveEffect, Target};
use std::sync::Arc;

use self::{damage_effects::*, stat_effects::*, status_effects::*};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveContext {
    /// The attacker moved before the defender this round.
    pub acts_first: bool,
    /// The move is the second turn of a two-turn move.
    pub charged: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub hit: bool,
    pub hits: u8,
    pub damage_dealt: u16,
    pub started_charging: bool,
}

/// Resolves one use of `move_data` by `attacker` against `defender`.
pub fn resolve_move(
    move_data: &Arc<MoveData>,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    context: MoveContext,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) -> MoveOutcome {
    sink.emit(BattleEvent::MoveUsed {
        pokemon: attacker.name.clone(),
        move_name: move_data.name.clone(),
    });

    if move_data.is_charge_move() && !context.charged {
        attacker.flags.charging = Some(Arc::clone(move_data));
        sink.emit(BattleEvent::MoveCharging {
            pokemon: attacker.name.clone(),
            move_name: move_data.name.clone(),
        });
        return MoveOutcome {
            started_charging: true,
            ..MoveOutcome::default()
        };
    }

    if !move_hits(move_data, rng) {
        sink.emit(BattleEvent::MoveMissed {
            attacker: attacker.name.clone(),
        });
        apply_crash_damage(move_data, attacker, sink);
        return MoveOutcome::default();
    }

    match move_data.category {
        MoveCategory::Physical | MoveCategory::Special => {
            let outcome = execute_attack(move_data, attacker, defender, rng, sink);
            if outcome.damage_dealt > 0 && !defender.is_fainted() {
                apply_secondary_effects(move_data, attacker, defender, context, rng, sink);
            }
            apply_damage_based_effects(move_data, outcome.damage_dealt, attacker, defender, sink);
            outcome
        }
        MoveCategory::Status => {
            apply_status_move(move_data, attacker, defender, rng, sink);
            MoveOutcome {
                hit: true,
                ..MoveOutcome::default()
            }
        }
    }
}

/// Chance rolls draw 1..=10 and succeed when the roll is at most chance / 10.
/// A 100% chance succeeds without drawing.
pub(crate) fn roll_chance(chance: u8, rng: &mut TurnRng, reason: &str) -> bool {
    if chance >= 100 {
        return true;
    }
    rng.range(1, 10, reason) <= (chance / 10) as u32
}

fn select_target<'a>(
    target: Target,
    attacker: &'a mut Combatant,
    defender: &'a mut Combatant,
) -> &'a mut Combatant {
    match target {
        Target::User => attacker,
        Target::Target => defender,
    }
}

fn status_for(effect: &MoveEffect) -> Option<(StatusCondition, u8)> {
    match effect {
        MoveEffect::Burn(chance) => Some((StatusCondition::Burn, *chance)),
        MoveEffect::Freeze(chance) => Some((StatusCondition::Freeze, *chance)),
        MoveEffect::Paralyze(chance) => Some((StatusCondition::Paralysis, *chance)),
        MoveEffect::Poison(chance) => Some((StatusCondition::Poison, *chance)),
        MoveEffect::BadlyPoison(chance) => Some((StatusCondition::BadlyPoisoned, *chance)),
        MoveEffect::Sedate(chance) => Some((StatusCondition::Sleep, *chance)),
        _ => None,
    }
}

/// Chance-based riders on a damaging move that landed and left the defender standing.
fn apply_secondary_effects(
    move_data: &MoveData,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    context: MoveContext,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) {
    for effect in &move_data.effects {
        if let Some((status, chance)) = status_for(effect) {
            try_secondary_status(status, chance, move_data, defender, rng, sink);
            continue;
        }
        match effect {
            MoveEffect::Flinch(chance) => {
                // A flinch only matters if the defender has yet to move.
                if context.acts_first && roll_chance(*chance, rng, "Flinch check") {
                    defender.flags.flinched = true;
                }
            }
            MoveEffect::Confuse(chance) => {
                if roll_chance(*chance, rng, "Confusion check") {
                    apply_confusion(defender, sink);
                }
            }
            MoveEffect::TriAttack(chance) => {
                apply_tri_attack(*chance, move_data, defender, rng, sink);
            }
            MoveEffect::StatChange(target, stat, stages, chance) => {
                if roll_chance(*chance, rng, &format!("{} {:+} check", stat, stages)) {
                    let affected = select_target(*target, attacker, defender);
                    apply_stat_change(affected, *stat, *stages, false, sink);
                }
            }
            MoveEffect::Burn(_)
            | MoveEffect::Freeze(_)
            | MoveEffect::Paralyze(_)
            | MoveEffect::Poison(_)
            | MoveEffect::BadlyPoison(_)
            | MoveEffect::Sedate(_)
            | MoveEffect::Recoil(_)
            | MoveEffect::Drain(_)
            | MoveEffect::Crash(_)
            | MoveEffect::HighCrit
            | MoveEffect::MultiHit
            | MoveEffect::TwoHit
            | MoveEffect::Recharge
            | MoveEffect::ChargeUp
            | MoveEffect::FocusEnergy => {}
        }
    }
}

/// Effects of a Status-category move. Failures are reported, never raised.
fn apply_status_move(
    move_data: &MoveData,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) {
    for effect in &move_data.effects {
        if let Some((status, chance)) = status_for(effect) {
            if roll_chance(chance, rng, "Status move check") {
                inflict_status_move(status, move_data, defender, sink);
            } else {
                sink.emit(BattleEvent::MoveFailed);
            }
            continue;
        }
        match effect {
            MoveEffect::StatChange(target, stat, stages, chance) => {
                if roll_chance(*chance, rng, &format!("{} {:+} check", stat, stages)) {
                    let affected = select_target(*target, attacker, defender);
                    apply_stat_change(affected, *stat, *stages, true, sink);
                }
            }
            MoveEffect::Confuse(chance) => {
                if !roll_chance(*chance, rng, "Confusion check") || !apply_confusion(defender, sink)
                {
                    sink.emit(BattleEvent::MoveFailed);
                }
            }
            MoveEffect::TriAttack(chance) => {
                apply_tri_attack(*chance, move_data, defender, rng, sink);
            }
            MoveEffect::FocusEnergy => apply_focus_energy(attacker, sink),
            MoveEffect::Flinch(_)
            | MoveEffect::Burn(_)
            | MoveEffect::Freeze(_)
            | MoveEffect::Paralyze(_)
            | MoveEffect::Poison(_)
            | MoveEffect::BadlyPoison(_)
            | MoveEffect::Sedate(_)
            | MoveEffect::Recoil(_)
            | MoveEffect::Drain(_)
            | MoveEffect::Crash(_)
            | MoveEffect::HighCrit
            | MoveEffect::MultiHit
            | MoveEffect::TwoHit
            | MoveEffect::Recharge
            | MoveEffect::ChargeUp => {}
        }
    }
}
