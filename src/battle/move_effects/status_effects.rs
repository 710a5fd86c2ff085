use super::roll_chance;
use crate::battle::damage::type_multiplier;
use crate::battle::state::{BattleEvent, EventSink, TurnRng};
use crate::pokemon::{Combatant, StatusCondition};
use schema::{MoveData, PokemonType};

/// Type-based immunity to a primary status.
///
/// Fire cannot be burned, Ice cannot be frozen, Poison cannot be poisoned,
/// and Paralysis fails whenever the move's own type cannot touch the defender.
pub(super) fn is_immune_to(
    status: StatusCondition,
    move_data: &MoveData,
    defender: &Combatant,
) -> bool {
    match status {
        StatusCondition::Burn => defender.has_type(PokemonType::Fire),
        StatusCondition::Freeze => defender.has_type(PokemonType::Ice),
        StatusCondition::Poison | StatusCondition::BadlyPoisoned => {
            defender.has_type(PokemonType::Poison)
        }
        StatusCondition::Paralysis => type_multiplier(move_data, defender).is_immune(),
        StatusCondition::Sleep | StatusCondition::Healthy => false,
    }
}

fn inflict(status: StatusCondition, defender: &mut Combatant, sink: &mut dyn EventSink) -> bool {
    if !defender.set_status(status) {
        return false;
    }
    tracing::debug!(pokemon = %defender.name, ?status, "status inflicted");
    sink.emit(BattleEvent::StatusApplied {
        target: defender.name.clone(),
        status,
    });
    true
}

/// Chance-based status rider on a damaging move. Ineligible targets are skipped silently.
pub(super) fn try_secondary_status(
    status: StatusCondition,
    chance: u8,
    move_data: &MoveData,
    defender: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) {
    if !roll_chance(chance, rng, &format!("{} chance", status)) {
        return;
    }
    if defender.status != StatusCondition::Healthy || is_immune_to(status, move_data, defender) {
        return;
    }
    inflict(status, defender, sink);
}

/// Direct infliction from a Status-category move, reporting why it failed.
pub(super) fn inflict_status_move(
    status: StatusCondition,
    move_data: &MoveData,
    defender: &mut Combatant,
    sink: &mut dyn EventSink,
) {
    if defender.status != StatusCondition::Healthy {
        sink.emit(BattleEvent::MoveFailed);
    } else if is_immune_to(status, move_data, defender) {
        sink.emit(BattleEvent::MoveHadNoEffect {
            target: defender.name.clone(),
        });
    } else {
        inflict(status, defender, sink);
    }
}

/// Roll for Burn, Freeze or Paralysis, then apply the one picked.
pub(super) fn apply_tri_attack(
    chance: u8,
    move_data: &MoveData,
    defender: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) {
    if !roll_chance(chance, rng, "Tri Attack chance") {
        return;
    }
    let status = match rng.range(1, 3, "Tri Attack status pick") {
        1 => StatusCondition::Burn,
        2 => StatusCondition::Freeze,
        _ => StatusCondition::Paralysis,
    };
    if defender.status == StatusCondition::Healthy && !is_immune_to(status, move_data, defender) {
        inflict(status, defender, sink);
    }
}

/// Returns false if the target was already confused.
pub(super) fn apply_confusion(defender: &mut Combatant, sink: &mut dyn EventSink) -> bool {
    if !defender.confuse() {
        return false;
    }
    sink.emit(BattleEvent::ConfusionApplied {
        target: defender.name.clone(),
    });
    true
}

pub(super) fn apply_focus_energy(attacker: &mut Combatant, sink: &mut dyn EventSink) {
    if attacker.flags.crit_boost {
        sink.emit(BattleEvent::MoveFailed);
        return;
    }
    attacker.flags.crit_boost = true;
    sink.emit(BattleEvent::CritBoostApplied {
        target: attacker.name.clone(),
    });
}
