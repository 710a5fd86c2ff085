//! Per-combatant mobility checks and end-of-round chip damage.

use crate::battle::damage::confusion_damage;
use crate::battle::state::{ActionFailureReason, BattleEvent, EventSink, TurnRng};
use crate::pokemon::{Combatant, StatusCondition};

/// Confused combatants always snap out once the counter reaches this value.
pub const MAX_CONFUSED_TURNS: u8 = 5;

/// Last sleep turn index on which the combatant may stay asleep.
const SLEEP_GUARANTEED_WAKE_TURN: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mobility {
    Acts,
    Prevented(ActionFailureReason),
    HurtItself { damage: u16 },
}

/// Decides whether `combatant` may act this turn.
///
/// Order: recharge, primary status, flinch, confusion. Must run exactly once
/// per combatant per round before its move resolves. The flinch flag is
/// always consumed here.
pub fn can_act(combatant: &mut Combatant, rng: &mut TurnRng, sink: &mut dyn EventSink) -> Mobility {
    let flinched = std::mem::take(&mut combatant.flags.flinched);

    if combatant.flags.recharging {
        combatant.flags.recharging = false;
        return prevent(combatant, ActionFailureReason::IsRecharging, sink);
    }

    if let Some(reason) = check_primary_status(combatant, rng, sink) {
        return prevent(combatant, reason, sink);
    }

    if flinched {
        return prevent(combatant, ActionFailureReason::IsFlinching, sink);
    }

    if combatant.confusion.active {
        return check_confusion(combatant, rng, sink);
    }

    Mobility::Acts
}

fn prevent(
    combatant: &Combatant,
    reason: ActionFailureReason,
    sink: &mut dyn EventSink,
) -> Mobility {
    tracing::debug!(pokemon = %combatant.name, ?reason, "action prevented");
    sink.emit(BattleEvent::ActionFailed {
        pokemon: combatant.name.clone(),
        reason,
    });
    Mobility::Prevented(reason)
}

fn check_primary_status(
    combatant: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) -> Option<ActionFailureReason> {
    match combatant.status {
        StatusCondition::Paralysis => {
            if rng.range(0, 3, "Full paralysis check") == 0 {
                Some(ActionFailureReason::IsParalyzed)
            } else {
                None
            }
        }
        StatusCondition::Sleep => check_sleep(combatant, rng, sink),
        StatusCondition::Freeze => {
            if rng.range(0, 4, "Thaw check") == 0 {
                cure(combatant, sink);
                None
            } else {
                Some(ActionFailureReason::IsFrozen)
            }
        }
        StatusCondition::Healthy
        | StatusCondition::Poison
        | StatusCondition::BadlyPoisoned
        | StatusCondition::Burn => None,
    }
}

fn check_sleep(
    combatant: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) -> Option<ActionFailureReason> {
    let turn = combatant.inflicted_turns;
    let wakes = match turn {
        0 => false,
        t if t < SLEEP_GUARANTEED_WAKE_TURN => rng.range(0, 2, "Wake up check") == 0,
        _ => true,
    };

    if wakes {
        cure(combatant, sink);
        None
    } else {
        combatant.inflicted_turns += 1;
        Some(ActionFailureReason::IsAsleep)
    }
}

fn cure(combatant: &mut Combatant, sink: &mut dyn EventSink) {
    if let Some(status) = combatant.cure_status() {
        sink.emit(BattleEvent::StatusRemoved {
            target: combatant.name.clone(),
            status,
        });
    }
}

fn check_confusion(
    combatant: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) -> Mobility {
    sink.emit(BattleEvent::ConfusionCheck {
        target: combatant.name.clone(),
    });

    let turns = combatant.confusion.turns;
    let snapped = if turns >= MAX_CONFUSED_TURNS {
        true
    } else if turns >= 2 {
        rng.range(turns as u32, 6, "Confusion snap-out check") == turns as u32
    } else {
        false
    };

    if snapped {
        combatant.end_confusion();
        sink.emit(BattleEvent::ConfusionEnded {
            target: combatant.name.clone(),
        });
        return Mobility::Acts;
    }

    combatant.confusion.turns += 1;
    if rng.range(0, 1, "Confusion self-hit check") == 0 {
        let self_hit = confusion_damage(combatant);
        let damage = combatant.apply_damage(self_hit);
        sink.emit(BattleEvent::ConfusionSelfHit {
            target: combatant.name.clone(),
            damage,
        });
        sink.emit(BattleEvent::DamageDealt {
            target: combatant.name.clone(),
            damage,
            remaining_hp: combatant.current_hp(),
        });
        return Mobility::HurtItself { damage };
    }
    Mobility::Acts
}

/// End-of-round damage from Burn, Poison or Badly Poisoned. Returns the HP
/// lost, or None if the combatant takes no chip damage.
pub fn apply_chip_damage(combatant: &mut Combatant, sink: &mut dyn EventSink) -> Option<u16> {
    let status = combatant.status;
    if !status.deals_chip_damage() || combatant.is_fainted() {
        return None;
    }

    let max_hp = combatant.max_hp() as u32;
    let amount = match status {
        StatusCondition::BadlyPoisoned => max_hp * (combatant.inflicted_turns as u32 + 1) / 16,
        _ => max_hp / 8,
    };
    combatant.inflicted_turns = combatant.inflicted_turns.saturating_add(1);

    let damage = combatant.apply_damage(amount.min(u16::MAX as u32) as u16);
    sink.emit(BattleEvent::StatusDamage {
        target: combatant.name.clone(),
        status,
        damage,
        remaining_hp: combatant.current_hp(),
    });
    Some(damage)
}
