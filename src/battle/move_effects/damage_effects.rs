use super::MoveOutcome;
use crate::battle::damage::{roll_hit_count, roll_hit_damage, type_multiplier};
use crate::battle::state::{BattleEvent, EventSink, TurnRng};
use crate::pokemon::Combatant;
use schema::{MoveData, MoveEffect};

/// Lands every hit of a damaging move that passed its accuracy check.
/// Stops early once the defender faints.
pub(super) fn execute_attack(
    move_data: &MoveData,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    rng: &mut TurnRng,
    sink: &mut dyn EventSink,
) -> MoveOutcome {
    let effectiveness = type_multiplier(move_data, defender);
    if effectiveness.is_immune() {
        sink.emit(BattleEvent::AttackTypeEffectiveness {
            multiplier: effectiveness,
        });
        return MoveOutcome {
            hit: true,
            ..MoveOutcome::default()
        };
    }

    let planned_hits = roll_hit_count(move_data, rng);
    let mut landed = 0u8;
    let mut total = 0u16;

    for _ in 0..planned_hits {
        let hit = roll_hit_damage(move_data, attacker, defender, rng);
        if hit.critical {
            sink.emit(BattleEvent::CriticalHit);
        }
        let lost = defender.apply_damage(hit.damage);
        total = total.saturating_add(lost);
        landed += 1;
        sink.emit(BattleEvent::DamageDealt {
            target: defender.name.clone(),
            damage: lost,
            remaining_hp: defender.current_hp(),
        });
        if defender.is_fainted() {
            break;
        }
    }

    sink.emit(BattleEvent::AttackTypeEffectiveness {
        multiplier: effectiveness,
    });
    if planned_hits > 1 {
        sink.emit(BattleEvent::MultiHit { hits: landed });
    }
    if move_data.requires_recharge() {
        attacker.flags.recharging = true;
    }

    MoveOutcome {
        hit: true,
        hits: landed,
        damage_dealt: total,
        started_charging: false,
    }
}

/// Recoil and drain, both measured against the HP the defender actually lost.
pub(super) fn apply_damage_based_effects(
    move_data: &MoveData,
    damage_dealt: u16,
    attacker: &mut Combatant,
    defender: &Combatant,
    sink: &mut dyn EventSink,
) {
    if damage_dealt == 0 {
        return;
    }
    for effect in &move_data.effects {
        match effect {
            MoveEffect::Recoil(divisor) => {
                let recoil = damage_dealt / (*divisor).max(1) as u16;
                if recoil > 0 {
                    let lost = attacker.apply_damage(recoil);
                    sink.emit(BattleEvent::RecoilDamage {
                        pokemon: attacker.name.clone(),
                        damage: lost,
                    });
                    sink.emit(BattleEvent::DamageDealt {
                        target: attacker.name.clone(),
                        damage: lost,
                        remaining_hp: attacker.current_hp(),
                    });
                }
            }
            MoveEffect::Drain(divisor) => {
                let drained = damage_dealt / (*divisor).max(1) as u16;
                let gained = attacker.heal(drained);
                sink.emit(BattleEvent::HpDrained {
                    pokemon: attacker.name.clone(),
                    from: defender.name.clone(),
                    amount: gained,
                });
            }
            _ => {}
        }
    }
}

/// Crash damage for a move that missed: a fixed fraction of the user's max HP.
pub(super) fn apply_crash_damage(
    move_data: &MoveData,
    attacker: &mut Combatant,
    sink: &mut dyn EventSink,
) {
    let Some(divisor) = move_data.crash_divisor() else {
        return;
    };
    let crash = attacker.max_hp() / divisor.max(1) as u16;
    let lost = attacker.apply_damage(crash);
    sink.emit(BattleEvent::CrashDamage {
        pokemon: attacker.name.clone(),
        damage: lost,
    });
    sink.emit(BattleEvent::DamageDealt {
        target: attacker.name.clone(),
        damage: lost,
        remaining_hp: attacker.current_hp(),
    });
}
