use crate::battle::state::{BattleEvent, EventSink};
use crate::pokemon::{Combatant, StageChange};
use schema::StatType;

/// Moves `target`'s stat by `stages` and reports the result.
///
/// A change blocked at +6/-6 is only announced when `announce_block` is set,
/// so chance-based riders on damaging moves stay quiet.
pub(super) fn apply_stat_change(
    target: &mut Combatant,
    stat: StatType,
    stages: i8,
    announce_block: bool,
    sink: &mut dyn EventSink,
) -> StageChange {
    let change = target.change_stat_stage(stat, stages);
    match change {
        StageChange::Changed {
            old_stage,
            new_stage,
        } => {
            tracing::debug!(
                pokemon = %target.name,
                %stat,
                old_stage,
                new_stage,
                value = target.stats.stat(stat),
                "stat stage changed"
            );
            sink.emit(BattleEvent::StatStageChanged {
                target: target.name.clone(),
                stat,
                old_stage,
                new_stage,
            });
        }
        StageChange::AtLimit if announce_block => {
            sink.emit(BattleEvent::StatChangeBlocked {
                target: target.name.clone(),
                stat,
                rising: stages > 0,
            });
        }
        StageChange::AtLimit => {}
    }
    change
}
