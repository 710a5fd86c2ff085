#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, EventBus, GameState, TurnRng};
    use crate::battle::tests::common::{assert_ok, create_test_battle, move_named};
    use crate::pokemon::{Combatant, Stats, StatusCondition};
    use pretty_assertions::assert_eq;
    use schema::{MoveCategory, MoveData, MoveEffect, PokemonType, StatType};
    use std::sync::Arc;

    fn will_o_wisp() -> Arc<MoveData> {
        Arc::new(MoveData {
            name: "Will-O-Wisp".to_string(),
            move_type: PokemonType::Fire,
            category: MoveCategory::Status,
            power: None,
            accuracy: Some(100),
            effects: vec![MoveEffect::Burn(100)],
        })
    }

    fn four(move_data: Arc<MoveData>) -> [Arc<MoveData>; 4] {
        [
            Arc::clone(&move_data),
            Arc::clone(&move_data),
            Arc::clone(&move_data),
            move_data,
        ]
    }

    #[test]
    fn test_burn_halves_attack_and_chips_at_round_end() {
        let burner = Combatant::new(
            "Ponyta",
            PokemonType::Fire,
            None,
            Stats::from_array([100, 100, 100, 100, 100, 120]),
            four(will_o_wisp()),
        );
        let target = Combatant::new(
            "Rattata",
            PokemonType::Normal,
            None,
            Stats::from_array([100, 101, 100, 100, 100, 100]),
            four(move_named("Harden")),
        );
        let attack_before = target.stats.stat(StatType::Attack);

        // Only the accuracy roll; a 100% status trigger draws nothing.
        let mut battle = create_test_battle(
            burner,
            vec![0],
            target,
            vec![0],
            TurnRng::new_for_test(vec![0]),
        );
        let mut bus = EventBus::new();

        let state = assert_ok(battle.play_round(&mut bus));
        bus.print_debug_with_message("Events for burn scenario:");

        assert_eq!(state, GameState::Running);
        let target = battle.combatant(1);
        assert_eq!(target.status, StatusCondition::Burn);
        assert_eq!(target.stats.stat(StatType::Attack), attack_before.div_ceil(2));
        assert_eq!(target.stats.stat(StatType::Attack), 51);
        assert_eq!(target.current_hp(), 88);
        assert_eq!(battle.rng().remaining(), 0);

        assert!(bus.events().contains(&BattleEvent::StatusDamage {
            target: "Rattata".to_string(),
            status: StatusCondition::Burn,
            damage: 12,
            remaining_hp: 88,
        }));
        let lines = bus.formatted();
        assert!(lines.contains(&"Rattata was burned!".to_string()));
        assert_eq!(lines.last(), Some(&"Rattata is hurt by its burn!".to_string()));
    }

    #[test]
    fn test_fire_type_shrugs_off_status_burn() {
        let burner = Combatant::new(
            "Ponyta",
            PokemonType::Fire,
            None,
            Stats::from_array([100, 100, 100, 100, 100, 120]),
            four(will_o_wisp()),
        );
        let target = Combatant::new(
            "Vulpix",
            PokemonType::Fire,
            None,
            Stats::from_array([100; 6]),
            four(move_named("Harden")),
        );
        let mut battle = create_test_battle(
            burner,
            vec![0],
            target,
            vec![0],
            TurnRng::new_for_test(vec![0]),
        );
        let mut bus = EventBus::new();

        assert_ok(battle.play_round(&mut bus));

        assert_eq!(battle.combatant(1).status, StatusCondition::Healthy);
        assert_eq!(battle.combatant(1).current_hp(), 100);
        assert!(bus.formatted().contains(&"It had no effect!".to_string()));
    }
}
