#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, EventBus, TurnRng};
    use crate::battle::tests::common::{assert_ok, create_test_battle, TestCombatantBuilder};
    use pretty_assertions::assert_eq;
    use schema::PokemonType;

    #[test]
    fn test_focus_energy_twice_pumps_once_then_fails() {
        let p1 = TestCombatantBuilder::new("Kingler", PokemonType::Water)
            .with_moves(&["Focus Energy"])
            .build();
        let p2 = TestCombatantBuilder::new("Onix", PokemonType::Rock)
            .with_moves(&["Harden"])
            .build();
        // Neither Focus Energy nor Harden can miss, so no draws are made.
        let mut battle = create_test_battle(
            p1,
            vec![0, 0],
            p2,
            vec![0, 0],
            TurnRng::new_for_test(vec![]),
        );
        let mut bus = EventBus::new();

        assert_ok(battle.play_round(&mut bus));
        assert!(battle.combatant(0).flags.crit_boost);
        assert_ok(battle.play_round(&mut bus));
        bus.print_debug_with_message("Events for Focus Energy twice:");

        let pumped = bus
            .events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::CritBoostApplied { .. }))
            .count();
        let failed = bus
            .events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::MoveFailed))
            .count();
        assert_eq!(pumped, 1);
        assert_eq!(failed, 1);
        assert!(battle.combatant(0).flags.crit_boost, "the boost never toggles off");

        let lines = bus.formatted();
        let pumped_at = lines.iter().position(|l| l == "Kingler is getting pumped!");
        let failed_at = lines.iter().position(|l| l == "But it failed!");
        assert!(pumped_at < failed_at);
    }
}
