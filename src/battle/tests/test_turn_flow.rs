#[cfg(test)]
mod tests {
    use crate::battle::engine::{IgnoreReason, Submission};
    use crate::battle::state::{BattlePhase, Side};
    use crate::battle::tests::common::{
        default_battle, instant_config, test_battle, timed_config, FixedPolicy,
        TestCombatantBuilder,
    };
    use crate::config::{DuelConfig, Timings};
    use pretty_assertions::assert_eq;
    use schema::ElementType::*;
    use std::time::Duration;

    fn striker() -> TestCombatantBuilder {
        TestCombatantBuilder::new("Striker", 50)
            .with_types(vec![Fire])
            .with_move("Blaze", Fire, 100, 1.0)
            .with_move("Fizzle", Normal, 1, 0.01)
    }

    fn target(max_hp: u32) -> TestCombatantBuilder {
        TestCombatantBuilder::new("Target", max_hp)
            .with_types(vec![Grass])
            .with_move("Torrent", Water, 100, 1.0)
    }

    #[test]
    fn test_new_battle_waits_for_the_player() {
        let battle = default_battle(&instant_config());
        let snapshot = battle.snapshot();

        assert_eq!(snapshot.phase, BattlePhase::PlayerTurn);
        assert!(snapshot.is_player_turn);
        assert!(!snapshot.is_locked);
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.left.hp(), 178);
        assert_eq!(snapshot.right.hp(), 190);
        assert_eq!(
            snapshot.recent_events,
            vec!["Battle initialized. Auraflare awaits your command.".to_string()]
        );
        assert_eq!(snapshot.status_text(), "Auraflare is waiting for your move.");
        // Prismatic Shield heals and Auraflare is at full HP.
        assert_eq!(battle.legal_moves(), vec![true, true, true, false]);
    }

    #[test]
    fn test_accepted_move_locks_until_resolved() {
        let mut battle = default_battle(&instant_config());

        assert_eq!(battle.submit_player_move(0), Submission::Accepted);
        let locked = battle.snapshot();
        assert_eq!(locked.phase, BattlePhase::ResolvingPlayerAction);
        assert!(locked.is_locked);
        assert!(locked.is_player_turn);
        assert_eq!(battle.legal_moves(), vec![false; 4]);

        let rng_before = battle.rng_state();
        assert_eq!(
            battle.submit_player_move(1),
            Submission::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(battle.snapshot(), locked);
        assert_eq!(battle.rng_state(), rng_before);
    }

    #[test]
    fn test_illegal_selections_are_ignored() {
        let mut battle = default_battle(&instant_config());
        let before = battle.snapshot();
        let rng_before = battle.rng_state();

        assert_eq!(
            battle.submit_player_move(7),
            Submission::Ignored(IgnoreReason::UnknownMove(7))
        );
        assert_eq!(
            battle.submit_player_move(3),
            Submission::Ignored(IgnoreReason::HealAtFullHp)
        );

        assert_eq!(battle.snapshot(), before);
        assert_eq!(battle.rng_state(), rng_before);
        assert_eq!(battle.pending_tasks(), 0);
    }

    #[test]
    fn test_turn_passes_to_opponent_and_back() {
        let mut battle = default_battle(&instant_config());

        battle.submit_player_move(0);
        battle.run_until_idle();

        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        let lines: Vec<&str> = battle.log().lines().collect();
        assert_eq!(
            lines,
            vec![
                "Voltide uses Storm Cascade for 116 damage.",
                "It's super effective! Auraflare absorbs intense damage.",
                "Auraflare uses Solar Pulse for 33 damage.",
                "It's not very effective... Voltide endures gracefully.",
                "Battle initialized. Auraflare awaits your command.",
            ]
        );
        assert_eq!(battle.combatant(Side::Left).hp(), 62);
        assert_eq!(battle.combatant(Side::Right).hp(), 157);
        // Auraflare is hurt now, so the healing move opens up.
        assert_eq!(battle.legal_moves(), vec![true; 4]);
    }

    #[test]
    fn test_player_rejected_during_opponent_turn() {
        let mut battle = default_battle(&timed_config());
        battle.submit_player_move(0);

        // The turn is handed over at 620 ms; the opponent acts 800 ms later.
        battle.advance(Duration::from_millis(620));
        assert_eq!(battle.phase(), BattlePhase::OpponentTurn);
        assert!(!battle.snapshot().is_player_turn);
        assert!(!battle.snapshot().is_locked);
        assert_eq!(battle.snapshot().status_text(), "Voltide is studying the field...");

        assert_eq!(
            battle.submit_player_move(0),
            Submission::Ignored(IgnoreReason::NotPlayersTurn)
        );
    }

    #[test]
    fn test_knockout_finishes_the_battle() {
        let mut battle = test_battle(striker().build_spec(), target(8).build_spec(), &instant_config());

        battle.submit_player_move(0);
        battle.run_until_idle();

        assert_eq!(battle.phase(), BattlePhase::Finished(Side::Left));
        assert_eq!(battle.winner(), Some(Side::Left));
        assert_eq!(battle.pending_tasks(), 0);

        let snapshot = battle.snapshot();
        assert!(!snapshot.is_player_turn);
        assert!(!snapshot.is_locked);
        assert_eq!(snapshot.right.hp(), 0);
        assert_eq!(snapshot.status_text(), "Striker wins the exhibition battle!");
        assert_eq!(
            battle.log().newest(),
            Some("Striker takes the spotlight. Battle complete.")
        );
    }

    #[test]
    fn test_finished_battle_is_stable() {
        let mut battle = test_battle(striker().build_spec(), target(8).build_spec(), &instant_config());
        battle.submit_player_move(0);
        battle.run_until_idle();
        let finished = battle.snapshot();
        let rng_after = battle.rng_state();

        assert_eq!(
            battle.submit_player_move(0),
            Submission::Ignored(IgnoreReason::BattleFinished)
        );
        battle.advance(Duration::from_secs(10));
        battle.run_until_idle();

        assert_eq!(battle.snapshot(), finished);
        assert_eq!(battle.rng_state(), rng_after);
        assert_eq!(battle.legal_moves(), vec![false, false]);
    }

    #[test]
    fn test_opponent_can_win() {
        let mut battle = test_battle(
            striker().build_spec(),
            target(200).build_spec(),
            &instant_config(),
        )
        .with_behavior(Box::new(FixedPolicy(0)));

        // Fizzle misses on the first draw, then Torrent knocks Striker out.
        assert_eq!(battle.submit_player_move(1), Submission::Accepted);
        battle.run_until_idle();
        assert_eq!(
            battle.log().lines().nth(1),
            Some("Target uses Torrent for 186 damage.")
        );
        assert_eq!(battle.winner(), Some(Side::Right));
        assert_eq!(battle.combatant(Side::Left).hp(), 0);
        assert_eq!(battle.combatant(Side::Right).hp(), 200);
        assert!(battle
            .log()
            .lines()
            .any(|line| line == "Striker's Fizzle gently dissipates; it missed."));
    }

    /// Hits land after the hand-over: 700 ms against a 620 ms conclude.
    fn late_hit_config() -> DuelConfig {
        DuelConfig {
            timings: Timings {
                hit_delay_ms: 700,
                ..Timings::default()
            },
            ..timed_config()
        }
    }

    #[test]
    fn test_late_knockout_stops_the_fainted_opponent() {
        let mut battle = test_battle(
            striker().build_spec(),
            target(8).build_spec(),
            &late_hit_config(),
        )
        .with_behavior(Box::new(FixedPolicy(0)));

        battle.submit_player_move(0);
        battle.advance(Duration::from_millis(650));
        assert_eq!(battle.phase(), BattlePhase::OpponentTurn);

        battle.advance(Duration::from_millis(100));
        assert_eq!(battle.phase(), BattlePhase::Finished(Side::Left));
        assert_eq!(battle.pending_tasks(), 0);

        battle.advance(Duration::from_secs(5));
        battle.run_until_idle();
        assert_eq!(battle.winner(), Some(Side::Left));
        assert_eq!(battle.combatant(Side::Left).hp(), 50);
        assert_eq!(battle.combatant(Side::Right).hp(), 0);
        assert!(!battle.log().lines().any(|line| line.contains("Torrent")));
        assert_eq!(
            battle.log().newest(),
            Some("Striker takes the spotlight. Battle complete.")
        );
    }

    #[test]
    fn test_late_knockout_of_the_player() {
        let mut battle = test_battle(
            striker().build_spec(),
            target(200).build_spec(),
            &late_hit_config(),
        )
        .with_behavior(Box::new(FixedPolicy(0)));

        battle.submit_player_move(1);
        battle.run_until_idle();

        assert_eq!(battle.winner(), Some(Side::Right));
        assert_eq!(battle.combatant(Side::Left).hp(), 0);
        assert_eq!(battle.pending_tasks(), 0);
        assert_eq!(
            battle.submit_player_move(0),
            Submission::Ignored(IgnoreReason::BattleFinished)
        );
    }

    #[test]
    fn test_out_of_range_behavior_choice_is_clamped() {
        let mut battle = test_battle(
            striker().build_spec(),
            target(200).build_spec(),
            &instant_config(),
        )
        .with_behavior(Box::new(FixedPolicy(9)));

        battle.submit_player_move(1);
        battle.run_until_idle();

        // Target only knows Torrent, so slot 9 falls back to it.
        assert_eq!(battle.winner(), Some(Side::Right));
    }
}
