#[cfg(test)]
mod tests {
    use crate::battle::state::BattlePhase;
    use crate::battle::tests::common::{default_battle, instant_config, record};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_observer_sees_every_transition_of_an_exchange() {
        let mut battle = default_battle(&instant_config());
        let recording = record(&mut battle);

        battle.submit_player_move(0);
        battle.run_until_idle();

        let recording = recording.borrow();
        let phases: Vec<BattlePhase> = recording.states.iter().map(|s| s.phase).collect();
        assert_eq!(
            phases,
            vec![
                BattlePhase::ResolvingPlayerAction, // commit
                BattlePhase::ResolvingPlayerAction, // hit lands
                BattlePhase::ResolvingPlayerAction, // animation cleared
                BattlePhase::OpponentTurn,          // hand-over
                BattlePhase::ResolvingOpponentAction,
                BattlePhase::ResolvingOpponentAction,
                BattlePhase::ResolvingOpponentAction,
                BattlePhase::PlayerTurn,
            ]
        );
        assert_eq!(recording.states.last(), Some(&battle.snapshot()));
        assert!(recording.states[0].is_locked);
        assert_eq!(recording.states[0].right.hp(), 190);
        assert_eq!(recording.states[1].right.hp(), 157);
    }

    #[test]
    fn test_narration_arrives_in_emission_order() {
        let mut battle = default_battle(&instant_config());
        let recording = record(&mut battle);

        battle.submit_player_move(0);
        battle.run_until_idle();

        let mut logged: Vec<String> = battle.log().lines().map(str::to_string).collect();
        logged.reverse();
        // The opening line was narrated before the observer subscribed.
        assert_eq!(&logged[1..], recording.borrow().narration.as_slice());
        assert_eq!(
            recording.borrow().narration[0],
            "It's not very effective... Voltide endures gracefully."
        );
    }

    #[test]
    fn test_ignored_submission_publishes_nothing() {
        let mut battle = default_battle(&instant_config());
        let recording = record(&mut battle);

        battle.submit_player_move(3);
        battle.submit_player_move(12);

        assert!(recording.borrow().states.is_empty());
        assert!(recording.borrow().narration.is_empty());
    }

    #[test]
    fn test_reset_is_published() {
        let mut battle = default_battle(&instant_config());
        let recording = record(&mut battle);

        battle.request_reset();

        let recording = recording.borrow();
        assert_eq!(
            recording.narration,
            vec!["Battle reset. Auraflare awaits your next instruction.".to_string()]
        );
        assert_eq!(recording.states.len(), 1);
        assert_eq!(recording.states[0].phase, BattlePhase::PlayerTurn);
    }

    #[test]
    fn test_log_keeps_only_the_newest_lines() {
        let mut config = instant_config();
        config.log_capacity = 3;
        let mut battle = default_battle(&config);

        battle.submit_player_move(0);
        battle.run_until_idle();

        let lines: Vec<&str> = battle.log().lines().collect();
        assert_eq!(
            lines,
            vec![
                "Voltide uses Storm Cascade for 116 damage.",
                "It's super effective! Auraflare absorbs intense damage.",
                "Auraflare uses Solar Pulse for 33 damage.",
            ]
        );
    }
}
