use raffle_core::db::open_db_in_memory;
use raffle_core::{DrawService, RaffleError, RaffleStats, RosterService};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

fn seeded_conn(entries: &[(&str, &str)]) -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    let mut service = RosterService::new(&mut conn);
    for (name, mission) in entries {
        service.add_participant(name, mission).unwrap();
    }
    conn
}

/// Always selects the first eligible name in name order.
fn first_pick() -> StepRng {
    StepRng::new(0, 0)
}

fn stats(conn: &mut Connection) -> RaffleStats {
    DrawService::new(conn).stats().unwrap()
}

#[test]
fn draw_never_picks_self_and_removes_drawer_from_pool() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let mut service = DrawService::new(&mut conn);

    let outcome = service.draw("A").unwrap();
    assert_eq!(outcome.participant, "A");
    assert!(outcome.picked_name == "B" || outcome.picked_name == "C");

    let available = service.available_participants().unwrap();
    assert_eq!(available, vec!["B".to_string(), "C".to_string()]);
}

#[test]
fn draw_copies_recipient_mission_from_roster() {
    let mut conn = seeded_conn(&[("A", "buy a mug"), ("B", "buy a book")]);
    let outcome = DrawService::new(&mut conn).draw("A").unwrap();
    assert_eq!(outcome.picked_name, "B");
    assert_eq!(outcome.mission, "buy a book");
}

#[test]
fn recorded_mission_survives_later_mission_edits() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "original")]);
    DrawService::new(&mut conn).draw("A").unwrap();

    RosterService::new(&mut conn)
        .update_mission("B", "edited")
        .unwrap();

    let history = DrawService::new(&mut conn).list_draws().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].mission, "original");
}

#[test]
fn draw_uses_roster_mission_not_pool_mirror() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "roster mission")]);
    conn.execute(
        "UPDATE available_names SET mission = 'stale mirror' WHERE name = 'B';",
        [],
    )
    .unwrap();

    let outcome = DrawService::new(&mut conn).draw("A").unwrap();
    assert_eq!(outcome.mission, "roster mission");
}

#[test]
fn participant_cannot_draw_twice_until_reset() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let mut service = DrawService::new(&mut conn);
    service.draw("A").unwrap();

    let err = service.draw("A").unwrap_err();
    assert!(matches!(err, RaffleError::AlreadyDrawnOrUnknown(ref name) if name == "A"));

    service.reset().unwrap();
    service.draw("A").unwrap();
}

#[test]
fn unknown_participant_is_already_drawn_or_unknown() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b")]);
    let err = DrawService::new(&mut conn).draw("Z").unwrap_err();
    assert!(matches!(err, RaffleError::AlreadyDrawnOrUnknown(_)));
    assert_eq!(stats(&mut conn).drawn, 0);
}

#[test]
fn blank_participant_is_validation_error() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b")]);
    let err = DrawService::new(&mut conn).draw("   ").unwrap_err();
    assert!(matches!(err, RaffleError::Validation(_)));
}

#[test]
fn last_drawer_with_only_self_left_gets_no_eligible_recipients() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let mut service = DrawService::new(&mut conn);
    let mut rng = first_pick();

    assert_eq!(service.draw_with_rng("A", &mut rng).unwrap().picked_name, "B");
    assert_eq!(service.draw_with_rng("B", &mut rng).unwrap().picked_name, "A");

    let err = service.draw_with_rng("C", &mut rng).unwrap_err();
    assert!(matches!(err, RaffleError::NoEligibleRecipients(ref name) if name == "C"));

    // Failed draws commit nothing.
    assert_eq!(
        service.available_participants().unwrap(),
        vec!["C".to_string()]
    );
    let stats = service.stats().unwrap();
    assert_eq!((stats.total, stats.drawn, stats.remaining), (3, 2, 1));
}

#[test]
fn three_person_round_closes_the_cycle_or_exhausts() {
    let mut full_cycles = 0;
    let mut exhausted = 0;

    for seed in 0..200 {
        let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
        let mut service = DrawService::new(&mut conn);
        let mut rng = StdRng::seed_from_u64(seed);

        let first = service.draw_with_rng("A", &mut rng).unwrap();
        if first.picked_name != "B" {
            continue;
        }
        let second = service.draw_with_rng("B", &mut rng).unwrap();
        assert!(second.picked_name == "A" || second.picked_name == "C");

        if second.picked_name == "C" {
            let third = service.draw_with_rng("C", &mut rng).unwrap();
            assert_eq!(third.picked_name, "A");
            assert_eq!(service.stats().unwrap(), RaffleStats {
                total: 3,
                drawn: 3,
                remaining: 0,
            });
            full_cycles += 1;
        } else {
            let err = service.draw_with_rng("C", &mut rng).unwrap_err();
            assert!(matches!(err, RaffleError::NoEligibleRecipients(_)));
            exhausted += 1;
        }
    }

    assert!(full_cycles > 0);
    assert!(exhausted > 0);
}

#[test]
fn full_round_never_repeats_a_recipient() {
    let names = ["Ada", "Bora", "Cem", "Derya", "Ece", "Fikret", "Gul", "Hakan"];
    for seed in 0..25 {
        let entries = names.iter().map(|name| (*name, "gift")).collect::<Vec<_>>();
        let mut conn = seeded_conn(&entries);
        let mut service = DrawService::new(&mut conn);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut recipients = BTreeSet::new();
        for name in names {
            match service.draw_with_rng(name, &mut rng) {
                Ok(outcome) => {
                    assert_ne!(outcome.picked_name, outcome.participant);
                    assert!(recipients.insert(outcome.picked_name));
                }
                Err(RaffleError::NoEligibleRecipients(drawer)) => {
                    assert_eq!(drawer, names[names.len() - 1]);
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        let history = service.list_draws().unwrap();
        assert_eq!(history.len(), recipients.len());
    }
}

#[test]
fn selection_covers_every_eligible_recipient() {
    let mut seen = BTreeSet::new();
    for seed in 0..100 {
        let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c"), ("D", "d")]);
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = DrawService::new(&mut conn)
            .draw_with_rng("A", &mut rng)
            .unwrap();
        seen.insert(outcome.picked_name);
    }
    let expected = ["B", "C", "D"]
        .into_iter()
        .map(String::from)
        .collect::<BTreeSet<_>>();
    assert_eq!(seen, expected);
}

#[test]
fn reset_is_idempotent_and_refills_pool_from_roster() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    {
        let mut service = DrawService::new(&mut conn);
        service.draw("A").unwrap();
        service.draw("B").unwrap();
    }
    RosterService::new(&mut conn)
        .add_participant("D", "d")
        .unwrap();

    let expected = vec!["A", "B", "C", "D"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    let mut service = DrawService::new(&mut conn);
    for _ in 0..2 {
        service.reset().unwrap();
        assert_eq!(service.available_participants().unwrap(), expected);
        assert!(service.list_draws().unwrap().is_empty());
        let stats = service.stats().unwrap();
        assert_eq!((stats.total, stats.drawn, stats.remaining), (4, 0, 4));
    }
}

#[test]
fn draw_history_is_newest_first() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    let mut service = DrawService::new(&mut conn);
    service.draw("A").unwrap();
    service.draw("C").unwrap();

    let drawers = service
        .list_draws()
        .unwrap()
        .into_iter()
        .map(|record| record.participant)
        .collect::<Vec<_>>();
    assert_eq!(drawers, vec!["C".to_string(), "A".to_string()]);
}

#[test]
fn removed_participant_is_never_picked() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    RosterService::new(&mut conn).remove_participant("B").unwrap();

    for _ in 0..10 {
        let mut service = DrawService::new(&mut conn);
        let outcome = service.draw("A").unwrap();
        assert_eq!(outcome.picked_name, "C");
        service.reset().unwrap();
    }
}

#[test]
fn pooled_name_with_ledger_row_cannot_draw_again() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b"), ("C", "c")]);
    DrawService::new(&mut conn).draw("A").unwrap();
    conn.execute(
        "INSERT INTO available_names (name, mission) VALUES ('A', 'a');",
        [],
    )
    .unwrap();

    let err = DrawService::new(&mut conn).draw("A").unwrap_err();
    assert!(matches!(err, RaffleError::AlreadyDrawnOrUnknown(_)));
    assert_eq!(DrawService::new(&mut conn).list_draws().unwrap().len(), 1);
}

#[test]
fn drawn_at_is_epoch_milliseconds() {
    let mut conn = seeded_conn(&[("A", "a"), ("B", "b")]);
    let before = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;
    DrawService::new(&mut conn).draw("A").unwrap();
    let after = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as i64;

    let drawn_at = DrawService::new(&mut conn).list_draws().unwrap()[0].drawn_at;
    // SQLite's clock may round a millisecond either way.
    assert!(drawn_at >= before - 1, "{drawn_at} < {before}");
    assert!(drawn_at <= after + 1, "{drawn_at} > {after}");
}
