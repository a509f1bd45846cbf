//! Phase lifecycle driven through the manual scheduler.

mod support;

use hippodrome::domain::{Phase, UserId};
use hippodrome::error::ControlError;
use hippodrome::port::inbound::Timer;
use hippodrome::port::outbound::{PhasePayload, RaceEvent};
use std::time::Duration;

use hippodrome::application::engine::{PauseOutcome, RaceTiming};
use hippodrome::testkit::race::{photo_finish, TestRace};
use rust_decimal_macros::dec;

use support::funded;

#[tokio::test]
async fn winning_bet_nets_eighty() {
    let ledger = funded(&[("u", dec!(1000))]);
    let race = TestRace::photo_finish(ledger.clone());

    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"1".into(), dec!(100))
        .await
        .unwrap();
    assert_eq!(ledger.snapshot(&"u".into()), dec!(900));

    assert!(race.run_until(Phase::RaceFinished, 10).await);

    assert_eq!(ledger.snapshot(&"u".into()), dec!(1080));
    let results = race.events.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].winner.id().as_str(), "1");
    assert_eq!(results[0].winner.odds, dec!(1.8));
    assert_eq!(results[0].payouts[0].user, UserId::from("u"));
    assert_eq!(results[0].payouts[0].amount, dec!(180));
    assert_eq!(
        race.scheduler.last().map(|w| w.timer),
        Some(Timer::CoolDown)
    );
}

#[tokio::test]
async fn losing_bets_pay_nothing() {
    let ledger = funded(&[("u", dec!(50))]);
    let race = TestRace::photo_finish(ledger.clone());

    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"2".into(), dec!(50))
        .await
        .unwrap();
    assert!(race.run_until(Phase::RaceFinished, 10).await);

    assert_eq!(ledger.snapshot(&"u".into()), dec!(0));
    assert!(race.events.results()[0].payouts.is_empty());
}

#[tokio::test]
async fn phases_follow_the_cycle() {
    let race = TestRace::photo_finish(funded(&[("u", dec!(10))]));

    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"1".into(), dec!(1))
        .await
        .unwrap();
    assert!(race.run_until(Phase::RaceFinished, 10).await);
    race.fire_last().await;

    assert_eq!(
        race.events.phases(),
        vec![
            Phase::OpenToBets,
            Phase::RaceStarting,
            Phase::Racing,
            Phase::RaceFinished,
            Phase::OpenToBets,
        ]
    );
    let status = race.engine.status().await;
    assert_eq!(status.race_id, 2);
    assert!(race.engine.bets().await.is_empty());
}

#[tokio::test]
async fn empty_window_keeps_betting_open() {
    let race = TestRace::photo_finish(funded(&[("u", dec!(10))]));
    race.engine.start().await.unwrap();
    let field = race.engine.status().await.participants;

    race.fire_last().await;
    race.fire_last().await;

    let status = race.engine.status().await;
    assert_eq!(status.phase, Phase::OpenToBets);
    assert_eq!(status.race_id, 1);
    assert_eq!(status.participants, field);
    assert_eq!(race.events.phases(), vec![Phase::OpenToBets]);
    assert_eq!(
        race.scheduler.last().map(|w| w.timer),
        Some(Timer::BettingWindow)
    );

    race.engine
        .place_bet(&"u".into(), &"2".into(), dec!(5))
        .await
        .unwrap();
    race.fire_last().await;
    assert_eq!(race.phase().await, Phase::RaceStarting);
}

#[tokio::test]
async fn extended_window_uses_retry_interval() {
    let timing = RaceTiming {
        betting_window: Duration::from_secs(60),
        empty_window_retry: Duration::from_secs(7),
        ..RaceTiming::default()
    };
    let (catalog, track) = photo_finish();
    let race = TestRace::with(funded(&[]), |builder| {
        builder.catalog(catalog).track(track).timing(timing)
    });
    race.engine.start().await.unwrap();

    race.fire_last().await;
    race.fire_last().await;

    let armed = race.scheduler.armed();
    assert_eq!(armed.len(), 3);
    assert!(armed.iter().all(|w| w.timer == Timer::BettingWindow));
    assert_eq!(armed[0].delay, timing.betting_window);
    assert_eq!(armed[1].delay, timing.empty_window_retry);
    assert_eq!(armed[2].delay, timing.empty_window_retry);
    assert!(armed[0].epoch < armed[1].epoch && armed[1].epoch < armed[2].epoch);
}

#[tokio::test]
async fn fresh_race_gets_a_full_window_after_extensions() {
    let ledger = funded(&[("u", dec!(10))]);
    let timing = RaceTiming {
        empty_window_retry: Duration::from_secs(7),
        ..RaceTiming::default()
    };
    let (catalog, track) = photo_finish();
    let race = TestRace::with(ledger, |builder| {
        builder.catalog(catalog).track(track).timing(timing)
    });
    race.engine.start().await.unwrap();
    race.fire_last().await;
    race.engine
        .place_bet(&"u".into(), &"1".into(), dec!(1))
        .await
        .unwrap();

    assert!(race.run_until(Phase::RaceFinished, 10).await);
    race.fire_last().await;

    assert_eq!(race.engine.status().await.race_id, 2);
    let window = race.scheduler.last().unwrap();
    assert_eq!(window.timer, Timer::BettingWindow);
    assert_eq!(window.delay, timing.betting_window);
}

#[tokio::test]
async fn start_is_rejected_while_running() {
    let race = TestRace::photo_finish(funded(&[]));
    race.engine.start().await.unwrap();

    let err = race.engine.start().await.unwrap_err();

    assert_eq!(
        err,
        ControlError::InvalidPhaseTransition {
            phase: Phase::OpenToBets,
            action: "start",
        }
    );
}

#[tokio::test]
async fn pause_with_no_bets_is_immediate() {
    let race = TestRace::photo_finish(funded(&[]));
    race.engine.start().await.unwrap();

    assert_eq!(race.engine.request_pause().await, Ok(PauseOutcome::Paused));

    let status = race.engine.status().await;
    assert_eq!(status.phase, Phase::Paused);
    assert!(!status.pause_pending);
    assert!(status.participants.is_none());
}

#[tokio::test]
async fn pause_cancels_the_armed_window() {
    let race = TestRace::photo_finish(funded(&[]));
    race.engine.start().await.unwrap();
    let window = race.scheduler.last().unwrap();

    race.engine.request_pause().await.unwrap();
    race.engine.fire(window).await;

    assert_eq!(race.phase().await, Phase::Paused);
    assert_eq!(race.events.phases(), vec![Phase::OpenToBets, Phase::Paused]);
    assert_eq!(race.scheduler.count(), 1);
}

#[tokio::test]
async fn pause_when_paused_is_a_no_op() {
    let race = TestRace::photo_finish(funded(&[]));
    assert_eq!(
        race.engine.request_pause().await,
        Ok(PauseOutcome::AlreadyPaused)
    );
    assert!(race.events.events().is_empty());
}

#[tokio::test]
async fn pause_mid_race_waits_for_settlement() {
    let ledger = funded(&[("u", dec!(100))]);
    let race = TestRace::photo_finish(ledger.clone());
    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"1".into(), dec!(100))
        .await
        .unwrap();

    assert_eq!(race.engine.request_pause().await, Ok(PauseOutcome::Deferred));
    assert_eq!(
        race.engine.request_pause().await,
        Err(ControlError::PauseAlreadyScheduled)
    );
    assert!(race.engine.status().await.pause_pending);
    assert_eq!(race.phase().await, Phase::OpenToBets);

    assert!(race.run_until(Phase::RaceFinished, 10).await);
    assert_eq!(ledger.snapshot(&"u".into()), dec!(180));

    race.events.clear();
    let armed = race.scheduler.count();
    race.fire_last().await;
    let status = race.engine.status().await;
    assert_eq!(status.phase, Phase::Paused);
    assert!(!status.pause_pending);
    assert_eq!(race.events.phases(), vec![Phase::Paused]);
    assert_eq!(race.scheduler.count(), armed);

    race.engine.start().await.unwrap();
    assert_eq!(race.engine.status().await.race_id, 2);
}

#[tokio::test]
async fn stale_wakeups_are_ignored() {
    let race = TestRace::photo_finish(funded(&[("u", dec!(10))]));
    race.engine.start().await.unwrap();
    let window = race.scheduler.last().unwrap();
    race.engine
        .place_bet(&"u".into(), &"1".into(), dec!(1))
        .await
        .unwrap();
    race.fire_last().await;
    assert_eq!(race.phase().await, Phase::RaceStarting);

    race.engine.fire(window).await;

    assert_eq!(race.phase().await, Phase::RaceStarting);
    assert_eq!(race.events.phases().len(), 2);
}

#[tokio::test]
async fn starting_announces_the_grid() {
    let race = TestRace::photo_finish(funded(&[("u", dec!(10))]));
    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"2".into(), dec!(1))
        .await
        .unwrap();
    race.fire_last().await;

    let grid = race.events.events().into_iter().find_map(|event| match event {
        RaceEvent::PhaseChanged(change) if change.phase == Phase::RaceStarting => {
            Some(change.payload)
        }
        _ => None,
    });
    match grid {
        Some(PhasePayload::StartingPositions(positions)) => {
            assert_eq!(positions.len(), 2);
            assert!(positions.iter().all(|p| p.position == 0));
        }
        other => panic!("expected starting positions, got {other:?}"),
    }
}

#[tokio::test]
async fn default_race_finishes_within_max_ticks() {
    let race = TestRace::new(funded(&[("u", dec!(10))]));
    race.engine.start().await.unwrap();
    race.engine
        .place_bet(&"u".into(), &"3".into(), dec!(1))
        .await
        .unwrap();
    race.fire_last().await;
    race.fire_last().await;

    let mut ticks = 0;
    while race.phase().await == Phase::Racing {
        race.fire_last().await;
        ticks += 1;
        assert!(ticks <= 20, "race did not finish in 20 ticks");
    }

    assert_eq!(race.phase().await, Phase::RaceFinished);
    assert_eq!(race.events.results().len(), 1);
}
