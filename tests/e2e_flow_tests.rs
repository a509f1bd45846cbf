//! Full runtime wiring with real tokio timers.

use std::time::Duration;

use hippodrome::adapter::inbound::cli::console::{spawn_line_reader, Console, ConsoleExit};
use hippodrome::domain::Phase;
use hippodrome::infrastructure::bootstrap;
use hippodrome::infrastructure::config::settings::Config;
use hippodrome::port::outbound::RaceEvent;
use hippodrome::testkit::config::SAMPLE_TOML;
use rust_decimal_macros::dec;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn config(betting_window_ms: u64) -> Config {
    Config::parse_toml(&SAMPLE_TOML.replace(
        "betting_window_ms = 40",
        &format!("betting_window_ms = {betting_window_ms}"),
    ))
    .unwrap()
}

#[tokio::test]
async fn race_runs_to_settlement_and_reopens() {
    let house = bootstrap::assemble(&config(200));
    let mut feed = house.events.subscribe();

    house.desk.start("root").await.unwrap();
    house
        .desk
        .place_bet("t-ana", &"1".into(), dec!(50))
        .await
        .unwrap();

    let result = timeout(Duration::from_secs(5), async {
        loop {
            if let RaceEvent::RaceResult(result) = feed.recv().await.unwrap() {
                return result;
            }
        }
    })
    .await
    .expect("race should finish");

    let balance = house.ledger.snapshot(&"ana".into());
    if result.winner.id().as_str() == "1" {
        assert_eq!(balance, dec!(140));
        assert_eq!(result.payouts.len(), 1);
    } else {
        assert_eq!(balance, dec!(50));
        assert!(result.payouts.is_empty());
    }

    let reopened = timeout(Duration::from_secs(5), async {
        loop {
            if let RaceEvent::PhaseChanged(change) = feed.recv().await.unwrap() {
                if change.phase == Phase::OpenToBets {
                    return change.race_id;
                }
            }
        }
    })
    .await
    .expect("next window should open");
    assert_eq!(reopened, 2);

    house.shutdown();
}

#[tokio::test]
async fn deferred_pause_stops_after_the_race() {
    let house = bootstrap::assemble(&config(100));
    let mut feed = house.events.subscribe();

    house.desk.start("root").await.unwrap();
    house
        .desk
        .place_bet("t-bia", &"2".into(), dec!(10))
        .await
        .unwrap();
    house.desk.pause("root").await.unwrap();

    let phases = timeout(Duration::from_secs(5), async {
        let mut phases = Vec::new();
        loop {
            if let RaceEvent::PhaseChanged(change) = feed.recv().await.unwrap() {
                phases.push(change.phase);
                if change.phase == Phase::Paused {
                    return phases;
                }
            }
        }
    })
    .await
    .expect("cycle should pause");

    assert_eq!(
        phases,
        vec![
            Phase::OpenToBets,
            Phase::RaceStarting,
            Phase::Racing,
            Phase::RaceFinished,
            Phase::Paused,
        ]
    );
    house.shutdown();
}

#[tokio::test]
async fn console_drives_the_desk() {
    let house = bootstrap::assemble(&config(60_000));
    let console = Console::new(house.desk.clone(), Some("root".into()));
    let input: &[u8] = b"start\n\nbet t-ana 1 25\nbet t-ana 1 500\npause\nstatus\nbalance nobody\n";
    let mut output = Vec::new();

    let exit = console.run(input, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(exit, ConsoleExit::EndOfInput);
    assert_eq!(lines[0], "Race cycle started");
    assert_eq!(lines[1], "bet accepted: 25 on 1");
    assert!(lines[2].starts_with("error: insufficient balance"), "{}", lines[2]);
    assert_eq!(lines[3], "System will be paused after the current race");
    assert!(lines[4].contains("\"phase\":\"OPEN_TO_BETS\""), "{}", lines[4]);
    assert!(lines[4].contains("\"pause_pending\":true"), "{}", lines[4]);
    assert_eq!(lines[5], "error: unauthenticated");
    house.shutdown();
}

#[tokio::test]
async fn console_serves_lines_from_a_reader_thread() {
    let house = bootstrap::assemble(&config(60_000));
    let console = Console::new(house.desk.clone(), Some("root".into()));
    let input = std::io::Cursor::new("start\nbalance t-bia\nquit\nstatus\n");
    let mut output = Vec::new();

    let lines = spawn_line_reader(input).unwrap();
    let exit = console.serve(lines, &mut output).await.unwrap();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(exit, ConsoleExit::Quit);
    assert_eq!(text, "Race cycle started\nbalance: 50\n");
    house.shutdown();
}

#[tokio::test]
async fn console_waiting_for_input_yields_to_other_work() {
    let house = bootstrap::assemble(&config(60_000));
    let console = Console::new(house.desk.clone(), Some("root".into()));
    let (tx, lines) = mpsc::unbounded_channel();
    let mut output = Vec::new();

    tx.send("status".to_string()).unwrap();
    let idle = timeout(Duration::from_millis(50), console.serve(lines, &mut output)).await;
    assert!(idle.is_err(), "console should still be waiting for input");

    let (tx, lines) = mpsc::unbounded_channel::<String>();
    drop(tx);
    let exit = console.serve(lines, &mut output).await.unwrap();
    assert_eq!(exit, ConsoleExit::EndOfInput);
    assert!(String::from_utf8(output).unwrap().contains("\"phase\":\"PAUSED\""));
    house.shutdown();
}
