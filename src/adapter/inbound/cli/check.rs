//! Handler for the `check` command.

use crate::adapter::inbound::cli::command::CheckArgs;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file and print a summary.
pub fn execute(args: &CheckArgs) -> Result<()> {
    let config = Config::load(&args.config)?;
    for line in summary(&config) {
        println!("{line}");
    }
    println!("Configuration is valid");
    Ok(())
}

fn summary(config: &Config) -> Vec<String> {
    let participants: Vec<String> = config
        .catalog()
        .iter()
        .map(|participant| format!("{} ({})", participant.name, participant.id))
        .collect();
    let admins = config
        .identities
        .iter()
        .filter(|identity| identity.admin)
        .count();

    vec![
        format!("Participants: {}", participants.join(", ")),
        format!(
            "Betting window: {}ms, countdown: {}ms, tick: {}ms, cool-down: {}ms",
            config.timing.betting_window_ms,
            config.timing.starting_countdown_ms,
            config.timing.tick_ms,
            config.timing.cool_down_ms
        ),
        format!(
            "Track: distance {}, stride {}..={}",
            config.track.distance, config.track.min_stride, config.track.max_stride
        ),
        format!("Accounts: {}", config.accounts.len()),
        format!(
            "Identities: {} ({} admin)",
            config.identities.len(),
            admins
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_the_catalog() {
        let lines = summary(&Config::default());
        assert_eq!(
            lines[0],
            "Participants: Pernambuco (1), Marquinhos (2), Jeba (3), Dinossaura (4)"
        );
        assert_eq!(lines[4], "Identities: 0 (0 admin)");
    }
}
