//! Composition root: wires the configured adapters around the engine.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::adapter::inbound::identity::StaticIdentity;
use crate::adapter::inbound::scheduler::TokioScheduler;
use crate::adapter::outbound::channel::ChannelBroadcaster;
use crate::adapter::outbound::memory_ledger::MemoryLedger;
use crate::application::desk::RaceDesk;
use crate::application::engine::RaceEngine;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{BroadcasterRegistry, LogBroadcaster};

/// Buffered events per subscriber of the event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A running race house: engine, control desk and event feed.
pub struct House {
    pub engine: Arc<RaceEngine>,
    pub desk: Arc<RaceDesk>,
    pub ledger: Arc<MemoryLedger>,
    pub events: ChannelBroadcaster,
    driver: JoinHandle<()>,
}

impl House {
    /// Stop delivering timers to the engine.
    pub fn shutdown(self) {
        self.driver.abort();
        info!("Race house stopped");
    }
}

/// Build the static identity table from configuration.
#[must_use]
pub fn build_identity(config: &Config) -> StaticIdentity {
    config
        .identities
        .iter()
        .fold(StaticIdentity::new(), |identity, entry| {
            identity.with_token(entry.token.as_str(), entry.user.as_str(), entry.admin)
        })
}

/// Build the broadcaster registry: the event channel plus the log mirror.
#[must_use]
pub fn build_broadcaster_registry(events: &ChannelBroadcaster) -> BroadcasterRegistry {
    let mut registry = BroadcasterRegistry::new();
    registry.register(Box::new(events.clone()));
    registry.register(Box::new(LogBroadcaster));
    registry
}

/// Assemble the house and spawn the timer driver.
///
/// Must be called from within a tokio runtime. The engine starts paused.
pub fn assemble(config: &Config) -> House {
    let ledger = Arc::new(MemoryLedger::with_accounts(
        config.accounts.iter().map(|account| account.entry()),
    ));
    let identity = Arc::new(build_identity(config));
    let events = ChannelBroadcaster::new(EVENT_CHANNEL_CAPACITY);
    let (scheduler, wakeups) = TokioScheduler::new();

    let engine = Arc::new(
        RaceEngine::builder(ledger.clone(), Arc::new(scheduler))
            .broadcaster(Arc::new(build_broadcaster_registry(&events)))
            .catalog(config.catalog())
            .track((&config.track).into())
            .timing((&config.timing).into())
            .backoff((&config.settlement).into())
            .seed(config.seed)
            .build(),
    );
    let desk = Arc::new(RaceDesk::new(engine.clone(), identity, ledger.clone()));
    let driver = tokio::spawn(engine.clone().run(wakeups));

    info!(
        participants = config.participants.len(),
        accounts = config.accounts.len(),
        identities = config.identities.len(),
        "Race house assembled"
    );

    House {
        engine,
        desk,
        ledger,
        events,
        driver,
    }
}
