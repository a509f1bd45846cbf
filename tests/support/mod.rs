#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hippodrome::adapter::outbound::memory_ledger::MemoryLedger;
use hippodrome::domain::{Amount, UserId};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A ledger with one account per `(user, balance)` pair.
pub fn funded(accounts: &[(&str, Amount)]) -> Arc<MemoryLedger> {
    Arc::new(MemoryLedger::with_accounts(
        accounts
            .iter()
            .map(|(user, balance)| (UserId::from(*user), *balance)),
    ))
}

/// Write `contents` to a fresh file inside `dir`.
pub fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = dir.path().join(format!("hippodrome-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}
