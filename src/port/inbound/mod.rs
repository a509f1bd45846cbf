//! Inbound (driving) ports consumed by inbound adapters.
//!
//! # Modules
//!
//! - [`identity`]: Credential resolution for the control surfaces
//! - [`scheduler`]: Timer delivery for the race state machine

pub mod identity;
pub mod scheduler;

pub use identity::{Caller, IdentityResolver};
pub use scheduler::{Scheduler, Timer, Wakeup};
