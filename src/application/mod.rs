//! Application layer: the race engine and the control surfaces around it.
//!
//! # Modules
//!
//! - [`engine`]: Race lifecycle state machine, betting gateway and settlement
//! - [`desk`]: Admin and user operations with identity checks

pub mod desk;
pub mod engine;
