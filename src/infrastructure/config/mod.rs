//! Infrastructure configuration modules.

pub mod logging;
pub mod roster;
pub mod settings;
pub mod settlement;
pub mod timing;
pub mod track;

pub use settings::Config;
