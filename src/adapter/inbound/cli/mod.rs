//! CLI module graph.

pub mod check;
pub mod command;
pub mod console;
pub mod run;
