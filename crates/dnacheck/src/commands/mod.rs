//! Command handlers.

pub mod collect;
pub mod config_cmd;
pub mod fabric;
pub mod run;
pub mod util;
