//! Command handlers for the talisman CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod filter;
pub mod price;
pub mod publish;
pub mod rank;
pub mod run;
