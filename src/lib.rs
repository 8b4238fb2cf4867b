//! Command-line front end over `roadgraph_core`: configuration, network
//! document loading and the subcommand implementations.

pub mod commands;
pub mod config;
pub mod network_file;

pub use config::Config;
pub use network_file::{NetworkDocument, load_network};
