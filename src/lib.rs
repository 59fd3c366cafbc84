pub mod acquire;
pub mod config;
pub mod decklist;
pub mod domain;
pub mod error;
pub mod logging;
pub mod pipeline;
