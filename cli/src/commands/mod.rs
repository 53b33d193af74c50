//! CLI Commands

pub mod config;
pub mod options;
pub mod search;
