pub mod actual_api;
pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod finance_api;
mod http;
pub mod importer;
mod terminal;
