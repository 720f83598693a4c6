pub mod aws;
pub mod classify;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod core;
pub mod discover;
pub mod exit;
pub mod ui;
