pub mod cli;
pub mod controllers;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod scaling;
pub mod tui;
