mod app;
mod cli;
mod commands;
mod config;
mod dispatch;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
