//! Moonlight Launcher
//!
//! Picks a display mode for the host of a streaming session and launches
//! configured applications. The display and navigation logic lives here so
//! it can be driven by the egui front end in `main.rs` or by tests.

pub mod app;
pub mod applier;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod dpi;
pub mod error;
pub mod gamepad;
pub mod launcher;
pub mod logs;
pub mod models;
#[cfg(windows)]
pub mod monitor;
pub mod navigation;
pub mod session;
pub mod store;
pub mod ui;
