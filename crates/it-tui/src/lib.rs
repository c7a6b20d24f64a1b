//! it-tui: Terminal UI layer using ratatui
//!
//! Provides the terminal interface for the initiative tracker.

pub mod app;
pub mod config;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::{App, IntakeField, IntakeState, UiMode};
pub use config::{Args, Config};
pub use theme::Theme;
