//! UI layer for the row list screen: app shell and row transitions.

pub mod app;
pub mod motion;

pub use app::MixerTableApp;
