//! Color-swatch palette picker with a timed carousel.
//!
//! The coordinator (selection, rotation, persistence) is independent of the
//! terminal front-end: it drives any [`binder::Surface`] implementation.

pub mod binder;
pub mod catalog;
pub mod chat_context;
pub mod cli;
pub mod config;
pub mod gradient;
pub mod logging;
pub mod persistence;
pub mod rotation;
pub mod selection;
pub mod session;
pub mod swatch;
pub mod timer;
pub mod toast;
pub mod tui;
