//! Logic-only UI
//!
//! Menus hold state and report outcomes; drawing them is someone else's job.

pub mod menu;

pub use menu::{Menu, MenuInput, MenuOutcome, Widget};
