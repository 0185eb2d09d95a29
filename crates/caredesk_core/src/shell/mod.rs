//! Stateful shell components.
//!
//! # Responsibility
//! - Hold the interaction state of the rail, the palette, the tabs and the
//!   inbox, and expose it as render snapshots.
//! - Keep components host-agnostic: input arrives as explicit events and time
//!   arrives as explicit timestamps.

pub mod app;
pub mod command_palette;
pub mod deferred;
pub mod input;
pub mod nav_tree;
pub mod notification_center;
pub mod tab_set;
