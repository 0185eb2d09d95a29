//! Domain model shared by the shell components.
//!
//! # Responsibility
//! - Define the navigation catalog, palette entries, inbox items and the
//!   entity records that tabbed detail views are scoped to.
//! - Keep every shape renderer-agnostic and serializable.
//!
//! # Invariants
//! - Navigation items are a closed variant type; leaf/branch ambiguity is
//!   resolved at construction, not by optional-field probing.
//! - Notifications only ever move from unread to read.

pub mod command;
pub mod entity;
pub mod nav;
pub mod notification;
