//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate read-port calls into page-level APIs.
//! - Keep shell components decoupled from where entities come from.

pub mod detail_service;
pub mod entity_tabs;
