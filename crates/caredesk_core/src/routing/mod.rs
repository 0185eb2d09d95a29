//! Destination table and router port.
//!
//! # Responsibility
//! - Map paths onto the console's fixed destination table.
//! - Define the router capability consumed by the rail and the palette.
//!
//! # Invariants
//! - Paths outside the table resolve to a terminal `NotFound`, never an error.
//! - Components never own routing state; they only call the router port.

pub mod route;
pub mod router;
