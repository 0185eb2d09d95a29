//! Read ports over the console's data sets.
//!
//! # Responsibility
//! - Define the read contract the shell is written against.
//! - Provide in-memory implementations seeded with the console sample data.
//!
//! # Invariants
//! - Shell code depends on `ReadPort`, never on a concrete data set.
//! - `get` reports absence as `Ok(None)`; `Err` is reserved for transport or
//!   data failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod seed;

pub type PortResult<T> = Result<T, PortError>;

/// Failure of a read port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortError {
    /// Backing source cannot be reached.
    Unavailable(String),
    /// Backing source returned data that violates the record contract.
    InvalidData(String),
}

impl Display for PortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "data source unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
        }
    }
}

impl Error for PortError {}

/// Read-only access to one entity collection.
pub trait ReadPort<T> {
    type Id: ?Sized;

    /// Lists every record in source order.
    fn list(&self) -> PortResult<Vec<T>>;

    /// Gets one record by id.
    fn get(&self, id: &Self::Id) -> PortResult<Option<T>>;
}
