//! Zoo domain records and the tabular shapes returned to callers.
//!
//! # Responsibility
//! - Define one record struct per structured entity kind.
//! - Define the type-erased `Record` handed to storage on insert and the
//!   `Table` handed back by listing operations.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId`.
//! - Foreign references are plain `EntityId`s; referential integrity is the
//!   storage context's job.

pub mod entities;
pub mod kind;
pub mod record;

pub use entities::{
    Address, Animal, Building, Enclosure, Food, Foodplan, Guardian, Supplier, Territory,
};
pub use kind::{Entity, EntityId, EntityKind};
pub use record::{CellValue, Record, Row, Table};
