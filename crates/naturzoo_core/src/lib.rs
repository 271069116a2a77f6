//! Data-access core for the NaturZoo management application.
//!
//! The `Zoo` facade owns one repository per entity kind, binds them all to a
//! single borrowed `StorageContext`, and re-exposes their operations under
//! per-entity names. `SqliteStorage` is the default context.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::{
    Address, Animal, Building, CellValue, Enclosure, Entity, EntityId, EntityKind, Food, Foodplan,
    Guardian, Record, Row, Supplier, Table, Territory,
};
pub use repo::entity_repo::{ContextEntityRepository, EntityRepository};
pub use repo::log_repo::LogRepository;
pub use service::zoo::{Zoo, ZooError, ZooResult};
pub use storage::{SqliteStorage, StorageContext, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
