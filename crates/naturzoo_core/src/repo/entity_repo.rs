//! Entity repository contract and its context-backed implementation.

use crate::model::{EntityKind, Record, Table};
use crate::storage::{StorageContext, StorageResult};
use log::debug;

/// Capability set shared by every structured entity kind.
pub trait EntityRepository {
    /// Kind served by this repository.
    fn kind(&self) -> EntityKind;
    /// Current number of stored records, as display text.
    fn count(&self) -> StorageResult<String>;
    /// Full snapshot, one row per stored record.
    fn get_all(&self) -> StorageResult<Table>;
    /// `id` + `label` snapshot for selection widgets.
    fn get_dropdown(&self) -> StorageResult<Table>;
    /// Persists one record of this repository's kind.
    fn add(&self, record: &Record) -> StorageResult<()>;
    /// Most recent modification timestamp, as display text.
    fn last_update(&self) -> StorageResult<String>;
}

/// Repository for one entity kind over a borrowed storage context.
pub struct ContextEntityRepository<'ctx> {
    kind: EntityKind,
    context: &'ctx dyn StorageContext,
}

impl<'ctx> ContextEntityRepository<'ctx> {
    /// Binds a repository to `context` once the context confirms `kind`.
    pub fn try_new(context: &'ctx dyn StorageContext, kind: EntityKind) -> StorageResult<Self> {
        context.ensure_entity(kind)?;
        debug!("event=repo_init module=repo status=ok kind={kind}");
        Ok(Self { kind, context })
    }
}

impl EntityRepository for ContextEntityRepository<'_> {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn count(&self) -> StorageResult<String> {
        self.context.count(self.kind)
    }

    fn get_all(&self) -> StorageResult<Table> {
        self.context.list_all(self.kind)
    }

    fn get_dropdown(&self) -> StorageResult<Table> {
        self.context.list_dropdown(self.kind)
    }

    fn add(&self, record: &Record) -> StorageResult<()> {
        self.context.insert(self.kind, record)
    }

    fn last_update(&self) -> StorageResult<String> {
        self.context.last_modified(self.kind)
    }
}
