//! Read access to the activity log.

use crate::storage::{StorageContext, StorageResult};
use log::debug;

/// Activity log reader.
///
/// Log entries are append-only text produced by the store itself, so this
/// repository only lists them.
pub struct LogRepository<'ctx> {
    context: &'ctx dyn StorageContext,
}

impl<'ctx> LogRepository<'ctx> {
    pub fn try_new(context: &'ctx dyn StorageContext) -> StorageResult<Self> {
        context.ensure_log()?;
        debug!("event=repo_init module=repo status=ok kind=log");
        Ok(Self { context })
    }

    /// Returns log lines exactly as the storage context produced them.
    pub fn get_log(&self) -> StorageResult<Vec<String>> {
        self.context.read_log()
    }
}
