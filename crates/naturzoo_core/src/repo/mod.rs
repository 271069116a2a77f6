//! Entity repositories bound to a shared storage context.
//!
//! # Responsibility
//! - Give each entity kind exactly one access object with a fixed contract.
//! - Hand storage failures back to the caller without translation.
//!
//! # Invariants
//! - Repositories borrow the storage context; they never own or clone it.
//! - Repositories hold no mutable state after construction.

pub mod entity_repo;
pub mod log_repo;
