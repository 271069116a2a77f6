//! Use-case layer over the entity repositories.
//!
//! # Responsibility
//! - Keep UI layers decoupled from repository wiring and storage details.

pub mod zoo;
