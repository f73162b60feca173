//! Repository layer for teams and evaluation pairs.
//!
//! # Responsibility
//! - Define the storage contracts the pairing engine consumes.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Reads scoped to a group never return a pair with an end outside it.
//! - Writes are idempotent: re-inserting or re-deleting a pair is a no-op.

pub mod error;
pub mod pairing_repo;
mod schema_guard;
pub mod team_repo;
