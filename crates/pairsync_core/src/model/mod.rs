//! Domain model for adviser-scoped peer evaluation.
//!
//! # Responsibility
//! - Define teams, adviser groups and ordered evaluation pairs.
//! - Own the candidate-universe construction for one group.
//!
//! # Invariants
//! - A `Pair` never has the same team on both sides.
//! - Every pair produced from an `AdviserGroup` has both ends in that group.

pub mod pair;
pub mod team;
