//! Pairing use-case services.
//!
//! # Responsibility
//! - Wire group resolution, state reads, parsing, diffing and persistence
//!   into the page-load and submission flows.
//! - Keep the HTTP layer decoupled from storage details.

pub mod pairing_service;
