//! # Ballotbox Core
//!
//! Core domain layer for the ballotbox session/credential subsystem.
//! This crate contains the domain entities, the token service (codec,
//! orchestrator, cleanup sweeper), the store traits with in-memory
//! implementations for testing, and the error taxonomy shared across
//! the workspace.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;
