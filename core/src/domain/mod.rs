//! Domain layer: entities of the session/credential subsystem.

pub mod entities;
