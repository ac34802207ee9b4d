//! Database layer: connection pooling and MySQL store
//! implementations.

pub mod connection;
pub mod mysql;
