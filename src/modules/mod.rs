//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the environment the service runs in, such as the local upload directory.

pub mod storage;
