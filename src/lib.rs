//! Photo upload, analysis and scan history service with its HTTP client.

pub mod client;
pub mod core;
pub mod features;
pub mod modules;
pub mod shared;
