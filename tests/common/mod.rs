//! Integration test common infrastructure.
//!
//! Provides utilities for spawning test servers, creating test clients,
//! and asserting on chat line flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::{TestClient, strip_stamp};
#[allow(unused_imports)]
pub use server::TestServer;
