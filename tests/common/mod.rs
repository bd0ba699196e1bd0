//! Shared helpers for the integration tests

pub mod fakes;
pub mod mock_server;
