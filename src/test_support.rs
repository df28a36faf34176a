//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::api::{Latency, MockApi, Session, User};
use crate::core::Store;

/// A mock backend that answers without simulated latency.
pub fn instant_api() -> MockApi {
    MockApi::new(Latency::none())
}

/// A store in a fresh directory under the system temp dir.
pub fn temp_store() -> Store {
    let dir = std::env::temp_dir().join(format!("agrilease-test-{}", uuid::Uuid::new_v4()));
    Store::at(dir.join("store.json"))
}

/// The session the mock login hands out.
pub fn test_session() -> Session {
    Session {
        token: "mock_token_xyz".to_string(),
        user: User {
            name: "Nimal Perera".to_string(),
            email: "nimal@example.com".to_string(),
            role: "farmer".to_string(),
        },
    }
}
