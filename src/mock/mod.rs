//! In-memory mock cloud clients for testing.
//!
//! Used for both unit tests (in-process) and integration tests. Each mock
//! implements the corresponding client trait over `Arc<RwLock<_>>` state and
//! supports simple failure injection.

mod compute;
mod config;
mod store;

pub use compute::MockCompute;
pub use config::StaticConfiguration;
pub use store::MockStore;
