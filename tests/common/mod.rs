//! Common test utilities and mock implementations

pub mod test_utils;

pub use mock_bus::{MockBus, MockDelay, MockError, Operation};
pub use test_utils::{create_mock_root, field};
