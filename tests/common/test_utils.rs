//! Helper constructors shared by the tests

use super::MockBus;
use bsa_mps_rx::memory::{self, Field};
use bsa_mps_rx::{Root, RootConfig};

/// Creates a root over a fresh mock bus and returns a handle sharing its state
pub fn create_mock_root() -> (Root<MockBus>, MockBus) {
    create_mock_root_with(RootConfig::default())
}

pub fn create_mock_root_with(config: RootConfig) -> (Root<MockBus>, MockBus) {
    let bus = MockBus::new();
    let root = Root::new(bus.clone(), config);

    (root, bus)
}

/// Looks up a field declaration, panicking with its name when missing
pub fn field(map: &'static [Field], name: &str) -> &'static Field {
    memory::find(map, name).unwrap_or_else(|| panic!("no field named {name}"))
}
