#![no_std]

#[cfg(test)]
extern crate std;

pub(crate) mod logging;
pub(crate) mod macros;
pub(crate) use macros::*;

pub mod device;
pub mod memory;
pub mod root;
pub mod settings;
pub mod transport;
pub mod window;

pub use root::Root;
pub use settings::RootConfig;
pub use transport::{Connect, Link, MemoryBus};
pub use window::Error;
pub use window::RegisterWindow;
