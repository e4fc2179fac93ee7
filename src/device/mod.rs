pub mod combine;
pub mod rx_core;

pub use combine::{CombineStatus, RxCombine};
pub use rx_core::{RxCore, RxCoreStatus};
