use arbitrary_int::u10;
use bitfield::bitfield;

use super::status::StatusCounter;
use crate::{impl_register, impl_to_from_raw, strobe};

bitfield! {
    pub struct RxPolarityRegister(u32);
    impl Debug;
    u8;
    pub inverted, set_inverted: 0;
}

impl_to_from_raw!(RxPolarityRegister, u32);
impl_register!(RxPolarityRegister, u32, 0x700, RW);

bitfield! {
    pub struct TxPolarityRegister(u32);
    impl Debug;
    u8;
    pub inverted, set_inverted: 0;
}

impl_to_from_raw!(TxPolarityRegister, u32);
impl_register!(TxPolarityRegister, u32, 0x704, RW);

bitfield! {
    pub struct LoopbackRegister(u32);
    impl Debug;
    u8;
    pub enabled, set_enabled: 0;
}

impl_to_from_raw!(LoopbackRegister, u32);
impl_register!(LoopbackRegister, u32, 0x708, RW);

bitfield! {
    /// Bit `n` lets status counter `n` wrap instead of saturating
    pub struct RollOverEnableRegister(u32);
    impl Debug;
    u16;
    _mask, _set_mask: 9, 0;
}

impl RollOverEnableRegister {
    pub fn mask(&self) -> u10 {
        u10::new(self._mask())
    }

    pub fn set_mask(&mut self, mask: u10) {
        self._set_mask(mask.value())
    }

    pub fn counter_enabled(&self, counter: StatusCounter) -> bool {
        self._mask() & (1 << u8::from(counter)) != 0
    }

    pub fn set_counter_enabled(&mut self, counter: StatusCounter, enabled: bool) {
        let bit = 1u16 << u8::from(counter);
        let mask = if enabled {
            self._mask() | bit
        } else {
            self._mask() & !bit
        };

        self._set_mask(mask)
    }
}

impl_to_from_raw!(RollOverEnableRegister, u32);
impl_register!(RollOverEnableRegister, u32, 0x7F0, RW);

bitfield! {
    pub struct CounterResetRegister(u32);
    impl Debug;
    u8;
    _cnt_rst, _set_cnt_rst: 0;
}

impl CounterResetRegister {
    strobe!(cnt_rst, trigger);
}

impl_to_from_raw!(CounterResetRegister, u32);
impl_register!(CounterResetRegister, u32, 0x7F4, WO);

bitfield! {
    pub struct GtResetRegister(u32);
    impl Debug;
    u8;
    _gt_rst, _set_gt_rst: 0;
}

impl GtResetRegister {
    strobe!(gt_rst, trigger);
}

impl_to_from_raw!(GtResetRegister, u32);
impl_register!(GtResetRegister, u32, 0x7F8, WO);

bitfield! {
    pub struct HardResetRegister(u32);
    impl Debug;
    u8;
    _hard_rst, _set_hard_rst: 0;
}

impl HardResetRegister {
    strobe!(hard_rst, trigger);
}

impl_to_from_raw!(HardResetRegister, u32);
impl_register!(HardResetRegister, u32, 0x7FC, WO);
