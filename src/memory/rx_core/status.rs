use bitfield::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::{impl_register, impl_repeated_register, impl_to_from_raw};

pub const STATUS_COUNTER_COUNT: usize = 10;

/// Link and error status counters, in register order starting at 0x000
#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StatusCounter {
    RxLinkUp = 0,
    RxDecErr0 = 1,
    RxDecErr1 = 2,
    RxDispErr0 = 3,
    RxDispErr1 = 4,
    Overflow = 5,
    ErrPktLen = 6,
    ErrCrc = 7,
    CPllLock = 8,
    GtRxFifoErr = 9,
}

impl StatusCounter {
    pub const ALL: [StatusCounter; STATUS_COUNTER_COUNT] = [
        StatusCounter::RxLinkUp,
        StatusCounter::RxDecErr0,
        StatusCounter::RxDecErr1,
        StatusCounter::RxDispErr0,
        StatusCounter::RxDispErr1,
        StatusCounter::Overflow,
        StatusCounter::ErrPktLen,
        StatusCounter::ErrCrc,
        StatusCounter::CPllLock,
        StatusCounter::GtRxFifoErr,
    ];

    /// Name of the matching entry in [`super::FIELDS`]
    pub fn field_name(self) -> &'static str {
        match self {
            StatusCounter::RxLinkUp => "RxLinkUpCnt",
            StatusCounter::RxDecErr0 => "RxDecErr0Cnt",
            StatusCounter::RxDecErr1 => "RxDecErr1Cnt",
            StatusCounter::RxDispErr0 => "RxDispErr0Cnt",
            StatusCounter::RxDispErr1 => "RxDispErr1Cnt",
            StatusCounter::Overflow => "OverflowCntCnt",
            StatusCounter::ErrPktLen => "ErrPktLenCnt",
            StatusCounter::ErrCrc => "ErrCrcCnt",
            StatusCounter::CPllLock => "CPllLockCnt",
            StatusCounter::GtRxFifoErr => "GtRxFifoErrCnt",
        }
    }
}

bitfield! {
    pub struct StatusCounterRegister(u32);
    impl Debug;
    u32;
    pub count, _: 31, 0;
}

impl_to_from_raw!(StatusCounterRegister, u32);
impl_repeated_register!(StatusCounterRegister, u32, StatusCounter, RO, 0x000, 4);

bitfield! {
    pub struct LinkStatusRegister(u32);
    impl Debug;
    u8;
    pub rx_link_up, _: 0;
    pub cpll_lock, _: 8;
}

impl_to_from_raw!(LinkStatusRegister, u32);
impl_register!(LinkStatusRegister, u32, 0x400, RO);

bitfield! {
    pub struct PacketRateRegister(u32);
    impl Debug;
    u32;
    pub hz, _: 31, 0;
}

impl_to_from_raw!(PacketRateRegister, u32);
impl_register!(PacketRateRegister, u32, 0x410, RO);

bitfield! {
    pub struct SofRateRegister(u32);
    impl Debug;
    u32;
    pub hz, _: 31, 0;
}

impl_to_from_raw!(SofRateRegister, u32);
impl_register!(SofRateRegister, u32, 0x414, RO);

/// 128-bit user word forwarded by the remote end of the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserValueRegister(pub u128);

impl UserValueRegister {
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl_to_from_raw!(UserValueRegister, u128);
impl_register!(UserValueRegister, u128, 0x500, RO);
