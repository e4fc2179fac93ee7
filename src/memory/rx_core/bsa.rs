use bitfield::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::memory::Severity;
use crate::{impl_register, impl_repeated_register, impl_to_from_raw};

pub const RX_BSA_CHANNEL_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RxBsaChannel {
    Channel0 = 0,
    Channel1 = 1,
    Channel2 = 2,
    Channel3 = 3,
    Channel4 = 4,
    Channel5 = 5,
    Channel6 = 6,
    Channel7 = 7,
    Channel8 = 8,
    Channel9 = 9,
    Channel10 = 10,
    Channel11 = 11,
}

impl RxBsaChannel {
    pub const ALL: [RxBsaChannel; RX_BSA_CHANNEL_COUNT] = [
        RxBsaChannel::Channel0,
        RxBsaChannel::Channel1,
        RxBsaChannel::Channel2,
        RxBsaChannel::Channel3,
        RxBsaChannel::Channel4,
        RxBsaChannel::Channel5,
        RxBsaChannel::Channel6,
        RxBsaChannel::Channel7,
        RxBsaChannel::Channel8,
        RxBsaChannel::Channel9,
        RxBsaChannel::Channel10,
        RxBsaChannel::Channel11,
    ];
}

bitfield! {
    pub struct BsaQuantityRegister(u32);
    impl Debug;
    u32;
    pub value, _: 31, 0;
}

impl_to_from_raw!(BsaQuantityRegister, u32);
impl_repeated_register!(BsaQuantityRegister, u32, RxBsaChannel, RO, 0x800, 4);

bitfield! {
    pub struct BsaSeverityRegister(u32);
    impl Debug;
    u8;
    _sevr, _: 1, 0;
}

impl BsaSeverityRegister {
    pub fn severity(&self) -> Severity {
        Severity::from_bits(self._sevr())
    }
}

impl_to_from_raw!(BsaSeverityRegister, u32);
impl_repeated_register!(BsaSeverityRegister, u32, RxBsaChannel, RO, 0x840, 4);

bitfield! {
    pub struct MpsPermitRegister(u32);
    impl Debug;
    u8;
    pub permit, _: 7, 0;
}

impl_to_from_raw!(MpsPermitRegister, u32);
impl_register!(MpsPermitRegister, u32, 0x900, RO);

/// Timestamp carried in the last message received from the remote node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteTimestampRegister(pub u64);

impl RemoteTimestampRegister {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl_to_from_raw!(RemoteTimestampRegister, u64);
impl_register!(RemoteTimestampRegister, u64, 0x910, RO);
