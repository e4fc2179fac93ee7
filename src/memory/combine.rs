//! `BsaMpsMsgRxCombine`: merges the BSA streams of all receiver lanes.

use bitfield::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::memory::Access::{ReadOnly, WriteOnly};
use crate::memory::{Field, Lane, Severity};
use crate::{impl_register, impl_repeated_register, impl_to_from_raw, strobe};

pub const DEVICE_NAME: &str = "BsaMpsMsgRxCombine";

pub const COMBINED_BSA_CHANNEL_COUNT: usize = 32;

/// Field declarations of the combine block, relative to its base
pub const FIELDS: &[Field] = &[
    Field::new("BsaData", "BsaData", 0x000, 32, ReadOnly)
        .array(32, 4)
        .poll(1),
    Field::new("BsaSevr", "BsaSevr", 0x080, 2, ReadOnly)
        .array(32, 4)
        .poll(1),
    Field::new("RemoteDropCnt", "Remote Drop Counter", 0x100, 32, ReadOnly)
        .array(4, 16)
        .poll(1),
    Field::new("RemoteTimestamp", "Remote Timestamp", 0x200, 64, ReadOnly)
        .array(4, 16)
        .poll(1),
    Field::new("LocalTimestamp", "Local Timestamp", 0x240, 64, ReadOnly).poll(1),
    Field::new(
        "PacketRate",
        "Diagnostic Bus Update Rate (units of Hz)",
        0x300,
        32,
        ReadOnly,
    )
    .poll(1)
    .units("Hz"),
    Field::new("CntRst", "Status Counter Reset", 0xFFC, 1, WriteOnly),
];

#[derive(Debug, Clone, Copy, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CombinedBsaChannel {
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
    Channel12 = 12,
    Channel13 = 13,
    Channel14 = 14,
    Channel15 = 15,
    Channel16 = 16,
    Channel17 = 17,
    Channel18 = 18,
    Channel19 = 19,
    Channel20 = 20,
    Channel21 = 21,
    Channel22 = 22,
    Channel23 = 23,
    Channel24 = 24,
    Channel25 = 25,
    Channel26 = 26,
    Channel27 = 27,
    Channel28 = 28,
    Channel29 = 29,
    Channel30 = 30,
    Channel31 = 31,
}

impl CombinedBsaChannel {
    pub fn all() -> impl Iterator<Item = CombinedBsaChannel> {
        (0..COMBINED_BSA_CHANNEL_COUNT as u8).filter_map(|i| Self::try_from(i).ok())
    }
}

bitfield! {
    pub struct BsaDataRegister(u32);
    impl Debug;
    u32;
    pub value, _: 31, 0;
}

impl_to_from_raw!(BsaDataRegister, u32);
impl_repeated_register!(BsaDataRegister, u32, CombinedBsaChannel, RO, 0x000, 4);

bitfield! {
    pub struct CombinedSeverityRegister(u32);
    impl Debug;
    u8;
    _sevr, _: 1, 0;
}

impl CombinedSeverityRegister {
    pub fn severity(&self) -> Severity {
        Severity::from_bits(self._sevr())
    }
}

impl_to_from_raw!(CombinedSeverityRegister, u32);
impl_repeated_register!(CombinedSeverityRegister, u32, CombinedBsaChannel, RO, 0x080, 4);

bitfield! {
    pub struct RemoteDropCountRegister(u32);
    impl Debug;
    u32;
    pub count, _: 31, 0;
}

impl_to_from_raw!(RemoteDropCountRegister, u32);
impl_repeated_register!(RemoteDropCountRegister, u32, Lane, RO, 0x100, 16);

/// Last timestamp seen on each lane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneTimestampRegister(pub u64);

impl LaneTimestampRegister {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl_to_from_raw!(LaneTimestampRegister, u64);
impl_repeated_register!(LaneTimestampRegister, u64, Lane, RO, 0x200, 16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTimestampRegister(pub u64);

impl LocalTimestampRegister {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl_to_from_raw!(LocalTimestampRegister, u64);
impl_register!(LocalTimestampRegister, u64, 0x240, RO);

bitfield! {
    pub struct UpdateRateRegister(u32);
    impl Debug;
    u32;
    pub hz, _: 31, 0;
}

impl_to_from_raw!(UpdateRateRegister, u32);
impl_register!(UpdateRateRegister, u32, 0x300, RO);

bitfield! {
    pub struct CombineCounterResetRegister(u32);
    impl Debug;
    u8;
    _cnt_rst, _set_cnt_rst: 0;
}

impl CombineCounterResetRegister {
    strobe!(cnt_rst, trigger);
}

impl_to_from_raw!(CombineCounterResetRegister, u32);
impl_register!(CombineCounterResetRegister, u32, 0xFFC, WO);

/// Operator commands of the combine block
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CombineCommand {
    /// Reset all the status counters
    RstCnt,
}

impl CombineCommand {
    pub fn name(self) -> &'static str {
        match self {
            CombineCommand::RstCnt => "RstCnt",
        }
    }

    pub fn target(self) -> &'static str {
        match self {
            CombineCommand::RstCnt => "CntRst",
        }
    }
}
