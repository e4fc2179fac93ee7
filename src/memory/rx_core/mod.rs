//! `BsaMpsMsgRxCore`: one per receiver lane.

pub mod bsa;
pub mod control;
pub mod status;

use crate::memory::Access::{ReadOnly, ReadWrite, WriteOnly};
use crate::memory::Field;

pub const DEVICE_NAME: &str = "BsaMpsMsgRxCore";

/// Field declarations of a single receiver core, relative to its base
pub const FIELDS: &[Field] = &[
    Field::new("RxLinkUpCnt", "RxLinkUp Status Counter", 0x000, 32, ReadOnly).poll(1),
    Field::new("RxDecErr0Cnt", "RxDecErr0 Status Counter", 0x004, 32, ReadOnly).poll(1),
    Field::new("RxDecErr1Cnt", "RxDecErr1 Status Counter", 0x008, 32, ReadOnly).poll(1),
    Field::new("RxDispErr0Cnt", "RxDispErr0 Status Counter", 0x00C, 32, ReadOnly).poll(1),
    Field::new("RxDispErr1Cnt", "RxDispErr1 Status Counter", 0x010, 32, ReadOnly).poll(1),
    Field::new("OverflowCntCnt", "OverflowCnt Status Counter", 0x014, 32, ReadOnly).poll(1),
    Field::new("ErrPktLenCnt", "ErrPktLenCnt Status Counter", 0x018, 32, ReadOnly).poll(1),
    Field::new("ErrCrcCnt", "ErrCrc Status Counter", 0x01C, 32, ReadOnly).poll(1),
    Field::new("CPllLockCnt", "CPllLock Status Counter", 0x020, 32, ReadOnly).poll(1),
    Field::new("GtRxFifoErrCnt", "GtRxFifoErr Status Counter", 0x024, 32, ReadOnly).poll(1),
    Field::new("RxLinkUp", "RxLinkUp Status Counter", 0x400, 1, ReadOnly).poll(1),
    Field::new("CPllLock", "CPllLock Status Counter", 0x401, 1, ReadOnly).poll(1),
    Field::new("PacketRate", "Packet Rate (units of Hz)", 0x410, 32, ReadOnly)
        .poll(1)
        .units("Hz"),
    Field::new("SofRate", "Start-Of-Frame Rate (units of Hz)", 0x414, 32, ReadOnly)
        .poll(1)
        .units("Hz"),
    Field::new("UserValue", "Remote UserValue Status Counter", 0x500, 128, ReadOnly).poll(1),
    Field::new("RxPolarity", "GTH RxPolarity", 0x700, 1, ReadWrite),
    Field::new("TxPolarity", "GTH TxPolarity", 0x704, 1, ReadWrite),
    Field::new("Loopback", "GTH Loopback", 0x708, 1, ReadWrite),
    Field::new(
        "RollOverEn",
        "Status counters roll over enable bit mask",
        0x7F0,
        10,
        ReadWrite,
    ),
    Field::new("CntRst", "Status Counter Reset", 0x7F4, 1, WriteOnly),
    Field::new("GtRst", "GTH Reset", 0x7F8, 1, WriteOnly),
    Field::new("HardRst", "Hard Reset", 0x7FC, 1, WriteOnly),
    Field::new("BsaQuantity", "BsaQuantity", 0x800, 32, ReadOnly)
        .array(12, 4)
        .poll(1),
    Field::new("BsaSevr", "BsaSevr", 0x840, 2, ReadOnly)
        .array(12, 4)
        .poll(1),
    Field::new("MpsPermit", "Remote MpsPermit", 0x900, 8, ReadOnly).poll(1),
    Field::new("RemoteTimestamp", "Remote Timestamp", 0x910, 64, ReadOnly).poll(1),
];

/// Operator commands of a receiver core. Each one writes 1 to a strobe bit.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxCoreCommand {
    /// Reset all the status counters
    RstCnt,
    /// Reset the GTH
    RstGt,
    /// Reset the registers to default values
    RstHard,
}

impl RxCoreCommand {
    pub const ALL: [RxCoreCommand; 3] = [
        RxCoreCommand::RstCnt,
        RxCoreCommand::RstGt,
        RxCoreCommand::RstHard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RxCoreCommand::RstCnt => "RstCnt",
            RxCoreCommand::RstGt => "RstGt",
            RxCoreCommand::RstHard => "RstHard",
        }
    }

    /// Strobe field this command writes
    pub fn target(self) -> &'static str {
        match self {
            RxCoreCommand::RstCnt => "CntRst",
            RxCoreCommand::RstGt => "GtRst",
            RxCoreCommand::RstHard => "HardRst",
        }
    }
}
