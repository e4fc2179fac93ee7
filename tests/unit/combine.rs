//! Typed access to the combine block

use crate::common::create_mock_root;
use bsa_mps_rx::memory::combine::{CombineCommand, CombinedBsaChannel};
use bsa_mps_rx::memory::{Lane, Severity};

const COMBINE: u64 = 0xC000_0000;

#[test]
fn test_bsa_data_and_severity() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(COMBINE + 4 * 17, 0xCAFE);
    bus.set_word(COMBINE + 0x080 + 4 * 17, 0b10);

    let mut combine = root.combine();
    assert_eq!(combine.bsa_data(CombinedBsaChannel::Channel17).unwrap(), 0xCAFE);
    assert_eq!(
        combine.bsa_severity(CombinedBsaChannel::Channel17).unwrap(),
        Severity::Major
    );
}

#[test]
fn test_per_lane_arrays() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(COMBINE + 0x100 + 16, 7);
    bus.set_bytes(COMBINE + 0x200 + 16, &0x0000_0001_0000_0002u64.to_le_bytes());

    let mut combine = root.combine();
    assert_eq!(combine.remote_drop_count(Lane::Lane1).unwrap(), 7);
    assert_eq!(combine.remote_drop_count(Lane::Lane0).unwrap(), 0);
    assert_eq!(
        combine.remote_timestamp(Lane::Lane1).unwrap(),
        0x0000_0001_0000_0002
    );
    assert_eq!(bus.reads()[2], (COMBINE + 0x210, 8));
}

#[test]
fn test_local_timestamp_and_rate() {
    let (mut root, bus) = create_mock_root();
    bus.set_bytes(COMBINE + 0x240, &u64::MAX.to_le_bytes());
    bus.set_word(COMBINE + 0x300, 71_500);

    let mut combine = root.combine();
    assert_eq!(combine.local_timestamp().unwrap(), u64::MAX);
    assert_eq!(combine.packet_rate().unwrap(), 71_500);
}

#[test]
fn test_counter_reset_command() {
    let (mut root, bus) = create_mock_root();

    root.combine().run_command(CombineCommand::RstCnt).unwrap();

    assert_eq!(bus.writes(), vec![(COMBINE + 0xFFC, vec![1, 0, 0, 0])]);
    assert!(bus.reads().is_empty());
}

#[test]
fn test_status_snapshot_covers_every_channel() {
    let (mut root, bus) = create_mock_root();
    for i in 0..32u64 {
        bus.set_word(COMBINE + 4 * i, i as u32 * 10);
    }
    bus.set_word(COMBINE + 0x130, 9);

    let status = root.combine().read_status().unwrap();

    assert_eq!(status.bsa_data[0], 0);
    assert_eq!(status.bsa_data[31], 310);
    assert_eq!(status.remote_drop_count, [0, 0, 0, 9]);
    assert!(status.bsa_severity.iter().all(|s| *s == Severity::NoAlarm));

    // 32 data + 32 severity + 4 drop + 4 timestamp + local + rate
    assert_eq!(bus.reads().len(), 74);
}
