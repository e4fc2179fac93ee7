//! Typed access to a receiver core

use crate::common::{create_mock_root, MockDelay};
use arbitrary_int::u10;
use bsa_mps_rx::device::rx_core::LINK_UP_ATTEMPTS;
use bsa_mps_rx::memory::rx_core::bsa::RxBsaChannel;
use bsa_mps_rx::memory::rx_core::status::StatusCounter;
use bsa_mps_rx::memory::rx_core::RxCoreCommand;
use bsa_mps_rx::memory::{Lane, Severity};
use bsa_mps_rx::Error;

const CORE2: u64 = 0xA000_0000;

#[test]
fn test_status_counters_follow_register_order() {
    let (mut root, bus) = create_mock_root();
    for i in 0..10u64 {
        bus.set_word(CORE2 + 4 * i, 100 + i as u32);
    }

    let mut core = root.rx_core(Lane::Lane2);

    assert_eq!(core.status_counter(StatusCounter::ErrCrc).unwrap(), 107);
    assert_eq!(
        core.status_counters().unwrap(),
        [100, 101, 102, 103, 104, 105, 106, 107, 108, 109]
    );
}

#[test]
fn test_link_flags() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(CORE2 + 0x400, 0x0000_0001);

    let mut core = root.rx_core(Lane::Lane2);
    assert!(core.rx_link_up().unwrap());
    assert!(!core.cpll_locked().unwrap());
}

#[test]
fn test_rates_and_wide_values() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(CORE2 + 0x410, 929_000);
    bus.set_word(CORE2 + 0x414, 360);
    bus.set_bytes(CORE2 + 0x500, &u128::MAX.to_le_bytes());
    bus.set_bytes(CORE2 + 0x910, &0xDEAD_BEEF_0000_0001u64.to_le_bytes());
    bus.set_word(CORE2 + 0x900, 0x0000_12A5);

    let mut core = root.rx_core(Lane::Lane2);
    assert_eq!(core.packet_rate().unwrap(), 929_000);
    assert_eq!(core.sof_rate().unwrap(), 360);
    assert_eq!(core.user_value().unwrap(), u128::MAX);
    assert_eq!(core.remote_timestamp().unwrap(), 0xDEAD_BEEF_0000_0001);
    assert_eq!(core.mps_permit().unwrap(), 0xA5);
}

#[test]
fn test_bsa_arrays() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(CORE2 + 0x800 + 4 * 11, 0x4242);
    bus.set_word(CORE2 + 0x840 + 4 * 11, 0b01);

    let mut core = root.rx_core(Lane::Lane2);
    assert_eq!(core.bsa_quantity(RxBsaChannel::Channel11).unwrap(), 0x4242);
    assert_eq!(core.bsa_severity(RxBsaChannel::Channel11).unwrap(), Severity::Minor);
    assert_eq!(core.bsa_severity(RxBsaChannel::Channel0).unwrap(), Severity::NoAlarm);
}

#[test]
fn test_gth_controls_read_modify_write() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(CORE2 + 0x700, 0xF0);

    let mut core = root.rx_core(Lane::Lane2);
    core.set_rx_polarity_inverted(true).unwrap();
    core.set_tx_polarity_inverted(true).unwrap();
    core.set_loopback(true).unwrap();

    assert_eq!(bus.word(CORE2 + 0x700), 0xF1);
    assert!(core.rx_polarity_inverted().unwrap());
    assert!(core.tx_polarity_inverted().unwrap());
    assert!(core.loopback().unwrap());

    core.set_loopback(false).unwrap();
    assert_eq!(bus.word(CORE2 + 0x708), 0);
}

#[test]
fn test_roll_over_mask() {
    let (mut root, bus) = create_mock_root();
    let mut core = root.rx_core(Lane::Lane2);

    core.set_roll_over_mask(u10::new(0b00_1111_0000)).unwrap();
    core.set_counter_roll_over(StatusCounter::GtRxFifoErr, true)
        .unwrap();

    assert_eq!(bus.word(CORE2 + 0x7F0), 0b10_1111_0000);
    assert_eq!(core.roll_over_mask().unwrap(), u10::new(0b10_1111_0000));
}

#[test]
fn test_commands_strobe_their_reset_bit() {
    let (mut root, bus) = create_mock_root();
    let mut core = root.rx_core(Lane::Lane2);

    for command in RxCoreCommand::ALL {
        core.run_command(command).unwrap();
    }

    assert_eq!(
        bus.writes(),
        vec![
            (CORE2 + 0x7F4, vec![1, 0, 0, 0]),
            (CORE2 + 0x7F8, vec![1, 0, 0, 0]),
            (CORE2 + 0x7FC, vec![1, 0, 0, 0]),
        ]
    );
    assert!(bus.reads().is_empty(), "strobes must not be read back");
}

#[test]
fn test_gt_reset_waits_for_link() {
    let (mut root, bus) = create_mock_root();
    bus.set_word_after_reads(CORE2 + 0x400, 0x1, 3);

    let mut delay = MockDelay::default();
    let mut core = root.rx_core(Lane::Lane2);
    core.reset_gt_and_wait_for_link(&mut delay).unwrap();

    assert_eq!(bus.writes(), vec![(CORE2 + 0x7F8, vec![1, 0, 0, 0])]);
    assert_eq!(bus.reads().len(), 4);
    assert_eq!(delay.total_ns, 4_000_000);
}

#[test]
fn test_gt_reset_times_out_when_link_stays_down() {
    let (mut root, bus) = create_mock_root();

    let mut delay = MockDelay::default();
    let mut core = root.rx_core(Lane::Lane2);

    assert_eq!(
        core.reset_gt_and_wait_for_link(&mut delay),
        Err(Error::LinkTimeout)
    );
    assert_eq!(bus.reads().len(), LINK_UP_ATTEMPTS);
}

#[test]
fn test_status_snapshot() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(CORE2 + 0x01C, 5);
    bus.set_word(CORE2 + 0x400, 0x0101);
    bus.set_word(CORE2 + 0x410, 1000);
    bus.set_word(CORE2 + 0x840 + 4 * 3, 3);
    bus.set_word(CORE2 + 0x900, 1);

    let status = root.rx_core(Lane::Lane2).read_status().unwrap();

    assert_eq!(status.counter(StatusCounter::ErrCrc), 5);
    assert!(status.rx_link_up && status.cpll_lock);
    assert_eq!(status.packet_rate_hz, 1000);
    assert_eq!(status.bsa_severity[3], Severity::Invalid);
    assert_eq!(status.mps_permit, 1);

    // Nothing outside lane 2's window was touched
    assert!(bus
        .reads()
        .iter()
        .all(|(address, _)| (CORE2..CORE2 + 0x1000).contains(address)));
}
