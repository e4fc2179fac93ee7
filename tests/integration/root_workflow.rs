//! End-to-end use of the root: connect, initial read, polling, commands

use crate::common::test_utils::create_mock_root_with;
use crate::common::{create_mock_root, MockBus};
use bsa_mps_rx::memory::combine::CombineCommand;
use bsa_mps_rx::memory::rx_core::RxCoreCommand;
use bsa_mps_rx::memory::{Lane, Severity};
use bsa_mps_rx::root::devices;
use bsa_mps_rx::transport::{ControlServer, Link, SrpVersion};
use bsa_mps_rx::{Root, RootConfig};
use std::net::Ipv4Addr;

#[test]
fn test_connect_uses_backdoor_by_default() {
    let root = Root::<MockBus>::connect(RootConfig::default()).unwrap();

    assert_eq!(root.link(), Link::BACKDOOR);
    assert_eq!(root.control_server(), Some(ControlServer::WILDCARD));

    let bus = root.free();
    assert_eq!(
        bus.connected_to(),
        Some((Ipv4Addr::new(10, 0, 0, 107), Link::BACKDOOR))
    );
}

#[test]
fn test_connect_over_rssi() {
    let config = RootConfig::new()
        .with_host(Ipv4Addr::new(192, 168, 2, 10))
        .with_backdoor(false)
        .with_control_server(None);

    let root = Root::<MockBus>::connect(config).unwrap();
    assert_eq!(root.control_server(), None);

    let (host, link) = root.free().connected_to().unwrap();
    assert_eq!(host, Ipv4Addr::new(192, 168, 2, 10));
    assert_eq!(link.port(), 8193);
    assert_eq!(link.srp_version(), SrpVersion::V3);
    assert_eq!(link.tdest(), Some(0));
}

#[test]
fn test_start_reads_every_readable_element() {
    let (mut root, bus) = create_mock_root();

    root.start().unwrap();

    // Per core: 15 status scalars, 4 GTH controls, 12 quantities,
    // 12 severities, permit and timestamp
    let per_core = 15 + 4 + 12 + 12 + 2;
    // Combine: 32 + 32 + 4 + 4 + local timestamp + rate
    let combine = 32 + 32 + 4 + 4 + 2;
    assert_eq!(bus.reads().len(), 4 * per_core + combine);
    assert!(bus.writes().is_empty());

    // Write-only strobes are never touched
    for node in devices() {
        for offset in [0x7F4u64, 0x7F8, 0x7FC, 0xFFC] {
            assert!(!bus
                .reads()
                .iter()
                .any(|(address, _)| *address == node.base + offset));
        }
    }
}

#[test]
fn test_start_without_init_read_is_silent() {
    let (mut root, bus) = create_mock_root_with(RootConfig::new().with_init_read(false));

    root.start().unwrap();

    assert!(bus.operations().is_empty());
}

#[test]
fn test_poll_collects_every_device() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(0x9000_0410, 1_000_000);
    bus.set_word(0xB000_0400, 0x1);
    bus.set_word(0xC000_0300, 910_000);
    bus.set_word(0xC000_0080, 0x2);

    let status = root.poll().unwrap().unwrap();

    assert_eq!(status.rx_cores[1].packet_rate_hz, 1_000_000);
    assert!(status.rx_cores[3].rx_link_up);
    assert!(!status.rx_cores[0].rx_link_up);
    assert_eq!(status.combine.packet_rate_hz, 910_000);
    assert_eq!(status.combine.bsa_severity[0], Severity::Major);
}

#[test]
fn test_poll_disabled_returns_nothing() {
    let (mut root, bus) = create_mock_root_with(RootConfig::new().with_polling(false));

    assert_eq!(root.poll(), Ok(None));
    assert!(bus.operations().is_empty());
}

#[test]
fn test_reset_everything() {
    let (mut root, bus) = create_mock_root();

    root.count_reset().unwrap();
    root.combine().run_command(CombineCommand::RstCnt).unwrap();

    let addresses: Vec<u64> = bus.writes().into_iter().map(|(address, _)| address).collect();
    assert_eq!(
        addresses,
        vec![0x8000_07F4, 0x9000_07F4, 0xA000_07F4, 0xB000_07F4, 0xC000_0FFC]
    );
}

#[test]
fn test_count_reset_reaches_every_core_but_not_combine() {
    let (mut root, bus) = create_mock_root();

    root.count_reset().unwrap();

    assert_eq!(
        bus.writes(),
        vec![
            (0x8000_07F4, vec![1, 0, 0, 0]),
            (0x9000_07F4, vec![1, 0, 0, 0]),
            (0xA000_07F4, vec![1, 0, 0, 0]),
            (0xB000_07F4, vec![1, 0, 0, 0]),
        ]
    );
    assert!(bus.reads().is_empty());
}

#[test]
fn test_hard_reset_reaches_every_core() {
    let (mut root, bus) = create_mock_root();

    root.hard_reset().unwrap();

    let addresses: Vec<u64> = bus.writes().into_iter().map(|(address, _)| address).collect();
    assert_eq!(
        addresses,
        vec![0x8000_07FC, 0x9000_07FC, 0xA000_07FC, 0xB000_07FC]
    );
}

#[test]
fn test_count_reset_stops_at_first_failing_core() {
    let (mut root, bus) = create_mock_root();
    bus.fail_next_write();

    assert_eq!(root.count_reset(), Err(bsa_mps_rx::Error::BusWrite));
    assert!(bus.writes().is_empty());
}

#[test]
fn test_per_lane_commands_still_dispatch() {
    let (mut root, bus) = create_mock_root();

    root.rx_core(Lane::Lane1)
        .run_command(RxCoreCommand::RstHard)
        .unwrap();

    assert_eq!(bus.writes(), vec![(0x9000_07FC, vec![1, 0, 0, 0])]);
}

#[test]
fn test_device_window_by_node() {
    let (mut root, bus) = create_mock_root();
    bus.set_word(0xB000_0900, 0x7);

    let node = devices().find(|node| node.lane == Some(Lane::Lane3)).unwrap();
    let permit = bsa_mps_rx::memory::find(node.fields, "MpsPermit").unwrap();

    assert_eq!(root.device(&node).read_field(permit, 0), Ok(7));
}
