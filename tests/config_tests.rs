//! Integration tests for ComposerConfig validation and custom boards

use port_led_composer::status::{LED_HW_LINK, LED_HW_TX};
use port_led_composer::{
    ComposerConfig, ConfigError, HandlerCtrl, InterfaceRange, LaneControl, LaneSpeed, LedColor,
    LedComposer, LinkSource, PortMap,
};

/// 8 front ports and 2 management ports, identity wiring
const SMALL_MAP: [u16; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

fn small_board(map: &[u16]) -> port_led_composer::ConfigBuilder<'_> {
    ComposerConfig::builder(PortMap::new(map))
        .max_ports(10)
        .mgmt_ports(2)
}

fn small_board_with_interfaces(map: &[u16]) -> port_led_composer::ConfigBuilder<'_> {
    small_board(map)
        .interface(InterfaceRange::new(1, 2, 2))
        .unwrap()
        .interface(InterfaceRange::new(9, 10, 2))
        .unwrap()
}

#[test]
fn builder_defaults_to_map_length() {
    let config = ComposerConfig::builder(PortMap::moonstone())
        .interface(InterfaceRange::new(1, 128, 2))
        .unwrap()
        .interface(InterfaceRange::new(513, 514, 2))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(config.max_ports(), 514);
    assert_eq!(config.mgmt_ports(), 2);
    assert_eq!(config.compress_lanes(), 4);
    assert_eq!(config.act_ticks(), 2);
    assert_eq!(config.link_source(), LinkSource::Hardware);
}

#[test]
fn rejects_zero_ports() {
    let result = small_board(&SMALL_MAP).max_ports(0).build();
    assert_eq!(result, Err(ConfigError::NoPorts));
}

#[test]
fn rejects_ports_beyond_pattern_ram() {
    let map = [1u16; 1024];
    let result = ComposerConfig::builder(PortMap::new(&map)).build();
    assert_eq!(
        result,
        Err(ConfigError::TooManyPorts {
            max_ports: 1024,
            limit: 1023
        })
    );
}

#[test]
fn rejects_board_without_front_ports() {
    let result = small_board(&SMALL_MAP).mgmt_ports(10).build();
    assert_eq!(
        result,
        Err(ConfigError::NoFrontPorts {
            max_ports: 10,
            mgmt_ports: 10
        })
    );
}

#[test]
fn rejects_bad_compression() {
    let result = small_board(&SMALL_MAP).compress_lanes(0).build();
    assert_eq!(result, Err(ConfigError::ZeroCompressLanes));

    let result = small_board(&SMALL_MAP).compress_lanes(3).build();
    assert_eq!(
        result,
        Err(ConfigError::UnevenCompression {
            front_ports: 8,
            compress_lanes: 3
        })
    );
}

#[test]
fn rejects_short_or_broken_port_map() {
    let result = small_board(&SMALL_MAP[..9]).build();
    assert_eq!(
        result,
        Err(ConfigError::PortMapTooShort {
            len: 9,
            required: 10
        })
    );

    let mut map = SMALL_MAP;
    map[3] = 0;
    let result = small_board(&map).build();
    assert_eq!(result, Err(ConfigError::UnmappedPort { lport: 4 }));

    map[3] = 1025;
    let result = small_board(&map).build();
    assert_eq!(
        result,
        Err(ConfigError::PortOutOfRange {
            lport: 4,
            hw_port: 1025
        })
    );
}

#[test]
fn rejects_invalid_interfaces() {
    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(5, 4, 2))
        .unwrap()
        .build();
    assert_eq!(result, Err(ConfigError::InvalidInterfaceRange { index: 0 }));

    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(1, 1024, 2))
        .unwrap()
        .build();
    assert_eq!(result, Err(ConfigError::InvalidInterfaceRange { index: 0 }));

    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(1, 2, 2))
        .unwrap()
        .interface(InterfaceRange::new(9, 10, 0))
        .unwrap()
        .build();
    assert_eq!(result, Err(ConfigError::ZeroPatternWidth { index: 1 }));
}

#[test]
fn rejects_overlapping_interfaces() {
    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(1, 9, 2))
        .unwrap()
        .interface(InterfaceRange::new(11, 12, 2))
        .unwrap()
        .interface(InterfaceRange::new(9, 10, 2))
        .unwrap()
        .build();
    assert_eq!(
        result,
        Err(ConfigError::OverlappingInterfaces {
            first: 0,
            second: 2
        })
    );
}

#[test]
fn rejects_sixth_interface() {
    let mut builder = small_board(&SMALL_MAP);
    for row in 1..=5 {
        builder = builder.interface(InterfaceRange::new(row, row, 2)).unwrap();
    }
    let result = builder.interface(InterfaceRange::new(9, 10, 2));
    assert!(matches!(result, Err(ConfigError::TooManyInterfaces)));
}

#[test]
fn rejects_rows_not_sent_anywhere() {
    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(1, 2, 2))
        .unwrap()
        .build();
    assert_eq!(result, Err(ConfigError::UncoveredRow { row: 9 }));

    let result = small_board(&SMALL_MAP)
        .interface(InterfaceRange::new(2, 2, 2))
        .unwrap()
        .interface(InterfaceRange::new(9, 10, 2))
        .unwrap()
        .build();
    assert_eq!(result, Err(ConfigError::UncoveredRow { row: 1 }));
}

#[test]
fn rejects_staging_smaller_than_front_panel() {
    let config = small_board_with_interfaces(&SMALL_MAP).build().unwrap();
    let result = LedComposer::<'_, 4>::new(config);
    assert!(matches!(
        result,
        Err(ConfigError::StagingTooSmall {
            front_ports: 8,
            capacity: 4
        })
    ));
}

#[test]
fn errors_describe_the_problem() {
    let message = ConfigError::UncoveredRow { row: 9 }.to_string();
    assert_eq!(message, "pattern row 9 is not sent on any interface");

    let message = ConfigError::OverlappingInterfaces {
        first: 0,
        second: 2,
    }
    .to_string();
    assert_eq!(message, "interfaces 0 and 2 overlap");
}

#[test]
fn small_board_composes_with_its_own_layout() {
    let config = small_board_with_interfaces(&SMALL_MAP)
        .front_green_speed(LaneSpeed::G25)
        .mgmt_green_speed(LaneSpeed::G1)
        .build()
        .unwrap();
    let mut composer = LedComposer::<'_, 8>::new(config).unwrap();
    let mut ctrl = HandlerCtrl::new([0u16; 16], [0u8; 16], [0xFFFFu16; 16]);

    // Port 5 at 25G is green on this board, and so is management port 10 at 1G
    ctrl.accu_ram[4] = LED_HW_LINK;
    ctrl.control_data[4] = LaneControl::new(LaneSpeed::G25, false).raw();
    ctrl.accu_ram[9] = LED_HW_LINK | LED_HW_TX;
    ctrl.control_data[9] = LaneControl::new(LaneSpeed::G1, false).raw();

    composer.compose(&mut ctrl, 0);

    assert_eq!(ctrl.pattern_ram[1], u16::from(LedColor::Black.code()));
    assert_eq!(ctrl.pattern_ram[2], u16::from(LedColor::Green.code()));
    assert_eq!(ctrl.pattern_ram[9], u16::from(LedColor::Black.code()));
    assert_eq!(ctrl.pattern_ram[10], u16::from(LedColor::Green.code()));
    // Rows outside the layout are left alone
    assert_eq!(ctrl.pattern_ram[0], 0xFFFF);
    assert_eq!(ctrl.pattern_ram[3], 0xFFFF);

    assert!(ctrl.interfaces[0].valid);
    assert_eq!((ctrl.interfaces[1].start_row, ctrl.interfaces[1].end_row), (9, 10));
    assert!(!ctrl.interfaces[2].valid);
}

#[test]
fn software_link_source_lights_ports_without_hardware_flag() {
    let config = small_board_with_interfaces(&SMALL_MAP)
        .link_source(LinkSource::Either)
        .build()
        .unwrap();
    let mut composer = LedComposer::<'_, 8>::new(config).unwrap();
    let mut ctrl = HandlerCtrl::new([0u16; 16], [0u8; 16], [0u16; 16]);

    ctrl.control_data[0] = LaneControl::new(LaneSpeed::G100, true).raw();
    composer.compose(&mut ctrl, 0);

    assert_eq!(ctrl.pattern_ram[1], u16::from(LedColor::Green.code()));
}
