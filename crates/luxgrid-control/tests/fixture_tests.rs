use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use luxgrid_control::{
    ArtNetConfig, Fixture, FixtureConfig, OutputParam, OutputSettings, ProtocolKind,
    ProtocolSelection, StaticResolver,
};
use luxgrid_core::{
    GridShape, Invalidation, PlacementParam, Shape, ShapeKind, ShapeParam, Wiring,
};

const CONTROLLER: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 50));

fn resolver() -> Arc<StaticResolver> {
    Arc::new(StaticResolver::new().with_host("controller.local", CONTROLLER))
}

fn grid(rows: u32, columns: u32, wiring: Wiring) -> Shape {
    Shape::Grid(GridShape {
        rows,
        columns,
        wiring,
        ..GridShape::default()
    })
}

fn artnet_fixture(shape: Shape) -> Fixture {
    let mut fixture = Fixture::new(1, "Grid", shape, resolver()).unwrap();
    fixture
        .set(OutputParam::Protocol(ProtocolKind::ArtNet))
        .unwrap();
    fixture
}

#[test]
fn test_serpentine_grid_wire_order_reaches_outputs() {
    let fixture = artnet_fixture(grid(3, 4, Wiring::ZigzagHorizBottomLeft));
    assert_eq!(fixture.outputs().len(), 1);
    assert_eq!(
        fixture.outputs()[0].indices,
        vec![0, 1, 2, 3, 7, 6, 5, 4, 8, 9, 10, 11]
    );
}

#[test]
fn test_split_grid_outputs() {
    let mut fixture = artnet_fixture(grid(2, 200, Wiring::RowsL2RB2T));
    fixture.set(OutputParam::Universe(3)).unwrap();
    fixture.set(OutputParam::SplitPackets(true)).unwrap();
    let sizes: Vec<(usize, u32)> = fixture
        .outputs()
        .iter()
        .map(|d| (d.indices.len(), d.channel))
        .collect();
    assert_eq!(sizes, vec![(170, 3), (170, 4), (60, 5)]);
    let joined: Vec<usize> = fixture
        .outputs()
        .iter()
        .flat_map(|d| d.indices.iter().copied())
        .collect();
    assert_eq!(joined, (0..400).collect::<Vec<_>>());
}

#[test]
fn test_split_at_highest_universe_never_overflows() {
    let mut fixture = artnet_fixture(grid(2, 200, Wiring::RowsL2RB2T));
    fixture.set(OutputParam::Universe(32767)).unwrap();
    fixture.set(OutputParam::SplitPackets(true)).unwrap();
    let channels: Vec<u32> = fixture.outputs().iter().map(|d| d.channel).collect();
    assert_eq!(channels, vec![32767]);
    assert_eq!(fixture.outputs()[0].indices, (0..170).collect::<Vec<_>>());
}

#[test]
fn test_metrics_change_keeps_buffer_in_step_with_size() {
    let mut fixture = artnet_fixture(grid(4, 4, Wiring::default()));
    for (rows, columns) in [(1, 1), (7, 3), (32, 32)] {
        fixture.set(ShapeParam::Rows(rows)).unwrap();
        assert_eq!(fixture.points().len(), fixture.size());
        fixture.set(ShapeParam::Columns(columns)).unwrap();
        assert_eq!(fixture.points().len(), fixture.size());
        assert_eq!(fixture.size(), (rows * columns) as usize);
    }
}

#[test]
fn test_geometry_change_never_touches_identity_or_outputs() {
    let mut fixture = artnet_fixture(ShapeKind::Arc.default_shape());
    let indices: Vec<usize> = fixture.points().iter().map(|p| p.index).collect();
    let positions: Vec<_> = fixture.points().iter().map(|p| p.position).collect();
    let generation = fixture.output_generation();

    let result = fixture.set(PlacementParam::Yaw(45.0)).unwrap();
    assert_eq!(result, Invalidation::GeometryChanged);
    let after: Vec<usize> = fixture.points().iter().map(|p| p.index).collect();
    assert_eq!(after, indices);
    assert_ne!(fixture.points()[1].position, positions[1]);
    assert_eq!(fixture.output_generation(), generation);
}

#[test]
fn test_unknown_host_disables_and_recovers() {
    let mut fixture = artnet_fixture(grid(2, 200, Wiring::default()));
    fixture.set(OutputParam::SplitPackets(true)).unwrap();
    assert!(!fixture.unknown_host());
    assert!(fixture.outputs().iter().all(|d| d.enabled));

    fixture
        .set(OutputParam::Host("no-such-host.invalid".into()))
        .unwrap();
    assert!(fixture.unknown_host());
    assert_eq!(fixture.outputs().len(), 3);
    assert!(fixture
        .outputs()
        .iter()
        .all(|d| !d.enabled && d.host.is_none()));

    // Re-enabling the fixture does not enable outputs without a host
    fixture.set_enabled(true);
    assert!(fixture.outputs().iter().all(|d| !d.enabled));

    fixture
        .set(OutputParam::Host("controller.local".into()))
        .unwrap();
    assert!(!fixture.unknown_host());
    assert!(fixture
        .outputs()
        .iter()
        .all(|d| d.enabled && d.host == Some(CONTROLLER)));
}

#[test]
fn test_recovered_host_respects_disabled_fixture() {
    let mut fixture = artnet_fixture(Shape::Point);
    fixture.set(OutputParam::Host("bogus".into())).unwrap();
    fixture.set_enabled(false);
    fixture.set(OutputParam::Host("10.1.1.1".into())).unwrap();
    assert!(!fixture.unknown_host());
    assert!(!fixture.outputs()[0].enabled);
    fixture.set_enabled(true);
    assert!(fixture.outputs()[0].enabled);
}

#[test]
fn test_brightness_follows_into_outputs() {
    let mut fixture = artnet_fixture(Shape::Point);
    let generation = fixture.output_generation();
    fixture.set_brightness(0.4).unwrap();
    assert_eq!(fixture.outputs()[0].brightness, 0.4);
    assert_eq!(fixture.output_generation(), generation);
}

#[test]
fn test_load_resyncs_exactly_once() {
    let config = FixtureConfig::new("Restored", grid(16, 16, Wiring::ZigzagVertTopLeft))
        .with_output(OutputSettings {
            split_packets: true,
            protocol: ProtocolSelection::ArtNet(ArtNetConfig {
                universe: 2,
                channel: 0,
                sequence: true,
            }),
            ..OutputSettings::default()
        });
    let mut fixture = Fixture::new(1, "Fresh", ShapeKind::Grid.default_shape(), resolver()).unwrap();
    let generation = fixture.output_generation();

    fixture.begin_load();
    fixture.apply_config(&config).unwrap();
    assert_eq!(fixture.output_generation(), generation);
    assert_eq!(fixture.points().len(), 100);

    assert_eq!(fixture.end_load(), Invalidation::PointsChanged);
    assert_eq!(fixture.output_generation(), generation + 1);
    assert_eq!(fixture.points().len(), 256);
    assert_eq!(fixture.outputs().len(), 2);
    assert_eq!(fixture.label(), "Restored");
}

#[test]
fn test_changes_while_loading_are_deferred() {
    let mut fixture = Fixture::new(1, "F", ShapeKind::Strip.default_shape(), resolver()).unwrap();
    fixture.begin_load();
    assert_eq!(
        fixture.set(ShapeParam::NumPoints(5)).unwrap(),
        Invalidation::Deferred
    );
    assert_eq!(
        fixture.set(ShapeParam::Spacing(1.0)).unwrap(),
        Invalidation::Deferred
    );
    assert_eq!(fixture.points().len(), 30);
    fixture.end_load();
    assert_eq!(fixture.points().len(), 5);
    assert_eq!(fixture.points()[4].x(), 4.0);
}

#[test]
fn test_load_rejects_other_shape() {
    let mut fixture = Fixture::new(1, "F", ShapeKind::Strip.default_shape(), resolver()).unwrap();
    let config = FixtureConfig::new("G", ShapeKind::Grid.default_shape());
    let err = fixture.load(&config).unwrap_err();
    assert_eq!(err.to_string(), "Shape mismatch: expected strip, found grid");
    assert!(!fixture.is_loading());
}

#[test]
fn test_field_of_other_protocol_is_rejected() {
    let mut fixture = artnet_fixture(Shape::Point);
    assert!(fixture.set(OutputParam::Priority(120)).is_err());
    assert!(fixture.set(OutputParam::Sequence(true)).is_ok());
    assert!(fixture.outputs()[0].sequencing);
}

#[test]
fn test_protocol_none_has_no_outputs() {
    let mut fixture = artnet_fixture(Shape::Point);
    fixture
        .set(OutputParam::Host("nowhere".into()))
        .unwrap();
    fixture.set(OutputParam::Protocol(ProtocolKind::None)).unwrap();
    assert!(fixture.outputs().is_empty());
    assert!(!fixture.unknown_host());
}
