use parallax_starfield::{
    ChunkAddress, CountedParams, CountedTier, GeneratorParams, LayerChunk, LayerConfig,
    ResidentSet, StarfieldConfig, StarfieldSystem, ThresholdParams, ThresholdTier, Viewpoint,
};

fn counted_layer(name: &str, tile_size: f64, capacity: usize, suffix: &str) -> LayerConfig {
    LayerConfig {
        name: name.to_string(),
        tile_size,
        capacity,
        seed_suffix: suffix.to_string(),
        parallax: 1.0,
        generator: GeneratorParams::Counted(CountedParams {
            tiers: vec![
                CountedTier {
                    name: "large".to_string(),
                    max: 8,
                    forced: 4,
                    size: 0.5,
                    color: 0xffffff,
                    ..CountedTier::default()
                },
                CountedTier {
                    name: "off".to_string(),
                    max: 0,
                    forced: 0,
                    color: 0x00ff00,
                    ..CountedTier::default()
                },
            ],
            ..CountedParams::default()
        }),
    }
}

fn single_layer(seed: &str, tile_size: f64, capacity: usize) -> StarfieldSystem {
    StarfieldSystem::new(StarfieldConfig {
        seed: seed.to_string(),
        layers: vec![counted_layer("f", tile_size, capacity, "_f")],
        viewpoints: vec![Viewpoint::default()],
    })
    .unwrap()
}

fn resident_x(system: &StarfieldSystem) -> Vec<i64> {
    let mut xs: Vec<i64> = system.layers()[0].addresses().map(|a| a.x).collect();
    xs.sort();
    xs
}

#[test]
fn test_walk_past_capacity_evicts_oldest_chunk() {
    let mut system = single_layer("test", 1000.0, 5);
    assert_eq!(system.layers()[0].seed(), "test_f");

    for x in [0.0, 1200.0, 2300.0, 3400.0, 4500.0, 5600.0] {
        assert!(system.update_position(x, 0.0), "x = {x} should cross a chunk edge");
    }

    assert_eq!(resident_x(&system), vec![1, 2, 3, 4, 5]);
    assert!(!system.layers()[0].contains(ChunkAddress::new(0, 0)));
}

#[test]
fn test_revisiting_protects_chunk_from_eviction() {
    let mut system = single_layer("test", 1000.0, 3);
    system.update_position(0.0, 0.0);
    system.update_position(1500.0, 0.0);
    system.update_position(2500.0, 0.0);
    // Back to chunk 0: touched, so chunk 1 becomes the eviction target.
    system.update_position(500.0, 0.0);
    system.update_position(3500.0, 0.0);

    assert_eq!(resident_x(&system), vec![0, 2, 3]);
    assert_eq!(system.layers()[0].stats().generated, 4);
}

#[test]
fn test_staying_inside_a_chunk_reports_no_change() {
    let mut system = single_layer("test", 1000.0, 5);
    assert!(system.update_position(100.0, 100.0));
    for step in 1..50 {
        let p = 100.0 + step as f64 * 10.0;
        assert!(!system.update_position(p, 100.0));
    }
    assert_eq!(system.layers()[0].stats().generated, 1);
}

#[test]
fn test_evicted_chunk_regenerates_identically() {
    let mut system = single_layer("regen", 100.0, 2);
    system.update_position(50.0, 50.0);
    let first = system.layers()[0]
        .get(ChunkAddress::new(0, 0))
        .unwrap()
        .clone();

    system.update_position(150.0, 50.0);
    system.update_position(250.0, 50.0);
    assert!(!system.layers()[0].contains(ChunkAddress::new(0, 0)));

    system.update_position(50.0, 50.0);
    assert_eq!(
        system.layers()[0].get(ChunkAddress::new(0, 0)).unwrap(),
        &first
    );
}

#[test]
fn test_independent_systems_agree_on_content() {
    let mut a = single_layer("shared", 200.0, 4);
    let mut b = single_layer("shared", 200.0, 4);
    a.update_position(-350.0, 720.0);
    b.update_position(900.0, 900.0);
    b.update_position(-350.0, 720.0);

    let address = ChunkAddress::new(-2, 3);
    assert_eq!(
        a.layers()[0].get(address).unwrap(),
        b.layers()[0].get(address).unwrap()
    );
}

#[test]
fn test_disabled_tiers_never_emit_objects() {
    let mut system = single_layer("empty", 100.0, 16);
    for i in 0..16 {
        system.update_position(i as f64 * 100.0 + 1.0, 0.0);
    }
    for chunk in system.layers()[0].iter() {
        assert!(chunk.objects().iter().all(|o| o.color != 0x00ff00));
        assert!(!chunk.is_empty());
    }

    let threshold = StarfieldSystem::new(StarfieldConfig {
        seed: "empty".to_string(),
        layers: vec![LayerConfig {
            tile_size: 32.0,
            generator: GeneratorParams::Threshold(ThresholdParams {
                tiers: vec![ThresholdTier {
                    suffix: "off".to_string(),
                    threshold: 1.0,
                    ..ThresholdTier::default()
                }],
            }),
            ..counted_layer("t", 32.0, 4, "_t")
        }],
        viewpoints: vec![Viewpoint::default()],
    });
    let mut threshold = threshold.unwrap();
    threshold.update_position(0.0, 0.0);
    threshold.update_position(40.0, 0.0);
    assert!(threshold.layers()[0].iter().all(|c| c.is_empty()));
}

#[test]
fn test_corner_viewpoints_preload_the_whole_viewport() {
    let mut system = StarfieldSystem::new(StarfieldConfig {
        seed: "corners".to_string(),
        layers: vec![
            counted_layer("fg", 200.0, 12, "_f"),
            counted_layer("bg", 800.0, 4, "_b"),
        ],
        viewpoints: Viewpoint::corners(100.0),
    })
    .unwrap();

    assert!(system.update_position(0.0, 0.0));
    let fg: Vec<ChunkAddress> = system.layers()[0].addresses().collect();
    for address in [
        ChunkAddress::new(-1, -1),
        ChunkAddress::new(0, -1),
        ChunkAddress::new(-1, 0),
        ChunkAddress::new(0, 0),
    ] {
        assert!(fg.contains(&address), "missing {address}");
    }
    assert_eq!(system.layers()[1].len(), 4);
}

#[test]
fn test_renderer_reconciliation_follows_evictions() {
    let mut system = single_layer("render", 100.0, 2);
    system.update_position(0.0, 0.0);
    system.update_position(100.0, 0.0);
    let before = ResidentSet::capture(&system);

    assert!(system.update_position(200.0, 0.0));
    let after = ResidentSet::capture(&system);
    let diff = before.diff(&after);

    let chunk = |x| LayerChunk {
        layer: 0,
        address: ChunkAddress::new(x, 0),
    };
    assert_eq!(diff.added, vec![chunk(2)]);
    assert_eq!(diff.removed, vec![chunk(0)]);
}

#[test]
fn test_config_survives_ron_round_trip() {
    let config = StarfieldConfig::standard("ron");
    let text = ron::to_string(&config).unwrap();
    let parsed: StarfieldConfig = ron::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
