use crate::terrain::{
    error::TerrainError,
    generator::{FragmentTable, TileSet, TileSetConfig, VariantSelection},
    shape::{TileShape, FLAT},
    tests::fixtures::{full_table, quad, test_tileset, triangle},
};
use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use test_case::test_case;

#[test]
fn test_basis_maps_authoring_axes() {
    let p = TileSet::basis().transform_point(&Point3::new(1.0, 2.0, 3.0));
    assert_relative_eq!(p, Point3::new(-1.0, 3.0, 2.0), epsilon = 1e-5);
}

#[test]
fn test_placement_scales_by_block_size() {
    let config = TileSetConfig { block_size: [2.0, 0.5, 3.0], ..TileSetConfig::default() };
    let tileset = TileSet::new(&config, quad("Ground"), full_table("Cliff"), full_table("Ground")).unwrap();

    let transform = tileset.placement(1, 2, 4);
    let origin = transform.transform_point(&Point3::origin());
    assert_relative_eq!(origin, Point3::new(2.0, 2.0, 6.0), epsilon = 1e-5);

    let up = transform.transform_point(&Point3::new(0.0, 1.0, 0.0));
    assert_relative_eq!(up, Point3::new(2.0, 2.0, 7.0), epsilon = 1e-5);
}

#[test]
fn test_base_transform_sits_between_translation_and_basis() {
    let mut config = TileSetConfig::default();
    // uniform scale by 2
    for i in 0..3 {
        config.transform[i][i] = 2.0;
    }
    let tileset = TileSet::new(&config, quad("Ground"), full_table("Cliff"), full_table("Ground")).unwrap();

    let p = tileset.placement(1, 0, 0).transform_point(&Point3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(p, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
    assert_relative_eq!(tileset.block_size, Vector3::new(1.0, 1.0, 1.0));
}

#[test_case(FLAT, false, 1 ; "flat interior")]
#[test_case(FLAT, true, 1 ; "flat border")]
#[test_case(0b0011, false, 2 ; "slope interior")]
#[test_case(0b0011, true, 3 ; "slope border")]
fn test_fragment_count(code: u8, is_border: bool, count: usize) {
    let tileset = test_tileset(VariantSelection::default());
    let picks = tileset.fragments(&TileShape::new(0, code, is_border), 0);
    assert_eq!(picks.len(), count);
    assert_eq!(picks.iter().filter(|p| !p.is_ground).count(), if code == FLAT { 0 } else { 1 });
}

#[test]
fn test_pick_wraps_variation() {
    let table = full_table("Cliff");
    assert_eq!(table.pick(5, 0).name, "Cliff0101_a");
    assert_eq!(table.pick(5, 3).name, "Cliff0101_b");
    assert_eq!(table.variant(5, 1).name, "Cliff0101_b");
    assert!(table.is_complete());
}

#[test]
#[should_panic(expected = "expected 1..=14")]
fn test_code_fifteen_panics() {
    full_table("Cliff").variants(0b1111);
}

#[test]
#[should_panic(expected = "expected 1..=14")]
fn test_flat_code_has_no_table_entry() {
    FragmentTable::new().insert(FLAT, quad("Flat"));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_missing_variant_panics() {
    full_table("Cliff").variant(3, 2);
}

#[test]
#[should_panic(expected = "no fragments authored")]
fn test_empty_code_panics_on_pick() {
    FragmentTable::new().pick(7, 0);
}

#[test]
#[should_panic(expected = "2 uvs for 4 positions")]
fn test_insert_rejects_uv_count_mismatch() {
    let mut fragment = quad("Cliff0001_a");
    fragment.uvs.truncate(2);
    FragmentTable::new().insert(1, fragment);
}

#[test]
#[should_panic(expected = "index 4 out of bounds for 4 vertices")]
fn test_insert_rejects_dangling_index() {
    let mut fragment = quad("Cliff0001_a");
    fragment.indices[5] = 4;
    FragmentTable::new().insert(1, fragment);
}

#[test]
#[should_panic(expected = "not whole triangles")]
fn test_fill_by_prefix_rejects_partial_triangle() {
    let mut fragment = triangle("Cliff0110_a");
    fragment.indices.pop();
    FragmentTable::new().fill_by_prefix([&fragment], "Cliff");
}

#[test]
#[should_panic(expected = "fragment \"Ground\" has 3 uvs")]
fn test_tileset_rejects_malformed_ground() {
    let mut ground = quad("Ground");
    ground.uvs.pop();
    let _ = TileSet::new(&TileSetConfig::default(), ground, full_table("Cliff"), full_table("Ground"));
}

#[test]
fn test_fill_by_prefix() {
    let fragments = vec![
        quad("Cliff0011_b"),
        triangle("Cliff0011_a"),
        quad("Ground0011_a"),
        quad("Cliff1110"),
        quad("Cliff"),
    ];

    let mut table = FragmentTable::new();
    table.insert(1, quad("stale"));
    table.fill_by_prefix(&fragments, "Cliff");

    let names: Vec<_> = table.variants(3).iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Cliff0011_a", "Cliff0011_b"]);
    assert_eq!(table.variants(14).len(), 1);
    assert!(table.variants(1).is_empty(), "existing entries are replaced");
    assert!(!table.is_complete());
}

#[test]
fn test_config_from_json_defaults() {
    let config = TileSetConfig::from_json(r#"{ "block_size": [1.0, 0.5, 1.0] }"#).unwrap();
    assert_eq!(config.block_size, [1.0, 0.5, 1.0]);
    assert_eq!(config.variation, VariantSelection::Hashed { seed: 0 });
    assert_eq!(config.transform, TileSetConfig::default().transform);
}

#[test]
fn test_config_from_json_fixed_variant() {
    let json = r#"{ "block_size": [2, 2, 2], "variation": { "kind": "fixed", "index": 2 } }"#;
    let config = TileSetConfig::from_json(json).unwrap();
    assert_eq!(config.variation, VariantSelection::Fixed { index: 2 });
}

#[test_case(r#"{ "block_size": [0.0, 1.0, 1.0] }"# ; "zero width")]
#[test_case(r#"{ "block_size": [1.0, -1.0, 1.0] }"# ; "negative height")]
fn test_config_rejects_bad_block_size(json: &str) {
    assert!(matches!(TileSetConfig::from_json(json), Err(TerrainError::InvalidConfig(_))));
}

#[test]
fn test_hashed_variation_is_stable() {
    let selection = VariantSelection::Hashed { seed: 42 };
    let a = selection.variation(3, 9, -2);
    assert_eq!(a, selection.variation(3, 9, -2));
    assert!(a < 256);

    let spread: std::collections::HashSet<_> = (0..16).map(|x| selection.variation(x, 0, 0)).collect();
    assert!(spread.len() > 1, "hashing should vary across tiles");
}
