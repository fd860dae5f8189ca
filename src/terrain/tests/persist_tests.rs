use crate::terrain::{
    coords::ChunkCoords,
    error::TerrainError,
    heightmap::HeightGrid,
    persist::{ChunkRecord, GridSnapshot, EMPTY_SENTINEL},
};
use test_case::test_case;

fn sample_grid() -> HeightGrid {
    let mut grid = HeightGrid::with_chunk_size(4);
    grid.set_height(0, 0, Some(0));
    grid.set_height(1, 0, Some(1));
    grid.set_height(-1, -1, Some(-1));
    grid.set_height(9, -3, Some(5));
    grid.set_height(9, -3, Some(4));
    grid
}

#[test]
fn test_snapshot_layout() {
    let snapshot = sample_grid().snapshot().expect("heights are persistable");

    assert_eq!(snapshot.chunk_size, 4);
    let coords: Vec<_> = snapshot.chunks.iter().map(|c| (c.x, c.y)).collect();
    assert_eq!(coords, vec![(-1, -1), (2, -1), (0, 0)]);

    for record in &snapshot.chunks {
        assert_eq!(record.vertices.len(), 16);
    }
    let origin = &snapshot.chunks[2];
    assert_eq!(&origin.vertices[..3], &[0, 1, EMPTY_SENTINEL]);
}

#[test]
fn test_snapshot_reload_restores_state() {
    let _ = env_logger::builder().is_test(true).try_init();

    let grid = sample_grid();
    let restored = HeightGrid::from_snapshot(&grid.snapshot().unwrap()).expect("snapshot is valid");

    assert_eq!(restored.chunk_count(), grid.chunk_count());
    for chunk in grid.chunks() {
        let other = restored.chunk(chunk.coords()).expect("chunk survives reload");
        assert_eq!(other.nonce(), chunk.nonce());
        assert_eq!(other.population(), chunk.population());
        assert_eq!(other.heights(), chunk.heights());
    }
    assert_eq!(restored.height(9, -3), Some(4));
    assert_eq!(restored.height(2, 2), None);
}

#[test]
fn test_reloaded_grid_keeps_counting_nonces() {
    let grid = sample_grid();
    let before = grid.chunk(ChunkCoords::new(2, -1)).unwrap().nonce();

    let mut restored = HeightGrid::from_snapshot(&grid.snapshot().unwrap()).unwrap();
    restored.set_height(9, -3, Some(3));
    assert_eq!(restored.chunk(ChunkCoords::new(2, -1)).unwrap().nonce(), before + 1);
}

#[test]
fn test_json_round_trip() {
    let snapshot = sample_grid().snapshot().unwrap();
    let json = snapshot.to_json().unwrap();
    assert_eq!(GridSnapshot::from_json(&json).unwrap(), snapshot);
}

#[test]
fn test_reserved_height_cannot_be_saved() {
    let mut grid = HeightGrid::new();
    grid.set_height(-2, 7, Some(EMPTY_SENTINEL));

    match grid.snapshot() {
        Err(TerrainError::ReservedHeight { x, y }) => assert_eq!((x, y), (-2, 7)),
        other => panic!("expected a reserved height error, got {:?}", other),
    }
}

fn record(x: i32, y: i32, nonce: u64, vertices: Vec<i32>) -> ChunkRecord {
    ChunkRecord { x, y, nonce, vertices }
}

fn one_vertex(len: usize) -> Vec<i32> {
    let mut v = vec![EMPTY_SENTINEL; len];
    v[0] = 3;
    v
}

#[test]
fn test_rejects_bad_slot_count() {
    let snapshot = GridSnapshot { chunk_size: 4, chunks: vec![record(0, 0, 1, one_vertex(15))] };
    assert!(matches!(
        HeightGrid::from_snapshot(&snapshot),
        Err(TerrainError::SlotCount { expected: 16, found: 15, .. })
    ));
}

#[test]
fn test_rejects_duplicate_chunk() {
    let snapshot = GridSnapshot {
        chunk_size: 4,
        chunks: vec![record(1, 1, 1, one_vertex(16)), record(1, 1, 3, one_vertex(16))],
    };
    assert!(matches!(HeightGrid::from_snapshot(&snapshot), Err(TerrainError::DuplicateChunk(_))));
}

#[test]
fn test_rejects_empty_chunk_and_zero_nonce() {
    let empty = GridSnapshot { chunk_size: 4, chunks: vec![record(0, 0, 1, vec![EMPTY_SENTINEL; 16])] };
    assert!(matches!(HeightGrid::from_snapshot(&empty), Err(TerrainError::EmptyChunk(_))));

    let unversioned = GridSnapshot { chunk_size: 4, chunks: vec![record(0, 0, 0, one_vertex(16))] };
    assert!(matches!(HeightGrid::from_snapshot(&unversioned), Err(TerrainError::InvalidNonce(_))));

    let sizeless = GridSnapshot { chunk_size: 0, chunks: Vec::new() };
    assert!(matches!(HeightGrid::from_snapshot(&sizeless), Err(TerrainError::InvalidChunkSize(0))));
}

#[test_case(65_536 ; "square overflows")]
#[test_case(46_341 ; "just past the largest square")]
#[test_case(-3 ; "negative")]
fn test_rejects_chunk_size_without_slot_count(chunk_size: i32) {
    let snapshot = GridSnapshot { chunk_size, chunks: Vec::new() };
    match HeightGrid::from_snapshot(&snapshot) {
        Err(TerrainError::InvalidChunkSize(size)) => assert_eq!(size, chunk_size),
        other => panic!("expected InvalidChunkSize, got {other:?}"),
    }
}

#[test]
fn test_rejects_vertex_outside_integer_grid() {
    // with size 3, slot 0 of this chunk sits one below i32::MIN
    let x = i32::MIN.div_euclid(3);
    let mut vertices = vec![EMPTY_SENTINEL; 9];
    vertices[1] = 4;
    let in_range = GridSnapshot { chunk_size: 3, chunks: vec![record(x, 0, 2, vertices.clone())] };
    let grid = HeightGrid::from_snapshot(&in_range).expect("slot 1 is i32::MIN");
    assert_eq!(grid.height(i32::MIN, 0), Some(4));

    vertices[0] = 4;
    let outside = GridSnapshot { chunk_size: 3, chunks: vec![record(x, 0, 2, vertices)] };
    assert!(matches!(
        HeightGrid::from_snapshot(&outside),
        Err(TerrainError::OutOfRange { slot: 0, .. })
    ));
}

#[test]
fn test_malformed_json_is_an_error() {
    let err = GridSnapshot::from_json("{\"chunk_size\": 16").unwrap_err();
    assert!(matches!(err, TerrainError::Json(_)));
    assert!(err.to_string().starts_with("JSON error"));
}
