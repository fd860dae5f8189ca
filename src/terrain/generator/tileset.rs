use std::f32::consts::{FRAC_PI_2, PI};

use nalgebra::{Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::terrain::error::{Result, TerrainError};
use crate::terrain::shape::TileShape;

/// Number of distinct shape codes; 0 is flat and 15 is never produced.
pub const SHAPE_COUNT: usize = 16;

/// An authored piece of geometry placed per tile.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MeshFragment {
    #[serde(default)]
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshFragment {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Panics when the fragment is malformed: one uv per position, whole
    /// triangles, every index naming a vertex.
    pub fn assert_well_formed(&self) {
        assert_eq!(
            self.uvs.len(),
            self.positions.len(),
            "fragment {:?} has {} uvs for {} positions",
            self.name,
            self.uvs.len(),
            self.positions.len()
        );
        assert!(
            self.indices.len() % 3 == 0,
            "fragment {:?} has {} indices, not whole triangles",
            self.name,
            self.indices.len()
        );
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= self.positions.len()) {
            panic!("fragment {:?} index {} out of bounds for {} vertices", self.name, bad, self.positions.len());
        }
    }
}

/// Per shape code, the list of authored variants. Codes 0 and 15 are
/// always empty.
#[derive(Clone, Debug, Default)]
pub struct FragmentTable {
    variants: [Vec<MeshFragment>; SHAPE_COUNT],
}

impl FragmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: u8, fragment: MeshFragment) {
        assert_shape_code(code);
        fragment.assert_well_formed();
        self.variants[code as usize].push(fragment);
    }

    pub fn variants(&self, code: u8) -> &[MeshFragment] {
        assert_shape_code(code);
        &self.variants[code as usize]
    }

    /// Exact variant lookup. Panics on an unknown code or index.
    pub fn variant(&self, code: u8, index: usize) -> &MeshFragment {
        let list = self.variants(code);
        assert!(
            index < list.len(),
            "variant {index} out of range for shape {code:#06b} ({} authored)",
            list.len()
        );
        &list[index]
    }

    /// Picks a variant, wrapping `variation` over however many exist.
    pub fn pick(&self, code: u8, variation: usize) -> &MeshFragment {
        let list = self.variants(code);
        assert!(!list.is_empty(), "no fragments authored for shape {code:#06b}");
        &list[variation % list.len()]
    }

    /// True when every code in `1..=14` has at least one variant.
    pub fn is_complete(&self) -> bool {
        (1..15).all(|code| !self.variants[code].is_empty())
    }

    /// Fills the table from fragments named `{prefix}{code:04b}...`, e.g.
    /// `Cliff0011_b`. Existing entries are replaced. Variants are ordered
    /// by name so selection stays stable across loads.
    pub fn fill_by_prefix<'a>(&mut self, fragments: impl IntoIterator<Item = &'a MeshFragment>, prefix: &str) {
        let mut named: Vec<&MeshFragment> = fragments.into_iter().collect();
        named.sort_by(|a, b| a.name.cmp(&b.name));

        for code in 1..15u8 {
            let key = format!("{prefix}{code:04b}");
            self.variants[code as usize] = named
                .iter()
                .filter(|f| f.name.starts_with(&key))
                .map(|f| {
                    f.assert_well_formed();
                    (*f).clone()
                })
                .collect();
        }
    }
}

fn assert_shape_code(code: u8) {
    assert!(
        (1..15).contains(&code),
        "shape code {code:#06b} has no fragments; expected 1..=14"
    );
}

/// How a variant is chosen for each placed tile.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariantSelection {
    Fixed { index: usize },
    Hashed { seed: u32 },
}

impl Default for VariantSelection {
    fn default() -> Self {
        VariantSelection::Hashed { seed: 0 }
    }
}

impl VariantSelection {
    pub fn variation(&self, local_x: i32, local_y: i32, height: i32) -> usize {
        match *self {
            VariantSelection::Fixed { index } => index,
            VariantSelection::Hashed { seed } => {
                let mut h = seed ^ 0x9e37_79b9;
                for v in [local_x, local_y, height] {
                    h ^= v as u32;
                    h = h.wrapping_mul(0x85eb_ca6b);
                    h ^= h >> 13;
                }
                (h & 0xff) as usize
            }
        }
    }
}

/// Runtime settings of a tile set, as read from JSON.
#[derive(Serialize, Deserialize)]
#[derive(Clone, Debug, PartialEq)]
pub struct TileSetConfig {
    pub block_size: [f32; 3],
    /// Row-major base transform applied to every fragment.
    #[serde(default = "identity_rows")]
    pub transform: [[f32; 4]; 4],
    #[serde(default)]
    pub variation: VariantSelection,
}

fn identity_rows() -> [[f32; 4]; 4] {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

impl Default for TileSetConfig {
    fn default() -> Self {
        Self {
            block_size: [1.0, 1.0, 1.0],
            transform: identity_rows(),
            variation: VariantSelection::default(),
        }
    }
}

impl TileSetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TileSetConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size.iter().any(|&s| !(s > 0.0)) {
            return Err(TerrainError::InvalidConfig(format!(
                "block_size components must be positive, got {:?}",
                self.block_size
            )));
        }
        Ok(())
    }

    pub fn base_transform(&self) -> Matrix4<f32> {
        let r = &self.transform;
        Matrix4::from_row_slice(&[
            r[0][0], r[0][1], r[0][2], r[0][3],
            r[1][0], r[1][1], r[1][2], r[1][3],
            r[2][0], r[2][1], r[2][2], r[2][3],
            r[3][0], r[3][1], r[3][2], r[3][3],
        ])
    }
}

/// Fragment palette for the cliff/ground mesh set.
#[derive(Clone, Debug)]
pub struct TileSet {
    pub block_size: Vector3<f32>,
    pub transform: Matrix4<f32>,
    pub variation: VariantSelection,
    pub ground: MeshFragment,
    pub cliff: FragmentTable,
    pub ground_caps: FragmentTable,
}

/// A fragment chosen for one tile and which group it renders in.
#[derive(Clone, Copy, Debug)]
pub struct FragmentPick<'a> {
    pub fragment: &'a MeshFragment,
    pub is_ground: bool,
}

impl TileSet {
    pub fn new(config: &TileSetConfig, ground: MeshFragment, cliff: FragmentTable, ground_caps: FragmentTable) -> Result<Self> {
        config.validate()?;
        ground.assert_well_formed();
        Ok(Self {
            block_size: Vector3::from(config.block_size),
            transform: config.base_transform(),
            variation: config.variation,
            ground,
            cliff,
            ground_caps,
        })
    }

    /// Fixed basis change from the fragments' authoring space (Z up) to
    /// the grid's Y-up space: authored `(x, y, z)` lands at `(-x, z, y)`.
    pub fn basis() -> Matrix4<f32> {
        let rotation = Rotation3::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2)
            * Rotation3::from_axis_angle(&Vector3::z_axis(), -PI);
        rotation.to_homogeneous()
    }

    /// Transform placing a fragment for the tile at `(local_x, local_y)`
    /// with base `height`.
    pub fn placement(&self, local_x: i32, local_y: i32, height: i32) -> Matrix4<f32> {
        let offset = Vector3::new(
            local_x as f32 * self.block_size.x,
            height as f32 * self.block_size.y,
            local_y as f32 * self.block_size.z,
        );
        Matrix4::new_translation(&offset) * self.transform * Self::basis()
    }

    /// Fragments to place for a valid shape.
    pub fn fragments(&self, shape: &TileShape, variation: usize) -> Vec<FragmentPick<'_>> {
        let mut picks = Vec::with_capacity(3);

        if shape.is_flat() || shape.is_border {
            picks.push(FragmentPick { fragment: &self.ground, is_ground: true });
        }

        if !shape.is_flat() {
            picks.push(FragmentPick { fragment: self.cliff.pick(shape.code, variation), is_ground: false });
            picks.push(FragmentPick { fragment: self.ground_caps.pick(shape.code, variation), is_ground: true });
        }

        picks
    }
}
