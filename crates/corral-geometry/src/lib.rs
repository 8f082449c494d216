use corral_base::{BlockType, Error, Result};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct BlockPos {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl BlockPos {
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// One slab of the enclosure. North is negative Z, west is negative X.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    North,
    South,
    West,
    East,
    Floor,
    Ceiling,
}

impl Face {
    pub const WALLS: [Face; 4] = [Face::North, Face::South, Face::West, Face::East];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Face::North => "north",
            Face::South => "south",
            Face::West => "west",
            Face::East => "east",
            Face::Floor => "floor",
            Face::Ceiling => "ceiling",
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Faces to fill, in build order: the four walls, then floor, then ceiling.
pub fn enclosure_faces(include_floor: bool, include_ceiling: bool) -> Vec<Face> {
    let mut faces = Face::WALLS.to_vec();
    if include_floor {
        faces.push(Face::Floor);
    }
    if include_ceiling {
        faces.push(Face::Ceiling);
    }
    faces
}

/// Inclusive corners of the enclosure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct EnclosureBounds {
    pub min: BlockPos,
    pub max: BlockPos,
}

impl EnclosureBounds {
    /// Square footprint of `size` centered on (`center_x`, `center_z`), rising
    /// `height` blocks from `base_y`. The half extent is `size` floor-divided by 2.
    /// Fails when a corner does not fit in an `i64`.
    pub fn around(
        center_x: i64,
        center_z: i64,
        base_y: i64,
        size: i64,
        height: i64,
    ) -> Result<Self> {
        let half = size.div_euclid(2);
        Ok(Self {
            min: BlockPos::new(
                offset("x_min", center_x.checked_sub(half))?,
                base_y,
                offset("z_min", center_z.checked_sub(half))?,
            ),
            max: BlockPos::new(
                offset("x_max", center_x.checked_add(half))?,
                offset("y_max", base_y.checked_add(height))?,
                offset("z_max", center_z.checked_add(half))?,
            ),
        })
    }

    pub fn corners(&self, face: Face) -> (BlockPos, BlockPos) {
        let (min, max) = (self.min, self.max);
        match face {
            Face::North => (min, BlockPos::new(max.x, max.y, min.z)),
            Face::South => (BlockPos::new(min.x, min.y, max.z), max),
            Face::West => (min, BlockPos::new(min.x, max.y, max.z)),
            Face::East => (BlockPos::new(max.x, min.y, min.z), max),
            Face::Floor => (min, BlockPos::new(max.x, min.y, max.z)),
            Face::Ceiling => (BlockPos::new(min.x, max.y, min.z), max),
        }
    }

    pub fn region(&self, face: Face, block: BlockType) -> FillRegion {
        let (from, to) = self.corners(face);
        FillRegion {
            face,
            from,
            to,
            block,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FillRegion {
    pub face: Face,
    pub from: BlockPos,
    pub to: BlockPos,
    pub block: BlockType,
}

impl FillRegion {
    pub fn command(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for FillRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "/fill {} {} {}",
            self.from,
            self.to,
            self.block.resource_id()
        )
    }
}

fn offset(name: &str, value: Option<i64>) -> Result<i64> {
    value.ok_or_else(|| Error::InvalidParameter(format!("{name} is out of range")))
}

/// Lays out the requested faces of `bounds` as fill regions, preserving the
/// order of `faces`.
pub fn fill_regions(bounds: &EnclosureBounds, faces: &[Face], block: BlockType) -> Vec<FillRegion> {
    faces
        .iter()
        .map(|&face| bounds.region(face, block))
        .collect()
}
