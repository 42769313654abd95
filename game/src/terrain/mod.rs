use crate::map::BuildError;
use procgen::dungeon::DungeonError;
use std::fmt;

pub mod dungeon;
pub mod overworld;
pub mod stamp;
pub mod town;

// Canonical map names. Portals and discovery records refer to maps by
// these strings.
pub mod names {
    pub const OVERWORLD: &str = "Overworld";
    pub const MILLBROOK: &str = "Millbrook";
    pub const CROSSHAVEN: &str = "Crosshaven";
    pub const RINGMOOR: &str = "Ringmoor";
    pub const BASTION: &str = "Bastion";
    pub const WARRENS: &str = "Warrens";
}

// Either half of world generation can refuse: the dungeon generator for
// impossible sizes, the map builder for inconsistent markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenerateError {
    Build(BuildError),
    Dungeon(DungeonError),
}

impl From<BuildError> for GenerateError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

impl From<DungeonError> for GenerateError {
    fn from(e: DungeonError) -> Self {
        Self::Dungeon(e)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Build(e) => write!(f, "map construction failed: {}", e),
            Self::Dungeon(e) => write!(f, "dungeon generation failed: {}", e),
        }
    }
}

impl std::error::Error for GenerateError {}
