use serde::{Deserialize, Serialize};

// Every cell of a map grid holds exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Floor,
    Wall,
    Grass,
    Water,
    Road,
    Door,
    NpcMarker,
    Portal,
    Shop,
    Mountain,
    Forest,
    Sand,
    Fountain,
    Bench,
    Lamp,
    Sign,
    Flowerbed,
    Inn,
}

impl TileKind {
    // Whether the player can step onto a cell of this kind. Street furniture
    // counts as open ground.
    pub fn is_walkable(self) -> bool {
        use TileKind::*;
        match self {
            Floor | Grass | Road | Door | NpcMarker | Portal | Shop | Fountain | Bench
            | Lamp | Sign | Flowerbed | Inn => true,
            Empty | Wall | Water | Mountain | Forest | Sand => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_terrain_and_furniture_are_walkable() {
        for kind in [
            TileKind::Floor,
            TileKind::Grass,
            TileKind::Road,
            TileKind::Door,
            TileKind::NpcMarker,
            TileKind::Portal,
            TileKind::Shop,
            TileKind::Fountain,
            TileKind::Bench,
            TileKind::Lamp,
            TileKind::Sign,
            TileKind::Flowerbed,
            TileKind::Inn,
        ] {
            assert!(kind.is_walkable(), "{:?} should be walkable", kind);
        }
    }

    #[test]
    fn blocking_terrain_is_not_walkable() {
        for kind in [
            TileKind::Empty,
            TileKind::Wall,
            TileKind::Water,
            TileKind::Mountain,
            TileKind::Forest,
            TileKind::Sand,
        ] {
            assert!(!kind.is_walkable(), "{:?} should block movement", kind);
        }
    }
}
