use coord_2d::Coord;
use serde::{Deserialize, Serialize};

// A character standing on the map. Service npcs offer something beyond
// dialog and carry an identifier the interaction layer dispatches on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub coord: Coord,
    pub name: String,
    pub dialog: String,
    pub is_service: bool,
    pub service_id: Option<String>,
}

// A tile that moves the player to another map when stepped on. `spawn` is
// the cell the player appears at on the destination map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub coord: Coord,
    pub destination: String,
    pub spawn: Coord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopKind {
    Weapons,
    Armour,
    Items,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub coord: Coord,
    pub name: String,
    pub kind: ShopKind,
    pub dialog: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTier {
    Weak,
    Normal,
    Strong,
}

// Where the dungeon wants an enemy placed. The encounter layer turns these
// into live combatants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub coord: Coord,
    pub tier: EnemyTier,
}
