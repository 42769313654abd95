pub mod dungeon;
pub mod roads;
