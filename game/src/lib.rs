pub use grid_2d::{Coord, Grid, Size};

mod map;
mod progress;
mod registry;
mod terrain;

pub use map::{
    BuildError, EnemySpawn, EnemyTier, Map, MapBuilder, Npc, Portal, Shop, ShopKind, TileKind,
};
pub use progress::WorldProgress;
pub use registry::{Atlas, TravelError};
pub use terrain::{names, GenerateError};
