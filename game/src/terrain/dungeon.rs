use crate::map::{EnemySpawn, EnemyTier, Map, MapBuilder, Portal, TileKind};
use crate::terrain::{names, overworld, GenerateError};
use coord_2d::{Coord, Size};
use procgen::dungeon::{self, DungeonCell, DungeonLayout};
use rand::Rng;

pub const SIZE: Size = Size::new_u16(40, 40);

// Everything the caller needs to install the warrens: the map, the cell
// the cave portal drops the player on, and where the enemies start.
#[derive(Debug, Clone, PartialEq)]
pub struct Dungeon {
    pub map: Map,
    pub entry: Coord,
    pub enemies: Vec<EnemySpawn>,
}

/// Carves the warrens out of solid rock and dresses the layout as a map:
/// floor where the generator put rooms and corridors, an exit portal back
/// up to the overworld plaza, and the enemy roster converted into spawn
/// records.
pub fn generate<R: Rng>(rng: &mut R) -> Result<Dungeon, GenerateError> {
    let layout = DungeonLayout::generate(SIZE, rng)?;
    let mut builder = MapBuilder::new(names::WARRENS, SIZE, TileKind::Wall);
    for (coord, cell) in layout.map.enumerate() {
        if *cell == DungeonCell::Floor {
            builder.set_tile(coord, TileKind::Floor);
        }
    }
    builder.add_portal(Portal {
        coord: layout.exit,
        destination: names::OVERWORLD.to_string(),
        spawn: overworld::PLAZA_SPAWN,
    });
    builder.set_encounter_rate(0.08);
    let enemies = layout
        .enemies
        .iter()
        .map(|seed| EnemySpawn {
            coord: seed.coord,
            tier: tier(seed.tier),
        })
        .collect();
    let map = builder.finish()?;
    Ok(Dungeon {
        map,
        entry: layout.entry,
        enemies,
    })
}

fn tier(tier: dungeon::EnemyTier) -> EnemyTier {
    match tier {
        dungeon::EnemyTier::Weak => EnemyTier::Weak,
        dungeon::EnemyTier::Normal => EnemyTier::Normal,
        dungeon::EnemyTier::Strong => EnemyTier::Strong,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    #[test]
    fn the_warrens_open_back_onto_the_plaza() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let dungeon = generate(&mut rng).unwrap();
        assert_eq!(dungeon.map.encounter_rate(), 0.08);
        assert!(dungeon.map.is_walkable(dungeon.entry));
        let exit = dungeon.map.portals()[0].coord;
        let portal = dungeon.map.portal_at(exit).unwrap();
        assert_eq!(portal.destination, names::OVERWORLD);
        assert_eq!(portal.spawn, overworld::PLAZA_SPAWN);
    }

    #[test]
    fn enemies_start_on_walkable_cells() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let dungeon = generate(&mut rng).unwrap();
        for spawn in &dungeon.enemies {
            assert!(dungeon.map.is_walkable(spawn.coord), "at {:?}", spawn.coord);
        }
    }

    #[test]
    fn the_same_seed_digs_the_same_warrens() {
        let dig = |seed| generate(&mut Isaac64Rng::seed_from_u64(seed)).unwrap();
        assert_eq!(dig(9), dig(9));
        assert_ne!(dig(9), dig(10));
    }
}
