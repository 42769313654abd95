use coord_2d::{Coord, Size};
use grid_2d::Grid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod data;
pub mod tile;

pub use data::{EnemySpawn, EnemyTier, Npc, Portal, Shop, ShopKind};
pub use tile::TileKind;

// Ways a finished map can disagree with its own records. Generators are
// expected to treat any of these as a bug rather than recover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildError {
    MarkerOutOfBounds { expected: TileKind, coord: Coord },
    MarkerMismatch { expected: TileKind, found: TileKind, coord: Coord },
    EncounterRateOutOfRange(f64),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MarkerOutOfBounds { expected, coord } => {
                write!(f, "{:?} record at {:?} lies outside the grid", expected, coord)
            }
            Self::MarkerMismatch {
                expected,
                found,
                coord,
            } => write!(
                f,
                "record at {:?} expects {:?} but the grid holds {:?}",
                coord, expected, found
            ),
            Self::EncounterRateOutOfRange(rate) => {
                write!(f, "encounter rate {} is not a probability", rate)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// A finished map. The grid and the npc/portal/shop records are fixed at
/// construction time and stay consistent with each other: every record sits
/// on a cell holding its marker tile. All lookups are by absolute coord and
/// out-of-bounds coords simply resolve to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    name: String,
    grid: Grid<TileKind>,
    npcs: Vec<Npc>,
    portals: Vec<Portal>,
    shops: Vec<Shop>,
    encounter_rate: f64,
}

impl Map {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid<TileKind> {
        &self.grid
    }

    pub fn encounter_rate(&self) -> f64 {
        self.encounter_rate
    }

    pub fn tile_at(&self, coord: Coord) -> Option<TileKind> {
        self.grid.get(coord).copied()
    }

    pub fn is_walkable(&self, coord: Coord) -> bool {
        self.tile_at(coord).map_or(false, TileKind::is_walkable)
    }

    // The marker tile gates each lookup, so a stale record on an
    // overwritten cell can never resolve.
    pub fn npc_at(&self, coord: Coord) -> Option<&Npc> {
        if self.tile_at(coord) != Some(TileKind::NpcMarker) {
            return None;
        }
        self.npcs.iter().find(|npc| npc.coord == coord)
    }

    pub fn portal_at(&self, coord: Coord) -> Option<&Portal> {
        if self.tile_at(coord) != Some(TileKind::Portal) {
            return None;
        }
        self.portals.iter().find(|portal| portal.coord == coord)
    }

    pub fn shop_at(&self, coord: Coord) -> Option<&Shop> {
        if self.tile_at(coord) != Some(TileKind::Shop) {
            return None;
        }
        self.shops.iter().find(|shop| shop.coord == coord)
    }

    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    // One bernoulli trial against this map's encounter rate. Safe areas
    // have a rate of zero and never trigger.
    pub fn roll_encounter<R: Rng>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.encounter_rate)
    }
}

/// Mutable staging area for generators. Adding an npc, portal or shop
/// stamps its marker tile as a side effect, and `finish` refuses to
/// produce a map whose records and grid disagree.
pub struct MapBuilder {
    name: String,
    grid: Grid<TileKind>,
    npcs: Vec<Npc>,
    portals: Vec<Portal>,
    shops: Vec<Shop>,
    encounter_rate: f64,
}

impl MapBuilder {
    pub fn new(name: &str, size: Size, fill: TileKind) -> Self {
        Self {
            name: name.to_string(),
            grid: Grid::new_copy(size, fill),
            npcs: Vec::new(),
            portals: Vec::new(),
            shops: Vec::new(),
            encounter_rate: 0.,
        }
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid<TileKind> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<TileKind> {
        &mut self.grid
    }

    pub fn tile_at(&self, coord: Coord) -> Option<TileKind> {
        self.grid.get(coord).copied()
    }

    // Out-of-bounds writes are dropped. A record added out of bounds is
    // still caught by `finish`.
    pub fn set_tile(&mut self, coord: Coord, kind: TileKind) {
        if let Some(cell) = self.grid.get_mut(coord) {
            *cell = kind;
        }
    }

    pub fn set_encounter_rate(&mut self, rate: f64) {
        self.encounter_rate = rate;
    }

    pub fn add_npc(&mut self, npc: Npc) {
        self.set_tile(npc.coord, TileKind::NpcMarker);
        self.npcs.push(npc);
    }

    pub fn add_portal(&mut self, portal: Portal) {
        self.set_tile(portal.coord, TileKind::Portal);
        self.portals.push(portal);
    }

    pub fn add_shop(&mut self, shop: Shop) {
        self.set_tile(shop.coord, TileKind::Shop);
        self.shops.push(shop);
    }

    pub fn finish(self) -> Result<Map, BuildError> {
        if !(0.0..=1.0).contains(&self.encounter_rate) {
            return Err(BuildError::EncounterRateOutOfRange(self.encounter_rate));
        }
        for npc in &self.npcs {
            check_marker(&self.grid, npc.coord, TileKind::NpcMarker)?;
        }
        for portal in &self.portals {
            check_marker(&self.grid, portal.coord, TileKind::Portal)?;
        }
        for shop in &self.shops {
            check_marker(&self.grid, shop.coord, TileKind::Shop)?;
        }
        Ok(Map {
            name: self.name,
            grid: self.grid,
            npcs: self.npcs,
            portals: self.portals,
            shops: self.shops,
            encounter_rate: self.encounter_rate,
        })
    }
}

fn check_marker(grid: &Grid<TileKind>, coord: Coord, expected: TileKind) -> Result<(), BuildError> {
    match grid.get(coord) {
        None => Err(BuildError::MarkerOutOfBounds { expected, coord }),
        Some(&found) if found != expected => Err(BuildError::MarkerMismatch {
            expected,
            found,
            coord,
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    fn npc(coord: Coord, name: &str) -> Npc {
        Npc {
            coord,
            name: name.to_string(),
            dialog: "...".to_string(),
            is_service: false,
            service_id: None,
        }
    }

    fn small_builder() -> MapBuilder {
        MapBuilder::new("test", Size::new(10, 10), TileKind::Floor)
    }

    #[test]
    fn adding_a_record_stamps_its_marker() {
        let mut builder = small_builder();
        builder.add_npc(npc(Coord::new(3, 3), "Ivy"));
        assert_eq!(builder.tile_at(Coord::new(3, 3)), Some(TileKind::NpcMarker));
    }

    #[test]
    fn finish_rejects_a_record_whose_marker_was_overwritten() {
        let mut builder = small_builder();
        builder.add_npc(npc(Coord::new(3, 3), "Ivy"));
        builder.set_tile(Coord::new(3, 3), TileKind::Wall);
        assert_eq!(
            builder.finish(),
            Err(BuildError::MarkerMismatch {
                expected: TileKind::NpcMarker,
                found: TileKind::Wall,
                coord: Coord::new(3, 3),
            })
        );
    }

    #[test]
    fn finish_rejects_an_out_of_bounds_record() {
        let mut builder = small_builder();
        builder.add_portal(Portal {
            coord: Coord::new(99, 99),
            destination: "nowhere".to_string(),
            spawn: Coord::new(1, 1),
        });
        assert_eq!(
            builder.finish(),
            Err(BuildError::MarkerOutOfBounds {
                expected: TileKind::Portal,
                coord: Coord::new(99, 99),
            })
        );
    }

    #[test]
    fn finish_rejects_an_impossible_encounter_rate() {
        let mut builder = small_builder();
        builder.set_encounter_rate(1.5);
        assert_eq!(
            builder.finish(),
            Err(BuildError::EncounterRateOutOfRange(1.5))
        );
    }

    #[test]
    fn lookups_resolve_only_on_their_own_cell() {
        let mut builder = small_builder();
        builder.add_npc(npc(Coord::new(2, 2), "Ivy"));
        builder.add_shop(Shop {
            coord: Coord::new(4, 4),
            name: "General Store".to_string(),
            kind: ShopKind::Items,
            dialog: "Welcome!".to_string(),
            items: vec!["potion_small".to_string()],
        });
        builder.add_portal(Portal {
            coord: Coord::new(6, 6),
            destination: "elsewhere".to_string(),
            spawn: Coord::new(1, 1),
        });
        let map = builder.finish().unwrap();
        assert_eq!(map.npc_at(Coord::new(2, 2)).unwrap().name, "Ivy");
        assert!(map.npc_at(Coord::new(4, 4)).is_none());
        assert_eq!(
            map.shop_at(Coord::new(4, 4)).unwrap().kind,
            ShopKind::Items
        );
        assert_eq!(
            map.portal_at(Coord::new(6, 6)).unwrap().destination,
            "elsewhere"
        );
        assert!(map.portal_at(Coord::new(2, 2)).is_none());
    }

    #[test]
    fn out_of_bounds_lookups_resolve_to_nothing() {
        let map = small_builder().finish().unwrap();
        let outside = Coord::new(-1, 4);
        assert_eq!(map.tile_at(outside), None);
        assert!(!map.is_walkable(outside));
        assert!(map.npc_at(outside).is_none());
        assert!(map.portal_at(outside).is_none());
        assert!(map.shop_at(outside).is_none());
    }

    #[test]
    fn encounter_roll_follows_the_rate() {
        let mut rng = Isaac64Rng::seed_from_u64(0);
        let mut safe = small_builder();
        safe.set_encounter_rate(0.);
        let safe = safe.finish().unwrap();
        assert!((0..1000).all(|_| !safe.roll_encounter(&mut rng)));
        let mut dangerous = small_builder();
        dangerous.set_encounter_rate(1.);
        let dangerous = dangerous.finish().unwrap();
        assert!((0..1000).all(|_| dangerous.roll_encounter(&mut rng)));
    }
}
