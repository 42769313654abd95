use crate::map::{BuildError, Map, MapBuilder, Npc, Portal, Shop, ShopKind, TileKind};
use crate::terrain::names;
use crate::terrain::stamp::{self, place_building, Footprint};
use coord_2d::{Coord, Size};
use procgen::roads;
use rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;

pub const TOWN_SIZE: Size = Size::new_u16(30, 30);

// Every settlement's exit portal sits on the bottom road, one cell above
// the wall.
const EXIT_PORTAL: Coord = Coord::new(15, 28);

// Fixed seeds for the randomized dressing. Every game gets the same towns;
// only the warrens vary from session to session.
const MILLBROOK_SEED: u64 = 2891;
const RINGMOOR_SEED: u64 = 6607;

fn town_builder(name: &str) -> MapBuilder {
    let mut builder = MapBuilder::new(name, TOWN_SIZE, TileKind::Floor);
    stamp::wall_ring(builder.grid_mut());
    builder
}

fn exit_to_overworld(builder: &mut MapBuilder, spawn: Coord) {
    builder.add_portal(Portal {
        coord: EXIT_PORTAL,
        destination: names::OVERWORLD.to_string(),
        spawn,
    });
}

fn npc(coord: Coord, name: &str, dialog: &str) -> Npc {
    Npc {
        coord,
        name: name.to_string(),
        dialog: dialog.to_string(),
        is_service: false,
        service_id: None,
    }
}

fn service_npc(coord: Coord, name: &str, dialog: &str, service_id: &str) -> Npc {
    Npc {
        coord,
        name: name.to_string(),
        dialog: dialog.to_string(),
        is_service: true,
        service_id: Some(service_id.to_string()),
    }
}

fn shop(coord: Coord, name: &str, kind: ShopKind, dialog: &str, items: &[&str]) -> Shop {
    Shop {
        coord,
        name: name.to_string(),
        kind,
        dialog: dialog.to_string(),
        items: items.iter().map(|item| item.to_string()).collect(),
    }
}

/// The first settlement: a wide crossroads town with three shops, an inn
/// and a handful of randomly scattered houses. The houses and street
/// furniture are placed by a fixed-seed rng, so the town comes out the
/// same in every game.
pub fn millbrook() -> Result<Map, BuildError> {
    let mut rng = Isaac64Rng::seed_from_u64(MILLBROOK_SEED);
    let mut builder = town_builder(names::MILLBROOK);
    let grid = builder.grid_mut();

    // Three-wide main cross.
    for x in 1..29 {
        for dy in -1..=1 {
            *grid.get_checked_mut(Coord::new(x, 15 + dy)) = TileKind::Road;
        }
    }
    for y in 1..29 {
        for dx in -1..=1 {
            *grid.get_checked_mut(Coord::new(15 + dx, y)) = TileKind::Road;
        }
    }

    // Single-width secondary streets six cells off the centre, nudged
    // sideways every fifth cell so they read as lanes rather than rules.
    for x in 5..25 {
        *grid.get_checked_mut(Coord::new(x, 9)) = TileKind::Road;
        *grid.get_checked_mut(Coord::new(x, 21)) = TileKind::Road;
        if x % 5 == 0 {
            *grid.get_checked_mut(Coord::new(x, 8)) = TileKind::Road;
            *grid.get_checked_mut(Coord::new(x, 22)) = TileKind::Road;
        }
    }
    for y in 5..25 {
        *grid.get_checked_mut(Coord::new(9, y)) = TileKind::Road;
        *grid.get_checked_mut(Coord::new(21, y)) = TileKind::Road;
        if y % 5 == 0 {
            *grid.get_checked_mut(Coord::new(8, y)) = TileKind::Road;
            *grid.get_checked_mut(Coord::new(22, y)) = TileKind::Road;
        }
    }

    // Shop buildings in three corners, inn in the fourth.
    let weapon_building = Footprint::new(5, 5, 5, 5);
    place_building(builder.grid_mut(), weapon_building);
    builder.add_shop(shop(
        weapon_building.centre(),
        "Millbrook Arms",
        ShopKind::Weapons,
        "Honest steel for honest folk.",
        &["bronze_sword", "iron_sword", "silver_sword", "steel_blade", "swift_dagger"],
    ));

    let armour_building = Footprint::new(20, 5, 5, 5);
    place_building(builder.grid_mut(), armour_building);
    builder.add_shop(shop(
        armour_building.centre(),
        "The Oaken Shield",
        ShopKind::Armour,
        "Fitted mail and stout shields.",
        &["leather_armor", "chain_mail", "tower_shield", "plumed_helm"],
    ));

    let item_building = Footprint::new(5, 20, 5, 5);
    place_building(builder.grid_mut(), item_building);
    builder.add_shop(shop(
        item_building.centre(),
        "Hartwell's Herbs",
        ShopKind::Items,
        "Potions brewed fresh every market day.",
        &["potion_small", "potion_medium", "ether_small", "greater_elixir"],
    ));

    let inn_building = Footprint::new(20, 20, 6, 6);
    place_building(builder.grid_mut(), inn_building);
    builder.set_tile(inn_building.centre(), TileKind::Inn);

    // Civic halls: the big one on the square and two small ones flanking
    // the north gate.
    for footprint in [
        Footprint::new(12, 12, 6, 6),
        Footprint::new(3, 3, 4, 4),
        Footprint::new(23, 3, 4, 4),
    ] {
        place_building(builder.grid_mut(), footprint);
    }

    // Scattered houses, skipped wherever they would crowd a road or an
    // existing structure.
    for _ in 0..8 {
        let width = rng.gen_range(3..=4u32);
        let height = rng.gen_range(3..=4u32);
        let footprint = Footprint::new(
            rng.gen_range(2..=28 - width as i32),
            rng.gen_range(2..=28 - height as i32),
            width,
            height,
        );
        if stamp::site_is_clear(builder.grid(), footprint) {
            place_building(builder.grid_mut(), footprint);
        }
    }

    stamp::scatter_on_roads(builder.grid_mut(), TileKind::Fountain, 5, &mut rng);
    stamp::scatter_on_roads(builder.grid_mut(), TileKind::Bench, 10, &mut rng);
    stamp::scatter_on_roads(builder.grid_mut(), TileKind::Lamp, 15, &mut rng);

    exit_to_overworld(&mut builder, Coord::new(10, 11));
    stamp::add_town_decorations(builder.grid_mut());

    builder.add_npc(service_npc(
        Coord::new(14, 14),
        "Garrick the Smith",
        "My forge serves the whole valley. Bring me ore from the warrens and \
         I'll work it into something worth carrying.",
        "smith",
    ));
    builder.add_npc(service_npc(
        Coord::new(4, 4),
        "Petra the Scout",
        "I map the roads between settlements. The harbour at Crosshaven, the \
         ring of Ringmoor, the Bastion on the far ridge. Earn their trust and \
         I'll mark your map.",
        "scout",
    ));
    builder.add_npc(service_npc(
        Coord::new(24, 4),
        "Old Tamsin",
        "Sit down, traveller. A salve for your bruises and a word of advice: \
         keep off the sand at dusk.",
        "healer",
    ));

    builder.finish()
}

/// The harbour settlement: a plain cross with both diagonals, four big
/// warehouses with doors on two sides, and the inn in the south-east
/// warehouse.
pub fn crosshaven() -> Result<Map, BuildError> {
    let mut builder = town_builder(names::CROSSHAVEN);
    let grid = builder.grid_mut();

    stamp::stamp_road(grid, &roads::straight(Coord::new(1, 15), Coord::new(28, 15)));
    stamp::stamp_road(grid, &roads::straight(Coord::new(15, 1), Coord::new(15, 28)));
    let mut diagonals = Vec::new();
    for i in -15..=15 {
        diagonals.push(Coord::new(15 + i, 15 + i));
        diagonals.push(Coord::new(15 + i, 15 - i));
    }
    stamp::stamp_road(grid, &diagonals);

    let warehouses = [
        Footprint::new(5, 5, 8, 8),
        Footprint::new(17, 5, 8, 8),
        Footprint::new(5, 17, 8, 8),
        Footprint::new(17, 17, 8, 8),
    ];
    for footprint in warehouses {
        place_building(builder.grid_mut(), footprint);
        // Dock crews want a second way in off the east lane.
        builder.set_tile(footprint.side_door(), TileKind::Door);
    }

    builder.add_shop(shop(
        Coord::new(7, 7),
        "The Brine Chandlery",
        ShopKind::Armour,
        "Oiled leather and good steel, proof against spray and spear.",
        &["leather_armor", "chain_mail", "plate_armor", "kite_shield", "horned_helm"],
    ));
    builder.add_shop(shop(
        Coord::new(22, 7),
        "Quayside Arms",
        ShopKind::Weapons,
        "Forged for dock brawls and worse.",
        &["bronze_sword", "iron_sword", "broad_axe", "war_hammer"],
    ));
    builder.add_shop(shop(
        Coord::new(7, 22),
        "Harbour Remedies",
        ShopKind::Items,
        "Tonics for the road and the tide.",
        &["potion_small", "potion_medium", "ether_small", "antidote"],
    ));
    builder.set_tile(warehouses[3].centre(), TileKind::Inn);

    exit_to_overworld(&mut builder, Coord::new(40, 11));
    stamp::add_town_decorations(builder.grid_mut());

    builder.add_npc(npc(
        Coord::new(14, 12),
        "Brams the Dockmaster",
        "Every crate on these quays passes under my eye. The diagonal lanes \
         take you straight to the four warehouses.",
    ));
    builder.add_npc(service_npc(
        Coord::new(8, 8),
        "Quartermaster Hale",
        "I keep the western stores. If you need kit for a long road, I can \
         put a pack together.",
        "provisioner",
    ));
    builder.add_npc(service_npc(
        Coord::new(20, 8),
        "Ferrier Lund",
        "When the strait is calm I run crossings. Find me a far shore worth \
         the trip and I'll carry you there.",
        "ferryman",
    ));
    builder.add_npc(npc(
        Coord::new(8, 20),
        "Caspra the Lamplighter",
        "I light the quay lamps at dusk. Mind the water after dark.",
    ));
    builder.add_npc(service_npc(
        Coord::new(20, 20),
        "Innkeeper Rosk",
        "Beds upstairs, stew downstairs. The inn sign hangs by the south door.",
        "innkeeper",
    ));
    builder.add_npc(npc(
        Coord::new(16, 13),
        "Old Wick",
        "I remember when these warehouses were fishing huts. Towns change.",
    ));

    builder.finish()
}

/// The scholars' settlement: one circular road around five halls, with a
/// pair of curved lanes threaded through the middle. The lanes sway by a
/// fixed-seed rng, so their curve is the same in every game.
pub fn ringmoor() -> Result<Map, BuildError> {
    let mut rng = Isaac64Rng::seed_from_u64(RINGMOOR_SEED);
    let mut builder = town_builder(names::RINGMOOR);
    let centre = Coord::new(15, 15);
    let grid = builder.grid_mut();

    stamp::stamp_road(grid, &roads::ring(centre, 10.0));
    let sway = rng.gen_range(-5..=5);
    stamp::stamp_road(
        grid,
        &roads::bezier(Coord::new(15, 5), centre + Coord::new(sway, 0), Coord::new(15, 25), 20),
    );
    let sway = rng.gen_range(-5..=5);
    stamp::stamp_road(
        grid,
        &roads::bezier(Coord::new(5, 15), centre + Coord::new(0, sway), Coord::new(25, 15), 20),
    );

    let halls = [
        Footprint::new(5, 5, 6, 6),
        Footprint::new(19, 5, 6, 6),
        Footprint::new(5, 19, 6, 6),
        Footprint::new(19, 19, 6, 6),
        Footprint::new(12, 12, 6, 6),
    ];
    for footprint in halls {
        place_building(builder.grid_mut(), footprint);
    }

    builder.add_shop(shop(
        Coord::new(22, 8),
        "The Long Shelf",
        ShopKind::Items,
        "Remedies catalogued by strength and vintage.",
        &["potion_small", "potion_medium", "potion_large", "ether_small", "ether_medium"],
    ));
    builder.set_tile(halls[3].centre(), TileKind::Inn);

    exit_to_overworld(&mut builder, Coord::new(10, 39));
    stamp::add_town_decorations(builder.grid_mut());

    builder.add_npc(service_npc(
        Coord::new(14, 14),
        "Archivist Meriel",
        "The records hall keeps a deed for every stone in the ring. Bring me \
         what you find below ground and I'll tell you what it was.",
        "archivist",
    ));
    builder.add_npc(npc(
        Coord::new(8, 8),
        "Scribe Oduin",
        "Four halls for the books, one for the arguing about them.",
    ));
    builder.add_npc(service_npc(
        Coord::new(21, 22),
        "Innkeeper Fews",
        "Quiet rooms, firm rule: no candles near the shelves.",
        "innkeeper",
    ));
    builder.add_npc(npc(
        Coord::new(7, 14),
        "Novice Par",
        "The ring road has no corners. The masters say that teaches patience.",
    ));
    builder.add_npc(npc(
        Coord::new(14, 7),
        "Warden Selk",
        "The north lane has curved the same way since the founders laid it. \
         Don't ask me why they didn't cut it straight.",
    ));
    builder.add_npc(service_npc(
        Coord::new(21, 8),
        "Chandler Ewa",
        "Between the shelves and the shop I know where everything is kept.",
        "chandler",
    ));

    builder.finish()
}

/// The garrison settlement: concentric ring roads around a walled keep,
/// watchtowers in the corners and an open-air scroll stall between the
/// rings.
pub fn bastion() -> Result<Map, BuildError> {
    let mut builder = town_builder(names::BASTION);
    let centre = Coord::new(15, 15);
    let grid = builder.grid_mut();

    for radius in (5..15).step_by(3) {
        stamp::stamp_road(grid, &roads::ring(centre, radius as f64));
    }
    // Four avenues out of the centre, one per compass point. The keep is
    // stamped over them afterwards, so inside its walls they vanish and the
    // south avenue meets the keep door.
    stamp::stamp_road(grid, &roads::spokes(centre, 4, 13));

    let keep = Footprint::new(11, 11, 9, 9);
    place_building(builder.grid_mut(), keep);
    let towers = [
        Footprint::new(5, 5, 3, 3),
        Footprint::new(5, 24, 3, 3),
        Footprint::new(24, 5, 3, 3),
        Footprint::new(24, 24, 3, 3),
    ];
    for footprint in towers {
        place_building(builder.grid_mut(), footprint);
    }

    builder.add_shop(shop(
        Coord::new(22, 8),
        "Siegework Scrolls",
        ShopKind::Items,
        "Fire, ice and thunder, rolled tight.",
        &["fire_scroll", "ice_scroll", "thunder_scroll", "barrier_amulet", "speed_boots"],
    ));
    // The south-east gate tower lets rooms to travellers.
    builder.set_tile(towers[3].centre(), TileKind::Inn);

    exit_to_overworld(&mut builder, Coord::new(40, 39));
    stamp::add_town_decorations(builder.grid_mut());

    builder.add_npc(service_npc(
        Coord::new(14, 14),
        "Captain Aldery",
        "The warrens under the north road spill worse things every season. \
         Thin them out and the Bastion will remember it.",
        "captain",
    ));
    builder.add_npc(npc(
        Coord::new(16, 16),
        "Drillmaster Vox",
        "Walk the rings before breakfast. All four. Then we talk.",
    ));
    builder.add_npc(npc(
        Coord::new(6, 6),
        "Sentinel Kora",
        "From this tower I can see the cave mouth on the north road.",
    ));
    builder.add_npc(npc(
        Coord::new(25, 6),
        "Sentinel Brann",
        "Nothing crosses the desert by day. Watch it anyway.",
    ));
    builder.add_npc(npc(
        Coord::new(6, 25),
        "Sentinel Hesse",
        "Quietest post on the wall. I count lamps to stay sharp.",
    ));
    builder.add_npc(service_npc(
        Coord::new(14, 21),
        "Gatekeeper Ulm",
        "Papers, please. Ha! A joke. The gate stands open for anyone the \
         captain hasn't barred.",
        "gatekeeper",
    ));

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::overworld;

    #[test]
    fn every_settlement_is_walled_and_encounter_free() {
        let maps = [
            millbrook().unwrap(),
            crosshaven().unwrap(),
            ringmoor().unwrap(),
            bastion().unwrap(),
        ];
        for map in &maps {
            assert_eq!(map.encounter_rate(), 0.0, "{}", map.name());
            for coord in map.size().edge_iter() {
                assert_eq!(map.tile_at(coord), Some(TileKind::Wall), "{} at {:?}", map.name(), coord);
            }
        }
    }

    #[test]
    fn every_settlement_exits_beside_its_own_overworld_portal() {
        let cases = [
            (millbrook().unwrap(), Coord::new(10, 11)),
            (crosshaven().unwrap(), Coord::new(40, 11)),
            (ringmoor().unwrap(), Coord::new(10, 39)),
            (bastion().unwrap(), Coord::new(40, 39)),
        ];
        for (map, expected_spawn) in &cases {
            let portal = map.portal_at(EXIT_PORTAL).unwrap();
            assert_eq!(portal.destination, names::OVERWORLD);
            assert_eq!(portal.spawn, *expected_spawn, "{}", map.name());
        }
    }

    #[test]
    fn millbrook_stocks_all_three_shop_kinds() {
        let map = millbrook().unwrap();
        let weapons = map.shop_at(Coord::new(7, 7)).unwrap();
        assert_eq!(weapons.kind, ShopKind::Weapons);
        assert!(weapons.items.contains(&"bronze_sword".to_string()));
        assert_eq!(map.shop_at(Coord::new(22, 7)).unwrap().kind, ShopKind::Armour);
        assert_eq!(map.shop_at(Coord::new(7, 22)).unwrap().kind, ShopKind::Items);
        assert_eq!(map.tile_at(Coord::new(23, 23)), Some(TileKind::Inn));
    }

    #[test]
    fn millbrook_builds_the_same_town_every_game() {
        assert_eq!(millbrook().unwrap(), millbrook().unwrap());
    }

    #[test]
    fn crosshaven_warehouses_open_on_two_sides() {
        let map = crosshaven().unwrap();
        for footprint in [
            Footprint::new(5, 5, 8, 8),
            Footprint::new(17, 5, 8, 8),
            Footprint::new(5, 17, 8, 8),
            Footprint::new(17, 17, 8, 8),
        ] {
            assert_eq!(map.tile_at(footprint.door()), Some(TileKind::Door));
            assert_eq!(map.tile_at(footprint.side_door()), Some(TileKind::Door));
        }
        assert_eq!(map.tile_at(Coord::new(21, 21)), Some(TileKind::Inn));
    }

    #[test]
    fn ringmoor_keeps_its_ring_road() {
        let map = ringmoor().unwrap();
        assert_eq!(map.tile_at(Coord::new(25, 15)), Some(TileKind::Road));
        assert_eq!(map.tile_at(Coord::new(15, 25)), Some(TileKind::Road));
        assert_eq!(map.shop_at(Coord::new(22, 8)).unwrap().kind, ShopKind::Items);
    }

    #[test]
    fn bastion_keep_opens_south_onto_the_rings() {
        let map = bastion().unwrap();
        assert_eq!(map.tile_at(Coord::new(15, 19)), Some(TileKind::Door));
        assert_eq!(map.tile_at(Coord::new(11, 11)), Some(TileKind::Wall));
        assert_eq!(map.tile_at(Coord::new(19, 19)), Some(TileKind::Wall));
        // The east and south avenues survive outside the keep.
        assert_eq!(map.tile_at(Coord::new(22, 15)), Some(TileKind::Road));
        assert_eq!(map.tile_at(Coord::new(15, 22)), Some(TileKind::Road));
        // The dressing pass puts the square's fountain inside the keep.
        assert_eq!(map.tile_at(Coord::new(15, 15)), Some(TileKind::Fountain));
        assert_eq!(map.tile_at(Coord::new(25, 25)), Some(TileKind::Inn));
    }

    #[test]
    fn settlements_surface_their_service_npcs() {
        let map = millbrook().unwrap();
        let smith = map.npc_at(Coord::new(14, 14)).unwrap();
        assert!(smith.is_service);
        assert_eq!(smith.service_id.as_deref(), Some("smith"));
        let map = bastion().unwrap();
        assert_eq!(map.npcs().len(), 6);
        let captain = map.npc_at(Coord::new(14, 14)).unwrap();
        assert_eq!(captain.service_id.as_deref(), Some("captain"));
    }

    #[test]
    fn town_spawn_points_are_walkable() {
        let maps = [
            millbrook().unwrap(),
            crosshaven().unwrap(),
            ringmoor().unwrap(),
            bastion().unwrap(),
        ];
        for map in &maps {
            assert!(
                map.is_walkable(overworld::SETTLEMENT_SPAWN),
                "{} spawn blocked",
                map.name()
            );
        }
    }
}
