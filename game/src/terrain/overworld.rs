use crate::map::{BuildError, Map, MapBuilder, Npc, Portal, TileKind};
use crate::terrain::{names, stamp};
use coord_2d::{Coord, Size};
use procgen::roads;

pub const SIZE: Size = Size::new_u16(50, 50);

// Where the player lands when a settlement portal drops them back outside.
pub const PLAZA_SPAWN: Coord = Coord::new(25, 25);

// The cave mouth on the north road leading down into the warrens.
const CAVE_PORTAL: Coord = Coord::new(25, 7);

const SETTLEMENT_PORTALS: [(Coord, &str); 4] = [
    (Coord::new(10, 10), names::MILLBROOK),
    (Coord::new(40, 10), names::CROSSHAVEN),
    (Coord::new(10, 40), names::RINGMOOR),
    (Coord::new(40, 40), names::BASTION),
];

// The spawn cell inside every settlement, just up the road from its exit
// portal.
pub const SETTLEMENT_SPAWN: Coord = Coord::new(15, 25);

/// Builds the fixed overworld: a lake in the middle crossed by a causeway,
/// mountains to the north, forest to the south, desert in the east, and a
/// road net joining the central plaza to the four settlement portals.
/// `warrens_entry` is where the cave portal drops the player underground.
pub fn generate(warrens_entry: Coord) -> Result<Map, BuildError> {
    let mut builder = MapBuilder::new(names::OVERWORLD, SIZE, TileKind::Grass);
    stamp::wall_ring(builder.grid_mut());

    // Lake in the middle of the map.
    for y in 20..30 {
        for x in 15..35 {
            if (x - 25) * (x - 25) + (y - 25) * (y - 25) <= 100 {
                builder.set_tile(Coord::new(x, y), TileKind::Water);
            }
        }
    }

    // Mountain belt across the north, patterned rather than solid so the
    // road can thread through it.
    for y in 5..15 {
        for x in 10..40 {
            if (x + y) % 3 == 0 || (x - y) % 5 == 0 {
                builder.set_tile(Coord::new(x, y), TileKind::Mountain);
            }
        }
    }

    // Forest across the south.
    for y in 35..45 {
        for x in 10..40 {
            if (x * y) % 7 == 0 || (x + y) % 8 == 0 {
                builder.set_tile(Coord::new(x, y), TileKind::Forest);
            }
        }
    }

    // Desert in the east.
    for y in 15..35 {
        for x in 35..45 {
            builder.set_tile(Coord::new(x, y), TileKind::Sand);
        }
    }

    // The main cross: two full-length roads meeting at the plaza. The
    // east-west road doubles as a causeway over the lake.
    let grid = builder.grid_mut();
    stamp::stamp_road(grid, &roads::straight(Coord::new(1, 25), Coord::new(48, 25)));
    stamp::stamp_road(grid, &roads::straight(Coord::new(25, 1), Coord::new(25, 48)));
    for y in 23..28 {
        for x in 23..28 {
            *grid.get_checked_mut(Coord::new(x, y)) = TileKind::Road;
        }
    }

    // One L-shaped spur per settlement, hugging the map's quarter lines.
    stamp::stamp_road(grid, &roads::straight(Coord::new(10, 10), Coord::new(39, 10)));
    stamp::stamp_road(grid, &roads::straight(Coord::new(10, 40), Coord::new(39, 40)));
    stamp::stamp_road(grid, &roads::straight(Coord::new(10, 10), Coord::new(10, 39)));
    stamp::stamp_road(grid, &roads::straight(Coord::new(40, 10), Coord::new(40, 39)));

    // Ponds in each far corner.
    for (cx, cy) in [(7, 7), (42, 7), (7, 42), (42, 42)] {
        for dy in -2..=2 {
            for dx in -2..=2 {
                if dx * dx + dy * dy <= 4 {
                    builder.set_tile(Coord::new(cx + dx, cy + dy), TileKind::Water);
                }
            }
        }
    }

    // Round stands of forest and rock, leaving roads and water alone.
    cluster(&mut builder, TileKind::Forest, &[(15, 15, 3), (35, 35, 4), (15, 35, 3), (35, 15, 4)]);
    cluster(&mut builder, TileKind::Mountain, &[(20, 10, 2), (30, 10, 3), (20, 40, 3), (30, 40, 2)]);

    // Clear a three-cell approach around each settlement portal so terrain
    // never strands the player on arrival. Runs after every pass that
    // stamps mountain or forest.
    let grid = builder.grid_mut();
    for (coord, _) in SETTLEMENT_PORTALS {
        for dy in -3..=3 {
            for dx in -3..=3 {
                let near = coord + Coord::new(dx, dy);
                if stamp::is_interior(SIZE, near)
                    && matches!(
                        *grid.get_checked(near),
                        TileKind::Mountain | TileKind::Forest
                    )
                {
                    *grid.get_checked_mut(near) = TileKind::Grass;
                }
            }
        }
    }
    for (coord, destination) in SETTLEMENT_PORTALS {
        builder.add_portal(Portal {
            coord,
            destination: destination.to_string(),
            spawn: SETTLEMENT_SPAWN,
        });
    }

    builder.add_portal(Portal {
        coord: CAVE_PORTAL,
        destination: names::WARRENS.to_string(),
        spawn: warrens_entry,
    });

    builder.add_npc(Npc {
        coord: Coord::new(25, 20),
        name: "Traveler".to_string(),
        dialog: "They say Millbrook lies up the north-west road. Worth the walk! \
                 There are other settlements out there too, though I've never found them."
            .to_string(),
        is_service: false,
        service_id: None,
    });
    builder.add_npc(Npc {
        coord: Coord::new(20, 15),
        name: "Explorer".to_string(),
        dialog: "This land keeps its secrets. Some places won't show themselves to \
                 strangers. Do good work for people and word of you will spread."
            .to_string(),
        is_service: false,
        service_id: None,
    });
    builder.add_npc(Npc {
        coord: Coord::new(30, 15),
        name: "Merchant".to_string(),
        dialog: "I cart goods between settlements. Millbrook is the only market I \
                 know, but sailors talk of a harbour town beyond the hills."
            .to_string(),
        is_service: false,
        service_id: None,
    });

    builder.set_encounter_rate(0.03);
    builder.finish()
}

fn cluster(builder: &mut MapBuilder, kind: TileKind, stands: &[(i32, i32, i32)]) {
    for &(cx, cy, radius) in stands {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = Coord::new(cx + dx, cy + dy);
                if !stamp::is_interior(builder.size(), coord) {
                    continue;
                }
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
                if matches!(
                    builder.tile_at(coord),
                    Some(TileKind::Road) | Some(TileKind::Water) | Some(TileKind::Portal)
                ) {
                    continue;
                }
                builder.set_tile(coord, kind);
            }
        }
    }
}
