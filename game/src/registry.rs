use crate::map::{EnemySpawn, Map, Portal};
use crate::progress::WorldProgress;
use crate::terrain::{self, names, GenerateError};
use coord_2d::Coord;
use rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// Reasons a portal can refuse to move the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TravelError {
    // The destination exists but the player has not discovered it yet.
    Undiscovered(String),
    // No map is registered under the requested name.
    UnknownMap(String),
}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Undiscovered(name) => write!(f, "{} has not been discovered yet", name),
            Self::UnknownMap(name) => write!(f, "no map is registered as {}", name),
        }
    }
}

impl std::error::Error for TravelError {}

/// Every map in the world keyed by name, plus which one the player is
/// standing in. Maps are registered whole and never change afterwards;
/// replacing one means registering a fresh map under the same name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Atlas {
    maps: HashMap<String, Map>,
    current: Option<String>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates and registers the whole world for a fresh game and puts
    /// the player on the overworld. The seed fixes the warrens layout;
    /// the overworld and the settlements come out the same regardless.
    /// Returns the warrens' enemy roster alongside, since the maps
    /// themselves don't track combatants.
    pub fn new_game(seed: u64) -> Result<(Self, Vec<EnemySpawn>), GenerateError> {
        log::info!("generating world from seed {}", seed);
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        let mut atlas = Self::new();
        let warrens = terrain::dungeon::generate(&mut rng)?;
        atlas.register(terrain::overworld::generate(warrens.entry)?);
        atlas.register(terrain::town::millbrook()?);
        atlas.register(terrain::town::crosshaven()?);
        atlas.register(terrain::town::ringmoor()?);
        atlas.register(terrain::town::bastion()?);
        atlas.register(warrens.map);
        atlas.current = Some(names::OVERWORLD.to_string());
        Ok((atlas, warrens.enemies))
    }

    // Later registrations replace earlier ones wholesale.
    pub fn register(&mut self, map: Map) {
        if self.maps.contains_key(map.name()) {
            log::info!("replacing map {:?}", map.name());
        }
        self.maps.insert(map.name().to_string(), map);
    }

    pub fn get(&self, name: &str) -> Option<&Map> {
        self.maps.get(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_map(&self) -> Option<&Map> {
        self.current.as_deref().and_then(|name| self.maps.get(name))
    }

    // Switches to a registered map and reports where the player lands.
    // An unknown name leaves the current map unchanged.
    pub fn change_map(&mut self, name: &str, spawn: Coord) -> Option<Coord> {
        if !self.maps.contains_key(name) {
            log::warn!("refusing to change to unregistered map {:?}", name);
            return None;
        }
        self.current = Some(name.to_string());
        Some(spawn)
    }

    // One portal step: the discovery gate first, then the map switch.
    pub fn travel(
        &mut self,
        portal: &Portal,
        progress: &WorldProgress,
    ) -> Result<Coord, TravelError> {
        if !progress.is_discovered(&portal.destination) {
            return Err(TravelError::Undiscovered(portal.destination.clone()));
        }
        self.change_map(&portal.destination, portal.spawn)
            .ok_or_else(|| TravelError::UnknownMap(portal.destination.clone()))
    }
}
