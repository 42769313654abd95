use crate::terrain::names;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Which maps the player knows the way to. Portals refuse to carry the
// player anywhere undiscovered, so quests gate travel by calling
// `discover` rather than by touching the maps themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldProgress {
    discovered: HashSet<String>,
}

impl WorldProgress {
    // A fresh game knows the overworld, the first settlement and the
    // warrens beneath it. The rest are quest rewards.
    pub fn new_game() -> Self {
        let mut progress = Self::default();
        progress.discover(names::OVERWORLD);
        progress.discover(names::MILLBROOK);
        progress.discover(names::WARRENS);
        progress
    }

    pub fn discover(&mut self, name: &str) {
        self.discovered.insert(name.to_string());
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.discovered.contains(name)
    }

    pub fn discovered(&self) -> impl Iterator<Item = &str> {
        self.discovered.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_fresh_game_knows_the_starting_maps() {
        let progress = WorldProgress::new_game();
        assert!(progress.is_discovered(names::OVERWORLD));
        assert!(progress.is_discovered(names::MILLBROOK));
        assert!(progress.is_discovered(names::WARRENS));
        assert!(!progress.is_discovered(names::CROSSHAVEN));
        assert!(!progress.is_discovered(names::RINGMOOR));
        assert!(!progress.is_discovered(names::BASTION));
    }

    #[test]
    fn discovery_is_idempotent() {
        let mut progress = WorldProgress::new_game();
        progress.discover(names::CROSSHAVEN);
        progress.discover(names::CROSSHAVEN);
        assert!(progress.is_discovered(names::CROSSHAVEN));
        assert_eq!(progress.discovered().count(), 4);
    }
}
