//! Running tally of what happened during a session

use std::cell::Cell;

/// Counters shared between the game and its actors' callbacks
#[derive(Debug, Default)]
pub struct Scoreboard {
    shots_fired: Cell<u32>,
    asteroids_destroyed: Cell<u32>,
    ship_hits: Cell<u32>,
}

impl Scoreboard {
    /// Count a laser leaving the ship
    pub fn record_shot(&self) {
        self.shots_fired.set(self.shots_fired.get() + 1);
    }

    /// Count an asteroid shot down
    pub fn record_asteroid_destroyed(&self) {
        self.asteroids_destroyed.set(self.asteroids_destroyed.get() + 1);
    }

    /// Count the ship being hit
    pub fn record_ship_hit(&self) {
        self.ship_hits.set(self.ship_hits.get() + 1);
    }

    /// Lasers fired so far
    pub fn shots_fired(&self) -> u32 {
        self.shots_fired.get()
    }

    /// Asteroids shot down so far
    pub fn asteroids_destroyed(&self) -> u32 {
        self.asteroids_destroyed.get()
    }

    /// Times the ship was hit so far
    pub fn ship_hits(&self) -> u32 {
        self.ship_hits.get()
    }
}
