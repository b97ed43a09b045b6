//! Game setup and headless sessions

use crate::asteroid::{self, AsteroidSpawn, ASTEROID};
use crate::config::GameConfig;
use crate::laser::LASER;
use crate::score::Scoreboard;
use crate::{assets, ship};
use actor_engine::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::rc::Rc;

/// A running game: the world, the ship and the tally
pub struct Game {
    world: World,
    ship: ActorId,
    score: Rc<Scoreboard>,
}

impl Game {
    /// Build the world, scatter the asteroids and spawn the ship
    pub fn new(config: &GameConfig) -> Result<Self, SceneError> {
        let mut world = World::new(config.world_config()).with_asset_resolver(assets::manifest());
        let mut rng = StdRng::seed_from_u64(config.seed);
        let score = Rc::new(Scoreboard::default());

        for _ in 0..config.gameplay.asteroid_count {
            let start = AsteroidSpawn::random(&mut rng, &config.screen, config.gameplay.asteroid_speed);
            asteroid::spawn(&mut world, start, config.screen)?;
        }
        let ship = ship::spawn(&mut world, &config.gameplay, &score)?;

        log::info!(
            "Game ready: {} asteroids on a {}x{} field (seed {})",
            config.gameplay.asteroid_count,
            config.screen.width,
            config.screen.height,
            config.seed
        );
        Ok(Self { world, ship, score })
    }

    /// The game world
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The game world, mutably (feeds input, spawns extra actors)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The player ship
    pub const fn ship(&self) -> ActorId {
        self.ship
    }

    /// Running tally
    pub fn score(&self) -> &Scoreboard {
        &self.score
    }

    /// Advance one frame
    pub fn tick(&mut self, delta_seconds: f32) {
        self.world.tick(delta_seconds);
    }

    /// Play `script` at `tick_rate` frames per second for `duration` seconds of world time
    ///
    /// A tick rate that is not finite and positive plays nothing.
    pub fn run_script(&mut self, script: &Script, tick_rate: f32, duration: f32) -> Summary {
        if !(tick_rate.is_finite() && tick_rate > 0.0) {
            log::warn!("Ignoring script: tick rate {tick_rate} is not a positive frame rate");
            return self.summary();
        }
        let delta_seconds = 1.0 / tick_rate;
        let mut events = script.events.iter().peekable();

        while self.world.time().as_secs_f32() < duration {
            let now = self.world.time().as_secs_f32();
            while let Some(event) = events.next_if(|event| event.at <= now) {
                log::debug!("{:.2}s: {:?}", event.at, event.input);
                match event.input {
                    ScriptInput::Press(key) => self.world.input_mut().press(key),
                    ScriptInput::Release(key) => self.world.input_mut().release(key),
                }
            }
            self.tick(delta_seconds);
        }
        self.summary()
    }

    /// Snapshot of the session so far
    pub fn summary(&self) -> Summary {
        Summary {
            frames: self.world.frame(),
            elapsed_seconds: self.world.time().as_secs_f32(),
            shots_fired: self.score.shots_fired(),
            asteroids_destroyed: self.score.asteroids_destroyed(),
            asteroids_remaining: self.world.actors_tagged(ASTEROID).count(),
            lasers_in_flight: self.world.actors_tagged(LASER).count(),
            ship_hits: self.score.ship_hits(),
            ship_state: self.world.state(self.ship),
        }
    }
}

/// Key change in a scripted session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptInput {
    /// Key goes down
    Press(KeyCode),
    /// Key comes up
    Release(KeyCode),
}

/// Key change at a point in world time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptEvent {
    /// World time in seconds
    pub at: f32,
    /// What happens
    pub input: ScriptInput,
}

/// Input played back against the world clock
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    events: Vec<ScriptEvent>,
}

impl Script {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key press at `at` seconds
    pub fn press(mut self, at: f32, key: KeyCode) -> Self {
        self.push(at, ScriptInput::Press(key));
        self
    }

    /// Add a key release at `at` seconds
    pub fn release(mut self, at: f32, key: KeyCode) -> Self {
        self.push(at, ScriptInput::Release(key));
        self
    }

    /// Press at `at` and release `held` seconds later
    pub fn tap(self, at: f32, held: f32, key: KeyCode) -> Self {
        self.press(at, key).release(at + held, key)
    }

    /// Events in playback order
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    fn push(&mut self, at: f32, input: ScriptInput) {
        let index = self.events.partition_point(|event| event.at <= at);
        self.events.insert(index, ScriptEvent { at, input });
    }

    /// Thrust, turn and fire a volley, then drift
    pub fn demo() -> Self {
        let mut script = Self::new()
            .press(0.0, KeyCode::W)
            .tap(0.5, 0.4, KeyCode::A)
            .release(1.5, KeyCode::W)
            .tap(2.0, 0.75, KeyCode::D)
            .press(3.0, KeyCode::W)
            .release(4.0, KeyCode::W);
        for shot in 0..12_u8 {
            script = script.tap(0.25 + f32::from(shot) * 0.4, 0.1, KeyCode::Space);
        }
        script
    }
}

/// What happened during a session
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Frames ticked
    pub frames: u64,
    /// World time elapsed
    pub elapsed_seconds: f32,
    /// Lasers fired
    pub shots_fired: u32,
    /// Asteroids shot down
    pub asteroids_destroyed: u32,
    /// Asteroids still in play
    pub asteroids_remaining: usize,
    /// Lasers still flying
    pub lasers_in_flight: usize,
    /// Times the ship was hit
    pub ship_hits: u32,
    /// Ship state at the end
    pub ship_state: Option<ActorState>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames / {:.2}s: {} shots, {} asteroids destroyed, {} remaining, {} lasers in flight, ship hit {} time(s), ship {:?}",
            self.frames,
            self.elapsed_seconds,
            self.shots_fired,
            self.asteroids_destroyed,
            self.asteroids_remaining,
            self.lasers_in_flight,
            self.ship_hits,
            self.ship_state
        )
    }
}
