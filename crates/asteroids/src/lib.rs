//! # Asteroids
//!
//! A headless Asteroids game built on the actor engine.
//!
//! - [`ship`]: the player ship, driven by the `MoveForward`, `Turn` and `Shoot` bindings
//! - [`asteroid`]: drifting rocks that wrap around the playfield
//! - [`laser`]: short-lived bolts that destroy the asteroids they touch
//! - [`game`]: world setup and scripted sessions
//!
//! ```rust
//! use asteroids::{config::GameConfig, game::{Game, Script}};
//!
//! let config = GameConfig::default();
//! let mut game = Game::new(&config).unwrap();
//! let summary = game.run_script(&Script::demo(), 60.0, 1.0);
//! assert!(summary.frames >= 60);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod asteroid;
pub mod assets;
pub mod config;
pub mod game;
pub mod laser;
pub mod score;
pub mod ship;
