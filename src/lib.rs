//! Snake built on an entity/message architecture.
//!
//! Entities (food, walls, snakes) never call each other. Once per frame the
//! [`world::World`] detects collisions, hands every entity the same batch of
//! messages, and then resolves the global ones (removals, food spawns, game
//! over). The terminal front end lives in [`term`] and [`game`].

pub mod config;
pub mod entity;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod message;
pub mod snake;
pub mod term;
pub mod wall;
pub mod world;

pub type TermInt = u16;
pub type Coords = (i32, i32);
