//! Dungeon Master - turn-based dungeon RPG engine.
//!
//! Game rules (combat, progression, regeneration, rewards, achievements)
//! are pure functions over [`character::Character`]. [`actions::GameService`]
//! runs player actions against a [`ledger::Ledger`], and the `payments` and
//! `ads` modules talk to the outside world.

pub mod achievements;
pub mod actions;
pub mod ads;
pub mod build_info;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod items;
pub mod ledger;
pub mod payments;
pub mod promo;
pub mod rewards;
pub mod simulator;

pub use actions::GameService;
pub use error::{ErrorKind, GameError, Result};
