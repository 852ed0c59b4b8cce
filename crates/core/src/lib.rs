//! Round logic for the find-the-match game. Keep this crate free of IO and platform concerns.

pub mod config;
pub mod controller;
pub mod events;
pub mod host;
pub mod item;
pub mod rng;
pub mod slot;
pub mod state;
pub mod timer;

pub use config::*;
pub use controller::*;
pub use events::*;
pub use host::*;
pub use item::*;
pub use rng::*;
pub use slot::*;
pub use state::*;
pub use timer::*;
