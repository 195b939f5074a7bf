pub mod config;
pub mod generator;
pub mod hits;
pub mod models;
pub mod penalty;
pub mod pool;
pub mod presenter;
pub mod profile;
pub mod rng;
pub mod rules;
pub mod seed;
pub mod selector;

pub use config::{ExposurePolicy, GenerationConfig, HardRules};
pub use generator::generate;
pub use models::{Batch, Game, Ticket, TICKET_SIZE, UNIVERSE_MAX};
pub use profile::{Profile, ProfileOverrides, ProfileSettings};
