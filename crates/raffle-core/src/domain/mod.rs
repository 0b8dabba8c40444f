//! # Domain Module
//!
//! Core domain types for the raffle: configuration, round state, entries,
//! phases, events and invariants. No I/O.

pub mod config;
pub mod entities;
pub mod errors;
pub mod events;
pub mod invariants;
pub mod secure_salt;
pub mod value_objects;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use events::RaffleEvent;
pub use invariants::*;
pub use secure_salt::SecureSalt;
pub use value_objects::*;
