//! Service Layer
//!
//! Application service that orchestrates the round and coordinates with
//! the outbound ports.

pub mod raffle_service;

pub use raffle_service::RaffleService;
