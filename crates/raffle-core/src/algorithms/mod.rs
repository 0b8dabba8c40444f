//! # Algorithms Module
//!
//! Core raffle algorithms: commitments, entry admission, reveals, winner
//! selection and settlement.

pub mod commitment;
pub mod registry;
pub mod reveal;
pub mod settlement;
pub mod winner;

pub use commitment::{compute_commitment, generate_salt, prepare_ticket, verify_commitment};
pub use registry::record_entry;
pub use reveal::process_reveal;
pub use settlement::{apply_settlement, plan_settlement, SettlementPlan};
pub use winner::{combine_entropy, select_winner, winner_rank, WinnerSelection};
