//! # Integration Tests
//!
//! Multi-step scenarios against a fully wired raffle.

pub mod settlement_safety;
