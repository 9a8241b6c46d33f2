//! Core domain types and logic.

pub mod catalogue;
pub mod store;
pub mod valuation;
pub mod pool;
pub mod trader;
pub mod transaction;
pub mod platform;
pub mod simulate;
pub mod error;
