//! Monte Carlo retirement projection.
//!
//! Simulates a household's asset pool year by year from today to a
//! horizon age, across many independent trials with lognormal market
//! returns and inflation, and aggregates the trials into per-age
//! percentile bands plus an overall success rate.

pub mod analysis;
pub mod config;
pub mod sampling;
pub mod simulation;
pub mod tax;
pub mod trial;
pub mod types;
