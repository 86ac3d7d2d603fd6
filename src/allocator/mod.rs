//! Team allocation module
//!
//! Turns a participant pool into fixed-size teams:
//! - Checking the team size against the pool
//! - Bucketing participants by personality type
//! - Filling teams phase by phase
//! - Rejecting incomplete formations

mod buckets;
mod engine;
mod validation;

pub use buckets::*;
pub use engine::*;
pub use validation::*;
