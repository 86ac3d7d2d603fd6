//! TeamMate - personality-aware team formation
//!
//! Participants carry a personality score that classifies them as a leader,
//! thinker or balanced member. [`TeamAllocator`] splits a pool into teams of
//! a fixed size, seeding scarce leaders and thinkers across teams before
//! filling the rest, and [`analyze`] reports how balanced the result is.
//!
//! ```no_run
//! use std::sync::Arc;
//! use teammate::{analyze, GameRole, IdGenerator, Participant, ParticipantProfile, TeamAllocator};
//!
//! # fn main() -> teammate::Result<()> {
//! let ids = IdGenerator::new();
//! let pool: Vec<Arc<Participant>> = (0..10u8)
//!     .map(|i| {
//!         Participant::register(
//!             ParticipantProfile {
//!                 name: format!("Player {}", i),
//!                 email: format!("player{}@iit.ac.lk", i),
//!                 game_interest: "valorant".to_string(),
//!                 skill_level: 1 + i % 10,
//!                 preferred_role: GameRole::Attacker,
//!                 personality_score: 50 + i * 5,
//!             },
//!             &ids,
//!         )
//!         .map(Arc::new)
//!     })
//!     .collect::<teammate::Result<_>>()?;
//!
//! let teams = TeamAllocator::new(5).allocate_seeded(&pool, 42)?;
//! println!("{}", analyze(&teams));
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod logging;
pub mod roster;
pub mod types;
pub mod version;

pub use allocator::{allocate, AllocationPlan, TeamAllocator};
pub use analysis::{analyze, FormationAnalysis, FormationSummary};
pub use error::{Error, ErrorCode, Result};
pub use ids::{IdGenerator, ParticipantId};
pub use roster::{JsonRoster, MemoryRoster, RecordSource};
pub use types::{
    classify, GameRole, Participant, ParticipantProfile, ParticipantRecord, PersonalityType,
    Team,
};
