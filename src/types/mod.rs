//! Domain types for TeamMate
//!
//! Participants, teams, and the small value types they are built from.

mod game;
mod participant;
mod personality;
mod role;
mod team;

pub use game::*;
pub use participant::*;
pub use personality::*;
pub use role::*;
pub use team::*;
