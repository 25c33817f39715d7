//! Prerequisite graph and level state machine.
//!
//! [`validation`] checks authored definitions once; [`service`] owns the
//! resulting nodes and runs upgrade and reset transactions over them.

mod service;
mod validation;


pub use service::{SkillGraphService, UpgradeAvailability, UpgradeOutcome};
