//! Questgate domain - quest catalog, profiles and the prerequisite graph.
//!
//! Pure types with no I/O. The engine crate owns loading and caching.

extern crate self as questgate_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Profile, Quest, QuestCondition, QuestConditions};
pub use error::DomainError;
pub use ids::{ProfileId, QuestId};
pub use value_objects::{
    display_name, BlockerInfo, PrerequisiteEdge, PrerequisiteGraph, QuestStatus,
};
