//! Value objects - Immutable objects defined by their attributes

mod blocker;
pub mod display_name;
mod prerequisite;
mod quest_status;

pub use blocker::BlockerInfo;
pub use prerequisite::{PrerequisiteEdge, PrerequisiteGraph};
pub use quest_status::QuestStatus;
