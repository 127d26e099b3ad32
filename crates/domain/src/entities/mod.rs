//! Domain entities - Core business objects with identity

mod profile;
mod quest;

pub use profile::Profile;
pub use quest::{Quest, QuestCondition, QuestConditions, QUEST_CONDITION_TYPE};
