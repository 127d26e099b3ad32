//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod quest_status;

pub use quest_status::QuestStatusUseCases;
