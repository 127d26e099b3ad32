//! Questgate Protocol - Wire types for the quest status endpoint
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and the domain vocabulary
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Stable shape** - Field names and the integer status encoding are consumed by game clients

pub mod report;

pub use report::{ProfileQuestStatuses, QuestStatusEntry, QuestStatusReport};
