//! Questgate engine library.
//!
//! Serves the effective status of every catalog quest for every tracked
//! player profile, explaining each lock by the quest actually holding it.
//!
//! ## Structure
//!
//! - `use_cases/` - Graph cache, blocker search and status resolution
//! - `infrastructure/` - Ports, settings and the file-backed source
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
