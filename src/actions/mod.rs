//! Actions module - Planned changes and execution

pub mod executor;
pub mod git;
mod labels;
mod license;
pub mod pages;
pub mod placeholders;
pub mod plan;
pub mod planner;
mod ruleset;

pub use license::LicenseKind;
