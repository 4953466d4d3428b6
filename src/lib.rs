//! Student roster analytics for a career-services dashboard.
//!
//! Rows from the roster CSV are normalized into [`StudentRecord`]s, which
//! then feed skill counts, job and certification matching, chart
//! distributions, and list filtering. Everything past loading is a pure
//! in-memory transformation.

pub mod aggregate;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod loader;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod report;
pub mod session;
pub mod skills;

pub use error::{Error, Result};
pub use models::StudentRecord;
pub use skills::{Skill, SkillMap};
