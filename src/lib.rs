//! Download the LeetCode problem catalog and press every problem statement
//! into a single HTML document.
//!
//! A run that dies halfway leaves a break log behind; the next run consumes
//! it and picks up where the previous one stopped instead of starting over.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub mod checkpoint;
pub mod client;
pub mod document;
pub mod press;

pub use client::{FetchError, LeetCodeClient, ProblemSource};
pub use press::{LeetPress, LeetPressBuilder, PressError};

/// One catalog entry: enough to decide whether to process a problem and to
/// look up its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSummary {
    /// Numeric problem id, unique and positive.
    pub id: u32,
    /// Slug used to query the problem detail.
    pub title_slug: String,
    /// Paid-only problems are skipped unless explicitly requested.
    pub paid_only: bool,
}

/// Full problem detail as returned by the query endpoint. Transient: rendered
/// into the output document and dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    /// Problem statement as an HTML string, appended verbatim.
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}
