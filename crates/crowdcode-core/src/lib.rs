//! Foundational utilities shared across CrowdCode crates.
//!
//! Provides the unix-millis clock, RFC 3339 timestamp parsing, issue-age
//! arithmetic, and the title-slugging rules used for workspace naming.

pub mod slug;
pub mod time_utils;

pub use slug::slugify_title;
pub use time_utils::{age_hours, current_unix_timestamp_ms, parse_rfc3339_to_unix_ms};
