//! Contact directory and fuzzy nickname resolution.
//!
//! - [`ContactDirectory`] — ordered, validated, read-only contact list
//! - [`NicknameResolver`] — first-match-above-threshold lookup by nickname
//!   or identifier, scored with [`zephyr_match::weighted_ratio`]

pub mod directory;
pub mod resolver;

pub use directory::{Contact, ContactDirectory, DirectoryError};
pub use resolver::{
    ContactField, DEFAULT_THRESHOLD, NicknameResolver, Resolution, ResolveError,
};
