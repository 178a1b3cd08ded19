//! Zephyr: tool surface for a voice assistant.
//!
//! The agent runtime hears a request, picks a tool and calls it through the
//! host bridge. The interesting part is contact lookup: spoken names arrive
//! mis-transcribed ("baseel", "Sebastien") and must still land on the right
//! entry of a small household directory.
//!
//! # Architecture
//!
//! - **Matching**: composite 0..=100 similarity from the `zephyr-match` crate
//! - **Contacts**: [`contacts::ContactDirectory`] and
//!   [`contacts::NicknameResolver`] (first match at or above the threshold,
//!   in directory order)
//! - **Tools**: [`tools::ToolRegistry`] with mode gating; contact, mail,
//!   calendar, task, train and date/time tools
//! - **Host**: newline-delimited JSON over stdin/stdout ([`host`])

pub mod assistant;
pub mod config;
pub mod contacts;
pub mod error;
pub mod host;
pub mod tools;

pub use assistant::Assistant;
pub use config::ZephyrConfig;
pub use contacts::{Contact, ContactDirectory, NicknameResolver, Resolution};
pub use error::{Result, ZephyrError};
