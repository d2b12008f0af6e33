mod client;
pub mod command;
pub mod config;
mod decode;
mod errors;
pub mod export;
mod prompt;
pub mod schema;
mod types;
pub mod view;

pub use client::BriefCleaner;
pub use config::Settings;
pub use decode::decode_brief;
pub use errors::{BriefError, BriefResult};
pub use prompt::{
    build_prompt, is_submittable, BriefRequest, RawBrief, MIN_BRIEF_CHARS, TOO_SHORT_MESSAGE,
};
pub use types::*;
pub use view::{BriefSession, ProcessingStatus, ViewState};
