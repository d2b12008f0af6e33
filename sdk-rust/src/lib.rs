mod client_utils;
mod errors;
pub mod google;
mod language_model;
mod opentelemetry;
mod types;
mod types_ext;

pub mod brief_sdk_test;

pub use errors::*;
pub use language_model::LanguageModel;
pub use types::*;
