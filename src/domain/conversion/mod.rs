pub mod dto;
pub mod error;
pub mod language;
pub mod naming;
pub mod service;

pub use dto::{ListenOutcome, Presence, UploadOutcome};
pub use error::ConversionError;
pub use language::Language;
pub use service::ConversionService;
