//! Prompt orchestration for AgriSmart.
//!
//! An [`Advisor`] takes a farmer's [`TaskRequest`], validates its raw fields
//! ([`normalize`]), renders the task's instruction ([`templates`]), and sends
//! exactly one [`llm::Prompt`] through its [`llm::ModelGateway`]: text only,
//! or text plus image when a picture was supplied. The model's reply comes
//! back unchanged.

pub mod dispatch;
pub mod error;
pub mod history;
pub mod normalize;
pub mod persona;
pub mod task;
pub mod templates;

pub use dispatch::{route, Advisor};
pub use error::AdvisorError;
pub use history::{CsvFileSource, HistorySource, StaticSource};
pub use normalize::{normalize, Normalized};
pub use persona::DEFAULT_PERSONA;
pub use task::{Coordinate, TaskKind, TaskRequest};
