pub mod engine;
pub mod pipeline;
pub mod resolver;
pub mod settings;
pub mod translation;

pub use crate::domain::model::{AnnotatedRecord, AnnotationResult, Indicator, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, Translator};
pub use crate::utils::error::Result;
