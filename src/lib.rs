pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use self::core::{
    engine::ListViewEngine,
    pipeline::AnnotationPipeline,
    resolver::{StatusIndicatorResolver, StyleTable},
    settings::{process_order_settings, ListViewRegistry, ListViewSettings, PROCESS_ORDER_DOCTYPE},
    translation::{AnyTranslator, CatalogTranslator, IdentityTranslator},
};
pub use domain::model::{FilterExpression, FilterOperator, Indicator, IndicatorColor, OrderStatus, Record};
pub use domain::ports::Translator;
pub use utils::error::{ListViewError, Result};
