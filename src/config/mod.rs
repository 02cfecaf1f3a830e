pub mod cli;
pub mod toml_config;

use crate::core::settings::PROCESS_ORDER_DOCTYPE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const INPUT_EXTENSIONS: [&str; 2] = ["csv", "json"];
pub const OUTPUT_FORMATS: [&str; 2] = ["csv", "json"];

static DEFAULT_FIELDS: LazyLock<Vec<String>> = LazyLock::new(|| vec!["name".to_string()]);
static DEFAULT_FORMATS: LazyLock<Vec<String>> =
    LazyLock::new(|| OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect());

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "process-order-listview"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Status indicators and list settings for Process Order rows")
)]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub config: Option<String>,

    /// Rows to annotate (.csv with header, or .json array of objects)
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub input: Option<String>,

    #[cfg_attr(feature = "cli", arg(long))]
    pub output_path: Option<String>,

    /// Extra fields to carry next to `status` in the output [default: name]
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub fields: Option<Vec<String>>,

    /// Output formats [default: csv,json]
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub formats: Option<Vec<String>>,

    /// Translation CSV (`source,translated` per line)
    #[cfg_attr(feature = "cli", arg(long))]
    pub translations: Option<String>,

    /// Document type whose list settings are used [default: Process Order]
    #[cfg_attr(feature = "cli", arg(long))]
    pub doctype: Option<String>,

    /// Resolve and print indicators for these statuses instead of annotating a file
    #[cfg_attr(feature = "cli", arg(long, value_delimiter = ','))]
    pub status: Vec<String>,

    /// Print the list view registration as JSON
    #[cfg_attr(feature = "cli", arg(long))]
    pub show_settings: bool,

    #[cfg_attr(feature = "cli", arg(short, long, help = "Enable verbose output"))]
    pub verbose: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit logs as JSON"))]
    pub json_logs: bool,
}

impl CliConfig {
    /// 只查狀態或只印設定時不需要輸入檔
    pub fn needs_pipeline(&self) -> bool {
        self.status.is_empty() && !self.show_settings
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config: None,
            input: None,
            output_path: None,
            fields: None,
            formats: None,
            translations: None,
            doctype: None,
            status: Vec::new(),
            show_settings: false,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn doctype(&self) -> &str {
        self.doctype.as_deref().unwrap_or(PROCESS_ORDER_DOCTYPE)
    }

    fn input_path(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn extra_fields(&self) -> &[String] {
        self.fields.as_deref().unwrap_or(DEFAULT_FIELDS.as_slice())
    }

    fn output_formats(&self) -> &[String] {
        self.formats.as_deref().unwrap_or(DEFAULT_FORMATS.as_slice())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("doctype", self.doctype())?;

        if self.needs_pipeline() {
            let input = validation::validate_required_field("input", &self.input)?;
            validation::validate_input_file("input", input, &INPUT_EXTENSIONS)?;
            validation::validate_path("output_path", self.output_path())?;
            validation::validate_formats("formats", self.output_formats(), &OUTPUT_FORMATS)?;
        }

        if let Some(catalog) = &self.translations {
            validation::validate_path("translations", catalog)?;
        }

        Ok(())
    }
}
