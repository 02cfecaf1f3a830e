use crate::config::{CliConfig, DEFAULT_OUTPUT_PATH, INPUT_EXTENSIONS, OUTPUT_FORMATS};
use crate::core::settings::PROCESS_ORDER_DOCTYPE;
use crate::core::ConfigProvider;
use crate::utils::error::{ListViewError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub list_view: ListViewConfig,
    /// 只有標註檔案時才需要；查狀態或印設定可以省略
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub translation: Option<TranslationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListViewConfig {
    #[serde(default = "default_doctype")]
    pub doctype: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

fn default_doctype() -> String {
    PROCESS_ORDER_DOCTYPE.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self {
            doctype: default_doctype(),
            fields: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            formats: default_formats(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ListViewError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ListViewError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ORDERS_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ListViewError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案設定
    pub fn apply_overrides(&mut self, cli: &CliConfig) {
        if let Some(input) = &cli.input {
            tracing::info!("🔧 Input overridden to: {}", input);
            self.input.path = input.clone();
        }
        if let Some(output) = &cli.output_path {
            tracing::info!("🔧 Output path overridden to: {}", output);
            self.output.path = output.clone();
        }
        if let Some(catalog) = &cli.translations {
            self.translation = Some(TranslationConfig {
                catalog: Some(catalog.clone()),
            });
        }
        if let Some(doctype) = &cli.doctype {
            tracing::info!("🔧 Doctype overridden to: {}", doctype);
            self.list_view.doctype = doctype.clone();
        }
        if let Some(fields) = &cli.fields {
            tracing::info!("🔧 Fields overridden to: {}", fields.join(", "));
            self.list_view.fields = fields.clone();
        }
        if let Some(formats) = &cli.formats {
            tracing::info!("🔧 Output formats overridden to: {}", formats.join(", "));
            self.output.formats = formats.clone();
        }
    }

    pub fn translation_catalog(&self) -> Option<&str> {
        self.translation.as_ref().and_then(|t| t.catalog.as_deref())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 不讀寫列資料也需要成立的設定：doctype、翻譯檔、日誌等級
    pub fn validate_settings(&self) -> Result<()> {
        validation::validate_non_empty_string("list_view.doctype", &self.list_view.doctype)?;

        if let Some(catalog) = self.translation_catalog() {
            validation::validate_path("translation.catalog", catalog)?;
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level()) {
            return Err(ListViewError::InvalidConfigValueError {
                field: "logging.level".to_string(),
                value: self.log_level().to_string(),
                reason: format!("Valid levels: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }

    /// 驗證配置的合理性（含輸入輸出，標註檔案前呼叫）
    pub fn validate_config(&self) -> Result<()> {
        self.validate_settings()?;

        if self.input.path.is_empty() {
            return Err(ListViewError::MissingConfigError {
                field: "input.path".to_string(),
            });
        }
        validation::validate_input_file("input.path", &self.input.path, &INPUT_EXTENSIONS)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_formats("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn doctype(&self) -> &str {
        &self.list_view.doctype
    }

    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn extra_fields(&self) -> &[String] {
        &self.list_view.fields
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[list_view]
fields = ["name", "process_name"]

[input]
path = "orders.csv"

[output]
path = "./annotated"
formats = ["json"]

[translation]
catalog = "translations/de.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.doctype(), "Process Order");
        assert_eq!(config.input_path(), "orders.csv");
        assert_eq!(config.output_path(), "./annotated");
        assert_eq!(config.output_formats(), ["json".to_string()]);
        assert_eq!(config.translation_catalog(), Some("translations/de.csv"));
        assert_eq!(config.log_level(), "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_defaults() {
        let config = TomlConfig::from_toml_str("[input]\npath = \"orders.json\"\n").unwrap();

        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.output_formats(), ["csv".to_string(), "json".to_string()]);
        assert!(config.extra_fields().is_empty());
        assert!(!config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LISTVIEW_TEST_ORDERS", "/data/orders.csv");

        let toml_content = r#"
[input]
path = "${LISTVIEW_TEST_ORDERS}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "/data/orders.csv");

        std::env::remove_var("LISTVIEW_TEST_ORDERS");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[input]
path = "orders.xml"

[logging]
level = "info"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[input]
path = "orders.csv"

[logging]
level = "loud"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ListViewError::InvalidConfigValueError { ref field, .. }) if field == "logging.level"
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[input\npath = 1");
        assert!(matches!(result, Err(ListViewError::ConfigError { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = TomlConfig::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();
        let cli = CliConfig {
            input: Some("b.json".to_string()),
            output_path: Some("/tmp/out".to_string()),
            translations: Some("fr.csv".to_string()),
            ..CliConfig::default()
        };

        config.apply_overrides(&cli);
        assert_eq!(config.input_path(), "b.json");
        assert_eq!(config.output_path(), "/tmp/out");
        assert_eq!(config.translation_catalog(), Some("fr.csv"));
        // 沒給的旗標不動檔案設定
        assert_eq!(config.doctype(), "Process Order");
        assert_eq!(config.output_formats(), ["csv".to_string(), "json".to_string()]);
        assert!(config.extra_fields().is_empty());
    }

    #[test]
    fn test_cli_overrides_fields_formats_and_doctype() {
        let mut config = TomlConfig::from_toml_str(
            r#"
[list_view]
fields = ["name"]

[input]
path = "a.csv"

[output]
formats = ["csv"]
"#,
        )
        .unwrap();
        let cli = CliConfig {
            config: Some("x.toml".to_string()),
            fields: Some(vec!["name".to_string(), "process_name".to_string()]),
            formats: Some(vec!["json".to_string()]),
            doctype: Some("Work Order".to_string()),
            ..CliConfig::default()
        };

        config.apply_overrides(&cli);
        assert_eq!(config.output_formats(), ["json".to_string()]);
        assert_eq!(
            config.extra_fields(),
            ["name".to_string(), "process_name".to_string()]
        );
        assert_eq!(config.doctype(), "Work Order");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parsed_flags_override_file() {
        use clap::Parser;

        let mut config = TomlConfig::from_toml_str("[input]\npath = \"a.csv\"\n").unwrap();
        let cli = CliConfig::parse_from([
            "process-order-listview",
            "--config",
            "x.toml",
            "--formats",
            "json",
            "--fields",
            "name,process_name",
            "--doctype",
            "Work Order",
        ]);

        config.apply_overrides(&cli);
        assert_eq!(config.output_formats(), ["json".to_string()]);
        assert_eq!(
            config.extra_fields(),
            ["name".to_string(), "process_name".to_string()]
        );
        assert_eq!(config.doctype(), "Work Order");
    }

    #[test]
    fn test_input_section_is_optional_until_annotating() {
        let config = TomlConfig::from_toml_str(
            r#"
[logging]
level = "warn"
"#,
        )
        .unwrap();

        assert_eq!(config.input_path(), "");
        assert!(config.validate_settings().is_ok());
        assert!(matches!(
            config.validate(),
            Err(ListViewError::MissingConfigError { ref field }) if field == "input.path"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[list_view]
doctype = "Process Order"

[input]
path = "orders.csv"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.list_view.doctype, "Process Order");
    }
}
