use anyhow::Context;
use clap::Parser;
use process_order_listview::core::ConfigProvider;
use process_order_listview::utils::error::{ErrorSeverity, ListViewError};
use process_order_listview::utils::logger::{self, LogFormat};
use process_order_listview::utils::validation::Validate;
use process_order_listview::{
    process_order_settings, AnnotationPipeline, AnyTranslator, CliConfig, ListViewEngine,
    ListViewRegistry, LocalStorage, TomlConfig, PROCESS_ORDER_DOCTYPE,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // TOML 設定會影響日誌格式，所以先載入
    let toml = match &cli.config {
        Some(path) => {
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_overrides(&cli);
            if let Err(e) = config.validate_settings() {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
            Some(config)
        }
        None => None,
    };

    // 初始化日誌
    let (level, json) = match &toml {
        Some(config) => (config.log_level(), config.json_logs() || cli.json_logs),
        None => ("info", cli.json_logs),
    };
    let format = if json { LogFormat::Json } else { LogFormat::Compact };
    logger::init_logger(format, level, cli.verbose);

    tracing::info!("Starting process-order-listview");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let catalog = match &toml {
        Some(config) => config.translation_catalog(),
        None => cli.translations.as_deref(),
    };
    let translator = AnyTranslator::load(catalog)
        .with_context(|| format!("loading translation catalog {:?}", catalog))?;

    let mut registry = ListViewRegistry::new();
    registry.register(PROCESS_ORDER_DOCTYPE, process_order_settings(translator))?;

    if !cli.needs_pipeline() {
        let doctype = match &toml {
            Some(config) => config.doctype(),
            None => cli.doctype(),
        };
        let settings = registry
            .get(doctype)
            .with_context(|| format!("no list view settings for '{}'", doctype))?;

        if cli.show_settings {
            println!("{}", serde_json::to_string_pretty(&settings.to_host_json())?);
        }
        for status in &cli.status {
            let indicator = settings.resolver.resolve(status);
            println!(
                "{}",
                serde_json::json!({ "status": status, "indicator": indicator.to_host_array() })
            );
        }
        return Ok(());
    }

    let outcome = match toml {
        Some(config) => run(config, registry).await,
        None => run(cli, registry).await,
    };

    match outcome {
        Ok(output_path) => {
            tracing::info!("✅ Annotation completed successfully!");
            println!("✅ Annotated rows written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Annotation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C>(config: C, registry: ListViewRegistry<AnyTranslator>) -> Result<String, ListViewError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::info!("📁 Input: {}", config.input_path());
    tracing::info!("📁 Output: {}", config.output_path());

    let pipeline = AnnotationPipeline::new(LocalStorage::default(), config, registry);
    ListViewEngine::new(pipeline).run().await
}
