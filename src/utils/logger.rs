use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "process_order_listview";

/// 日誌輸出格式：終端機用 compact，機器解析用 JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Default filter when `RUST_LOG` is unset. `--verbose` forces this crate to
/// `debug` and lets other crates through at `info`.
pub fn filter_directive(level: &str, verbose: bool) -> String {
    if verbose {
        format!("{}=debug,info", CRATE_TARGET)
    } else {
        format!("{}={}", CRATE_TARGET, level)
    }
}

pub fn init_logger(format: LogFormat, level: &str, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_uses_configured_level() {
        assert_eq!(filter_directive("warn", false), "process_order_listview=warn");
        assert_eq!(filter_directive("info", false), "process_order_listview=info");
    }

    #[test]
    fn test_verbose_forces_debug() {
        assert_eq!(
            filter_directive("warn", true),
            "process_order_listview=debug,info"
        );
    }
}
