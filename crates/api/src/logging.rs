use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,reqwest=warn";

fn env_filter(default_directives: &str) -> EnvFilter {
    // RUST_LOG wins when set
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Initialize logging with structured JSON output
pub fn init_logging() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized");
}

/// Initialize logging with pretty output for development
pub fn init_logging_pretty() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(fmt_layer)
        .init();

    tracing::info!("Logging initialized (pretty mode)");
}

/// Pick the output format from `LOG_FORMAT` (`json` or `pretty`, default pretty)
pub fn init_from_env() {
    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => init_logging(),
        _ => init_logging_pretty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        let filter = EnvFilter::new(DEFAULT_DIRECTIVES);
        assert!(filter.to_string().contains("info"));
    }

    #[test]
    fn test_logging_init() {
        // Only checks that initialization doesn't panic
        init_logging_pretty();
    }
}
