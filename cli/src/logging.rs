use crate::config::{self, get_config_element};
use crate::error::{self, Result};
use snafu::ResultExt;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, layer::Filter, prelude::*, registry::LookupSpan};

/// Installs the console log layer configured in the `logging` section.
///
/// # Panics
/// - if a global subscriber is already set
///
pub fn init_logging() -> Result<()> {
    let logging_config: config::Logging = get_config_element()?;

    let console_filter = EnvFilter::try_new(&logging_config.log_spec).context(error::LogSpec {
        log_spec: logging_config.log_spec.clone(),
    })?;

    tracing_subscriber::Registry::default()
        .with(console_layer_with_filter(console_filter))
        .init();

    Ok(())
}

fn console_layer_with_filter<S, F: Filter<S> + 'static>(filter: F) -> impl Layer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter)
}
