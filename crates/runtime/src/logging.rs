//! Tracing subscriber setup.

use skilltree_content::SessionConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Options for [`init_tracing`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
    pub ansi: bool,
    pub with_target: bool,
}

impl LogConfig {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ansi: true,
            with_target: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

impl From<&SessionConfig> for LogConfig {
    fn from(config: &SessionConfig) -> Self {
        Self::new(config.log_filter.clone())
    }
}

/// Install the global subscriber: an env filter plus a formatting layer.
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter`]. Fails when the
/// filter does not parse or a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let fmt_layer = fmt::layer()
        .with_ansi(config.ansi)
        .with_target(config.with_target);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!("logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_config_follows_session_filter() {
        let mut session = SessionConfig::new("skills.ron", "resources.ron");
        session.log_filter = "skilltree_core=trace".into();

        let config = LogConfig::from(&session);

        assert_eq!(config.filter, "skilltree_core=trace");
        assert!(config.ansi);
    }

    #[test]
    fn second_install_fails() {
        let config = LogConfig {
            ansi: false,
            ..LogConfig::default()
        };

        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_err());
    }
}
