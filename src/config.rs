use std::time::Duration;

// ─── Configuration ───────────────────────────────────────────────

/// Minimum wait before a submitted secret's digest becomes visible
pub const DEFAULT_HASH_DELAY: Duration = Duration::from_secs(5);

/// Environment override for the hash delay, in whole seconds
pub const HASH_DELAY_ENV: &str = "HASH_DELAY_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub hash_delay: Duration,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port value \"{0}\"")]
    InvalidPort(String),
    #[error("no port provided, expected `<port>` or `-p <port>`")]
    MissingPort,
}

impl ConfigError {
    /// Process exit status for this startup failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPort(_) => 1,
            Self::MissingPort => 2,
        }
    }
}

impl Config {
    /// Resolve the process arguments (program name excluded) and
    /// apply environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::from_args(std::env::args().skip(1))?;
        if let Some(delay) = parse_delay(std::env::var(HASH_DELAY_ENV).ok()) {
            config.hash_delay = delay;
        }
        Ok(config)
    }

    /// A lone argument is the port. Otherwise the first `-p`/`-port`
    /// followed by a value wins and everything else is ignored.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();

        let port = match args.as_slice() {
            [] => return Err(ConfigError::MissingPort),
            [only] => parse_port(only.as_ref())?,
            many => {
                let value = many
                    .windows(2)
                    .find(|pair| matches!(pair[0].as_ref(), "-p" | "-port"))
                    .map(|pair| pair[1].as_ref())
                    .ok_or(ConfigError::MissingPort)?;
                parse_port(value)?
            }
        };

        Ok(Self {
            port,
            hash_delay: DEFAULT_HASH_DELAY,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_owned()))
}

fn parse_delay(raw: Option<String>) -> Option<Duration> {
    let raw = raw?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            tracing::warn!(value = %raw, "ignoring unparseable {}", HASH_DELAY_ENV);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_argument_is_the_port() {
        let config = Config::from_args(["8080"]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.hash_delay, DEFAULT_HASH_DELAY);
    }

    #[test]
    fn single_non_numeric_argument_exits_with_one() {
        let err = Config::from_args(["http"]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".into()));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn no_arguments_exits_with_two() {
        let err = Config::from_args(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingPort);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn port_flags_are_found_among_other_arguments() {
        assert_eq!(Config::from_args(["-v", "-p", "9000"]).unwrap().port, 9000);
        assert_eq!(Config::from_args(["-port", "9001", "x"]).unwrap().port, 9001);
    }

    #[test]
    fn first_port_flag_wins() {
        let config = Config::from_args(["-p", "7000", "-port", "7001"]).unwrap();
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn flag_with_bad_value_exits_with_one() {
        let err = Config::from_args(["-p", "abc"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn trailing_flag_without_value_is_missing_port() {
        let err = Config::from_args(["--verbose", "-p"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingPort);
    }

    #[test]
    fn out_of_range_port_is_invalid() {
        let err = Config::from_args(["70000"]).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn delay_override_parses_seconds() {
        assert_eq!(parse_delay(Some("2".into())), Some(Duration::from_secs(2)));
        assert_eq!(parse_delay(Some("soon".into())), None);
        assert_eq!(parse_delay(None), None);
    }
}
