use std::{
    env, fmt,
    net::{AddrParseError, SocketAddr},
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_COUNT: usize = 15;
const DEFAULT_INITIAL_CAPITAL: f64 = 2_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub session_count: usize,
    pub initial_capital: f64,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidListenAddr(AddrParseError),
    InvalidSessionCount,
    InvalidInitialCapital,
    NonUnicodeListenAddr,
    NonUnicodeSessionCount,
    NonUnicodeInitialCapital,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenAddr(err) => {
                write!(f, "PROJ_SERVER_ADDR is not a valid socket address: {err}")
            }
            Self::InvalidSessionCount => {
                write!(f, "PROJ_SERVER_SESSION_COUNT must be a non-negative integer")
            }
            Self::InvalidInitialCapital => {
                write!(f, "PROJ_SERVER_INITIAL_CAPITAL must be a finite amount above zero")
            }
            Self::NonUnicodeListenAddr => {
                write!(f, "PROJ_SERVER_ADDR contains non-unicode data")
            }
            Self::NonUnicodeSessionCount => {
                write!(f, "PROJ_SERVER_SESSION_COUNT contains non-unicode data")
            }
            Self::NonUnicodeInitialCapital => {
                write!(f, "PROJ_SERVER_INITIAL_CAPITAL contains non-unicode data")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidListenAddr(err) => Some(err),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match env::var("PROJ_SERVER_ADDR") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotPresent) => DEFAULT_LISTEN_ADDR
                .parse()
                .expect("default listen address must be valid"),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeListenAddr);
            }
        };

        let session_count = match env::var("PROJ_SERVER_SESSION_COUNT") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidSessionCount)?,
            Err(env::VarError::NotPresent) => DEFAULT_SESSION_COUNT,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeSessionCount);
            }
        };

        let initial_capital = match env::var("PROJ_SERVER_INITIAL_CAPITAL") {
            Ok(value) => {
                let parsed = value
                    .parse::<f64>()
                    .map_err(|_| ConfigError::InvalidInitialCapital)?;
                if !parsed.is_finite() || parsed <= 0.0 {
                    return Err(ConfigError::InvalidInitialCapital);
                }
                parsed
            }
            Err(env::VarError::NotPresent) => DEFAULT_INITIAL_CAPITAL,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeInitialCapital);
            }
        };

        Ok(Self {
            listen_addr,
            session_count,
            initial_capital,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env, sync::Mutex};

    use super::{Config, ConfigError};

    static ENV_LOCK: Mutex<()> = Mutex::new(());
    const ENV_ADDR_KEY: &str = "PROJ_SERVER_ADDR";
    const ENV_COUNT_KEY: &str = "PROJ_SERVER_SESSION_COUNT";
    const ENV_CAPITAL_KEY: &str = "PROJ_SERVER_INITIAL_CAPITAL";

    struct EnvVarGuard {
        key: &'static str,
        previous: Option<std::ffi::OsString>,
    }

    impl EnvVarGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }

        fn unset(key: &'static str) -> Self {
            let previous = env::var_os(key);
            env::remove_var(key);
            Self { key, previous }
        }

        #[cfg(unix)]
        fn set_os(key: &'static str, value: std::ffi::OsString) -> Self {
            let previous = env::var_os(key);
            env::set_var(key, value);
            Self { key, previous }
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => env::set_var(self.key, value),
                None => env::remove_var(self.key),
            }
        }
    }

    fn reset_config_env_baseline() -> [EnvVarGuard; 3] {
        [
            EnvVarGuard::unset(ENV_ADDR_KEY),
            EnvVarGuard::unset(ENV_COUNT_KEY),
            EnvVarGuard::unset(ENV_CAPITAL_KEY),
        ]
    }

    #[test]
    fn defaults_apply_when_env_is_unset() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.session_count, 15);
        assert_eq!(config.initial_capital, 2_000.0);
    }

    #[test]
    fn uses_listen_address_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR_KEY, "127.0.0.1:9090");

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:9090".parse().unwrap());
    }

    #[test]
    fn returns_error_for_invalid_listen_address_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_ADDR_KEY, "not-an-addr");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidListenAddr(_)));
    }

    #[test]
    fn uses_session_count_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_COUNT_KEY, "40");

        let config = Config::from_env().unwrap();

        assert_eq!(config.session_count, 40);
    }

    #[test]
    fn returns_error_for_negative_session_count_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_COUNT_KEY, "-3");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidSessionCount));
    }

    #[test]
    fn uses_initial_capital_override_from_env() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_CAPITAL_KEY, "5000");

        let config = Config::from_env().unwrap();

        assert_eq!(config.initial_capital, 5_000.0);
    }

    #[test]
    fn returns_error_for_non_positive_initial_capital_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_CAPITAL_KEY, "0");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidInitialCapital));
    }

    #[test]
    fn returns_error_for_non_numeric_initial_capital_override() {
        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set(ENV_CAPITAL_KEY, "lots");

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidInitialCapital));
    }

    #[cfg(unix)]
    #[test]
    fn returns_error_for_non_unicode_listen_address_env_var() {
        use std::os::unix::ffi::OsStringExt;

        let _lock = ENV_LOCK.lock().unwrap();
        let _baseline = reset_config_env_baseline();
        let _guard = EnvVarGuard::set_os(
            ENV_ADDR_KEY,
            std::ffi::OsString::from_vec(vec![0x66, 0x6f, 0x80]),
        );

        let err = Config::from_env().unwrap_err();

        assert!(matches!(err, ConfigError::NonUnicodeListenAddr));
    }
}
