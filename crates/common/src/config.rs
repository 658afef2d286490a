use anyhow::Context;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn from_env() -> Self {
        match env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read an optional, non-empty variable.
pub fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `key` from the environment, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error rather than a silent
/// fallback.
pub fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_opt(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // SAFETY for the env mutations below: tests are serialized with #[serial].

    #[test]
    #[serial]
    fn test_environment_defaults_to_development() {
        unsafe { env::remove_var("ENVIRONMENT") };
        assert!(matches!(Environment::from_env(), Environment::Development));
    }

    #[test]
    #[serial]
    fn test_environment_accepts_prod_alias() {
        unsafe { env::set_var("ENVIRONMENT", "PROD") };
        assert!(matches!(Environment::from_env(), Environment::Production));
        unsafe { env::remove_var("ENVIRONMENT") };
    }

    #[test]
    #[serial]
    fn test_env_parse_uses_default_when_unset() {
        unsafe { env::remove_var("COMMON_TEST_NUMBER") };
        let value: u32 = env_parse("COMMON_TEST_NUMBER", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    #[serial]
    fn test_env_parse_reads_value() {
        unsafe { env::set_var("COMMON_TEST_NUMBER", " 42 ") };
        let value: u32 = env_parse("COMMON_TEST_NUMBER", 7).unwrap();
        assert_eq!(value, 42);
        unsafe { env::remove_var("COMMON_TEST_NUMBER") };
    }

    #[test]
    #[serial]
    fn test_env_parse_rejects_garbage() {
        unsafe { env::set_var("COMMON_TEST_NUMBER", "many") };
        let err = env_parse::<u32>("COMMON_TEST_NUMBER", 7).unwrap_err();
        assert!(
            err.to_string().contains("COMMON_TEST_NUMBER"),
            "Error should name the variable: {}",
            err
        );
        unsafe { env::remove_var("COMMON_TEST_NUMBER") };
    }

    #[test]
    #[serial]
    fn test_env_opt_ignores_blank_values() {
        unsafe { env::set_var("COMMON_TEST_OPT", "   ") };
        assert!(env_opt("COMMON_TEST_OPT").is_none());
        unsafe { env::remove_var("COMMON_TEST_OPT") };
    }
}
