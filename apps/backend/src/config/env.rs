use std::env;

/// Runtime environment the process was started in.
///
/// Controls the relaxations that only make sense outside production:
/// the readable `dev-auth-token` cookie and non-Secure cookie flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Dev,
    Test,
}

impl RuntimeEnv {
    /// Parse from the `APP_ENV` environment variable.
    /// Unset or unrecognized values fall back to `Dev`; deployments set
    /// `APP_ENV=prod` explicitly.
    pub fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("prod") | Ok("production") => RuntimeEnv::Prod,
            Ok("test") => RuntimeEnv::Test,
            _ => RuntimeEnv::Dev,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, RuntimeEnv::Prod)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::RuntimeEnv;

    #[test]
    #[serial_test::serial]
    fn parses_prod_aliases() {
        env::set_var("APP_ENV", "prod");
        assert_eq!(RuntimeEnv::from_env(), RuntimeEnv::Prod);

        env::set_var("APP_ENV", "production");
        assert_eq!(RuntimeEnv::from_env(), RuntimeEnv::Prod);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial_test::serial]
    fn unknown_values_default_to_dev() {
        env::set_var("APP_ENV", "staging");
        assert_eq!(RuntimeEnv::from_env(), RuntimeEnv::Dev);

        env::remove_var("APP_ENV");
        assert_eq!(RuntimeEnv::from_env(), RuntimeEnv::Dev);
    }

    #[test]
    fn only_prod_is_production() {
        assert!(RuntimeEnv::Prod.is_production());
        assert!(!RuntimeEnv::Dev.is_production());
        assert!(!RuntimeEnv::Test.is_production());
    }
}
