use std::{
    env::{self, VarError},
    str::FromStr,
};
use tracing::Level;

pub mod field;
pub mod shamir;
pub mod shares;

// ############################################
// ################## CONFIG ##################
// ############################################

pub struct Config {
    pub log_level: Level,
}

impl Config {
    pub fn parse_environment() -> Result<Config, anyhow::Error> {
        // `LOG_LEVEL` has priority over `RUST_LOG`
        let log_level = parse_env_variable::<Level>("LOG_LEVEL")?
            .or_else(|| parse_env_variable::<Level>("RUST_LOG").unwrap_or(None))
            .unwrap_or(Level::INFO);

        Ok(Config { log_level })
    }
}

fn parse_env_variable<T>(key: &str) -> Result<Option<T>, anyhow::Error>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    fn map_err<E>(key: &str, e: E) -> anyhow::Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        anyhow::anyhow!("[{key}]: {e}")
    }

    let env_value = match env::var(key) {
        Ok(v) => {
            if v.is_empty() {
                Ok(None)
            } else {
                Ok(Some(v))
            }
        }
        Err(e) => {
            if e == VarError::NotPresent {
                Ok(None)
            } else {
                Err(map_err(key, e))
            }
        }
    }?;
    env_value
        .map(|v| v.parse::<T>().map_err(|e| map_err(key, e)))
        .transpose()
}
