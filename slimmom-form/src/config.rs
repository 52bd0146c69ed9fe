use std::{env, fmt::Display, str::FromStr, time::Duration};

use dotenv::dotenv;
use log::{info, warn};
use slimmom_client::DEFAULT_BASE_URL;
use strum::{Display, EnumString};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What a submission does when the daily intake cannot be computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum IntakeFailurePolicy {
    /// Fail the submission so the caller can tell the user and retry.
    #[default]
    Surface,
    /// Keep the locally saved measurements and finish quietly.
    BestEffort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub request_timeout: Option<Duration>,
    pub intake_failure: IntakeFailurePolicy,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("SLIMMOM_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let timeout_secs = parse_or("SLIMMOM_REQUEST_TIMEOUT_SECS", &lookup, DEFAULT_TIMEOUT_SECS);
        let intake_failure = parse_or("SLIMMOM_INTAKE_FAILURE", &lookup, IntakeFailurePolicy::default());
        info!(
            "Using API at {}, timeout {}s, intake failure policy {}",
            api_url, timeout_secs, intake_failure
        );

        Self {
            api_url,
            request_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            intake_failure,
        }
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {} value \"{}\": {}, using default {}", key, raw, e, default);
            default
        }),
    }
}
