use clap::Parser;
use elspot::api::{Api, RetryPolicy};
use reqwest::Url;

use crate::prelude::*;

#[derive(Parser)]
pub struct ApiArgs {
    /// Market data API base URL, the page path is appended to it.
    #[clap(long = "base-url", env = "NORDPOOL_BASE_URL", default_value = Api::DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Currency to request the prices in, passed through as is.
    #[clap(long, env = "NORDPOOL_CURRENCY", default_value = "EUR")]
    pub currency: String,

    /// Single request timeout.
    #[clap(long, env = "NORDPOOL_TIMEOUT", default_value = "10s")]
    pub timeout: humantime::Duration,

    /// Maximum delay between the retries.
    #[clap(long = "max-backoff", env = "NORDPOOL_MAX_BACKOFF", default_value = "20s")]
    pub max_backoff: humantime::Duration,

    /// No retry is started past this time since the first attempt.
    #[clap(long = "max-retry-time", env = "NORDPOOL_MAX_RETRY_TIME", default_value = "1m")]
    pub max_retry_time: humantime::Duration,
}

impl ApiArgs {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::builder()
            .max_delay(self.max_backoff.into())
            .max_elapsed(self.max_retry_time.into())
            .build()
    }

    pub fn new_client(&self) -> Result<Api> {
        let api = Api::new(self.base_url.clone(), &self.currency, self.timeout.into())
            .context("failed to build the API client")?;
        Ok(api.with_retry_policy(self.retry_policy()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        api: ApiArgs,
    }

    #[test]
    fn test_defaults_ok() {
        let args = TestArgs::parse_from(["elspot"]).api;
        assert_eq!(args.base_url.as_str(), Api::DEFAULT_BASE_URL);
        assert_eq!(args.currency, "EUR");
        assert_eq!(Duration::from(args.timeout), Duration::from_secs(10));
        assert_eq!(Duration::from(args.max_retry_time), Duration::from_secs(60));
    }
}
