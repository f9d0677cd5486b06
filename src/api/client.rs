use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Url};
use tracing::{debug, info, instrument};

use crate::{
    api::{
        page::{Page, PageId},
        retry::RetryPolicy,
    },
    error::Result,
};

/// Anything that can produce a parsed page for the reporting day.
#[async_trait]
pub trait PageSource: Sync {
    async fn fetch_page(&self, page: PageId, end_date: NaiveDate, areas: &[&str]) -> Result<Page>;
}

pub struct Api {
    client: Client,
    base_url: Url,
    currency: String,
    retry_policy: RetryPolicy,
}

impl Api {
    pub const DEFAULT_BASE_URL: &'static str = "https://www.nordpoolgroup.com/api/marketdata";

    pub fn new(base_url: Url, currency: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, currency))
    }

    /// Use the externally owned client, so that the connection pool is shared.
    pub fn with_client(client: Client, base_url: Url, currency: impl Into<String>) -> Self {
        Self { client, base_url, currency: currency.into(), retry_policy: RetryPolicy::default() }
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn page_url(&self, page: PageId) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("page").push(&page.to_string());
        }
        url
    }

    async fn fetch_page_once(&self, url: &Url, end_date: &str, areas: &[&str]) -> Result<Page> {
        let body = self
            .client
            .get(url.clone())
            .query(&[("currency", self.currency.as_str()), ("endDate", end_date)])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(n_bytes = body.len(), "fetched");
        Page::parse(&body, &self.currency, areas)
    }
}

#[async_trait]
impl PageSource for Api {
    #[instrument(skip_all, fields(page = %page, end_date = %end_date))]
    async fn fetch_page(&self, page: PageId, end_date: NaiveDate, areas: &[&str]) -> Result<Page> {
        info!("fetching…");
        let url = &self.page_url(page);
        let end_date = &*end_date.format("%d-%m-%Y").to_string();
        self.retry_policy.retry(|| self.fetch_page_once(url, end_date, areas)).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone, Utc};
    use mockito::{Matcher, Server};

    use super::*;
    use crate::{api::page::tests::build_page_body, error::Error};

    fn fast_retries() -> RetryPolicy {
        RetryPolicy::builder()
            .initial_delay(Duration::from_millis(10))
            .max_elapsed(Duration::from_millis(120))
            .jitter(false)
            .build()
    }

    #[tokio::test]
    async fn test_fetch_page_ok() -> Result<()> {
        let date = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/marketdata/page/10")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("currency".into(), "EUR".into()),
                Matcher::UrlEncoded("endDate".into(), "15-03-2021".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(build_page_body(date, &[("SE1", vec![Some("27,91"), Some("28,00")])]))
            .create_async()
            .await;

        let base_url = format!("{}/api/marketdata", server.url()).parse().unwrap();
        let page = Api::new(base_url, "EUR", Duration::from_secs(10))?
            .with_retry_policy(fast_retries())
            .fetch_page(PageId(10), date, &[])
            .await?;

        mock.assert_async().await;
        let se1 = page.area("SE1").unwrap();
        assert_eq!(se1.records.len(), 2);
        assert_eq!(se1.records[0].start, Utc.with_ymd_and_hms(2021, 3, 14, 23, 0, 0).unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_page_retries_server_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page/10")
            .match_query(Matcher::Any)
            .with_status(503)
            .expect(4)
            .create_async()
            .await;

        let result = Api::new(server.url().parse().unwrap(), "EUR", Duration::from_secs(10))
            .unwrap()
            .with_retry_policy(fast_retries())
            .fetch_page(PageId(10), Local::now().date_naive(), &[])
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(Error::Transport(_))), "{result:?}");
    }

    #[tokio::test]
    async fn test_fetch_page_retries_junk() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page/11")
            .match_query(Matcher::Any)
            .with_body(r#"{"data": {"Rows": []}}"#)
            .expect_at_least(2)
            .create_async()
            .await;

        let result = Api::new(server.url().parse().unwrap(), "EUR", Duration::from_secs(10))
            .unwrap()
            .with_retry_policy(fast_retries())
            .fetch_page(PageId(11), Local::now().date_naive(), &[])
            .await;

        mock.assert_async().await;
        assert!(matches!(result, Err(Error::MalformedPage(_))), "{result:?}");
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_fetch_page_online() -> Result<()> {
        let api = Api::new(Api::DEFAULT_BASE_URL.parse().unwrap(), "EUR", Duration::from_secs(10))?;
        let page = api.fetch_page(PageId(10), Local::now().date_naive(), &["SE3"]).await?;
        assert_eq!(page.areas.len(), 1);
        Ok(())
    }
}
