use chrono::{Days, Local, NaiveDate};
use tokio::try_join;
use tracing::{info, instrument};

use crate::{
    api::{
        client::PageSource,
        page::{Page, PageId},
    },
    error::Result,
};

/// Reporting days around today, so that every area's local day is covered
/// no matter how far its offset is from the reporting zone.
#[must_use]
pub fn window_end_dates(today: NaiveDate) -> [NaiveDate; 3] {
    [
        today.checked_sub_days(Days::new(1)).unwrap_or(today),
        today,
        today.checked_add_days(Days::new(1)).unwrap_or(today),
    ]
}

/// Fetch yesterday, today, and tomorrow concurrently. Any failure fails the whole window.
#[instrument(skip_all, fields(page = %page))]
pub async fn fetch_window<S: PageSource + ?Sized>(
    source: &S,
    page: PageId,
    areas: &[&str],
) -> Result<[Page; 3]> {
    let [yesterday, today, tomorrow] = window_end_dates(Local::now().date_naive());
    let (yesterday, today, tomorrow) = try_join!(
        source.fetch_page(page, yesterday, areas),
        source.fetch_page(page, today, areas),
        source.fetch_page(page, tomorrow, areas),
    )?;
    info!(
        n_areas = yesterday.areas.len().max(today.areas.len()).max(tomorrow.areas.len()),
        "fetched the window",
    );
    Ok([yesterday, today, tomorrow])
}

#[cfg(test)]
pub mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::{api::page::tests::build_page_body, error::Error};

    /// In-memory page source that builds the page for whatever date is requested.
    pub struct FakeSource {
        pub pages: Box<dyn Fn(NaiveDate) -> Result<String> + Send + Sync>,
        pub requested: Mutex<Vec<(PageId, NaiveDate)>>,
    }

    impl FakeSource {
        pub fn new(pages: impl Fn(NaiveDate) -> Result<String> + Send + Sync + 'static) -> Self {
            Self { pages: Box::new(pages), requested: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        async fn fetch_page(&self, page: PageId, end_date: NaiveDate, areas: &[&str]) -> Result<Page> {
            self.requested.lock().unwrap().push((page, end_date));
            Page::parse((self.pages)(end_date)?.as_bytes(), "EUR", areas)
        }
    }

    #[test]
    fn test_window_end_dates() {
        let today = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        assert_eq!(
            window_end_dates(today),
            [
                NaiveDate::from_ymd_opt(2021, 2, 28).unwrap(),
                today,
                NaiveDate::from_ymd_opt(2021, 3, 2).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_window_ok() -> Result<()> {
        let source = FakeSource::new(|date| Ok(build_page_body(date, &[("SE1", vec![Some("1,0")])])));
        let pages = fetch_window(&source, PageId(10), &[]).await?;
        let today = Local::now().date_naive();
        let mut requested = source.requested.lock().unwrap().clone();
        requested.sort_by_key(|(_, date)| *date);
        assert_eq!(
            requested.iter().map(|(_, date)| *date).collect::<Vec<_>>(),
            window_end_dates(today),
        );
        assert!(requested.iter().all(|(page, _)| *page == PageId(10)));
        assert_eq!(pages[1].area("SE1").unwrap().records[0].start.date_naive(), today.pred_opt().unwrap());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_window_fails_as_a_whole() {
        let today = Local::now().date_naive();
        let source = FakeSource::new(move |date| {
            if date == today {
                Err(Error::CurrencyMismatch { requested: "EUR".to_string(), actual: "NOK".to_string() })
            } else {
                Ok(build_page_body(date, &[("SE1", vec![Some("1,0")])]))
            }
        });
        let result = fetch_window(&source, PageId(10), &[]).await;
        assert!(matches!(result, Err(Error::CurrencyMismatch { .. })));
    }
}
