use itertools::Itertools;
use tracing::{info, instrument};

use crate::{
    api::{Api, PageId, PageSource, fetch_window},
    area::Country,
    core::{reconcile::merge, reference::Reference, series::MergeResult},
    error::{Error, Result},
};

/// Market data page granularity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, clap::ValueEnum)]
pub enum Granularity {
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl From<Granularity> for PageId {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::Hourly => Self(10),
            Granularity::Daily => Self(11),
            Granularity::Weekly => Self(12),
            Granularity::Monthly => Self(13),
            Granularity::Yearly => Self(14),
        }
    }
}

/// Spot prices aligned to each area's own calendar day.
pub struct Prices<S = Api> {
    source: S,
}

impl<S: PageSource> Prices<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the window of the page and merge it.
    ///
    /// Without a reference, the series are aligned to tomorrow.
    #[instrument(skip_all, fields(page = %page))]
    pub async fn fetch_page(
        &self,
        page: PageId,
        reference: Option<Reference>,
        areas: &[&str],
    ) -> Result<MergeResult> {
        let reference = reference.unwrap_or_else(Reference::tomorrow);
        let pages = fetch_window(&self.source, page, areas).await?;
        let result = merge(pages, reference)?;
        info!(n_areas = result.len(), "merged");
        Ok(result)
    }

    pub async fn fetch(
        &self,
        granularity: Granularity,
        reference: Option<Reference>,
        areas: &[&str],
    ) -> Result<MergeResult> {
        self.fetch_page(granularity.into(), reference, areas).await
    }

    pub async fn hourly(&self, reference: Option<Reference>, areas: &[&str]) -> Result<MergeResult> {
        self.fetch(Granularity::Hourly, reference, areas).await
    }

    pub async fn daily(&self, reference: Option<Reference>, areas: &[&str]) -> Result<MergeResult> {
        self.fetch(Granularity::Daily, reference, areas).await
    }

    pub async fn weekly(&self, reference: Option<Reference>, areas: &[&str]) -> Result<MergeResult> {
        self.fetch(Granularity::Weekly, reference, areas).await
    }

    pub async fn monthly(&self, reference: Option<Reference>, areas: &[&str]) -> Result<MergeResult> {
        self.fetch(Granularity::Monthly, reference, areas).await
    }

    pub async fn yearly(&self, reference: Option<Reference>, areas: &[&str]) -> Result<MergeResult> {
        self.fetch(Granularity::Yearly, reference, areas).await
    }

    /// Fetch the country's own hourly page, restricted to the country's areas.
    pub async fn country_hourly(
        &self,
        country: Country,
        reference: Option<Reference>,
    ) -> Result<MergeResult> {
        let page = country.hourly_page().ok_or(Error::NoCountryPage(country))?;
        let areas = country.areas().map(|area| area.code).collect_vec();
        self.fetch_page(page, reference, &areas).await
    }
}
