//! Nord Pool market data page.

use std::collections::BTreeMap;

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::{Europe, Tz};
use serde::Deserialize;
use serde_with::serde_as;

use crate::{
    area::codes_match,
    core::{number::LocaleNumber, series::PriceRecord},
    error::{Error, Result},
};

/// Time zone of the naive timestamps in the pages.
pub const REPORTING_TIME_ZONE: Tz = Europe::Stockholm;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, derive_more::Display, derive_more::From)]
pub struct PageId(pub u32);

/// Parsed page: one reporting day of all the areas.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub currency: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,

    /// Areas in the order of the first appearance.
    pub areas: Vec<PageArea>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct PageArea {
    pub code: String,

    /// Summary rows like `Min`, `Max`, and `Average`.
    pub metadata: BTreeMap<String, f64>,

    pub records: Vec<PriceRecord>,
}

impl PageArea {
    fn new(code: String) -> Self {
        Self { code, metadata: BTreeMap::new(), records: Vec::new() }
    }
}

impl Page {
    /// Parse the raw response body.
    ///
    /// Non-empty `areas` limits the result to the listed area codes.
    pub fn parse(body: &[u8], currency: &str, areas: &[&str]) -> Result<Self> {
        let raw: RawPage = serde_json::from_slice(body)?;
        if !raw.currency.eq_ignore_ascii_case(currency) {
            return Err(Error::CurrencyMismatch {
                requested: currency.to_string(),
                actual: raw.currency,
            });
        }

        let mut page_areas: Vec<PageArea> = Vec::new();
        let mut start = None;
        let mut end = None;
        let mut previous_start = None;

        for row in raw.data.rows {
            if row.is_extra {
                for column in row.columns.into_iter().filter(|column| is_selected(&column.name, areas)) {
                    area_entry(&mut page_areas, column.name).metadata.insert(row.name.clone(), column.value);
                }
                continue;
            }

            let row_start = to_utc(row.start_time, previous_start);
            // A repeated end hour resolves too late, the row never outlasts its naive length:
            let row_end =
                to_utc(row.end_time, Some(row_start)).min(row_start + (row.end_time - row.start_time));
            previous_start = Some(row_start);
            start = start.or(Some(row_start));
            end = Some(row_end);

            for column in row.columns.into_iter().filter(|column| is_selected(&column.name, areas)) {
                area_entry(&mut page_areas, column.name)
                    .records
                    .push(PriceRecord::new(row_start, row_end, column.value));
            }
        }

        Ok(Self {
            currency: raw.currency,
            start,
            end,
            updated: raw.data.updated.as_deref().and_then(parse_timestamp),
            areas: page_areas,
        })
    }

    #[must_use]
    pub fn area(&self, code: &str) -> Option<&PageArea> {
        self.areas.iter().find(|area| area.code == code)
    }
}

fn is_selected(code: &str, areas: &[&str]) -> bool {
    areas.is_empty() || areas.iter().any(|area| codes_match(area, code))
}

fn area_entry(areas: &mut Vec<PageArea>, code: String) -> &mut PageArea {
    let index = match areas.iter().position(|area| area.code == code) {
        Some(index) => index,
        None => {
            areas.push(PageArea::new(code));
            areas.len() - 1
        }
    };
    &mut areas[index]
}

/// Convert the reporting-zone timestamp to UTC.
///
/// Of the two candidates in a repeated hour, the first one after `after` is taken.
/// A timestamp in a skipped hour moves to the end of the gap, so the skipped row
/// collapses into a zero-length one.
fn to_utc(local: NaiveDateTime, after: Option<DateTime<Utc>>) -> DateTime<Utc> {
    match REPORTING_TIME_ZONE.from_local_datetime(&local) {
        LocalResult::Single(time) => time.to_utc(),
        LocalResult::Ambiguous(earliest, latest) => {
            if after.is_some_and(|after| earliest.to_utc() <= after) {
                latest.to_utc()
            } else {
                earliest.to_utc()
            }
        }
        LocalResult::None => {
            let mut shifted = local;
            loop {
                shifted += TimeDelta::minutes(1);
                if let Some(time) = REPORTING_TIME_ZONE.from_local_datetime(&shifted).earliest() {
                    break time.to_utc();
                }
            }
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|time| time.to_utc())
        .ok()
        .or_else(|| s.parse::<NaiveDateTime>().ok().map(|local| to_utc(local, None)))
}

#[derive(Deserialize)]
struct RawPage {
    currency: String,
    data: RawData,
}

#[derive(Deserialize)]
struct RawData {
    #[serde(rename = "Rows")]
    rows: Vec<RawRow>,

    #[serde(rename = "DateUpdated", default)]
    updated: Option<String>,
}

#[derive(Deserialize)]
struct RawRow {
    #[serde(rename = "Name", default)]
    name: String,

    #[serde(rename = "StartTime")]
    start_time: NaiveDateTime,

    #[serde(rename = "EndTime")]
    end_time: NaiveDateTime,

    #[serde(rename = "IsExtraRow", default)]
    is_extra: bool,

    #[serde(rename = "Columns")]
    columns: Vec<RawColumn>,
}

#[serde_as]
#[derive(Deserialize)]
struct RawColumn {
    #[serde(rename = "Name")]
    name: String,

    #[serde_as(as = "LocaleNumber")]
    #[serde(rename = "Value")]
    value: f64,
}
