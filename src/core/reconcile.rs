//! Merging the reporting-day pages into local-day series.

use tracing::{debug, info, instrument};

use crate::{
    api::Page,
    area::Area,
    core::{
        reference::Reference,
        series::{MergeResult, PriceRecord, SUMMARY_KEYS},
    },
    error::{Error, Result},
};

/// Merge the pages into per-area series covering the reference's local day of each area.
///
/// Areas without a known time zone are skipped. Any invalid value inside a local day
/// fails the whole merge, not just the area.
#[instrument(skip_all, fields(reference = ?reference))]
pub fn merge(pages: impl IntoIterator<Item = Page>, reference: Reference) -> Result<MergeResult> {
    let mut result = MergeResult::default();

    for page in pages {
        for mut page_area in page.areas {
            let Some(area) = Area::find(&page_area.code) else {
                debug!(code = %page_area.code, "skipping the unknown area");
                continue;
            };

            // Upstream summaries cover the reporting day, not the local one:
            for key in SUMMARY_KEYS {
                page_area.metadata.insert(key.to_string(), PriceRecord::INVALID);
            }

            let series = result.get_or_insert(&page_area.code);
            series.merge_metadata(page_area.metadata);

            let (start_of_day, end_of_day) = reference.local_bounds(area.time_zone);
            for record in page_area.records {
                let local_start = record.start.with_timezone(&area.time_zone);
                let local_end = record.end.with_timezone(&area.time_zone);
                if local_start < start_of_day || local_start > end_of_day {
                    continue;
                }
                if record.is_invalid() {
                    return Err(Error::InvalidValue { area: series.code.clone(), start: record.start });
                }
                if local_start == local_end {
                    info!(
                        code = %series.code,
                        start = %local_start,
                        "excluded the hour with the same start and end, most likely due to a DST change",
                    );
                } else if !series.push(record) {
                    debug!(code = %series.code, start = %local_start, "skipped the duplicate");
                }
            }
        }
    }

    Ok(result)
}
