//! Bidding areas and their time zones.

use chrono_tz::{Europe, Tz};

use crate::api::PageId;

#[must_use]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Area {
    /// Column name as the market data pages report it.
    pub code: &'static str,

    pub time_zone: Tz,
    pub country: Country,
}

impl Area {
    const fn new(code: &'static str, time_zone: Tz, country: Country) -> Self {
        Self { code, time_zone, country }
    }

    /// Find the area by its code, ignoring the case.
    #[must_use]
    pub fn find(code: &str) -> Option<&'static Self> {
        AREAS.iter().find(|area| codes_match(area.code, code))
    }
}

/// Compare area codes ignoring the case, non-ASCII letters included.
pub fn codes_match(lhs: &str, rhs: &str) -> bool {
    lhs.chars().flat_map(char::to_lowercase).eq(rhs.chars().flat_map(char::to_lowercase))
}

pub static AREAS: &[Area] = &[
    Area::new("SYS", Europe::Stockholm, Country::System),
    Area::new("SE1", Europe::Stockholm, Country::Sweden),
    Area::new("SE2", Europe::Stockholm, Country::Sweden),
    Area::new("SE3", Europe::Stockholm, Country::Sweden),
    Area::new("SE4", Europe::Stockholm, Country::Sweden),
    Area::new("FI", Europe::Helsinki, Country::Finland),
    Area::new("DK1", Europe::Copenhagen, Country::Denmark),
    Area::new("DK2", Europe::Copenhagen, Country::Denmark),
    Area::new("Oslo", Europe::Oslo, Country::Norway),
    Area::new("Kr.sand", Europe::Oslo, Country::Norway),
    Area::new("Bergen", Europe::Oslo, Country::Norway),
    Area::new("Molde", Europe::Oslo, Country::Norway),
    Area::new("Tr.heim", Europe::Oslo, Country::Norway),
    Area::new("Tromsø", Europe::Oslo, Country::Norway),
    Area::new("EE", Europe::Tallinn, Country::Estonia),
    Area::new("LV", Europe::Riga, Country::Latvia),
    Area::new("LT", Europe::Vilnius, Country::Lithuania),
    Area::new("AT", Europe::Vienna, Country::Austria),
    Area::new("BE", Europe::Brussels, Country::Belgium),
    Area::new("DE-LU", Europe::Berlin, Country::GermanyLuxembourg),
    Area::new("FR", Europe::Paris, Country::France),
    Area::new("NL", Europe::Amsterdam, Country::Netherlands),
];

/// Page group of the market data.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display, clap::ValueEnum)]
pub enum Country {
    #[display("SYS")]
    #[value(name = "sys")]
    System,

    #[display("NO")]
    #[value(name = "no")]
    Norway,

    #[display("SE")]
    #[value(name = "se")]
    Sweden,

    #[display("DK")]
    #[value(name = "dk")]
    Denmark,

    #[display("FI")]
    #[value(name = "fi")]
    Finland,

    #[display("EE")]
    #[value(name = "ee")]
    Estonia,

    #[display("LT")]
    #[value(name = "lt")]
    Lithuania,

    #[display("LV")]
    #[value(name = "lv")]
    Latvia,

    #[display("AT")]
    #[value(name = "at")]
    Austria,

    #[display("BE")]
    #[value(name = "be")]
    Belgium,

    #[display("DE-LU")]
    #[value(name = "de-lu")]
    GermanyLuxembourg,

    #[display("FR")]
    #[value(name = "fr")]
    France,

    #[display("NL")]
    #[value(name = "nl")]
    Netherlands,
}

impl Country {
    pub fn areas(self) -> impl Iterator<Item = &'static Area> {
        AREAS.iter().filter(move |area| area.country == self)
    }

    /// Country-specific hourly page.
    ///
    /// Only the pages that also carry the other currencies are listed, the rest
    /// fail to parse or miss the currency slice.
    #[must_use]
    pub const fn hourly_page(self) -> Option<PageId> {
        match self {
            Self::Norway => Some(PageId(23)),
            Self::Sweden => Some(PageId(29)),
            Self::Denmark => Some(PageId(41)),
            _ => None,
        }
    }
}
