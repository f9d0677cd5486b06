use chrono::{DateTime, Utc};
use enumset::EnumSetType;

use crate::area::Country;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch the page")]
    Transport(#[from] reqwest::Error),

    /// The upstream returned something that is not a market data page, for example
    /// a page without the `currency` key when the currency is not available yet.
    #[error("malformed page")]
    MalformedPage(#[from] serde_json::Error),

    #[error("requested prices in `{requested}`, but the page is in `{actual}`")]
    CurrencyMismatch { requested: String, actual: String },

    #[error("invalid value in `{area}` at {start}")]
    InvalidValue { area: String, start: DateTime<Utc> },

    #[error("{0} has no hourly page")]
    NoCountryPage(Country),
}

impl Error {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::MalformedPage(_) => ErrorKind::MalformedPage,
            Self::CurrencyMismatch { .. } => ErrorKind::CurrencyMismatch,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::NoCountryPage(_) => ErrorKind::NoCountryPage,
        }
    }
}

#[derive(Debug, EnumSetType)]
pub enum ErrorKind {
    Transport,
    MalformedPage,
    CurrencyMismatch,
    InvalidValue,
    NoCountryPage,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_kind_ok() {
        let error = Error::InvalidValue {
            area: "SE1".to_string(),
            start: Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap(),
        };
        assert_eq!(error.kind(), ErrorKind::InvalidValue);
        assert_eq!(error.to_string(), "invalid value in `SE1` at 2021-03-15 00:00:00 UTC");
    }

    #[test]
    fn test_malformed_page_kind_ok() {
        let error = Error::from(serde_json::from_str::<u32>("junk").unwrap_err());
        assert_eq!(error.kind(), ErrorKind::MalformedPage);
    }
}
