#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod api;
pub mod area;
pub mod core;
pub mod error;
pub mod prices;

pub use crate::{
    area::{AREAS, Area, Country},
    core::{
        reference::Reference,
        series::{AreaSeries, MergeResult, PriceRecord},
    },
    error::{Error, ErrorKind, Result},
    prices::{Granularity, Prices},
};
