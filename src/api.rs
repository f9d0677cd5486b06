mod client;
pub mod page;
mod retry;
pub mod window;

pub use self::{
    client::{Api, PageSource},
    page::{Page, PageArea, PageId, REPORTING_TIME_ZONE},
    retry::RetryPolicy,
    window::fetch_window,
};
