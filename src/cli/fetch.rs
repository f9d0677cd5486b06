use clap::Parser;
use elspot::{Country, Granularity, Prices, Reference};
use itertools::Itertools;

use crate::{cli::api::ApiArgs, prelude::*, tables::build_prices_table};

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(long, env = "NORDPOOL_GRANULARITY", default_value = "hourly")]
    pub granularity: Granularity,

    /// Date (`2021-03-15`) or moment (`2021-03-15T12:00:00+01:00`) to align the local days to.
    /// Defaults to tomorrow.
    #[clap(long)]
    pub reference: Option<Reference>,

    /// Bidding areas to keep, all of them when empty.
    #[clap(long = "area", env = "NORDPOOL_AREAS", value_delimiter = ',')]
    pub areas: Vec<String>,

    /// Fetch the country's own hourly page instead of the common one.
    #[clap(long, conflicts_with = "areas")]
    pub country: Option<Country>,
}

#[instrument(skip_all)]
pub async fn fetch(api_args: &ApiArgs, args: &FetchArgs) -> Result {
    let prices = Prices::new(api_args.new_client()?);
    let result = match args.country {
        Some(country) => prices.country_hourly(country, args.reference).await?,
        None => {
            let areas = args.areas.iter().map(String::as_str).collect_vec();
            prices.fetch(args.granularity, args.reference, &areas).await?
        }
    };
    if result.is_empty() {
        warn!("none of the requested areas is present in the pages");
    }
    println!("{}", build_prices_table(&result));
    Ok(())
}
