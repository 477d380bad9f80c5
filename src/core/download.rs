use crate::api::hyp3::{list_subscriptions, pick_subscription, Hyp3Api};
use crate::api::search::GranuleSearch;
use crate::core::filter::{
    date_range_valid, filter_date_range, flight_direction_valid, product_filter,
};
use crate::io::fs::{download_stream, path_exists, unzip};
use crate::prompt::Prompt;
use crate::types::{AsfError, AsfResult};
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;

/// Fixed page size for product pagination
pub const PRODUCT_PAGE_SIZE: usize = 100;

/// Download service URL shape; the capture is the product name
const PRODUCT_URL_PATTERN: &str = r"^https://[^/]+/asf/data/(.+)\.zip$";

/// Optional narrowing applied before downloading a subscription's products
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub flight_direction: Option<String>,
    pub path: Option<u32>,
}

/// Product name encoded in a download service URL
pub fn product_name_from_url(url: &str) -> AsfResult<String> {
    let pattern = Regex::new(PRODUCT_URL_PATTERN).expect("product url pattern is valid");
    pattern
        .captures(url)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| AsfError::InvalidFormat(format!("unexpected product url: {}", url)))
}

/// Download every product of a chosen subscription into `destination`
///
/// Prompts for the subscription, paginates its products, applies the date,
/// flight-direction, and path filters, then downloads, unpacks, and removes
/// the archive for each product not already present on disk (by the directory
/// name derived from its download URL). A flight direction that is given but
/// invalid aborts; an absent one is simply skipped. Returns the chosen
/// subscription id.
pub fn download_products<A, S, P>(
    api: &A,
    search: &S,
    prompt: &mut P,
    destination: &Path,
    options: &DownloadOptions,
) -> AsfResult<i64>
where
    A: Hyp3Api,
    S: GranuleSearch,
    P: Prompt,
{
    let subscriptions = list_subscriptions(api)?;
    let subscription_id = pick_subscription(prompt, &subscriptions)?;

    let mut products = Vec::new();
    let mut page = 0;
    loop {
        let product_page = api.get_products(subscription_id, page, PRODUCT_PAGE_SIZE)?;
        page += 1;
        if product_page.is_empty() {
            break;
        }
        products.extend(product_page);
    }

    if date_range_valid(options.start_date, options.end_date) {
        // both dates are present when the range is valid
        if let (Some(start), Some(end)) = (options.start_date, options.end_date) {
            products = filter_date_range(products, start, end)?;
        }
    }
    if let Some(direction) = options.flight_direction.as_deref() {
        // an absent direction is skipped, a wrong one must not be
        if !flight_direction_valid(direction) {
            return Err(AsfError::InvalidInput(format!(
                "aborting product download due to invalid flight direction: {}",
                direction
            )));
        }
        products = product_filter(search, products, Some(direction), None)?;
    }
    if let Some(path) = options.path {
        products = product_filter(search, products, None, Some(path))?;
    }

    if !path_exists(destination) {
        return Err(AsfError::InvalidInput(format!(
            "destination path {} does not exist",
            destination.display()
        )));
    }

    log::info!(
        "{} products are associated with the selected date range, flight direction, and path for subscription id {}",
        products.len(),
        subscription_id
    );
    for (number, product) in products.iter().enumerate() {
        log::info!("Product number {}:", number + 1);
        let product_name = product_name_from_url(&product.url)?;
        let product_dir = destination.join(&product_name);

        if product_dir.exists() {
            log::info!("{} already exists", product_dir.display());
            continue;
        }

        log::info!("{} is not present, downloading from {}", product_name, product.url);
        let response = reqwest::blocking::get(product.url.as_str())?;
        if !response.status().is_success() {
            return Err(AsfError::Api(format!(
                "product download for {} failed with status: {}",
                product.url,
                response.status()
            )));
        }
        download_stream(&product_dir, response)?;

        let archive = destination.join(format!("{}.zip", product_name));
        std::fs::rename(&product_dir, &archive)?;
        unzip(destination, &archive)?;
        std::fs::remove_file(&archive)?;
        log::info!("Done");
    }

    Ok(subscription_id)
}
