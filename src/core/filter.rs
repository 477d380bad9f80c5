use crate::api::search::GranuleSearch;
use crate::types::{AsfError, AsfResult, Product};
use chrono::NaiveDate;

/// Flight direction values accepted by the search API, exact match only
pub const VALID_FLIGHT_DIRECTIONS: [&str; 6] =
    ["A", "ASC", "ASCENDING", "D", "DESC", "DESCENDING"];

/// Naming convention a product name follows
///
/// Two upstream pipelines name products differently: one underscore-delimited
/// with the acquisition date in the fifth token, one hyphen-delimited with the
/// date in the second. Anything else is a format error, not a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductNameFormat {
    Underscore,
    Hyphen,
}

impl ProductNameFormat {
    pub fn detect(name: &str) -> Self {
        if name.split('_').count() == 1 {
            ProductNameFormat::Hyphen
        } else {
            ProductNameFormat::Underscore
        }
    }

    fn date_token<'a>(&self, name: &'a str) -> Option<&'a str> {
        match self {
            ProductNameFormat::Underscore => name.split('_').nth(4),
            ProductNameFormat::Hyphen => name.split('-').nth(1),
        }
    }
}

/// Parse the acquisition date encoded in a product name
///
/// The date is the first 8 characters (`YYYYMMDD`) of the format's date token.
pub fn acquisition_date(product_name: &str) -> AsfResult<NaiveDate> {
    let format = ProductNameFormat::detect(product_name);
    let token = format.date_token(product_name).ok_or_else(|| {
        AsfError::InvalidFormat(format!(
            "product name {} has no date token for {:?} naming",
            product_name, format
        ))
    })?;
    let digits = token.get(0..8).ok_or_else(|| {
        AsfError::InvalidFormat(format!(
            "product name {} has a truncated date token: {}",
            product_name, token
        ))
    })?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").map_err(|e| {
        AsfError::InvalidFormat(format!(
            "product name {} has an unparseable date {}: {}",
            product_name, digits, e
        ))
    })
}

/// Check that both dates are present and in order
///
/// A reversed range is reported; a half-open input is simply not a range.
pub fn date_range_valid(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> bool {
    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            if start > end {
                log::error!("The start date must be prior to the end date.");
                false
            } else {
                true
            }
        }
        _ => false,
    }
}

/// Keep products whose acquisition date falls in `[start_date, end_date)`
///
/// Start-inclusive, end-exclusive. The product list must be non-empty.
pub fn filter_date_range(
    products: Vec<Product>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AsfResult<Vec<Product>> {
    if products.is_empty() {
        return Err(AsfError::InvalidInput(
            "product list must contain at least one product".to_string(),
        ));
    }
    let mut filtered = Vec::new();
    for product in products {
        let date = acquisition_date(&product.name)?;
        if date >= start_date && date < end_date {
            filtered.push(product);
        }
    }
    Ok(filtered)
}

/// Check a flight direction against the search API's accepted values
pub fn flight_direction_valid(flight_direction: &str) -> bool {
    if VALID_FLIGHT_DIRECTIONS.contains(&flight_direction) {
        true
    } else {
        log::error!("{} is not a valid flight direction", flight_direction);
        log::error!("Valid directions: {:?}", VALID_FLIGHT_DIRECTIONS);
        false
    }
}

/// Keep products the search API confirms for a flight direction and/or path
///
/// Each product costs one confirmation query keyed by the granule name (the
/// text before the first `-`). With neither filter given the list passes
/// through unchanged.
pub fn product_filter<S: GranuleSearch>(
    search: &S,
    products: Vec<Product>,
    flight_direction: Option<&str>,
    path: Option<u32>,
) -> AsfResult<Vec<Product>> {
    if products.is_empty() {
        return Err(AsfError::InvalidInput(
            "product list must contain at least one product".to_string(),
        ));
    }
    if flight_direction.is_none() && path.is_none() {
        return Ok(products);
    }

    let mut filtered = Vec::new();
    for product in products {
        let granule_name = product.name.split('-').next().unwrap_or(&product.name);
        if search.confirm(granule_name, flight_direction, path)? {
            filtered.push(product);
        }
    }
    Ok(filtered)
}
