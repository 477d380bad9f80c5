//! HTTP clients for the granule search and subscription services

pub mod hyp3;
pub mod search;

pub use hyp3::{list_subscriptions, login, pick_subscription, Hyp3Api, Hyp3Client, HYP3_API_URL};
pub use search::{GranuleSearch, SearchClient, SEARCH_API_URL};
