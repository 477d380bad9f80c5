use chrono::NaiveDate;
use sarfetch::core::download::{download_products, DownloadOptions};
use sarfetch::prompt::ScriptedPrompt;
use sarfetch::types::{AsfError, AsfResult, GranuleInfo, Product, Subscription};
use sarfetch::{GranuleSearch, Hyp3Api};
use std::collections::HashMap;
use tempfile::TempDir;

fn subscription(id: i64, name: &str) -> Subscription {
    Subscription {
        id,
        name: name.to_string(),
        extra: HashMap::new(),
    }
}

fn product(name: &str) -> Product {
    Product {
        name: name.to_string(),
        url: format!("https://hyp3-download.asf.alaska.edu/asf/data/{}.zip", name),
        extra: HashMap::new(),
    }
}

/// Subscription service double serving a fixed set of product pages
struct StubHyp3 {
    subscriptions: Vec<Subscription>,
    pages: Vec<Vec<Product>>,
}

impl Hyp3Api for StubHyp3 {
    fn login(&mut self, _username: &str, _password: &str) -> AsfResult<()> {
        Ok(())
    }

    fn get_subscriptions(&self, _enabled: bool) -> AsfResult<Vec<Subscription>> {
        Ok(self.subscriptions.clone())
    }

    fn get_products(&self, _sub_id: i64, page: usize, page_size: usize) -> AsfResult<Vec<Product>> {
        assert_eq!(page_size, 100);
        Ok(self.pages.get(page).cloned().unwrap_or_default())
    }
}

/// Search double confirming every granule
struct ConfirmAll;

impl GranuleSearch for ConfirmAll {
    fn lookup(&self, granule_name: &str, _processing_level: &str) -> AsfResult<GranuleInfo> {
        Err(AsfError::NoMatch(granule_name.to_string()))
    }

    fn confirm(
        &self,
        _granule_name: &str,
        _flight_direction: Option<&str>,
        _path: Option<u32>,
    ) -> AsfResult<bool> {
        Ok(true)
    }
}

#[test]
fn test_products_already_present_are_skipped() {
    let _ = env_logger::builder().is_test(true).try_init();
    let destination = TempDir::new().unwrap();

    // two pages of products, all already unpacked at the destination
    let names = [
        "S1A_IW_GRDH_1SDV_20200101T000000_030000_000001_AAAA",
        "S1A_IW_GRDH_1SDV_20200615T000000_030000_000002_BBBB",
        "S1A_IW_GRDH_1SDV_20200630T000000_030000_000003_CCCC",
    ];
    for name in names {
        std::fs::create_dir(destination.path().join(name)).unwrap();
    }

    let api = StubHyp3 {
        subscriptions: vec![subscription(71, "RTC over Fairbanks")],
        pages: vec![
            vec![product(names[0]), product(names[1])],
            vec![product(names[2])],
        ],
    };
    let mut prompt = ScriptedPrompt::new(["71"]);

    let chosen = download_products(
        &api,
        &ConfirmAll,
        &mut prompt,
        destination.path(),
        &DownloadOptions::default(),
    )
    .unwrap();
    assert_eq!(chosen, 71);
}

#[test]
fn test_date_range_filters_before_downloading() {
    let destination = TempDir::new().unwrap();

    // only the in-range product is present on disk; the out-of-range one
    // would be a download attempt if it survived the filter
    let in_range = "S1A_IW_GRDH_1SDV_20200615T000000_030000_000002_BBBB";
    std::fs::create_dir(destination.path().join(in_range)).unwrap();

    let api = StubHyp3 {
        subscriptions: vec![subscription(71, "RTC over Fairbanks")],
        pages: vec![vec![
            product(in_range),
            product("S1A_IW_GRDH_1SDV_20211231T000000_030000_000003_CCCC"),
        ]],
    };
    let mut prompt = ScriptedPrompt::new(["71"]);
    let options = DownloadOptions {
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        end_date: NaiveDate::from_ymd_opt(2020, 12, 31),
        ..Default::default()
    };

    let chosen =
        download_products(&api, &ConfirmAll, &mut prompt, destination.path(), &options).unwrap();
    assert_eq!(chosen, 71);
}

#[test]
fn test_invalid_flight_direction_aborts() {
    let destination = TempDir::new().unwrap();
    let api = StubHyp3 {
        subscriptions: vec![subscription(71, "RTC over Fairbanks")],
        pages: vec![vec![product(
            "S1A_IW_GRDH_1SDV_20200615T000000_030000_000002_BBBB",
        )]],
    };
    let mut prompt = ScriptedPrompt::new(["71"]);
    let options = DownloadOptions {
        flight_direction: Some("ascending".to_string()),
        ..Default::default()
    };

    let result = download_products(&api, &ConfirmAll, &mut prompt, destination.path(), &options);
    assert!(matches!(result, Err(AsfError::InvalidInput(_))));
}

#[test]
fn test_no_subscriptions_is_no_match() {
    let destination = TempDir::new().unwrap();
    let api = StubHyp3 {
        subscriptions: Vec::new(),
        pages: Vec::new(),
    };
    let mut prompt = ScriptedPrompt::new(Vec::<String>::new());

    let result = download_products(
        &api,
        &ConfirmAll,
        &mut prompt,
        destination.path(),
        &DownloadOptions::default(),
    );
    assert!(matches!(result, Err(AsfError::NoMatch(_))));
}
