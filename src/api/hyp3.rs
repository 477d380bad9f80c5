use crate::io::credentials::{CredentialStore, EARTHDATA_HOST};
use crate::prompt::Prompt;
use crate::types::{AsfError, AsfResult, Product, Subscription};
use serde::Deserialize;

/// Subscription/products service endpoint
pub const HYP3_API_URL: &str = "https://api.hyp3.asf.alaska.edu";

/// Subscription-service surface of the processing API
///
/// Login failures surface as [`AsfError::Login`], the only error the
/// interactive login loop retries on; everything else is fatal to the caller.
pub trait Hyp3Api {
    fn login(&mut self, username: &str, password: &str) -> AsfResult<()>;
    fn get_subscriptions(&self, enabled: bool) -> AsfResult<Vec<Subscription>>;
    fn get_products(&self, sub_id: i64, page: usize, page_size: usize) -> AsfResult<Vec<Product>>;
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "api_key", alias = "token")]
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionsResponse {
    subscriptions: Vec<Subscription>,
}

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Vec<Product>,
}

/// Blocking client for the subscription/products service
pub struct Hyp3Client {
    base_url: String,
    client: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl Default for Hyp3Client {
    fn default() -> Self {
        Hyp3Client::new(HYP3_API_URL)
    }
}

impl Hyp3Client {
    pub fn new(base_url: &str) -> Self {
        Hyp3Client {
            base_url: base_url.to_string(),
            client: reqwest::blocking::Client::new(),
            api_key: None,
        }
    }

    fn api_key(&self) -> AsfResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AsfError::Api("not logged in".to_string()))
    }
}

impl Hyp3Api for Hyp3Client {
    fn login(&mut self, username: &str, password: &str) -> AsfResult<()> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let detail = response.text().unwrap_or_default();
            return Err(AsfError::Login(format!(
                "username or password rejected: {}",
                detail.trim()
            )));
        }
        if !status.is_success() {
            return Err(AsfError::Api(format!(
                "login request failed with status: {}",
                status
            )));
        }

        let body: LoginResponse = response.json()?;
        self.api_key = Some(body.api_key);
        Ok(())
    }

    fn get_subscriptions(&self, enabled: bool) -> AsfResult<Vec<Subscription>> {
        let url = format!("{}/subscriptions", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key()?.to_string()),
                ("enabled", enabled.to_string()),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(AsfError::Api(format!(
                "subscription request failed with status: {}",
                response.status()
            )));
        }
        let body: SubscriptionsResponse = response.json()?;
        Ok(body.subscriptions)
    }

    fn get_products(&self, sub_id: i64, page: usize, page_size: usize) -> AsfResult<Vec<Product>> {
        let url = format!("{}/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key()?.to_string()),
                ("sub_id", sub_id.to_string()),
                ("page", page.to_string()),
                ("page_size", page_size.to_string()),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(AsfError::Api(format!(
                "product request failed with status: {}",
                response.status()
            )));
        }
        let body: ProductsResponse = response.json()?;
        Ok(body.products)
    }
}

/// Interactive Earthdata login
///
/// Prompts for a username and password, retrying for as long as the service
/// reports a credential problem; any other failure propagates immediately.
/// Successful credentials are persisted (overwriting the store) so other
/// Earthdata tooling picks them up, and the username is returned.
pub fn login<A, S, P>(api: &mut A, store: &S, prompt: &mut P) -> AsfResult<String>
where
    A: Hyp3Api,
    S: CredentialStore,
    P: Prompt,
{
    let mut last_error: Option<String> = None;
    loop {
        if let Some(err) = last_error.take() {
            println!("{}", err);
            println!("Please try again.\n");
        }
        let username = prompt.read_line("Enter your NASA EarthData username:")?;
        let password = prompt.read_password("Enter your password:")?;

        match api.login(&username, &password) {
            Ok(()) => {
                println!("Login successful.");
                println!("Welcome {}.", username);
                store.save(EARTHDATA_HOST, &username, &password)?;
                return Ok(username);
            }
            Err(AsfError::Login(message)) => {
                last_error = Some(message);
            }
            Err(other) => return Err(other),
        }
    }
}

/// Fetch the account's enabled subscriptions
///
/// An empty result is a [`AsfError::NoMatch`] so "no subscriptions" cannot be
/// confused with a transport failure.
pub fn list_subscriptions<A: Hyp3Api>(api: &A) -> AsfResult<Vec<Subscription>> {
    let subscriptions = api.get_subscriptions(true)?;
    if subscriptions.is_empty() {
        return Err(AsfError::NoMatch(
            "there are no subscriptions associated with this account".to_string(),
        ));
    }
    Ok(subscriptions)
}

/// Prompt the user to pick a subscription id from the list
///
/// Re-prompts indefinitely on non-numeric or out-of-set input.
pub fn pick_subscription<P: Prompt>(
    prompt: &mut P,
    subscriptions: &[Subscription],
) -> AsfResult<i64> {
    if subscriptions.is_empty() {
        return Err(AsfError::InvalidInput(
            "there are no subscriptions in the passed list".to_string(),
        ));
    }

    for subscription in subscriptions {
        println!("\nSubscription id: {} {}", subscription.id, subscription.name);
    }
    loop {
        let choice = prompt.read_line("Pick a subscription ID from the above list:")?;
        match choice.trim().parse::<i64>() {
            Ok(id) if subscriptions.iter().any(|s| s.id == id) => return Ok(id),
            _ => println!("\nInvalid ID"),
        }
    }
}
