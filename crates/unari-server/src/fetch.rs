//! Unicafe menu client.
//!
//! Fetches the restaurant list from the Unicafe JSON API and converts it to
//! [`MenuRecord`]s. The wire format is kept private to this module:
//!
//! ```json
//! [{ "title": "Physicum",
//!    "menuData": { "menus": [{ "date": "Ma 02.06.", "data": [{ "name": "Soup" }] }] } }]
//! ```

use std::time::Duration;

use serde::Deserialize;
use unari_core::{ConfigError, FetchError, MenuDay, MenuEntry, MenuRecord, MenuSource};

/// Restaurants endpoint of the Unicafe API, English menus.
pub const DEFAULT_MENU_URL: &str = "https://unicafe.fi/wp-json/swiss/v1/restaurants/?lang=en";

#[derive(Debug, Deserialize)]
struct RestaurantDto {
    title: String,
    #[serde(rename = "menuData", default)]
    menu_data: MenuDataDto,
}

#[derive(Debug, Default, Deserialize)]
struct MenuDataDto {
    #[serde(default)]
    menus: Vec<MenuDto>,
}

#[derive(Debug, Deserialize)]
struct MenuDto {
    date: String,
    #[serde(default)]
    data: Vec<MealDto>,
}

#[derive(Debug, Deserialize)]
struct MealDto {
    name: String,
}

impl From<RestaurantDto> for MenuRecord {
    fn from(dto: RestaurantDto) -> Self {
        let title = dto.title.trim().to_string();
        let entries = dto
            .menu_data
            .menus
            .into_iter()
            .filter_map(|menu| {
                let Some(day) = MenuDay::parse(&menu.date) else {
                    tracing::debug!(restaurant = %title, date = %menu.date, "skipping menu with unparseable date");
                    return None;
                };
                let items = menu.data.into_iter().map(|meal| meal.name.trim().to_string()).collect();
                Some(MenuEntry { day, items })
            })
            .collect();

        Self { title, entries }
    }
}

/// Decode an API response body into menu records, in upstream order.
pub fn decode_restaurants(body: &[u8]) -> Result<Vec<MenuRecord>, FetchError> {
    let restaurants: Vec<RestaurantDto> =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(restaurants.into_iter().map(MenuRecord::from).collect())
}

/// HTTP client for the restaurants endpoint.
#[derive(Debug, Clone)]
pub struct UnicafeClient {
    http: reqwest::Client,
    url: String,
}

impl UnicafeClient {
    /// Create a client for `url` whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("unari/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Invalid(format!("HTTP client: {e}")))?;

        Ok(Self { http, url: url.into() })
    }

    /// Endpoint this client fetches.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MenuSource for UnicafeClient {
    async fn fetch(&self) -> Result<Vec<MenuRecord>, FetchError> {
        let response =
            self.http.get(&self.url).send().await.map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let restaurants: Vec<RestaurantDto> = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Request(e.to_string())
            }
        })?;

        let records: Vec<MenuRecord> = restaurants.into_iter().map(MenuRecord::from).collect();
        tracing::debug!(restaurants = records.len(), url = %self.url, "menu data fetched");
        Ok(records)
    }
}
