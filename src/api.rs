//! OpenWeatherMap current-weather client

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{UnitSystem, WeatherRecord};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Icons are served from a separate host
pub const ICON_BASE_URL: &str = "http://openweathermap.org/img/w";

/// Why a fetch did not produce a record
#[derive(thiserror::Error, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum FetchError {
    #[error("location code is empty")]
    EmptyCode,
    #[error("request failed: {0}")]
    Network(String),
    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("unexpected response: {0}")]
    MalformedResponse(String),
}

/// Where and how to reach the weather provider
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub units: UnitSystem,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            units: UnitSystem::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }
}

// ============================================================================
// Provider response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    weather: Vec<Condition>,
    main: Measurements,
    wind: Wind,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    icon: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Measurements {
    temp: f64,
    temp_max: f64,
    temp_min: f64,
}

#[derive(Debug, Deserialize)]
struct Wind {
    speed: f64,
}

/// Normalize a provider body into a [`WeatherRecord`]
pub fn parse_weather(body: &str) -> Result<WeatherRecord, FetchError> {
    let data: CurrentWeatherResponse =
        serde_json::from_str(body).map_err(|e| FetchError::MalformedResponse(e.to_string()))?;

    let condition = data
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::MalformedResponse("missing weather[0]".into()))?;

    Ok(WeatherRecord {
        condition_name: condition.main,
        location_name: data.name,
        icon_id: condition.icon,
        description: condition.description,
        temp_current: data.main.temp,
        temp_max: data.main.temp_max,
        temp_min: data.main.temp_min,
        wind_speed: data.wind.speed,
    })
}

// ============================================================================
// Client
// ============================================================================

pub struct WeatherClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl WeatherClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn weather_url(&self, code: &str) -> String {
        format!(
            "{}/weather?q={}&appid={}&units={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(code),
            urlencoding::encode(&self.config.api_key),
            self.config.units.query_value()
        )
    }

    /// Fetch current weather for one location code
    pub async fn fetch_weather(&self, code: &str) -> Result<WeatherRecord, FetchError> {
        if code.trim().is_empty() {
            return Err(FetchError::EmptyCode);
        }

        let url = self.weather_url(code);
        tracing::debug!(url = %redact_credential(&url), "fetching weather");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                code,
                status = status.as_u16(),
                "weather provider rejected request"
            );
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let record = parse_weather(&body)?;
        tracing::info!(
            code,
            location = %record.location_name,
            condition = %record.condition_name,
            "weather loaded"
        );
        Ok(record)
    }
}

/// The request URL with the `appid` value masked, for logging
fn redact_credential(url: &str) -> String {
    let Ok(mut parsed) = reqwest::Url::parse(url) else {
        return url.to_string();
    };
    if !parsed.query_pairs().any(|(key, _)| key == "appid") {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = match key.as_ref() {
                "appid" => "***".to_string(),
                _ => value.into_owned(),
            };
            (key.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
