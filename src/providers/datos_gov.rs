use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use reqwest::Url;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument};

use crate::core::rate::{ExchangeRate, RateProvider};

/// Most recent record only, newest validity window first.
pub const LATEST_RATE_QUERY: &str =
    "SELECT valor, vigenciadesde, vigenciahasta ORDER BY vigenciadesde DESC LIMIT 1";

/// Reads the TRM dataset published on datos.gov.co (a Socrata portal).
pub struct DatosGovProvider {
    base_url: String,
    dataset: String,
}

impl DatosGovProvider {
    pub fn new(base_url: &str, dataset: &str) -> Self {
        DatosGovProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            dataset: dataset.to_string(),
        }
    }

    fn resource_url(&self) -> Result<Url> {
        let raw = format!("{}/resource/{}.json", self.base_url, self.dataset);
        Url::parse_with_params(&raw, &[("$query", LATEST_RATE_QUERY)])
            .map_err(|e| anyhow!("Invalid data source URL {}: {}", raw, e))
    }
}

#[derive(Deserialize, Debug)]
struct TrmRecord {
    valor: Decimal,
    #[serde(deserialize_with = "deserialize_date")]
    vigenciadesde: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    vigenciahasta: NaiveDate,
}

/// Socrata sends floating timestamps (`2024-01-10T00:00:00.000`); plain
/// dates and RFC 3339 timestamps are accepted too. An offset timestamp keeps
/// the calendar date written in its own offset.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

#[async_trait]
impl RateProvider for DatosGovProvider {
    #[instrument(name = "DatosGovRateFetch", skip(self), fields(dataset = %self.dataset))]
    async fn fetch_latest(&self) -> Result<Vec<ExchangeRate>> {
        let url = self.resource_url()?;
        debug!("Requesting TRM data from {}", url);

        let client = reqwest::Client::builder().user_agent("trm/1.0").build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        let text = response.text().await?;
        debug!(body = %text, "Received TRM response");

        let records: Vec<TrmRecord> = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse TRM response: {}", e))?;

        records
            .into_iter()
            .map(|r| {
                ExchangeRate::new(r.valor, r.vigenciadesde, r.vigenciahasta)
                    .map_err(|e| anyhow!("Invalid TRM record: {}", e))
            })
            .collect()
    }
}
