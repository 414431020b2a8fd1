//! Spanish fuel-price feed client.
//!
//! Fetches the Ministry's `EstacionesTerrestres` listing and normalizes
//! it into `Station` records. The feed publishes prices and coordinates
//! as comma-decimal strings, blank when unknown.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Station, StationId};

use super::error::CatalogError;

/// Default base URL for the fuel-price feed.
const DEFAULT_BASE_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes";

/// Wrapper object around the station list.
#[derive(Debug, Deserialize)]
pub struct StationListing {
    #[serde(rename = "ListaEESSPrecio")]
    pub stations: Vec<StationDto>,
}

/// Raw station record as published by the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct StationDto {
    #[serde(rename = "IDEESS")]
    pub id: String,
    #[serde(rename = "Rótulo")]
    pub name: Option<String>,
    #[serde(rename = "Dirección")]
    pub address: Option<String>,
    #[serde(rename = "Municipio")]
    pub municipality: Option<String>,
    #[serde(rename = "Provincia")]
    pub province: Option<String>,
    #[serde(rename = "Latitud")]
    pub latitude: Option<String>,
    #[serde(rename = "Longitud (WGS84)")]
    pub longitude: Option<String>,
    #[serde(rename = "Precio Gasolina 95 E5")]
    pub price_95: Option<String>,
    #[serde(rename = "Precio Gasoleo A")]
    pub price_diesel: Option<String>,
    #[serde(rename = "Horario")]
    pub opening_hours: Option<String>,
}

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Base URL for the feed
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CatalogClientConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the fuel-price feed.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    pub fn new(config: CatalogClientConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Fetch and normalize the full station listing.
    pub async fn fetch_all(&self) -> Result<Vec<Arc<Station>>, CatalogError> {
        let url = format!("{}/EstacionesTerrestres/", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let listing: StationListing =
            serde_json::from_str(&body).map_err(|e| CatalogError::Json {
                message: e.to_string(),
            })?;

        Ok(listing
            .stations
            .into_iter()
            .map(|dto| Arc::new(normalize(dto)))
            .collect())
    }
}

/// Convert a raw feed record into a domain `Station`.
pub fn normalize(dto: StationDto) -> Station {
    Station {
        id: StationId::new(dto.id),
        name: dto.name,
        address: dto.address,
        municipality: dto.municipality,
        province: dto.province,
        lat: parse_decimal(dto.latitude.as_deref()),
        lng: parse_decimal(dto.longitude.as_deref()),
        fuel95: parse_decimal(dto.price_95.as_deref()),
        fuel_diesel: parse_decimal(dto.price_diesel.as_deref()),
        horario: dto.opening_hours.filter(|h| !h.trim().is_empty()),
    }
}

/// Parse a comma-decimal numeric field; blank or malformed becomes `None`.
fn parse_decimal(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> StationDto {
        StationDto {
            id: "4805".to_string(),
            name: Some("REPSOL".to_string()),
            address: Some("CR N-401 KM. 12".to_string()),
            municipality: Some("Getafe".to_string()),
            province: Some("MADRID".to_string()),
            latitude: Some("40,304167".to_string()),
            longitude: Some("-3,732222".to_string()),
            price_95: Some("1,589".to_string()),
            price_diesel: Some("".to_string()),
            opening_hours: Some("L-D: 24H".to_string()),
        }
    }

    #[test]
    fn normalize_parses_comma_decimals() {
        let station = normalize(dto());

        assert_eq!(station.id.as_str(), "4805");
        assert_eq!(station.lat, Some(40.304167));
        assert_eq!(station.lng, Some(-3.732222));
        assert_eq!(station.fuel95, Some(1.589));
    }

    #[test]
    fn normalize_blanks_to_none() {
        let station = normalize(dto());
        assert_eq!(station.fuel_diesel, None);

        let mut raw = dto();
        raw.opening_hours = Some("   ".to_string());
        assert_eq!(normalize(raw).horario, None);
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(Some("no es un número")), None);
        assert_eq!(parse_decimal(Some("NaN")), None);
        assert_eq!(parse_decimal(None), None);
        assert_eq!(parse_decimal(Some("1,234")), Some(1.234));
    }

    #[test]
    fn parse_feed_listing() {
        let json = r#"{
            "Fecha": "29/08/2026 8:00:00",
            "ListaEESSPrecio": [{
                "IDEESS": "1039",
                "Rótulo": "CEPSA",
                "Dirección": "AVENIDA DE MADRID, 30",
                "Municipio": "Alcalá de Henares",
                "Provincia": "MADRID",
                "Latitud": "40,481639",
                "Longitud (WGS84)": "-3,364306",
                "Precio Gasolina 95 E5": "1,649",
                "Precio Gasoleo A": "1,539",
                "Horario": "L-V: 07:00-22:00"
            }]
        }"#;

        let listing: StationListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.stations.len(), 1);

        let station = normalize(listing.stations[0].clone());
        assert_eq!(station.brand().as_deref(), Some("CEPSA"));
        assert_eq!(station.fuel_diesel, Some(1.539));
    }
}
