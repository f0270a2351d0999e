// src/catalog.rs
// Cable guide catalog client (first-side and second-side connector lists)

use crate::config::CatalogConfig;
use crate::error::{AssistError, Result};
use crate::http::{DownstreamFailure, ErrorPayload};
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

const CATALOG_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:145.0) Gecko/20100101 Firefox/145.0";

const ENDS_A_PATH: &str = "CableGuide/GetCableEndTypesA";
const ENDS_B_PATH: &str = "CableGuide/GetCableEndTypesB";

/// First-side connector list served when the catalog is configured to skip
/// the live call
pub const BUILTIN_CABLE_ENDS_A: &[&str] = &[
    "2.5mm Female",
    "2.5mm Male",
    "3.5mm Female",
    "3.5mm Male",
    "6.35mm Female",
    "6.35mm Male",
    "Power Type I - Australia Male",
    "BNC Female",
    "BNC Male",
    "Power Type N - Brazil Female",
    "Power Type N - Brazil Male",
    "Power Type C13 Female",
    "Power Type C14 Male",
    "Power Type C15 Female",
    "Power Type C19 Female",
    "Power Type C20 Male",
    "C21 coupler Female",
    "Power Type C5 Female",
    "Power Type C7 Female",
    "DB25 Female",
    "DB25 Male",
    "DB9 Female",
    "DB9 Male",
    "Power Type K - Denmark Female",
    "Power Type K - Denmark Male",
    "Powerstrip Type K - Denmark",
    "DisplayPort Female",
    "DisplayPort Male",
    "DVI-D Female",
    "DVI-D Male",
    "DVI-I Female",
    "DVI-I Male",
    "E2000 Male",
    "Power Type C - EU Male",
    "FC Male",
    "Powerstrip Type E - French",
    "HDMI Female",
    "HDMI Male",
    "HDMI Micro Male",
    "HDMI Mini Female",
    "HDMI Mini Male",
    "IEC Female",
    "IEC Male",
    "Power Type D - India Male",
    "Power Type L - Italy Male",
    "LC Female",
    "LC Male",
    "Lightning Female",
    "Lightning Male",
    "Mini DisplayPort Female",
    "Mini DisplayPort Male",
    "MPO/MTP Female",
    "MPO/MTP Male",
    "MTRJ Male",
    "MU/UPC Male",
    "Multi Male",
    "Open End",
    "PS/2 Female",
    "PS/2 Male",
    "QSFP+ Male",
    "RCA Female",
    "RCA Male",
    "RJ11 Female",
    "RJ11 Male",
    "RJ12 Male",
    "RJ45 Female",
    "RJ45 Male",
    "RP-SMA Female",
    "RP-SMA Male",
    "SATA 15-pin Female",
    "SATA 15-pin Male",
    "SATA 7-pin Female",
    "SATA 7-pin Male",
    "SC Female",
    "SC Male",
    "Power Type E/F - Schuko Female",
    "Power Type E/F - Schuko Male",
    "Powerstrip Type F - Schuko",
    "SFF Male",
    "SFP Male",
    "Power Type M - South Africa Male",
    "Speaker Raw Cable Male",
    "ST Male",
    "ST/UPC Male",
    "Power Type J - Switzerland Female",
    "Power Type J - Switzerland Male",
    "Thunderbolt Male",
    "TOSLINK Male",
    "Power Type G - UK Male",
    "Powerstrip Type G - UK",
    "Power Type A - USA Male",
    "Power Type B - USA Male",
    "USB A Female",
    "USB A Male",
    "USB B Female",
    "USB B Male",
    "USB C Female",
    "USB C Male",
    "USB Micro A Male",
    "USB Micro B Female",
    "USB Micro B Male",
    "USB Mini B Male",
    "VGA Female",
    "VGA Male",
    "XLR (3-pin) Female",
    "XLR (3-pin) Male",
];

/// Cable guide catalog client
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
    builtin_ends_a: bool,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, config: &CatalogConfig) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: catalog_headers(config)?,
            builtin_ends_a: config.builtin_ends_a,
        })
    }

    /// All first-side connector types
    pub async fn cable_ends_a(&self) -> std::result::Result<Vec<String>, DownstreamFailure> {
        if self.builtin_ends_a {
            debug!(count = BUILTIN_CABLE_ENDS_A.len(), "Serving built-in cable ends A");
            return Ok(BUILTIN_CABLE_ENDS_A.iter().map(|s| s.to_string()).collect());
        }
        self.fetch_cable_types(ENDS_A_PATH, &[]).await
    }

    /// Second-side connector types compatible with `cable_end_a`
    pub async fn cable_ends_b(
        &self,
        cable_end_a: &str,
    ) -> std::result::Result<Vec<String>, DownstreamFailure> {
        self.fetch_cable_types(ENDS_B_PATH, &[("cableEndTypeA", cable_end_a)])
            .await
    }

    async fn fetch_cable_types(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Vec<String>, DownstreamFailure> {
        let start_time = Instant::now();
        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        let cable_types = parse_cable_types(&body);

        info!(
            path = %path,
            query = ?query,
            results = cable_types.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Catalog lookup complete"
        );

        Ok(cable_types)
    }
}

/// Fixed header set expected by the catalog API
fn catalog_headers(config: &CatalogConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(CATALOG_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let custom = [
        ("x-eet-culture", &config.culture),
        ("x-eet-businessentityid", &config.business_entity_id),
        ("x-eet-marketid", &config.market_id),
        ("x-eet-siteid", &config.site_id),
    ];
    for (name, value) in custom {
        let value = HeaderValue::from_str(value)
            .map_err(|e| AssistError::Config(format!("invalid {} header: {}", name, e)))?;
        headers.insert(HeaderName::from_static(name), value);
    }

    Ok(headers)
}

/// Ids of `model.cableTypes[*]`; anything else yields an empty list
pub fn parse_cable_types(body: &Value) -> Vec<String> {
    body.pointer("/model/cableTypes")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .filter_map(|item| item.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Tool payload for a failed catalog call
pub fn failure_payload(failure: &DownstreamFailure) -> ErrorPayload {
    let payload = match failure {
        DownstreamFailure::Status(status) => ErrorPayload::new(
            format!("API error: {}", status.as_u16()),
            "Could not fetch cable end types",
        ),
        DownstreamFailure::Timeout => {
            ErrorPayload::new("timeout", "Cable catalog API request timed out")
        }
        DownstreamFailure::Other(e) => {
            ErrorPayload::new("unknown", format!("Unexpected error: {}", e))
        }
    };
    warn!(error = %payload.error, message = %payload.message, "Catalog lookup failed");
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    fn test_config() -> CatalogConfig {
        CatalogConfig {
            base_url: "http://127.0.0.1:1/api/".into(),
            culture: "en-zz".into(),
            business_entity_id: "9".into(),
            market_id: "1006".into(),
            site_id: "23".into(),
            builtin_ends_a: false,
        }
    }

    #[test]
    fn test_parse_cable_types() {
        let body = json!({"model": {"cableTypes": [
            {"id": "HDMI Male", "name": "HDMI"},
            {"name": "no id"},
            {"id": "USB C Male"}
        ]}});
        assert_eq!(parse_cable_types(&body), vec!["HDMI Male", "USB C Male"]);
    }

    #[test]
    fn test_parse_cable_types_wrong_shape() {
        assert!(parse_cable_types(&json!({})).is_empty());
        assert!(parse_cable_types(&json!({"model": {}})).is_empty());
        assert!(parse_cable_types(&json!({"model": {"cableTypes": "x"}})).is_empty());
    }

    #[test]
    fn test_headers_carry_site_context() {
        let headers = catalog_headers(&test_config()).unwrap();
        assert_eq!(headers["x-eet-culture"], "en-zz");
        assert_eq!(headers["x-eet-businessentityid"], "9");
        assert_eq!(headers["x-eet-marketid"], "1006");
        assert_eq!(headers["x-eet-siteid"], "23");
        assert_eq!(headers[ACCEPT_ENCODING], "identity");
    }

    #[test]
    fn test_invalid_header_value_is_config_error() {
        let mut config = test_config();
        config.culture = "en\nzz".into();
        let err = catalog_headers(&config).unwrap_err();
        assert!(matches!(err, AssistError::Config(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = CatalogClient::new(reqwest::Client::new(), &test_config()).unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:1/api");
    }

    #[tokio::test]
    async fn test_builtin_ends_a_skips_network() {
        let mut config = test_config();
        config.builtin_ends_a = true;
        let client = CatalogClient::new(reqwest::Client::new(), &config).unwrap();
        let ends = client.cable_ends_a().await.unwrap();
        assert_eq!(ends.len(), BUILTIN_CABLE_ENDS_A.len());
        assert!(ends.contains(&"HDMI Male".to_string()));
    }

    #[test]
    fn test_failure_payloads() {
        let status = failure_payload(&DownstreamFailure::Status(StatusCode::BAD_GATEWAY));
        assert_eq!(status.error, "API error: 502");
        let timeout = failure_payload(&DownstreamFailure::Timeout);
        assert_eq!(timeout.error, "timeout");
        let other = failure_payload(&DownstreamFailure::Other("boom".into()));
        assert_eq!(other.message, "Unexpected error: boom");
    }
}
