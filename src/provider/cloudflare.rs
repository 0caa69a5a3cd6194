use anyhow::{Context, Result};
use log::{info, warn};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ExistingRecord, ZoneValidation};
use crate::config::CloudflareConfig;

pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Checks that `api_token` can read the zone named `domain` and lists its
/// records. One attempt, no retries.
pub async fn validate(
    client: &Client,
    config: &CloudflareConfig,
    api_token: &str,
    domain: &str,
) -> Result<ZoneValidation> {
    info!("Validating Cloudflare access for zone {}", domain);

    let zone_id = find_zone(client, config, api_token, domain).await?;
    let records = list_records(client, config, api_token, &zone_id).await?;

    info!(
        "Zone {} ({}) validated with {} existing record(s)",
        domain,
        zone_id,
        records.len()
    );

    Ok(ZoneValidation { zone_id, records })
}

async fn find_zone(
    client: &Client,
    config: &CloudflareConfig,
    api_token: &str,
    domain: &str,
) -> Result<String> {
    let url = format!("{}/zones", config.api_base);

    let response = client
        .get(&url)
        .query(&[("name", domain)])
        .header("Authorization", format!("Bearer {}", api_token))
        .header("Content-Type", "application/json")
        .send()
        .await
        .context("Failed to send request to Cloudflare")?;

    let response: CloudflareListResponse<Zone> = read_response(response).await?;

    if !response.success {
        warn!("Zone lookup for {} was rejected", domain);
        anyhow::bail!("Invalid API token or insufficient permissions");
    }

    match response.result.unwrap_or_default().into_iter().next() {
        Some(zone) => Ok(zone.id),
        None => anyhow::bail!("Domain '{}' not found in your Cloudflare account", domain),
    }
}

async fn list_records(
    client: &Client,
    config: &CloudflareConfig,
    api_token: &str,
    zone_id: &str,
) -> Result<Vec<ExistingRecord>> {
    let url = format!("{}/zones/{}/dns_records", config.api_base, zone_id);

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", api_token))
        .header("Content-Type", "application/json")
        .send()
        .await
        .context("Failed to send DNS records request to Cloudflare")?;

    let response: CloudflareListResponse<ExistingRecord> = read_response(response).await?;

    if !response.success {
        anyhow::bail!("Failed to fetch DNS records");
    }

    Ok(response.result.unwrap_or_default())
}

/// Decodes the envelope; a non-2xx status surfaces the API's first error.
async fn read_response<T: DeserializeOwned>(response: Response) -> Result<CloudflareListResponse<T>> {
    let status = response.status();

    if !status.is_success() {
        let body: Option<CloudflareListResponse<serde_json::Value>> = response.json().await.ok();
        let message = body
            .and_then(|b| b.errors.into_iter().next())
            .map(|e| e.message)
            .unwrap_or_else(|| format!("Cloudflare API returned HTTP {}", status));
        anyhow::bail!(message);
    }

    response
        .json()
        .await
        .context("Failed to parse Cloudflare response")
}

// Cloudflare API types

#[derive(Debug, Deserialize)]
struct CloudflareListResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<CloudflareError>,
    result: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct CloudflareError {
    #[allow(dead_code)]
    #[serde(default)]
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, CloudflareConfig) {
        let server = MockServer::start().await;
        let config = CloudflareConfig {
            api_base: server.uri(),
            timeout_secs: 5,
        };
        (server, config)
    }

    async fn mount_zone(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/zones"))
            .and(query_param("name", "example.com"))
            .and(header("Authorization", "Bearer tok_x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{ "id": "abc123", "name": "example.com" }]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn validate_returns_zone_and_records() {
        let (server, config) = setup().await;
        mount_zone(&server).await;

        Mock::given(method("GET"))
            .and(path("/zones/abc123/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [{
                    "id": "rec1",
                    "name": "www.example.com",
                    "type": "A",
                    "content": "198.51.100.7",
                    "proxied": true,
                    "ttl": 1
                }]
            })))
            .mount(&server)
            .await;

        let result = validate(&Client::new(), &config, "tok_x", "example.com")
            .await
            .unwrap();

        assert_eq!(result.zone_id, "abc123");
        assert_eq!(
            result.records,
            vec![ExistingRecord {
                id: "rec1".into(),
                name: "www.example.com".into(),
                record_type: "A".into(),
                content: "198.51.100.7".into(),
                proxied: true,
            }]
        );
    }

    #[tokio::test]
    async fn unknown_domain_is_reported() {
        let (server, config) = setup().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": []
            })))
            .mount(&server)
            .await;

        let err = validate(&Client::new(), &config, "tok_x", "missing.com")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Domain 'missing.com' not found in your Cloudflare account"
        );
    }

    #[tokio::test]
    async fn unsuccessful_zone_lookup_means_bad_token() {
        let (server, config) = setup().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "errors": [],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = validate(&Client::new(), &config, "tok_x", "example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid API token or insufficient permissions");
    }

    #[tokio::test]
    async fn http_errors_surface_first_api_message() {
        let (server, config) = setup().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "success": false,
                "errors": [
                    { "code": 9109, "message": "Invalid access token" },
                    { "code": 1000, "message": "second" }
                ],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = validate(&Client::new(), &config, "bad", "example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid access token");
    }

    #[tokio::test]
    async fn http_errors_without_body_fall_back_to_status() {
        let (server, config) = setup().await;

        Mock::given(method("GET"))
            .and(path("/zones"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let err = validate(&Client::new(), &config, "tok_x", "example.com")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 500"), "{err}");
    }

    #[tokio::test]
    async fn failed_record_listing_is_reported() {
        let (server, config) = setup().await;
        mount_zone(&server).await;

        Mock::given(method("GET"))
            .and(path("/zones/abc123/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "errors": [],
                "result": null
            })))
            .mount(&server)
            .await;

        let err = validate(&Client::new(), &config, "tok_x", "example.com")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch DNS records");
    }
}
