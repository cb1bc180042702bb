//! Paginated client for the DNS provider's list endpoints

use std::time::Duration;

use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::constants::defaults::{RECORDS_PER_PAGE, ZONES_PER_PAGE};
use crate::error::{Error, Result};
use crate::models::{ApiEnvelope, DnsRecord, Zone};
use crate::utils::http::build_client;

/// Client for a page-number paginated JSON API authenticated with a bearer
/// token.
///
/// Every failure ends the whole listing: callers never see partial results.
pub struct DnsApiClient {
    client: Client,
    api_base: String,
    token: String,
}

impl DnsApiClient {
    pub fn new(api_base: &str, token: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        Ok(DnsApiClient {
            client: build_client(timeout, user_agent)?,
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// All zones visible to the token.
    pub async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.get_paginated("/zones", &[], ZONES_PER_PAGE).await
    }

    /// All DNS records of one zone.
    pub async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let path = format!("/zones/{}/dns_records", zone_id);
        self.get_paginated(&path, &[], RECORDS_PER_PAGE).await
    }

    /// Fetch every page of `path` and concatenate the `result` arrays.
    ///
    /// Page 1 is always requested; further pages follow while
    /// `page < result_info.total_pages`.
    pub async fn get_paginated<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        per_page: u32,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let envelope: ApiEnvelope<T> = self.get_page(path, query, page, per_page).await?;
            let total_pages = envelope.total_pages();
            items.extend(envelope.result.unwrap_or_default());

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        debug!("{}: {} item(s) over {} page(s)", path, items.len(), page);
        Ok(items)
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        page: u32,
        per_page: u32,
    ) -> Result<ApiEnvelope<T>> {
        let url = format!("{}{}", self.api_base, path);
        debug!("GET {} page={} per_page={}", url, page, per_page);

        let page_str = page.to_string();
        let per_page_str = per_page.to_string();
        let mut params: Vec<(&str, &str)> =
            vec![("page", page_str.as_str()), ("per_page", per_page_str.as_str())];
        params.extend_from_slice(query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        debug!("Response Status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            if status == StatusCode::FORBIDDEN {
                error!("Permission denied: the token needs Zone:Read and DNS:Read");
            }
            return Err(Error::Auth(format!("{} returned {}", path, status)));
        }

        let body = response.text().await?;
        let envelope: ApiEnvelope<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                error!("Invalid JSON from {}: {}", url, e);
                return Err(Error::Parse(e.to_string()));
            }
            Err(_) => {
                return Err(Error::Http {
                    status: status.as_u16(),
                })
            }
        };

        if !envelope.success {
            let message = envelope.error_message();
            error!("API error on {}: {}", path, message);
            return Err(Error::Api { message });
        }
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        Ok(envelope)
    }
}
