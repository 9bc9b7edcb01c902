// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use estate_app::{AssetNum, CreateOutcome, NewProperty, Owner, OwnerId, Property};
use log::{debug, info};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, Response};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::Backend;

pub const DEFAULT_USERNAME: &str = "user";

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn properties_url(&self, owner: Option<OwnerId>) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint("properties"))
            .with_context(|| format!("build properties URL from {}", self.base_url))?;
        if let Some(owner_id) = owner {
            url.query_pairs_mut()
                .append_pair("owner_id", &owner_id.to_string());
        }
        Ok(url)
    }

    fn property_url(&self, asset_num: AssetNum) -> String {
        self.endpoint(&format!("properties/{asset_num}"))
    }
}

impl Backend for Client {
    fn list_owners(&self) -> Result<Vec<Owner>> {
        let url = self.endpoint("owners");
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let response = check_status(response)?;
        response.json().context("decode owner list")
    }

    fn list_properties(&self, owner: Option<OwnerId>) -> Result<Vec<Property>> {
        let url = self.properties_url(owner)?;
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        let response = check_status(response)?;
        response.json().context("decode property list")
    }

    fn create_property(&mut self, payload: &NewProperty) -> Result<CreateOutcome> {
        let url = self.endpoint("properties");
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        let body = response.text().context("read create response")?;
        let outcome = create_outcome(status, &body)?;
        if let CreateOutcome::Created(stored) = &outcome {
            match stored {
                Some(property) => info!("created property #{}", property.asset_num),
                None => info!("created property"),
            }
        }
        Ok(outcome)
    }

    fn update_property(&mut self, asset_num: AssetNum, record: &Property) -> Result<()> {
        let url = self.property_url(asset_num);
        debug!("PUT {url}");
        let response = self
            .http
            .put(&url)
            .json(record)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        check_status(response)?;
        info!("updated property #{asset_num}");
        Ok(())
    }

    fn delete_property(&mut self, asset_num: AssetNum) -> Result<()> {
        let url = self.property_url(asset_num);
        debug!("DELETE {url}");
        let response = self
            .http
            .delete(&url)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;
        check_status(response)?;
        info!("deleted property #{asset_num}");
        Ok(())
    }

    fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.endpoint("login");
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .basic_auth(username, Some(password))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            bail!("wrong password");
        }
        check_status(response)?;
        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(clean_error_response(status, &body))
}

fn create_outcome(status: StatusCode, body: &str) -> Result<CreateOutcome> {
    let value: Option<serde_json::Value> = serde_json::from_str(body).ok();
    if let Some(message) = value
        .as_ref()
        .and_then(|value| value.get("error"))
        .and_then(serde_json::Value::as_str)
    {
        return Ok(CreateOutcome::Rejected(message.to_owned()));
    }

    if !status.is_success() {
        return Err(clean_error_response(status, body));
    }

    let stored = value.and_then(|value| serde_json::from_value::<Property>(value).ok());
    Ok(CreateOutcome::Created(stored))
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- is the estate API running? ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.error.or(parsed.detail)
        && !message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), message);
    }

    if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    detail: Option<String>,
}
