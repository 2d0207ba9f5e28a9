/// npm registry metadata shown on the demo front-end.
use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::Error;

pub const NPM_REGISTRY: &str = "https://registry.npmjs.org/";
pub const NPM_DOWNLOADS: &str = "https://api.npmjs.org/downloads/range/";
pub const NPM_PACKAGE_PAGE: &str = "https://www.npmjs.com/package/";

// Request timeout, in seconds
const NPM_REQUEST_TIMEOUT: u64 = 15;

#[derive(Deserialize, Debug)]
pub struct Metadata {
    #[serde(rename = "dist-tags")]
    pub dist_tags: DistTags,
    #[serde(default)]
    pub versions: HashMap<String, VersionData>,
    pub time: HashMap<String, String>,
    pub readme: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DistTags {
    pub latest: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct VersionData {
    pub license: Option<serde_json::Value>,
    pub repository: Option<serde_json::Value>,
    pub author: Option<serde_json::Value>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
pub struct DownloadData {
    pub downloads: Vec<DailyDownloads>,
}

#[derive(Deserialize, Debug)]
pub struct DailyDownloads {
    pub day: String,
    pub downloads: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    pub package_name: String,
    pub total_downloads: u64,
    pub first_publish_date: String,
    pub latest_version: String,
    pub last_updated: String,
    pub license: String,
    pub repository_url: String,
    pub author_name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub npm_url: String,
    pub readme: String,
}

pub struct NpmClient {
    registry_url: String,
    downloads_url: String,
    client: reqwest::Client,
}

impl NpmClient {
    pub fn new() -> Result<Self, Error> {
        Self::with_urls(NPM_REGISTRY, NPM_DOWNLOADS)
    }

    /// Client for a registry mirror. Both URLs end with a slash.
    pub fn with_urls(registry_url: &str, downloads_url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(NPM_REQUEST_TIMEOUT))
            .build()
            .map_err(|e| Error::Npm(e.to_string()))?;

        Ok(Self {
            registry_url: registry_url.to_string(),
            downloads_url: downloads_url.to_string(),
            client,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        let resp = self
            .client
            .get(reqwest::Url::parse(url).map_err(|e| Error::Npm(e.to_string()))?)
            .send()
            .await
            .map_err(|e| Error::Npm(e.to_string()))?;

        let body: serde_json::Value = resp.json().await.map_err(|e| Error::Npm(e.to_string()))?;

        // The registry reports unknown packages as {"error": "Not found"}
        if let Some(err) = body.get("error") {
            let msg = err.as_str().map(String::from).unwrap_or_else(|| err.to_string());
            return Err(Error::Npm(msg));
        }

        serde_json::from_value(body).map_err(|e| Error::Npm(e.to_string()))
    }

    pub async fn package_details(&self, package_name: &str) -> Result<PackageDetails, Error> {
        let metadata: Metadata = self
            .fetch(&format!("{}{}", self.registry_url, package_name))
            .await?;

        let created = metadata
            .time
            .get("created")
            .map(|t| iso_date(t))
            .ok_or_else(|| Error::Npm("package has no creation time".to_string()))?;
        let today = Utc::now().format("%Y-%m-%d").to_string();

        let downloads: DownloadData = self
            .fetch(&format!("{}{}:{}/{}", self.downloads_url, created, today, package_name))
            .await?;

        Ok(format_details(package_name, &metadata, &downloads))
    }
}

/// `YYYY-MM-DD` part of an RFC 3339 timestamp
fn iso_date(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(t) => t.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => timestamp.chars().take(10).collect(),
    }
}

/// `license` is either "MIT" or `{"type": "MIT"}` in older packages
fn string_or_field(value: Option<&serde_json::Value>, field: &str) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Object(o) => o.get(field).and_then(|v| v.as_str()).map(String::from),
        _ => None,
    }
}

pub fn format_details(package_name: &str, metadata: &Metadata, downloads: &DownloadData) -> PackageDetails {
    let latest = metadata.dist_tags.latest.clone();
    let default_version = VersionData::default();
    let version = metadata.versions.get(&latest).unwrap_or(&default_version);

    PackageDetails {
        package_name: package_name.to_string(),
        total_downloads: downloads.downloads.iter().map(|d| d.downloads).sum(),
        first_publish_date: metadata.time.get("created").map(|t| iso_date(t)).unwrap_or_default(),
        last_updated: metadata.time.get(&latest).map(|t| iso_date(t)).unwrap_or_default(),
        latest_version: latest,
        license: string_or_field(version.license.as_ref(), "type")
            .unwrap_or_else(|| "No license specified".to_string()),
        repository_url: string_or_field(version.repository.as_ref(), "url")
            .unwrap_or_else(|| "No repository URL".to_string()),
        author_name: string_or_field(version.author.as_ref(), "name")
            .unwrap_or_else(|| "No author specified".to_string()),
        description: version
            .description
            .clone()
            .unwrap_or_else(|| "No description available".to_string()),
        keywords: version.keywords.clone().unwrap_or_default(),
        npm_url: format!("{}{}", NPM_PACKAGE_PAGE, package_name),
        readme: metadata
            .readme
            .clone()
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "No README available".to_string()),
    }
}
