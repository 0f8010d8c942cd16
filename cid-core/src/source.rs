//! Native loading of the two input files, from disk or over HTTP.

use crate::dataset::Dataset;
use crate::error::LoadError;
use log::{info, warn};
use reqwest::{Client, StatusCode};

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

async fn fetch_remote(client: &Client, url: &str) -> Result<String, LoadError> {
    let fetch_error = |message: String| LoadError::Fetch {
        location: url.to_string(),
        message,
    };
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;
    if response.status() != StatusCode::OK {
        warn!("Bad response status for {}: {}", url, response.status());
        return Err(fetch_error(format!("status {}", response.status())));
    }
    response.text().await.map_err(|e| fetch_error(e.to_string()))
}

/// Read one input, either a local path or an `http(s)://` URL.
pub async fn read_source(client: &Client, location: &str) -> Result<String, LoadError> {
    if is_remote(location) {
        info!("Fetching {}", location);
        fetch_remote(client, location).await
    } else {
        info!("Reading {}", location);
        tokio::fs::read_to_string(location)
            .await
            .map_err(|source| LoadError::Io {
                location: location.to_string(),
                source,
            })
    }
}

/// Load the disease table and the topology concurrently and join them.
///
/// Nothing is parsed until both reads have completed; the first failure of
/// either read fails the whole load.
pub async fn load_dataset(disease_location: &str, topology_location: &str) -> Result<Dataset, LoadError> {
    let client = Client::new();
    let (disease_csv, topology_json) = tokio::try_join!(
        read_source(&client, disease_location),
        read_source(&client, topology_location),
    )?;
    Dataset::from_sources(&disease_csv, &topology_json)
}
