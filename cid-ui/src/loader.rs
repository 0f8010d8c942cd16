//! Browser-side loading of the two data files.
//!
//! Both requests are issued together and the dataset is only built once
//! both have arrived, so the dashboard never sees half a load.

use cid_core::dataset::Dataset;
use cid_core::error::LoadError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Default location of the disease CSV, relative to the page.
pub const DISEASE_CSV_URL: &str = "data/infectious-disease-data.csv";
/// Default location of the county TopoJSON, relative to the page.
pub const TOPOLOGY_URL: &str = "data/california-map.json";

fn fetch_error(location: &str, message: impl Into<String>) -> LoadError {
    LoadError::Fetch {
        location: location.to_string(),
        message: message.into(),
    }
}

fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Fetch one URL and return its body as text.
pub async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let window = web_sys::window().ok_or_else(|| fetch_error(url, "no window"))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fetch_error(url, js_message(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| fetch_error(url, js_message(&e)))?;

    if !response.ok() {
        return Err(fetch_error(url, format!("HTTP {}", response.status())));
    }

    let text = response
        .text()
        .map_err(|e| fetch_error(url, js_message(&e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| fetch_error(url, js_message(&e)))?;

    text.as_string()
        .ok_or_else(|| fetch_error(url, "response body is not text"))
}

/// Fetch the disease CSV and the TopoJSON concurrently and build the dataset.
///
/// Fails as a whole if either request or either parse fails.
pub async fn fetch_dataset(disease_url: &str, topology_url: &str) -> Result<Dataset, LoadError> {
    log::info!(
        "[CID] loader: fetching {} and {}",
        disease_url,
        topology_url
    );
    let (disease_csv, topology_json) =
        futures::try_join!(fetch_text(disease_url), fetch_text(topology_url))?;
    let dataset = Dataset::from_sources(&disease_csv, &topology_json)?;
    log::info!(
        "[CID] loader: {} records, {} counties",
        dataset.records().len(),
        dataset.counties().len()
    );
    Ok(dataset)
}
