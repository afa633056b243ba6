//! One-shot fetch of the dataset document.

use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::model::Dataset;

/// Relative path of the generated dataset document.
pub const DATA_URL: &str = "data/network.json";

/// Failure to load the dataset. Rendered as a static on-page message; the
/// rest of the UI stays interactive but empty.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The fetch itself failed (offline, blocked, bad origin).
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("server returned status {0}")]
	Http(u16),
	/// The document was not valid dataset JSON.
	#[error("malformed network data: {0}")]
	Parse(#[from] serde_json::Error),
}

fn js_message(value: JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Fetch and parse the dataset from `url`. No retries; called once at
/// startup.
pub async fn fetch_dataset(url: &str) -> Result<Dataset, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Network("no window".into()))?;
	let response = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| LoadError::Network(js_message(e)))?;
	let response: Response = response
		.dyn_into()
		.map_err(|e| LoadError::Network(js_message(e)))?;
	if !response.ok() {
		return Err(LoadError::Http(response.status()));
	}
	let body = JsFuture::from(
		response
			.text()
			.map_err(|e| LoadError::Network(js_message(e)))?,
	)
	.await
	.map_err(|e| LoadError::Network(js_message(e)))?;
	let text = body.as_string().unwrap_or_default();
	Ok(Dataset::from_json(&text)?)
}
