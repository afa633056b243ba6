//! Download of the current filtered view as a JSON document.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::filter::FilteredView;

/// File name offered for the download.
pub const EXPORT_FILE_NAME: &str = "hidden-networks.json";

/// Serialize `view` with the same node/edge shape as the input file, so the
/// export round-trips through `Dataset::from_json`.
pub fn view_to_json(view: &FilteredView) -> Result<String, serde_json::Error> {
	serde_json::to_string_pretty(view)
}

/// Serialize the view and trigger a browser download via a synthetic anchor.
pub fn download_view(view: &FilteredView) -> Result<(), JsValue> {
	let json = view_to_json(view).map_err(|e| JsValue::from_str(&e.to_string()))?;

	let parts = Array::of1(&JsValue::from_str(&json));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(EXPORT_FILE_NAME);
	anchor.click();
	Url::revoke_object_url(&url)?;
	Ok(())
}
