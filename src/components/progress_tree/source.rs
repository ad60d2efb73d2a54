//! Remote hierarchy loading.
//!
//! The data source is a single JSON GET whose body is an array; the first
//! element is the root of the tree. There are no retries: a failure is
//! reported to the console and the chart never appears.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::types::TreeDatum;

/// The data URL may live on another origin.
const FETCH_MODE: RequestMode = RequestMode::Cors;

/// Reasons the hierarchy could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The browser fetch failed or returned a non-success status.
	#[error("fetch failed: {0}")]
	Fetch(String),
	/// The body was not a JSON array of tree nodes.
	#[error("invalid hierarchy JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// The body parsed but contained no root element.
	#[error("hierarchy is empty")]
	EmptyHierarchy,
}

impl From<JsValue> for LoadError {
	fn from(value: JsValue) -> Self {
		LoadError::Fetch(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Parses the response body, returning the first element as the root.
pub fn parse_hierarchy(json: &str) -> Result<TreeDatum, LoadError> {
	let roots: Vec<TreeDatum> = serde_json::from_str(json)?;
	roots.into_iter().next().ok_or(LoadError::EmptyHierarchy)
}

/// Fetches and parses the hierarchy at `url`.
pub async fn fetch_hierarchy(url: &str) -> Result<TreeDatum, LoadError> {
	let window = web_sys::window().ok_or_else(|| LoadError::Fetch("no window".into()))?;

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(FETCH_MODE);
	let request = Request::new_with_str_and_init(url, &opts)?;
	request.headers().set("Accept", "application/json")?;

	let response: Response = JsFuture::from(window.fetch_with_request(&request))
		.await?
		.dyn_into()?;
	if !response.ok() {
		return Err(LoadError::Fetch(format!(
			"{} returned HTTP {}",
			url,
			response.status()
		)));
	}

	let text = JsFuture::from(response.text()?).await?;
	let body = text
		.as_string()
		.ok_or_else(|| LoadError::Fetch("response body is not text".into()))?;
	parse_hierarchy(&body)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn fetch_allows_cross_origin_urls() {
		assert_eq!(FETCH_MODE, RequestMode::Cors);
	}

	#[test]
	fn first_array_element_is_root() {
		let json = r#"[
			{ "name": "root", "value": 40, "children": [
				{ "name": "a", "value": 120 },
				{ "name": "b", "value": 10, "children": [] }
			]},
			{ "name": "ignored", "value": 0 }
		]"#;
		let root = parse_hierarchy(json).unwrap();
		assert_eq!(root.name, "root");
		let children = root.children.unwrap();
		assert_eq!(children.len(), 2);
		assert_eq!(children[0], TreeDatum::leaf("a", 120.0));
		assert_eq!(children[1].children, Some(Vec::new()));
	}

	#[test]
	fn missing_fields_take_defaults() {
		let root = parse_hierarchy(r#"[{ "children": [{ "name": "x" }] }]"#).unwrap();
		assert_eq!(root.name, "");
		assert_eq!(root.value, 0.0);
		assert_eq!(root.children.unwrap()[0].value, 0.0);
	}

	#[test]
	fn empty_array_is_an_error() {
		assert!(matches!(parse_hierarchy("[]"), Err(LoadError::EmptyHierarchy)));
	}

	#[test]
	fn non_array_body_is_a_json_error() {
		assert!(matches!(
			parse_hierarchy(r#"{ "name": "root" }"#),
			Err(LoadError::Json(_))
		));
	}
}
