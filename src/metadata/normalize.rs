//! Normalization of movie-data API documents into [`CanonicalFilm`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::ResolveError;
use crate::models::CanonicalFilm;

/// Raw film document as returned by the API. Every field is optional.
///
/// Only `name` is strict. Any other field with an unexpected shape is
/// dropped rather than failing the whole document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FilmPage {
    #[serde(deserialize_with = "lenient")]
    id: Option<u64>,
    name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    alternative_name: Option<String>,
    #[serde(deserialize_with = "year_from_any")]
    year: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    rating: Option<BTreeMap<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    votes: Option<BTreeMap<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
    poster: Option<Value>,
}

/// Decode a field when it has the expected shape, otherwise leave it absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// The API sends the year as a number, but older documents carry a string.
fn year_from_any<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn numeric_map(raw: Option<BTreeMap<String, Value>>) -> BTreeMap<String, Option<f64>> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|(source, value)| (source, value.as_f64()))
        .collect()
}

fn poster_url(poster: Option<&Value>) -> Option<String> {
    poster
        .and_then(|p| p.get("url"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// Build a canonical record from one API document.
///
/// `placeholder` replaces a missing or empty `poster.url`. Fields absent from
/// the document stay absent in the record.
pub fn film_from_page(page: &Value, placeholder: &str) -> Result<CanonicalFilm, ResolveError> {
    if !page.is_object() {
        return Err(ResolveError::Malformed(format!(
            "expected a film object, got {}",
            json_kind(page)
        )));
    }

    let raw = FilmPage::deserialize(page).map_err(|e| ResolveError::Malformed(e.to_string()))?;

    Ok(CanonicalFilm {
        id: raw.id,
        name: raw.name,
        alternative_name: raw.alternative_name,
        year: raw.year,
        rating: numeric_map(raw.rating),
        votes: numeric_map(raw.votes),
        description: raw.description,
        poster_url: poster_url(raw.poster.as_ref()).unwrap_or_else(|| placeholder.to_string()),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
