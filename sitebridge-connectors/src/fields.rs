//! Ordered fallback chains for reading loosely-shaped JSON payloads.
//!
//! Each logical field is read from a literal list of candidate keys; the
//! first key present with a usable value wins. Keys may be dotted paths
//! (`data.id`, `meta.total`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sitebridge_core::RemoteId;

/// Resolves a dotted path (`meta.total`) inside `value`.
pub(crate) fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(value, |current, key| current.get(key))
        .filter(|v| !v.is_null())
}

/// First candidate holding a non-empty string. Numbers are rendered.
pub(crate) fn first_str(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(value, key))
        .find_map(scalar_string)
}

/// First candidate holding a count. Numeric strings are accepted and
/// negative values clamp to zero.
pub(crate) fn first_count(value: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .filter_map(|key| lookup(value, key))
        .find_map(count)
}

/// First candidate holding a list of names: strings, or objects with a
/// `name` key. A comma-separated string is split.
pub(crate) fn first_names(value: &Value, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter_map(|key| lookup(value, key))
        .find_map(names)
        .unwrap_or_default()
}

/// First candidate usable as a remote identifier.
pub(crate) fn first_remote_id(value: &Value, keys: &[&str]) -> Option<RemoteId> {
    keys.iter()
        .filter_map(|key| lookup(value, key))
        .find_map(|v| match v {
            Value::Number(n) => n.as_i64().map(RemoteId::Number),
            Value::String(s) if !s.is_empty() => Some(RemoteId::Text(s.clone())),
            _ => None,
        })
}

/// First candidate that is a JSON array.
pub(crate) fn first_array<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .filter_map(|key| lookup(value, key))
        .find_map(Value::as_array)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        // WordPress core REST shape: {"rendered": "..."}
        Value::Object(map) => map.get("rendered").and_then(scalar_string),
        _ => None,
    }
}

fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| n.as_f64().map(clamp_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<i64>().ok().map(|_| 0))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_float(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 { f as u64 } else { 0 }
}

fn names(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(_) => first_str(item, &["name", "title", "slug"]),
                    other => scalar_string(other),
                })
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
        _ => None,
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Deserializes a count leniently: numbers, numeric strings and `null`
/// are accepted; negatives become zero.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count(&value).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_str_order() {
        let v = json!({"name": "From name", "title": "From title"});
        assert_eq!(first_str(&v, &["title", "name"]).as_deref(), Some("From title"));
        assert_eq!(first_str(&v, &["missing", "name"]).as_deref(), Some("From name"));
        assert_eq!(first_str(&v, &["missing"]), None);
    }

    #[test]
    fn test_first_str_skips_empty_and_null() {
        let v = json!({"title": "", "name": null, "label": "ok"});
        assert_eq!(first_str(&v, &["title", "name", "label"]).as_deref(), Some("ok"));
    }

    #[test]
    fn test_first_str_reads_rendered_objects() {
        let v = json!({"title": {"rendered": "Hello"}});
        assert_eq!(first_str(&v, &["title"]).as_deref(), Some("Hello"));
    }

    #[test]
    fn test_dotted_paths() {
        let v = json!({"data": {"id": 12, "url": "https://x/12"}, "meta": {"total": "40"}});
        assert_eq!(first_remote_id(&v, &["id", "data.id"]), Some(RemoteId::Number(12)));
        assert_eq!(first_str(&v, &["url", "data.url"]).as_deref(), Some("https://x/12"));
        assert_eq!(first_count(&v, &["total", "meta.total"]), Some(40));
    }

    #[test]
    fn test_counts_never_negative() {
        let v = json!({"a": -3, "b": "-7", "c": 2.9, "d": "abc"});
        assert_eq!(first_count(&v, &["a"]), Some(0));
        assert_eq!(first_count(&v, &["b"]), Some(0));
        assert_eq!(first_count(&v, &["c"]), Some(2));
        assert_eq!(first_count(&v, &["d"]), None);
    }

    #[test]
    fn test_names_from_strings_objects_and_csv() {
        let v = json!({
            "tags": ["rust", "web"],
            "categories": [{"id": 1, "name": "News"}, {"id": 2, "name": "Tech"}],
            "labels": "a, b ,c"
        });
        assert_eq!(first_names(&v, &["tags"]), vec!["rust", "web"]);
        assert_eq!(first_names(&v, &["categories"]), vec!["News", "Tech"]);
        assert_eq!(first_names(&v, &["labels"]), vec!["a", "b", "c"]);
        assert!(first_names(&v, &["missing"]).is_empty());
    }

    #[test]
    fn test_lenient_count_deserializer() {
        #[derive(Deserialize)]
        struct Counts {
            #[serde(default, deserialize_with = "lenient_count")]
            posts: u64,
            #[serde(default, deserialize_with = "lenient_count")]
            tags: u64,
            #[serde(default, deserialize_with = "lenient_count")]
            users: u64,
        }

        let c: Counts = serde_json::from_str(r#"{"posts": "12", "tags": null}"#).unwrap();
        assert_eq!(c.posts, 12);
        assert_eq!(c.tags, 0);
        assert_eq!(c.users, 0);
    }
}
