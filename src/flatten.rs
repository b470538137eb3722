use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// One post as returned by the search API: an arbitrarily nested JSON object.
pub type RawPost = Map<String, Value>;

/// The legacy timestamp format the v1.1 API uses,
/// e.g. "Wed Oct 10 20:19:24 +0000 2018".
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// A post flattened into one table row: the pass-through columns plus the
/// typed columns derived from them.
#[derive(Debug, Clone)]
pub struct FlatRecord {
    /// Flat column -> value mapping. Holds every top-level key of the raw
    /// post (special-cased fields hoisted as described on [`flatten`]), in
    /// the order they first appeared.
    pub fields: Map<String, Value>,
    pub created_at: DateTime<FixedOffset>,
    /// `entities.hashtags[].text`, joined with `", "`.
    pub hashtags: String,
    /// `entities.user_mentions[].name`, joined with `", "`.
    pub user_mentions: String,
    /// The search query this post was fetched for.
    pub topic: String,
}

impl FlatRecord {
    /// The raw (pre-cleaning) body text, or `""` when absent.
    pub fn raw_text(&self) -> &str {
        self.fields
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Flatten a nested post into a [`FlatRecord`].
///
/// Top-level keys are copied through unchanged, with two exceptions:
/// - `user` is kept as-is and its `id` is hoisted to a `user_id` column;
/// - `retweeted_status` contributes only a `retweeted_status_id` column,
///   the nested object itself is dropped.
///
/// Fails with [`Error::TimestampParse`] when `created_at` is missing or
/// malformed.
pub fn flatten(post: &RawPost, topic: &str) -> Result<FlatRecord> {
    let mut fields = Map::new();

    for (key, value) in post {
        match key.as_str() {
            "user" => {
                if let Some(id) = value.get("id") {
                    fields.insert("user_id".to_string(), id.clone());
                }
                fields.insert(key.clone(), value.clone());
            }
            "retweeted_status" => {
                if let Some(id) = value.get("id") {
                    fields.insert("retweeted_status_id".to_string(), id.clone());
                }
            }
            _ => {
                fields.insert(key.clone(), value.clone());
            }
        }
    }

    let created_at = parse_created_at(&fields)?;
    let entities = post.get("entities");
    let hashtags = join_nested_attribute(entities, "hashtags", "text");
    let user_mentions = join_nested_attribute(entities, "user_mentions", "name");

    Ok(FlatRecord {
        fields,
        created_at,
        hashtags,
        user_mentions,
        topic: topic.to_string(),
    })
}

/// Extract `attribute` from every element of the `list_field` array inside
/// `entities` and join the values with `", "`. Missing or empty lists yield
/// an empty string.
pub fn join_nested_attribute(
    entities: Option<&Value>,
    list_field: &str,
    attribute: &str,
) -> String {
    let Some(items) = entities
        .and_then(|e| e.get(list_field))
        .and_then(Value::as_array)
    else {
        return String::new();
    };

    items
        .iter()
        .filter_map(|item| item.get(attribute).and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_created_at(fields: &Map<String, Value>) -> Result<DateTime<FixedOffset>> {
    let value = fields
        .get("created_at")
        .and_then(Value::as_str)
        .unwrap_or("");

    DateTime::parse_from_str(value, CREATED_AT_FORMAT).map_err(|source| Error::TimestampParse {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_post(body: Value) -> RawPost {
        body.as_object().unwrap().clone()
    }

    fn sample_post() -> RawPost {
        raw_post(json!({
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "id": 1050118621198921728u64,
            "text": "RT @alice: hello world",
            "user": {"id": 6253282, "screen_name": "alice", "followers_count": 10},
            "retweeted_status": {"id": 1050118621198921000u64, "text": "hello world"},
            "entities": {
                "hashtags": [{"text": "rustlang"}, {"text": "opensource"}],
                "user_mentions": [{"name": "Alice", "screen_name": "alice"}]
            },
            "lang": "en"
        }))
    }

    #[test]
    fn test_user_kept_and_id_hoisted() {
        let post = sample_post();
        let record = flatten(&post, "rust").unwrap();

        assert_eq!(record.fields["user_id"], post["user"]["id"]);
        assert_eq!(record.fields["user"], post["user"]);
    }

    #[test]
    fn test_retweeted_status_replaced_by_its_id() {
        let post = sample_post();
        let record = flatten(&post, "rust").unwrap();

        assert_eq!(
            record.fields["retweeted_status_id"],
            post["retweeted_status"]["id"]
        );
        assert!(!record.fields.contains_key("retweeted_status"));
    }

    #[test]
    fn test_other_keys_pass_through_unchanged() {
        let post = sample_post();
        let record = flatten(&post, "rust").unwrap();

        assert_eq!(record.fields["lang"], json!("en"));
        assert_eq!(record.fields["id"], post["id"]);
        assert_eq!(record.raw_text(), "RT @alice: hello world");
    }

    #[test]
    fn test_derived_columns() {
        let record = flatten(&sample_post(), "rust").unwrap();

        assert_eq!(record.hashtags, "rustlang, opensource");
        assert_eq!(record.user_mentions, "Alice");
        assert_eq!(record.topic, "rust");
        assert_eq!(record.created_at.to_rfc3339(), "2018-10-10T20:19:24+00:00");
    }

    #[test]
    fn test_join_over_empty_list_is_empty_string() {
        let entities = json!({"hashtags": []});
        assert_eq!(join_nested_attribute(Some(&entities), "hashtags", "text"), "");
        assert_eq!(join_nested_attribute(None, "hashtags", "text"), "");
    }

    #[test]
    fn test_join_two_elements() {
        let entities = json!({"hashtags": [{"text": "a"}, {"text": "b"}]});
        assert_eq!(
            join_nested_attribute(Some(&entities), "hashtags", "text"),
            "a, b"
        );
    }

    #[test]
    fn test_malformed_created_at_fails() {
        let post = raw_post(json!({
            "created_at": "not a date",
            "id": 1,
            "text": "hi"
        }));

        let err = flatten(&post, "rust").unwrap_err();
        assert!(matches!(err, Error::TimestampParse { .. }));
    }

    #[test]
    fn test_missing_created_at_fails() {
        let post = raw_post(json!({"id": 1, "text": "hi"}));
        assert!(flatten(&post, "rust").is_err());
    }
}
