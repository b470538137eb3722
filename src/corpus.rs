use crate::error::Result;
use crate::flatten::{flatten, FlatRecord, RawPost};
use crate::normalize::{clean, extract_emoji, is_viable, Lexicon};
use serde_json::Value;
use std::io::Write;
use tracing::{debug, warn};

/// Derived columns appended after the pass-through columns, in output order.
const DERIVED_COLUMNS: &[&str] = &["hashtags", "user_mentions", "topic", "tweet_len", "emoji"];

/// A fully processed row: the flattened post plus the normalization outputs.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub record: FlatRecord,
    /// Character length of the text before cleaning.
    pub tweet_len: usize,
    /// Emoji found in the raw text, first-occurrence order, duplicates kept.
    pub emoji: Vec<(char, &'static str)>,
    /// The cleaned text; replaces the raw `text` column in output.
    pub text: String,
}

/// The terminal artifact: one row per surviving post.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub rows: Vec<NormalizedRecord>,
}

/// Flatten, filter, and normalize a batch of fetched posts.
///
/// Posts with an unparseable `created_at` are skipped with a warning rather
/// than aborting the batch; rows whose raw text is shorter than the viability
/// threshold are dropped silently.
pub fn build_corpus(posts: &[RawPost], topic: &str, lexicon: &Lexicon) -> Corpus {
    let mut rows = Vec::new();

    for post in posts {
        let record = match flatten(post, topic) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping unflattenable post");
                continue;
            }
        };

        let raw_text = record.raw_text().to_string();
        if !is_viable(&raw_text) {
            debug!(len = raw_text.chars().count(), "dropping short row");
            continue;
        }

        let tweet_len = raw_text.chars().count();
        let emoji = extract_emoji(&raw_text, lexicon);
        let text = clean(&raw_text, lexicon);

        rows.push(NormalizedRecord {
            record,
            tweet_len,
            emoji,
            text,
        });
    }

    Corpus { rows }
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column order: pass-through columns in first-seen order across all
    /// rows, then the derived columns.
    pub fn column_names(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.record.fields.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns.extend(DERIVED_COLUMNS.iter().map(|c| (*c).to_string()));
        columns
    }

    /// Write the corpus as CSV, one row per record.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let columns = self.column_names();
        let mut out = csv::Writer::from_writer(writer);

        out.write_record(&columns)?;
        for row in &self.rows {
            let cells: Vec<String> = columns.iter().map(|column| row.cell(column)).collect();
            out.write_record(&cells)?;
        }
        out.flush().map_err(csv::Error::from)?;

        Ok(())
    }
}

impl NormalizedRecord {
    /// Render one cell. `text` carries the cleaned body, `created_at` the
    /// parsed timestamp; everything else falls back to the flattened fields.
    fn cell(&self, column: &str) -> String {
        match column {
            "text" => self.text.clone(),
            "created_at" => self.record.created_at.to_rfc3339(),
            "hashtags" => self.record.hashtags.clone(),
            "user_mentions" => self.record.user_mentions.clone(),
            "topic" => self.record.topic.clone(),
            "tweet_len" => self.tweet_len.to_string(),
            "emoji" => self
                .emoji
                .iter()
                .map(|(c, name)| format!("{} {}", c, name))
                .collect::<Vec<_>>()
                .join(", "),
            _ => self
                .record
                .fields
                .get(column)
                .map(render_value)
                .unwrap_or_default(),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Nested objects/arrays (e.g. the kept `user` object) stay as JSON.
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: u64, text: &str) -> RawPost {
        json!({
            "created_at": "Wed Oct 10 20:19:24 +0000 2018",
            "id": id,
            "text": text,
            "user": {"id": id * 10, "screen_name": "someone"},
            "entities": {"hashtags": [], "user_mentions": []}
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_short_rows_are_dropped() {
        let lexicon = Lexicon::english();
        let posts = vec![post(1, "ab"), post(2, "a perfectly fine tweet")];

        let corpus = build_corpus(&posts, "rust", &lexicon);

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.rows[0].record.fields["id"], json!(2));
    }

    #[test]
    fn test_tweet_len_is_pre_clean_length() {
        let lexicon = Lexicon::english();
        let raw = "RT @alice: the vote 😀";
        let posts = vec![post(1, raw)];

        let corpus = build_corpus(&posts, "rust", &lexicon);

        let row = &corpus.rows[0];
        assert_eq!(row.tweet_len, raw.chars().count());
        assert!(row.text.chars().count() < row.tweet_len);
        assert_eq!(row.emoji, vec![('😀', ":grinning_face:")]);
    }

    #[test]
    fn test_unflattenable_posts_are_skipped() {
        let lexicon = Lexicon::english();
        let mut bad = post(1, "valid text here");
        bad.insert("created_at".to_string(), json!("garbage"));
        let posts = vec![bad, post(2, "still standing")];

        let corpus = build_corpus(&posts, "rust", &lexicon);

        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_column_order_and_csv_output() {
        let lexicon = Lexicon::english();
        let posts = vec![post(1, "votes counted twice")];
        let corpus = build_corpus(&posts, "election", &lexicon);

        let columns = corpus.column_names();
        // Pass-through order from the post, then derived columns.
        assert_eq!(
            columns,
            vec![
                "created_at",
                "id",
                "text",
                "user_id",
                "user",
                "entities",
                "hashtags",
                "user_mentions",
                "topic",
                "tweet_len",
                "emoji"
            ]
        );

        let mut buf = Vec::new();
        corpus.write_csv(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("created_at,id,text"));
        let row = lines.next().unwrap();
        assert!(row.contains("vote counted twice"));
        assert!(row.contains("election"));
    }

    #[test]
    fn test_column_union_across_rows() {
        let lexicon = Lexicon::english();
        let mut retweet = post(1, "this one is a retweet");
        retweet.insert("retweeted_status".to_string(), json!({"id": 99}));
        let posts = vec![post(2, "plain tweet body"), retweet];

        let corpus = build_corpus(&posts, "rust", &lexicon);
        let columns = corpus.column_names();

        assert!(columns.contains(&"retweeted_status_id".to_string()));
        assert!(!columns.contains(&"retweeted_status".to_string()));
        // First row has no value for the retweet column.
        assert_eq!(corpus.rows[0].cell("retweeted_status_id"), "");
        assert_eq!(corpus.rows[1].cell("retweeted_status_id"), "99");
    }
}
