//! Fetches topic-matched tweets from the v1.1 search API, flattens the
//! nested JSON into tabular records, and normalizes the text into a corpus
//! ready for sentiment analysis.
//!
//! The pipeline runs in four stages: [`fetch_posts`] pages through search
//! results by `max_id` cursor, [`flatten`] hoists the nested fields each row
//! needs, [`normalize::clean`] runs the deterministic text-cleaning chain,
//! and [`build_corpus`] glues them together into a [`Corpus`].

pub mod client;
pub mod config;
pub mod corpus;
pub mod error;
pub mod flatten;
pub mod normalize;
pub mod paginator;

pub use client::{PostSource, TwitterClient, PAGE_SIZE};
pub use config::Config;
pub use corpus::{build_corpus, Corpus, NormalizedRecord};
pub use error::{Error, Result};
pub use flatten::{flatten, join_nested_attribute, FlatRecord, RawPost};
pub use normalize::{clean, extract_emoji, is_viable, Lexicon};
pub use paginator::fetch_posts;
