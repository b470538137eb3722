use crate::client::{PostSource, PAGE_SIZE};
use crate::error::{Error, Result};
use crate::flatten::RawPost;
use std::collections::HashSet;
use tracing::{debug, info};

fn post_id(post: &RawPost) -> Option<u64> {
    post.get("id").and_then(serde_json::Value::as_u64)
}

/// Collect roughly `target_count` posts matching `topic` by walking the
/// search API's `max_id` cursor backwards in time.
///
/// Issues `ceil(target_count / 100)` requests: the first page is unanchored,
/// each follow-up asks for ids strictly below the minimum id of the page
/// before it. Posts seen twice (the upstream cursor is inclusive, and pages
/// can overlap under heavy churn) are dropped by id.
pub async fn fetch_posts(
    source: &dyn PostSource,
    topic: &str,
    target_count: usize,
) -> Result<Vec<RawPost>> {
    assert!(target_count > 0, "target_count must be positive");

    let pages = target_count.div_ceil(PAGE_SIZE);
    let mut posts: Vec<RawPost> = Vec::new();
    let mut seen: HashSet<u64> = HashSet::new();
    let mut cursor: Option<u64> = None;

    for page_index in 0..pages {
        let page = source.search_page(topic, PAGE_SIZE, cursor).await?;

        // An empty page leaves no minimum id to anchor the next request.
        let min_id = page.iter().filter_map(post_id).min().ok_or(Error::EmptyPage)?;

        debug!(
            page = page_index,
            fetched = page.len(),
            min_id,
            "fetched search page"
        );

        for post in page {
            if let Some(id) = post_id(&post) {
                if !seen.insert(id) {
                    continue;
                }
            }
            posts.push(post);
        }

        cursor = Some(min_id.saturating_sub(1));
    }

    info!(topic, collected = posts.len(), "pagination complete");
    Ok(posts)
}
