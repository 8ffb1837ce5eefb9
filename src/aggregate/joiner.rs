//! In-memory join of comments, posts and users.
//!
//! # Semantics
//! - Output follows comment fetch order
//! - A comment whose post is missing is dropped
//! - A post whose author is missing yields an empty `userName`
//! - Duplicate ids resolve to the first record in fetch order

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::aggregate::records::{Comment, CombinedRecord, Post, User};
use crate::aggregate::types::{Collection, Record, SchemaError};

/// Join the three collections into one record per matched comment.
///
/// Every record of every collection is validated against its schema first;
/// a single malformed record fails the whole join.
pub fn join(
    comments: &[Record],
    posts: &[Record],
    users: &[Record],
) -> Result<Vec<CombinedRecord>, SchemaError> {
    let comments: Vec<Comment> = coerce_all(Collection::Comments, comments)?;
    let posts: Vec<Post> = coerce_all(Collection::Posts, posts)?;
    let users: Vec<User> = coerce_all(Collection::Users, users)?;

    let posts_by_id = index_first_seen(&posts, |post| post.id);
    let users_by_id = index_first_seen(&users, |user| user.id);
    let counts = comments_per_post(&comments);

    let mut combined = Vec::with_capacity(comments.len());
    for comment in &comments {
        let Some(post) = posts_by_id.get(&comment.post_id) else {
            tracing::trace!(comment_id = comment.id, post_id = comment.post_id, "Dropping comment without post");
            continue;
        };

        let user_name = match users_by_id.get(&post.user_id) {
            Some(user) => user.username.clone(),
            None => {
                tracing::debug!(post_id = post.id, user_id = post.user_id, "Post author not found");
                String::new()
            }
        };

        combined.push(CombinedRecord {
            post_id: post.id,
            post_name: post.title.clone(),
            comments_count: counts.get(&post.id).copied().unwrap_or(0),
            user_name,
            body: comment.body.clone(),
        });
    }

    Ok(combined)
}

fn coerce_all<T: DeserializeOwned>(
    collection: Collection,
    records: &[Record],
) -> Result<Vec<T>, SchemaError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(Value::Object(record.clone())).map_err(|source| SchemaError {
                collection,
                index,
                source,
            })
        })
        .collect()
}

/// Map id → record, keeping the earliest record for duplicate ids.
fn index_first_seen<T>(items: &[T], id: impl Fn(&T) -> i64) -> HashMap<i64, &T> {
    let mut index = HashMap::with_capacity(items.len());
    for item in items {
        index.entry(id(item)).or_insert(item);
    }
    index
}

fn comments_per_post(comments: &[Comment]) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for comment in comments {
        *counts.entry(comment.post_id).or_insert(0) += 1;
    }
    counts
}
