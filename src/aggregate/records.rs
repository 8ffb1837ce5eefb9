//! Strict record schemas for the upstream collections and the joined output.

use serde::{Deserialize, Serialize};

/// A comment from the comments endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: i64,
    pub id: i64,
    pub name: String,
    pub body: String,
}

/// A post from the posts endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// A user from the users endpoint. Fields other than these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// One joined row: a comment with its post and the post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRecord {
    pub post_id: i64,
    /// Title of the post.
    pub post_name: String,
    /// Number of comments on the post across the whole comments collection.
    pub comments_count: usize,
    /// Username of the post author, empty when the author is unknown.
    pub user_name: String,
    /// Body of the comment.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_combined_record_wire_names() {
        let record = CombinedRecord {
            post_id: 1,
            post_name: "Post One".to_string(),
            comments_count: 2,
            user_name: "alice".to_string(),
            body: "hi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "postId": 1,
                "postName": "Post One",
                "commentsCount": 2,
                "userName": "alice",
                "body": "hi"
            })
        );
    }

    #[test]
    fn test_user_ignores_extra_fields() {
        let user: User = serde_json::from_value(json!({
            "id": 10,
            "name": "Alice Liddell",
            "username": "alice",
            "address": { "city": "Oxford" }
        }))
        .unwrap();
        assert_eq!(user, User { id: 10, username: "alice".to_string() });
    }

    #[test]
    fn test_integer_fields_reject_strings_and_fractions() {
        assert!(serde_json::from_value::<Post>(json!({
            "userId": "10", "id": 1, "title": "t", "body": "b"
        }))
        .is_err());
        assert!(serde_json::from_value::<Comment>(json!({
            "postId": 1.5, "id": 1, "name": "n", "body": "b"
        }))
        .is_err());
    }
}
