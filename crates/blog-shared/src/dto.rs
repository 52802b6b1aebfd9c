//! Data Transfer Objects - request/response types for the API.
//!
//! Wire field names are camelCase to stay compatible with the existing
//! clients of this API.

use serde::{Deserialize, Serialize};

/// Request body for creating a post. Every field is optional; no content
/// validation is performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for updating a post. All four fields are replaced as one
/// set-update; omitted fields clear their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A post as rendered on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Query string accepted by the post listing endpoint.
///
/// `sortOrder` keeps its legacy string encodings (`ascending`, `asc`, `1`,
/// anything else meaning descending); they are mapped to an enum at the
/// boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListPostsQuery {
    pub author: Option<String>,
    pub tag: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_tags_default_to_empty() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Hi"));
        assert!(req.tags.is_empty());
        assert!(req.author.is_none());
    }

    #[test]
    fn post_response_uses_camel_case_keys() {
        let response = PostResponse {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            title: None,
            author: None,
            contents: None,
            tags: vec![],
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
