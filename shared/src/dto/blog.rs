//! # Blog DTOs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::image::Image;
use super::lenient::null_as_default;
use super::status::BlogStatus;
use super::user::User;

/// Blog post as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Legacy single-image field, superseded by `images`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<Image>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Blog {
    pub fn status(&self) -> Option<BlogStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Published means the status upper-cases to `PUBLISHED`; `isPublished` is not consulted.
    pub fn is_published(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|raw| BlogStatus::Published.matches(raw))
    }

    /// URL of the image to show on cards and headers.
    ///
    /// Prefers the image flagged as featured, then the first attached image, then the
    /// legacy `featuredImage` field. Relative image URLs are resolved against `api_base`.
    pub fn featured_image_url(&self, api_base: &str) -> Option<String> {
        let images = self.images.as_deref().unwrap_or_default();
        let chosen = images
            .iter()
            .find(|img| img.is_featured())
            .or_else(|| images.first());

        match chosen {
            Some(image) if image.url.starts_with("http://") || image.url.starts_with("https://") => {
                Some(image.url.clone())
            }
            Some(image) => Some(format!("{}{}", api_base.trim_end_matches('/'), image.url)),
            None => self.featured_image.clone(),
        }
    }
}

/// Body of `POST /blogs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
}

/// Body of `PATCH /blogs/:id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn blog(value: Value) -> Blog {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_is_published_ignores_case() {
        assert!(blog(json!({"id": "b1", "status": "published"})).is_published());
        assert!(blog(json!({"id": "b1", "status": "PUBLISHED"})).is_published());
        assert!(!blog(json!({"id": "b1", "status": "draft"})).is_published());
        assert!(!blog(json!({"id": "b1", "isPublished": true})).is_published());
    }

    #[test]
    fn test_featured_image_prefers_flagged_image() {
        let post = blog(json!({
            "id": "b1",
            "featuredImage": "https://legacy.example/cover.jpg",
            "images": [
                {"id": "i1", "url": "/uploads/first.jpg"},
                {"id": "i2", "url": "https://cdn.example/hero.jpg", "isFeaturedImage": true}
            ]
        }));
        assert_eq!(
            post.featured_image_url("http://127.0.0.1:3000"),
            Some("https://cdn.example/hero.jpg".to_string())
        );
    }

    #[test]
    fn test_featured_image_resolves_relative_first_image() {
        let post = blog(json!({
            "id": "b1",
            "images": [{"id": "i1", "url": "/uploads/first.jpg"}]
        }));
        assert_eq!(
            post.featured_image_url("http://127.0.0.1:3000/"),
            Some("http://127.0.0.1:3000/uploads/first.jpg".to_string())
        );
    }

    #[test]
    fn test_featured_image_falls_back_to_legacy_field() {
        let post = blog(json!({"id": "b1", "featuredImage": "https://legacy.example/cover.jpg"}));
        assert_eq!(
            post.featured_image_url("http://127.0.0.1:3000"),
            Some("https://legacy.example/cover.jpg".to_string())
        );
        assert_eq!(blog(json!({"id": "b2"})).featured_image_url("x"), None);
    }
}
