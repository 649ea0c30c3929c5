//! # Blog Endpoints
//!
//! The backend has no `published` query parameter; published-only listings are filtered
//! here after the page is fetched, so a filtered page may hold fewer than `limit` blogs.

use reqwest::Method;

use super::client::ApiClient;
use super::normalize::{self, has_field};
use crate::core::error::Result;
use shared::dto::{
    Blog, BlogStatus, CreateBlogRequest, Envelope, PagedEnvelope, StatusUpdate, UpdateBlogRequest,
};

const CONTEXT: &str = "blog";

fn unwrap_blog(body: &serde_json::Value) -> Result<Envelope<Blog>> {
    normalize::entity(body, CONTEXT, has_field("id"))
}

/// Keep only published blogs; `meta.total` becomes the filtered count.
pub fn published_only(mut page: PagedEnvelope<Blog>) -> PagedEnvelope<Blog> {
    page.data.retain(Blog::is_published);
    page.meta.total = page.data.len() as u64;
    page
}

/// Paginated blogs, optionally restricted to published ones.
#[tracing::instrument(skip(client))]
pub async fn blogs(
    client: &ApiClient,
    page: u32,
    limit: u32,
    published: bool,
) -> Result<PagedEnvelope<Blog>> {
    let query = [("page", page.to_string()), ("limit", limit.to_string())];
    let body = client.get_json("/blogs", &query).await.map_err(|e| {
        if matches!(e, crate::core::error::ClientError::Transport(_)) {
            tracing::error!(
                base_url = client.base_url(),
                "Cannot connect to backend API, make sure it is running"
            );
        }
        e
    })?;

    let list = normalize::list_or_empty(&body, page, limit, "blogs")?;
    if published {
        let fetched = list.data.len();
        let filtered = published_only(list);
        tracing::debug!(fetched, published = filtered.data.len(), "Filtered published blogs");
        return Ok(filtered);
    }
    Ok(list)
}

#[tracing::instrument(skip(client))]
pub async fn blog(client: &ApiClient, id: &str) -> Result<Envelope<Blog>> {
    let body = client.get_json(&format!("/blogs/{}", id), &[]).await?;
    unwrap_blog(&body)
}

/// Blog with author and images expanded.
#[tracing::instrument(skip(client))]
pub async fn blog_details(client: &ApiClient, id: &str) -> Result<Envelope<Blog>> {
    let body = client.get_json(&format!("/blogs/{}/details", id), &[]).await?;
    unwrap_blog(&body)
}

#[tracing::instrument(skip(client, request), fields(title = %request.title))]
pub async fn create_blog(client: &ApiClient, request: &CreateBlogRequest) -> Result<Envelope<Blog>> {
    let body = client.send_json(Method::POST, "/blogs", request).await?;
    unwrap_blog(&body)
}

#[tracing::instrument(skip(client, request))]
pub async fn update_blog(
    client: &ApiClient,
    id: &str,
    request: &UpdateBlogRequest,
) -> Result<Envelope<Blog>> {
    let body = client
        .send_json(Method::PATCH, &format!("/blogs/{}", id), request)
        .await?;
    unwrap_blog(&body)
}

#[tracing::instrument(skip(client))]
pub async fn update_blog_status(
    client: &ApiClient,
    id: &str,
    status: BlogStatus,
) -> Result<Envelope<Blog>> {
    let request = StatusUpdate {
        status: status.as_str().to_string(),
    };
    let body = client
        .send_json(Method::PATCH, &format!("/blogs/{}/status", id), &request)
        .await?;
    unwrap_blog(&body)
}

#[tracing::instrument(skip(client))]
pub async fn delete_blog(client: &ApiClient, id: &str) -> Result<Envelope<()>> {
    let body = client.delete_json(&format!("/blogs/{}", id)).await?;
    Ok(normalize::ack(&body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_published_only_filters_and_recounts() {
        let body = json!({
            "success": true,
            "data": {
                "data": [
                    {"id": "1", "status": "PUBLISHED"},
                    {"id": "2", "status": "draft"},
                    {"id": "3", "status": "published"},
                    {"id": "4"}
                ],
                "meta": {"page": 1, "limit": 10, "total": 40, "totalPages": 4,
                         "hasNextPage": true, "hasPreviousPage": false}
            }
        });
        let page = normalize::list::<Blog>(&body, 1, 10, "blogs").unwrap();
        let filtered = published_only(page);

        let ids: Vec<_> = filtered.data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(filtered.meta.total, 2);
        assert_eq!(filtered.meta.total_pages, 4);
        assert!(filtered.meta.has_next_page);
    }
}
