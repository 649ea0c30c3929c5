//! # Image Endpoints
//!
//! Upload and update use multipart bodies; the field carrying the file is named `image`.
//! `GET /images?url=` doubles as an image proxy and is the only endpoint with a binary body.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::collections::BTreeMap;

use super::client::ApiClient;
use super::normalize::{self, has_any_field};
use crate::core::error::Result;
use shared::dto::{Envelope, FeaturedImageUpdate, Image, PagedEnvelope};

const CONTEXT: &str = "image";

/// Image records carry either an `id` or, for some legacy rows, only a `url`.
const IMAGE_FIELDS: &[&str] = &["id", "url"];

/// File to upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    /// e.g. `image/jpeg`; left to the backend to sniff when absent
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: None,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.bytes).file_name(self.file_name);
        Ok(match self.mime_type {
            Some(mime) => part.mime_str(&mime)?,
            None => part,
        })
    }
}

fn unwrap_image(body: &serde_json::Value) -> Result<Envelope<Image>> {
    normalize::entity(body, CONTEXT, has_any_field(IMAGE_FIELDS))
}

/// Upload an image and return its stored URL.
#[tracing::instrument(skip(client, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
pub async fn upload_image(
    client: &ApiClient,
    upload: ImageUpload,
    blog_id: Option<&str>,
) -> Result<String> {
    let path = "/images/upload";
    let mut form = Form::new().part("image", upload.into_part()?);
    if let Some(blog_id) = blog_id.filter(|id| !id.is_empty()) {
        form = form.text("blogId", blog_id.to_string());
    }

    let builder = client.request(Method::POST, path).multipart(form);
    let body = client.send(builder, path).await?;
    let url = normalize::uploaded_url(&body)?;
    tracing::info!(url = %url, "Image uploaded");
    Ok(url)
}

/// Paginated images. An unrecognizable body degrades to an empty page.
#[tracing::instrument(skip(client))]
pub async fn images(client: &ApiClient, page: u32, limit: u32) -> Result<PagedEnvelope<Image>> {
    let query = [("page", page.to_string()), ("limit", limit.to_string())];
    let body = client.get_json("/images", &query).await?;
    normalize::list_or_empty(&body, page, limit, "images")
}

#[tracing::instrument(skip(client))]
pub async fn image(client: &ApiClient, id: &str) -> Result<Envelope<Image>> {
    let body = client.get_json(&format!("/images/{}", id), &[]).await?;
    unwrap_image(&body)
}

#[tracing::instrument(skip(client))]
pub async fn delete_image(client: &ApiClient, id: &str) -> Result<Envelope<()>> {
    let body = client.delete_json(&format!("/images/{}", id)).await?;
    Ok(normalize::ack(&body))
}

/// Flag `image_id` as the featured image. The backend infers the blog from the image.
#[tracing::instrument(skip(client))]
pub async fn set_featured_image(
    client: &ApiClient,
    blog_id: &str,
    image_id: &str,
) -> Result<Envelope<Image>> {
    let request = FeaturedImageUpdate {
        is_featured_image: true,
    };
    let body = client
        .send_json(Method::PATCH, &format!("/images/{}", image_id), &request)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error setting featured image");
            e
        })?;
    unwrap_image(&body)
}

/// Replace an image file and/or its metadata fields.
#[tracing::instrument(skip(client, upload, metadata))]
pub async fn update_image(
    client: &ApiClient,
    id: &str,
    upload: Option<ImageUpload>,
    metadata: &BTreeMap<String, String>,
) -> Result<Envelope<Image>> {
    let path = format!("/images/{}", id);
    let mut form = Form::new();
    if let Some(upload) = upload {
        form = form.part("image", upload.into_part()?);
    }
    for (key, value) in metadata {
        form = form.text(key.clone(), value.clone());
    }

    let builder = client.request(Method::PUT, &path).multipart(form);
    let body = client.send(builder, &path).await?;
    unwrap_image(&body)
}

/// Fetch image bytes through the backend proxy.
#[tracing::instrument(skip(client))]
pub async fn fetch_image(client: &ApiClient, image_url: &str) -> Result<Vec<u8>> {
    let path = "/images";
    let builder = client
        .request(Method::GET, path)
        .query(&[("url", image_url)]);
    client.send_bytes(builder, path).await.map_err(|e| {
        tracing::error!(url = image_url, error = %e, "Error fetching image");
        e
    })
}
