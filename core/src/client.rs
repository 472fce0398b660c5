//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and, where the response carries data, a
//! `parse_*` method that consumes the raw body handed to a lifecycle's
//! success hook. Status interpretation happens in `transport::request`, so
//! the parsers only ever see 2xx bodies.

use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{LikeDirection, NewPost, Post, PENDING_ID};

/// Synchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct PostsClient {
    collection_url: String,
}

/// The part of a create response the client relies on. Any other fields the
/// backend sends are ignored.
#[derive(Deserialize)]
struct Created {
    id: u64,
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            collection_url: format!("{}/posts", base_url.trim_end_matches('/')),
        }
    }

    /// `{base}/posts`
    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The body is the pending record: `{"id":0,"author":..,"text":..,"likes":0}`.
    pub fn build_create_post(&self, input: &NewPost) -> Result<HttpRequest, ApiError> {
        let pending = input.clone().into_pending();
        let body = serde_json::to_string(&pending).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_url.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_post(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.collection_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// `POST {base}/posts/{id}/likes` to like, `DELETE` to dislike.
    pub fn build_adjust_likes(&self, id: u64, direction: LikeDirection) -> HttpRequest {
        let method = match direction {
            LikeDirection::Like => HttpMethod::Post,
            LikeDirection::Dislike => HttpMethod::Delete,
        };
        HttpRequest {
            method,
            path: format!("{}/{id}/likes", self.collection_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_posts(&self, body: &str) -> Result<Vec<Post>, ApiError> {
        serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Extract the server-assigned id from a create response. An id of 0 is
    /// what the client sent and is not an assignment.
    pub fn parse_created_id(&self, body: &str) -> Result<u64, ApiError> {
        let created: Created =
            serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        if created.id == PENDING_ID {
            return Err(ApiError::DeserializationError(
                "create response carried the pending id 0".to_string(),
            ));
        }
        Ok(created.id)
    }
}
