//! Domain types for the posts resource.
//!
//! # Design
//! `Post` mirrors the server's JSON shape and is defined independently from
//! the mock-server crate; integration tests catch schema drift. An `id` of 0
//! marks a record the server has not confirmed yet. Such a record only ever
//! lives in a create request body, never in the store.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Id carried by a post that has not been assigned one by the server.
pub const PENDING_ID: u64 = 0;

/// A single post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub text: String,
    pub likes: i64,
}

impl Post {
    pub fn is_pending(&self) -> bool {
        self.id == PENDING_ID
    }
}

/// A validated create submission: author and text are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    author: String,
    text: String,
}

impl NewPost {
    /// Trim both fields and reject blank ones. Author is checked first.
    pub fn validate(author: &str, text: &str) -> Result<Self, ValidationError> {
        let author = author.trim();
        if author.is_empty() {
            return Err(ValidationError::BlankAuthor);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::BlankText);
        }
        Ok(Self {
            author: author.to_string(),
            text: text.to_string(),
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The record sent in a create request: no id yet, no likes.
    pub fn into_pending(self) -> Post {
        Post {
            id: PENDING_ID,
            author: self.author,
            text: self.text,
            likes: 0,
        }
    }
}

/// Direction of a like adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeDirection {
    Like,
    Dislike,
}

impl LikeDirection {
    pub fn delta(self) -> i64 {
        match self {
            LikeDirection::Like => 1,
            LikeDirection::Dislike => -1,
        }
    }
}

/// Input fields of the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    Text,
}

/// A user action forwarded by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Load,
    SubmitCreate { author: String, text: String },
    RequestDelete { id: u64 },
    RequestLikeAdjust { id: u64, direction: LikeDirection },
}
