//! In-memory ordered collection of posts.
//!
//! The store is the only copy of the list the view is rendered from. Lookups
//! and removals of an absent id return `None` and leave the store alone; that
//! is an expected outcome (e.g. a delete racing a reload), not an error.

use crate::types::Post;

/// Posts in display order, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Replace the whole collection, keeping the given order.
    pub fn replace_all(&mut self, posts: Vec<Post>) {
        self.posts = posts;
    }

    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    pub fn remove_by_id(&mut self, id: u64) -> Option<Post> {
        let index = self.posts.iter().position(|p| p.id == id)?;
        Some(self.posts.remove(index))
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Add `delta` to the post's like count and return the new count.
    /// `None` if the post is absent or the count would overflow; the post is
    /// left unchanged in both cases.
    pub fn adjust_likes(&mut self, id: u64, delta: i64) -> Option<i64> {
        let post = self.posts.iter_mut().find(|p| p.id == id)?;
        post.likes = post.likes.checked_add(delta)?;
        Some(post.likes)
    }
}

impl From<Vec<Post>> for PostStore {
    fn from(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}
