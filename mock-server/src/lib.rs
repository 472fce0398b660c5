use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub text: String,
    pub likes: i64,
}

/// Create payload. Clients send `id: 0` and `likes: 0`; both are ignored.
#[derive(Deserialize)]
pub struct CreatePost {
    pub author: String,
    pub text: String,
}

/// Posts newest first, plus the next id to hand out.
#[derive(Debug)]
pub struct Posts {
    next_id: u64,
    items: Vec<Post>,
}

impl Posts {
    pub fn new(items: Vec<Post>) -> Self {
        let next_id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { next_id, items }
    }
}

pub type Db = Arc<RwLock<Posts>>;

/// Path the served router is mounted under; `/posts` lives below it.
pub const API_PREFIX: &str = "/api/hw33";

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router seeded with `posts`, in display order.
pub fn app_with(posts: Vec<Post>) -> Router {
    let db: Db = Arc::new(RwLock::new(Posts::new(posts)));
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", delete(delete_post))
        .route("/posts/{id}/likes", post(like_post).delete(dislike_post))
        .with_state(db)
}

/// `app_with(posts)` nested under `API_PREFIX`, as `run` serves it.
pub fn mounted_with(posts: Vec<Post>) -> Router {
    Router::new().nest(API_PREFIX, app_with(posts))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, posts: Vec<Post>) -> Result<(), std::io::Error> {
    axum::serve(listener, mounted_with(posts)).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.read().await.items.clone())
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> Result<(StatusCode, Json<Post>), StatusCode> {
    let author = input.author.trim();
    let text = input.text.trim();
    if author.is_empty() || text.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut posts = db.write().await;
    let post = Post {
        id: posts.next_id,
        author: author.to_string(),
        text: text.to_string(),
        likes: 0,
    };
    posts.next_id += 1;
    posts.items.insert(0, post.clone());
    debug!(id = post.id, "post created");
    Ok((StatusCode::CREATED, Json(post)))
}

async fn delete_post(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut posts = db.write().await;
    match posts.items.iter().position(|p| p.id == id) {
        Some(index) => {
            posts.items.remove(index);
            debug!(id, "post deleted");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn like_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    adjust_likes(&db, id, 1).await
}

async fn dislike_post(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Post>, StatusCode> {
    adjust_likes(&db, id, -1).await
}

async fn adjust_likes(db: &Db, id: u64, delta: i64) -> Result<Json<Post>, StatusCode> {
    let mut posts = db.write().await;
    let post = posts
        .items
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    post.likes = post.likes.checked_add(delta).ok_or(StatusCode::CONFLICT)?;
    debug!(id, likes = post.likes, "likes adjusted");
    Ok(Json(post.clone()))
}
