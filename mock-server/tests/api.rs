use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, mounted_with, Post, API_PREFIX};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn seed() -> Vec<Post> {
    vec![
        Post {
            id: 2,
            author: "Ann".into(),
            text: "second".into(),
            likes: 1,
        },
        Post {
            id: 1,
            author: "Bob".into(),
            text: "Hi".into(),
            likes: 0,
        },
    ]
}

// --- list ---

#[tokio::test]
async fn list_posts_empty() {
    let resp = app().oneshot(empty_request("GET", "/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn list_posts_keeps_seed_order() {
    let resp = app_with(seed()).oneshot(empty_request("GET", "/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts, seed());
}

// --- create ---

#[tokio::test]
async fn create_post_returns_201_with_id() {
    let resp = app_with(seed())
        .oneshot(json_request(
            "POST",
            "/posts",
            r#"{"id":0,"author":"Cat","text":"new","likes":0}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 3);
    assert_eq!(post.author, "Cat");
    assert_eq!(post.likes, 0);
}

#[tokio::test]
async fn create_post_blank_author_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"author":"  ","text":"t"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_post_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/posts", r#"{"not_author":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- delete ---

#[tokio::test]
async fn delete_post_not_found() {
    let resp = app().oneshot(empty_request("DELETE", "/posts/5")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_post_bad_id_returns_400() {
    let resp = app().oneshot(empty_request("DELETE", "/posts/abc")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- likes ---

#[tokio::test]
async fn like_unknown_post_not_found() {
    let resp = app().oneshot(empty_request("POST", "/posts/1/likes")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn like_at_count_limit_conflicts() {
    let mut posts = seed();
    posts[0].likes = i64::MAX;
    posts[1].likes = i64::MIN;
    let app = app_with(posts);

    let resp = app
        .clone()
        .oneshot(empty_request("POST", "/posts/2/likes"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", "/posts/1/likes"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app.oneshot(empty_request("GET", "/posts")).await.unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts[0].likes, i64::MAX);
    assert_eq!(posts[1].likes, i64::MIN);
}

// --- mounting ---

#[tokio::test]
async fn served_router_lives_under_api_prefix() {
    let resp = mounted_with(seed())
        .oneshot(empty_request("GET", &format!("{API_PREFIX}/posts")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts, seed());

    let resp = mounted_with(seed())
        .oneshot(empty_request("GET", "/posts"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn posts_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/posts", r#"{"author":"Bob","text":"Hi"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Post = body_json(resp).await;
    let id = created.id;

    // like twice, dislike once
    for (method, expected) in [("POST", 1), ("POST", 2), ("DELETE", 1)] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(empty_request(method, &format!("/posts/{id}/likes")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let post: Post = body_json(resp).await;
        assert_eq!(post.likes, expected);
    }

    // newest first
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/posts", r#"{"author":"Ann","text":"Later"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/posts"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].author, "Ann");
    assert_eq!(posts[1].id, id);
    assert_eq!(posts[1].likes, 1);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // delete again — 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
