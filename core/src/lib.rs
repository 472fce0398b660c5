//! Client-side synchronization layer for the posts service.
//!
//! # Overview
//! Keeps an in-memory list of posts in step with a remote REST collection
//! and drives the view's affordances (busy indicator, disabled inputs,
//! focus) around every request.
//!
//! # Design
//! - `PostsClient` is stateless: it builds `HttpRequest` values and parses
//!   response bodies without touching the network.
//! - A `Transport` executes requests; `transport::request` maps each
//!   round-trip onto `Lifecycle` hooks (start, success or error, finish).
//!   `HttpTransport` is the `reqwest`-backed implementation.
//! - `SyncController` owns the `PostStore` and the `View` and runs the four
//!   operations (load, create, delete, like adjustment) on a single-threaded
//!   event loop. Its futures are not `Send`.
//! - The busy indicator is reference-counted across concurrent operations.

pub mod busy;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;
pub mod view;

pub use client::PostsClient;
pub use config::{ClientConfig, DeletePolicy};
pub use controller::SyncController;
pub use error::{ApiError, ConfigError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::PostStore;
pub use transport::{HttpTransport, Lifecycle, Transport};
pub use types::{Field, Intent, LikeDirection, NewPost, Post};
pub use view::View;
