//! Keeps the post store, the view and the server in step.
//!
//! # Design
//! Every operation is an `async fn(&self)` that builds a request with
//! `PostsClient` and runs it through `transport::request` with its own
//! `Lifecycle`. The lifecycles borrow the controller and do all their work in
//! the synchronous hooks, so no `RefCell` borrow ever lives across an
//! `.await` and several operations can be in flight on one event loop.
//!
//! Optimistic changes are applied before the request future is awaited:
//! like counts always, deletions under `DeletePolicy::Eager`. Neither is
//! rolled back when the request fails. Load and create only touch the store
//! on success.

use std::cell::{Ref, RefCell};

use tracing::{debug, error, warn};

use crate::busy::BusyState;
use crate::client::PostsClient;
use crate::config::{ClientConfig, DeletePolicy};
use crate::error::ApiError;
use crate::store::PostStore;
use crate::transport::{self, Lifecycle, Transport};
use crate::types::{Field, Intent, LikeDirection, NewPost, Post};
use crate::view::View;

pub struct SyncController<T, V> {
    client: PostsClient,
    transport: T,
    store: RefCell<PostStore>,
    view: RefCell<V>,
    busy: RefCell<BusyState>,
    delete_policy: DeletePolicy,
}

impl<T, V> SyncController<T, V>
where
    T: Transport,
    V: View,
{
    pub fn new(config: &ClientConfig, transport: T, view: V) -> Self {
        Self::with_store(config, transport, view, PostStore::new())
    }

    pub fn with_store(config: &ClientConfig, transport: T, view: V, store: PostStore) -> Self {
        Self {
            client: PostsClient::new(&config.base_url),
            transport,
            store: RefCell::new(store),
            view: RefCell::new(view),
            busy: RefCell::new(BusyState::new()),
            delete_policy: config.delete_policy,
        }
    }

    pub fn store(&self) -> Ref<'_, PostStore> {
        self.store.borrow()
    }

    pub fn view(&self) -> Ref<'_, V> {
        self.view.borrow()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True while at least one request is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.borrow().is_busy()
    }

    /// Focus the author field and fetch the initial list.
    pub async fn start(&self) {
        self.view.borrow_mut().focus(Field::Author);
        self.load().await;
    }

    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Load => self.load().await,
            Intent::SubmitCreate { author, text } => self.submit_create(&author, &text).await,
            Intent::RequestDelete { id } => self.request_delete(id).await,
            Intent::RequestLikeAdjust { id, direction } => {
                self.request_like_adjust(id, direction).await
            }
        }
    }

    /// Fetch the collection and replace the store with it.
    pub async fn load(&self) {
        let request = self.client.build_list_posts();
        let mut lifecycle = LoadLifecycle { controller: self };
        transport::request(&self.transport, request, &mut lifecycle).await;
    }

    /// Validate the form and create a post. Blank fields never reach the
    /// network; the view gets an inline message and focus moves to the
    /// offending field.
    pub async fn submit_create(&self, author: &str, text: &str) {
        let input = match NewPost::validate(author, text) {
            Ok(input) => input,
            Err(invalid) => {
                debug!(%invalid, "create submission rejected");
                let mut view = self.view.borrow_mut();
                view.set_message(Some(&invalid.to_string()));
                view.focus(invalid.field());
                return;
            }
        };
        self.view.borrow_mut().set_message(None);

        let request = match self.client.build_create_post(&input) {
            Ok(request) => request,
            Err(error) => {
                error!(%error, "could not encode new post");
                return;
            }
        };
        let mut lifecycle = CreateLifecycle {
            controller: self,
            pending: Some(input.into_pending()),
        };
        transport::request(&self.transport, request, &mut lifecycle).await;
    }

    pub async fn request_delete(&self, id: u64) {
        if self.delete_policy == DeletePolicy::Eager {
            let removed = self.store.borrow_mut().remove_by_id(id);
            if removed.is_none() {
                debug!(id, "deleted post was not in the store");
            }
        }

        let request = self.client.build_delete_post(id);
        let mut lifecycle = DeleteLifecycle { controller: self, id };
        transport::request(&self.transport, request, &mut lifecycle).await;
    }

    /// Adjust the like count locally, then tell the server. Unknown ids and
    /// counts already at the `i64` limit are ignored and send nothing.
    pub async fn request_like_adjust(&self, id: u64, direction: LikeDirection) {
        let likes = self.store.borrow_mut().adjust_likes(id, direction.delta());
        let Some(likes) = likes else {
            debug!(id, ?direction, "like adjustment ignored, post unknown or count at limit");
            return;
        };
        debug!(id, likes, "likes adjusted locally");

        let request = self.client.build_adjust_likes(id, direction);
        let mut lifecycle = LikeLifecycle { controller: self, id };
        transport::request(&self.transport, request, &mut lifecycle).await;
    }
}

impl<T, V: View> SyncController<T, V> {
    fn begin(&self, item: Option<u64>) {
        let mut busy = self.busy.borrow_mut();
        let mut view = self.view.borrow_mut();
        if busy.begin() {
            view.set_busy(true);
            view.set_inputs_enabled(false);
        }
        if let Some(id) = item {
            if busy.begin_item(id) {
                view.set_item_busy(id, true);
            }
        }
    }

    fn finish(&self, item: Option<u64>) {
        let mut busy = self.busy.borrow_mut();
        let mut view = self.view.borrow_mut();
        if let Some(id) = item {
            if busy.end_item(id) {
                view.set_item_busy(id, false);
            }
        }
        if busy.end() {
            view.set_busy(false);
            view.set_inputs_enabled(true);
        }
        view.reset_form();
        view.focus(Field::Author);
        view.render(self.store.borrow().posts());
    }
}

struct LoadLifecycle<'a, T, V> {
    controller: &'a SyncController<T, V>,
}

impl<T, V: View> Lifecycle for LoadLifecycle<'_, T, V> {
    fn on_start(&mut self) {
        self.controller.begin(None);
    }

    fn on_success(&mut self, body: String) {
        match self.controller.client.parse_list_posts(&body) {
            Ok(posts) => {
                debug!(count = posts.len(), "posts loaded");
                self.controller.store.borrow_mut().replace_all(posts);
            }
            Err(error) => error!(%error, "discarding unreadable post list"),
        }
    }

    fn on_error(&mut self, error: ApiError) {
        warn!(%error, "loading posts failed");
    }

    fn on_finish(&mut self) {
        self.controller.finish(None);
    }
}

struct CreateLifecycle<'a, T, V> {
    controller: &'a SyncController<T, V>,
    pending: Option<Post>,
}

impl<T, V: View> Lifecycle for CreateLifecycle<'_, T, V> {
    fn on_start(&mut self) {
        self.controller.begin(None);
    }

    fn on_success(&mut self, body: String) {
        let id = match self.controller.client.parse_created_id(&body) {
            Ok(id) => id,
            Err(error) => {
                error!(%error, "create response carried no usable id");
                return;
            }
        };
        if let Some(mut post) = self.pending.take() {
            post.id = id;
            debug!(id, "post created");
            self.controller.store.borrow_mut().prepend(post);
        }
    }

    fn on_error(&mut self, error: ApiError) {
        warn!(%error, "creating post failed");
    }

    fn on_finish(&mut self) {
        self.controller.finish(None);
    }
}

struct DeleteLifecycle<'a, T, V> {
    controller: &'a SyncController<T, V>,
    id: u64,
}

impl<T, V: View> Lifecycle for DeleteLifecycle<'_, T, V> {
    fn on_start(&mut self) {
        self.controller.begin(Some(self.id));
    }

    fn on_success(&mut self, _body: String) {
        if self.controller.delete_policy == DeletePolicy::Confirmed {
            self.controller.store.borrow_mut().remove_by_id(self.id);
        }
        debug!(id = self.id, "post deleted");
    }

    fn on_error(&mut self, error: ApiError) {
        warn!(id = self.id, %error, "deleting post failed");
    }

    fn on_finish(&mut self) {
        self.controller.finish(Some(self.id));
    }
}

/// No error hook: a failed like is only visible in the transport's debug log.
struct LikeLifecycle<'a, T, V> {
    controller: &'a SyncController<T, V>,
    id: u64,
}

impl<T, V: View> Lifecycle for LikeLifecycle<'_, T, V> {
    fn on_start(&mut self) {
        self.controller.begin(Some(self.id));
    }

    fn on_finish(&mut self) {
        self.controller.finish(Some(self.id));
    }
}
