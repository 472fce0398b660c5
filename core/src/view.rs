//! Interface to whatever draws the posts and the create form.
//!
//! The controller never builds markup. It tells the view what to show and
//! the host forwards the view's events back as `Intent`s.

use crate::types::{Field, Post};

pub trait View {
    /// Replace the visible list with `posts`, in order.
    fn render(&mut self, posts: &[Post]);

    /// Show or hide the global busy indicator.
    fn set_busy(&mut self, busy: bool);

    fn set_inputs_enabled(&mut self, enabled: bool);

    /// Show or hide the busy marker on one post.
    fn set_item_busy(&mut self, id: u64, busy: bool);

    /// Clear the create form's inputs.
    fn reset_form(&mut self);

    fn focus(&mut self, field: Field);

    /// Set (`Some`) or clear (`None`) the inline form message.
    fn set_message(&mut self, message: Option<&str>);
}
