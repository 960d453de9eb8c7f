//! Session-lifetime directory state.
//!
//! `DirectoryStore` is the single source of truth for fetched users, the
//! selected user, and the status of fetch operations. Views read its slots
//! and mutate only through the operations below; transport failures never
//! escape the store, they land in the `error` slot as a user-facing message.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::User;

const FETCH_USERS_FAILED: &str = "Failed to fetch users. Please try again.";

/// Seam between the store and the transport. The HTTP client implements
/// this for production; tests substitute in-memory stubs.
#[async_trait(?Send)]
pub trait UserSource {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn user_by_id(&self, id: u64) -> Result<User>;
}

/// Created once per session and passed by reference to whichever views
/// need it.
///
/// All mutation happens on the current-thread runtime, so interior
/// mutability stands in for locking. There is no mutual exclusion across
/// logical operations: two in-flight fetches interleave, and whichever
/// completes last wins the shared `loading`/`error` slots.
pub struct DirectoryStore<S: UserSource> {
    source: S,
    users: RefCell<Vec<User>>,
    // id -> position in `users`; rebuilt only when `users` is replaced
    // wholesale. A by-id fetch never writes back into the list, so a
    // cached entry stays as fetched for the rest of the session.
    by_id: RefCell<HashMap<u64, usize>>,
    selected: RefCell<Option<User>>,
    loading: Cell<bool>,
    error: RefCell<Option<String>>,
}

impl<S: UserSource> DirectoryStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            users: RefCell::new(Vec::new()),
            by_id: RefCell::new(HashMap::new()),
            selected: RefCell::new(None),
            loading: Cell::new(false),
            error: RefCell::new(None),
        }
    }

    /// Fetch the full user collection, replacing `users` wholesale on
    /// success. On failure the list is left untouched and `error` holds a
    /// fixed message; nothing is raised to the caller.
    pub async fn fetch_all_users(&self) {
        self.loading.set(true);
        *self.error.borrow_mut() = None;

        match self.source.list_users().await {
            Ok(users) => {
                let index = users
                    .iter()
                    .enumerate()
                    .map(|(pos, user)| (user.id, pos))
                    .collect();
                *self.users.borrow_mut() = users;
                *self.by_id.borrow_mut() = index;
            }
            Err(err) => {
                tracing::warn!(error = %err, "user list fetch failed");
                *self.error.borrow_mut() = Some(FETCH_USERS_FAILED.to_string());
            }
        }

        self.loading.set(false);
    }

    /// Fetch one user into the selected slot, consulting the cached list
    /// first. A cache hit issues no network call; a miss that fails clears
    /// the selection and records a message carrying the requested id.
    ///
    /// Callers validate that `id` came from a positive integer before
    /// calling.
    pub async fn fetch_user_by_id(&self, id: u64) {
        self.loading.set(true);
        *self.error.borrow_mut() = None;

        if let Some(user) = self.cached(id) {
            tracing::debug!(id, "serving user from cached list");
            *self.selected.borrow_mut() = Some(user);
            self.loading.set(false);
            return;
        }

        match self.source.user_by_id(id).await {
            Ok(user) => {
                *self.selected.borrow_mut() = Some(user);
            }
            Err(err) => {
                tracing::warn!(error = %err, id, "user fetch failed");
                *self.selected.borrow_mut() = None;
                *self.error.borrow_mut() =
                    Some(format!("Failed to fetch user with ID {id}. Please try again."));
            }
        }

        self.loading.set(false);
    }

    pub fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }

    /// Overwrite the selection with a value a view already holds, e.g.
    /// picking a row from an already-rendered list.
    pub fn set_selected_user(&self, user: Option<User>) {
        *self.selected.borrow_mut() = user;
    }

    pub fn users(&self) -> Ref<'_, Vec<User>> {
        self.users.borrow()
    }

    pub fn selected_user(&self) -> Option<User> {
        self.selected.borrow().clone()
    }

    #[allow(dead_code)]
    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    fn cached(&self, id: u64) -> Option<User> {
        let pos = *self.by_id.borrow().get(&id)?;
        self.users.borrow().get(pos).cloned()
    }

    #[cfg(test)]
    fn source(&self) -> &S {
        &self.source
    }
}
