//! In-memory session store.
//!
//! The store is the single source of truth for every session, image and
//! report. All mutation goes through id-keyed update operations that take the
//! write lock, apply a closure to exactly one session (or one image) and
//! release it, so concurrent updates to different ids never race. Updates
//! addressed to an id that no longer exists are no-ops.

use super::image::WorkshopImage;
use super::model::{ActiveView, Session, SessionSummary};
use crate::error::{Result, ScribeError};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreState {
    /// Sessions, newest first
    sessions: Vec<Session>,
    active_session_id: Option<String>,
    active_view: ActiveView,
}

impl StoreState {
    fn session_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }
}

/// Shared handle to the in-memory session collection.
///
/// Cloning the handle shares the underlying state.
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<StoreState>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session at the front of the list.
    pub async fn insert_session(&self, session: Session) {
        let mut state = self.state.write().await;
        tracing::debug!("[SessionStore] insert session: id={}", session.id);
        state.sessions.insert(0, session);
    }

    /// Adds a session at the front of the list and opens it on the photos view.
    pub async fn insert_active_session(&self, session: Session) {
        let mut state = self.state.write().await;
        tracing::debug!("[SessionStore] insert active session: id={}", session.id);
        state.active_session_id = Some(session.id.clone());
        state.active_view = ActiveView::Photos;
        state.sessions.insert(0, session);
    }

    /// Returns a snapshot of one session.
    pub async fn session(&self, session_id: &str) -> Option<Session> {
        let state = self.state.read().await;
        state.sessions.iter().find(|s| s.id == session_id).cloned()
    }

    /// Returns a snapshot of all sessions, newest first.
    pub async fn sessions(&self) -> Vec<Session> {
        self.state.read().await.sessions.clone()
    }

    pub async fn summaries(&self) -> Vec<SessionSummary> {
        let state = self.state.read().await;
        state.sessions.iter().map(Session::summary).collect()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.sessions.is_empty()
    }

    /// Removes a session together with its images and report.
    ///
    /// Clears the active selection if it pointed at the removed session.
    /// Returns whether the session existed.
    pub async fn delete_session(&self, session_id: &str) -> bool {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|s| s.id != session_id);
        let removed = state.sessions.len() != before;
        if state.active_session_id.as_deref() == Some(session_id) {
            state.active_session_id = None;
            state.active_view = ActiveView::Photos;
        }
        tracing::debug!(
            "[SessionStore] delete session: id={}, removed={}",
            session_id,
            removed
        );
        removed
    }

    /// Applies `updater` to one session.
    ///
    /// Returns `None` without calling `updater` if the session does not exist.
    pub async fn update_session<F, R>(&self, session_id: &str, updater: F) -> Option<R>
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut state = self.state.write().await;
        match state.session_mut(session_id) {
            Some(session) => Some(updater(session)),
            None => {
                tracing::debug!(
                    "[SessionStore] update ignored, session gone: id={}",
                    session_id
                );
                None
            }
        }
    }

    /// Applies `updater` to one image of one session.
    ///
    /// Returns `None` without calling `updater` if either id does not exist.
    pub async fn update_image<F, R>(&self, session_id: &str, image_id: &str, updater: F) -> Option<R>
    where
        F: FnOnce(&mut WorkshopImage) -> R,
    {
        let mut state = self.state.write().await;
        let image = state
            .session_mut(session_id)
            .and_then(|session| session.image_mut(image_id));
        match image {
            Some(image) => Some(updater(image)),
            None => {
                tracing::debug!(
                    "[SessionStore] update ignored, image gone: session_id={}, image_id={}",
                    session_id,
                    image_id
                );
                None
            }
        }
    }

    /// Returns a snapshot of one image.
    pub async fn image(&self, session_id: &str, image_id: &str) -> Option<WorkshopImage> {
        let state = self.state.read().await;
        state
            .sessions
            .iter()
            .find(|s| s.id == session_id)
            .and_then(|s| s.image(image_id))
            .cloned()
    }

    /// Selects the active session, or clears the selection with `None`.
    pub async fn set_active_session(&self, session_id: Option<&str>) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(id) = session_id
            && !state.sessions.iter().any(|s| s.id == id)
        {
            return Err(ScribeError::not_found("Session", id));
        }
        state.active_session_id = session_id.map(str::to_string);
        Ok(())
    }

    /// Clears the active selection.
    pub async fn clear_active_session(&self) {
        self.state.write().await.active_session_id = None;
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.state.read().await.active_session_id.clone()
    }

    /// Returns a snapshot of the active session.
    pub async fn active_session(&self) -> Option<Session> {
        let state = self.state.read().await;
        let id = state.active_session_id.as_deref()?;
        state.sessions.iter().find(|s| s.id == id).cloned()
    }

    pub async fn active_view(&self) -> ActiveView {
        self.state.read().await.active_view
    }

    pub async fn set_active_view(&self, view: ActiveView) {
        self.state.write().await.active_view = view;
    }

    /// Switches to `view` only if `session_id` is the active session.
    pub async fn set_active_view_for(&self, session_id: &str, view: ActiveView) -> bool {
        let mut state = self.state.write().await;
        if state.active_session_id.as_deref() == Some(session_id) {
            state.active_view = view;
            true
        } else {
            false
        }
    }
}
