// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session registry
//!
//! Sessions are looked up by ID. Each session sits behind its own lock, so
//! work in one session never waits on another.

use super::models::Session;
use crate::storage::StoreResult;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to one session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Maintains all active sessions
#[derive(Default)]
pub struct SessionManager {
    /// Registry of all active sessions indexed by session_id
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session and return its ID
    pub fn create_session(&self) -> StoreResult<String> {
        let session = Session::new()?;
        let session_id = session.session_id.clone();
        self.sessions
            .write()
            .insert(session_id.clone(), Arc::new(Mutex::new(session)));
        log::debug!("Created session {}", session_id);
        Ok(session_id)
    }

    /// Get a session by ID
    pub fn get_session(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Remove a session; its store is dropped once no handle remains
    pub fn remove_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            log::debug!("Closed session {}", session_id);
        }
        removed
    }

    /// Get all active session IDs
    pub fn get_active_session_ids(&self) -> Vec<String> {
        self.sessions.read().keys().cloned().collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}
