//! Application state: one session, one chart history, one durable store.
//!
//! Every edit follows the same path: the engine produces a new root, the
//! history commits it, and the store is written. Expand/collapse skips the
//! history but is still persisted.

use crate::db::TreeStore;
use crate::document;
use crate::error::{OrgError, OrgResult};
use crate::hierarchy::engine;
use crate::history::History;
use crate::models::*;
use crate::render;
use crate::seed;
use crate::session::Session;

pub struct OrgChart {
    session: Session,
    history: History<OrgNode>,
    store: Box<dyn TreeStore>,
    persistence_warning: Option<String>,
}

impl OrgChart {
    pub fn new(root: OrgNode, store: Box<dyn TreeStore>, admin_password: impl Into<String>) -> Self {
        Self {
            session: Session::new(admin_password),
            history: History::new(root),
            store,
            persistence_warning: None,
        }
    }

    /// Start from the stored chart, or from the built-in seed when the store
    /// is empty.
    pub fn load(store: Box<dyn TreeStore>, admin_password: impl Into<String>) -> anyhow::Result<Self> {
        let root = match store.load_tree()? {
            Some(root) => root,
            None => {
                tracing::info!("No stored chart found, starting from the default seed");
                seed::default_tree()
            }
        };
        Ok(Self::new(root, store, admin_password))
    }

    pub fn tree(&self) -> &OrgNode {
        self.history.current()
    }

    pub fn role(&self) -> UserRole {
        self.session.role()
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn persistence_warning(&self) -> Option<&str> {
        self.persistence_warning.as_deref()
    }

    pub fn session_view(&self) -> SessionView {
        SessionView {
            role: self.role(),
            history: self.history_status(),
            persistence_warning: self.persistence_warning.clone(),
        }
    }

    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats::from_tree(self.tree())
    }

    pub fn render(&self) -> String {
        render::render_tree(self.tree())
    }

    // ============================================================
    // Session
    // ============================================================

    pub fn login(&mut self, password: &str) -> OrgResult<UserRole> {
        self.session.login(password)
    }

    /// Return to viewer mode. Undo and redo history are always discarded.
    pub fn logout(&mut self) {
        if self.session.logout() {
            tracing::info!("Admin session ended");
        }
        self.history.clear();
    }

    // ============================================================
    // Committed edits
    // ============================================================

    pub fn rename(&mut self, id: &str, name: &str) -> OrgResult<&OrgNode> {
        let next = engine::rename(self.role(), self.tree(), id, name)?;
        self.commit_change("rename", next);
        Ok(self.tree())
    }

    pub fn add_lead(&mut self, manager_id: &str, name: &str) -> OrgResult<&OrgNode> {
        let next = engine::add_lead(self.role(), self.tree(), manager_id, name)?;
        self.commit_change("add_lead", next);
        Ok(self.tree())
    }

    pub fn add_member(&mut self, lead_id: &str, name: &str) -> OrgResult<&OrgNode> {
        let next = engine::add_member(self.role(), self.tree(), lead_id, name)?;
        self.commit_change("add_member", next);
        Ok(self.tree())
    }

    pub fn delete_node(&mut self, id: &str) -> OrgResult<&OrgNode> {
        let next = engine::delete_node(self.role(), self.tree(), id)?;
        self.commit_change("delete_node", next);
        Ok(self.tree())
    }

    pub fn reorder_sibling(&mut self, id: &str, direction: MoveDirection) -> OrgResult<&OrgNode> {
        let next = engine::reorder_sibling(self.role(), self.tree(), id, direction)?;
        self.commit_change("reorder_sibling", next);
        Ok(self.tree())
    }

    pub fn move_member(&mut self, member_id: &str, target_lead_id: &str) -> OrgResult<&OrgNode> {
        let next = engine::move_member(self.role(), self.tree(), member_id, target_lead_id)?;
        self.commit_change("move_member", next);
        Ok(self.tree())
    }

    /// Replace the chart with an imported document.
    ///
    /// An invalid document leaves the tree and both history stacks untouched.
    pub fn import(&mut self, text: &str) -> OrgResult<&OrgNode> {
        if !self.role().is_admin() {
            return Err(OrgError::PermissionDenied);
        }
        let root = document::deserialize(text).inspect_err(|e| {
            tracing::warn!("Rejected chart import: {}", e);
        })?;
        self.commit("import", root);
        Ok(self.tree())
    }

    /// Replace the chart with the built-in seed as a single undoable step.
    pub fn reset(&mut self) -> OrgResult<&OrgNode> {
        if !self.role().is_admin() {
            return Err(OrgError::PermissionDenied);
        }
        self.commit("reset", seed::default_tree());
        Ok(self.tree())
    }

    pub fn export(&self) -> OrgResult<String> {
        document::serialize_pretty(self.tree())
    }

    // ============================================================
    // Presentation-only edits
    // ============================================================

    pub fn toggle_expand(&mut self, id: &str) -> OrgResult<&OrgNode> {
        let next = engine::toggle_expand(self.role(), self.tree(), id)?;
        self.replace(next);
        Ok(self.tree())
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) -> OrgResult<&OrgNode> {
        let next = engine::set_expanded(self.role(), self.tree(), id, expanded)?;
        self.replace(next);
        Ok(self.tree())
    }

    // ============================================================
    // History
    // ============================================================

    /// Step back once. `Ok(false)` when there was nothing to undo.
    pub fn undo(&mut self) -> OrgResult<bool> {
        if !self.role().is_admin() {
            return Err(OrgError::PermissionDenied);
        }
        let moved = self.history.undo();
        if moved {
            self.persist();
        }
        Ok(moved)
    }

    /// Step forward once. `Ok(false)` when there was nothing to redo.
    pub fn redo(&mut self) -> OrgResult<bool> {
        if !self.role().is_admin() {
            return Err(OrgError::PermissionDenied);
        }
        let moved = self.history.redo();
        if moved {
            self.persist();
        }
        Ok(moved)
    }

    /// Commit an engine result, skipping results equal to the current tree.
    fn commit_change(&mut self, action: &str, next: OrgNode) {
        if next == *self.tree() {
            tracing::debug!("{} left the chart unchanged, nothing to commit", action);
            return;
        }
        self.commit(action, next);
    }

    /// Commit unconditionally. Whole-document replacements always count as
    /// a step, even when the new document matches the current tree.
    fn commit(&mut self, action: &str, next: OrgNode) {
        self.history.commit(next);
        tracing::debug!("Committed {}", action);
        self.persist();
    }

    fn replace(&mut self, next: OrgNode) {
        self.history.replace_current(next);
        self.persist();
    }

    fn persist(&mut self) {
        match self.store.save_tree(self.history.current()) {
            Ok(()) => self.persistence_warning = None,
            Err(e) => {
                let err = OrgError::Persistence(format!("{:#}", e));
                tracing::warn!("{}", err);
                self.persistence_warning = Some(err.to_string());
            }
        }
    }
}
