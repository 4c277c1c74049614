//! Session boundary: a single static password unlocks the admin role.

use crate::error::{OrgError, OrgResult};
use crate::models::UserRole;

#[derive(Debug, Clone)]
pub struct Session {
    role: UserRole,
    admin_password: String,
}

impl Session {
    /// A fresh session always starts as a viewer.
    pub fn new(admin_password: impl Into<String>) -> Self {
        Self {
            role: UserRole::Viewer,
            admin_password: admin_password.into(),
        }
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Elevate to admin when `password` matches. A wrong password leaves the
    /// role untouched.
    pub fn login(&mut self, password: &str) -> OrgResult<UserRole> {
        if password == self.admin_password {
            self.role = UserRole::Admin;
            tracing::info!("Admin session started");
            Ok(self.role)
        } else {
            tracing::warn!("Rejected admin login attempt");
            Err(OrgError::PermissionDenied)
        }
    }

    /// Drop back to viewer. Returns `true` if the session was admin.
    pub fn logout(&mut self) -> bool {
        let was_admin = self.role.is_admin();
        self.role = UserRole::Viewer;
        was_admin
    }
}
