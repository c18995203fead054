use serde::{Deserialize, Serialize};

use crate::domain::RegisteredUser;

/// The customer using this client, once registered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSession {
    user: Option<RegisteredUser>,
}

impl CustomerSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: RegisteredUser) {
        self.user = Some(user);
    }

    pub fn user(&self) -> Option<&RegisteredUser> {
        self.user.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.user.is_some()
    }

    pub fn phone(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.phone.as_str())
    }
}
