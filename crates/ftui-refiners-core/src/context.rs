#![forbid(unsafe_code)]

//! Pass-through context handed to every value renderer.
//!
//! Nothing in the reconciliation core inspects these values; they are carried
//! on each [`Item`](crate::items::Item) so renderers can localize, theme, and
//! resolve people without reaching back into the host.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Visual theme variant requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub display_name: String,
    pub email: String,
}

/// Identity provider used by renderers that show people (personas).
pub trait UserService: fmt::Debug + Send + Sync {
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Language, theme, and identity collaborators forwarded to renderers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// BCP-47 style tag, lowercase (`en-us`).
    pub language: String,
    pub theme_variant: ThemeVariant,
    pub user_service: Option<Arc<dyn UserService>>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            language: "en-us".to_owned(),
            theme_variant: ThemeVariant::default(),
            user_service: None,
        }
    }
}

impl RenderContext {
    #[must_use]
    pub fn new(language: impl Into<String>, theme_variant: ThemeVariant) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            theme_variant,
            user_service: None,
        }
    }

    #[must_use]
    pub fn with_user_service(mut self, service: Arc<dyn UserService>) -> Self {
        self.user_service = Some(service);
        self
    }
}

// The user service is compared by identity: the same collaborator means the
// same context.
impl PartialEq for RenderContext {
    fn eq(&self, other: &Self) -> bool {
        let same_service = match (&self.user_service, &other.user_service) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.language == other.language && self.theme_variant == other.theme_variant && same_service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FixedUser;

    impl UserService for FixedUser {
        fn current_user(&self) -> Option<UserIdentity> {
            Some(UserIdentity {
                display_name: "Ada".to_owned(),
                email: "ada@example.com".to_owned(),
            })
        }
    }

    #[test]
    fn language_is_normalized() {
        let ctx = RenderContext::new("FR-fr", ThemeVariant::Light);
        assert_eq!(ctx.language, "fr-fr");
    }

    #[test]
    fn contexts_compare_user_service_by_identity() {
        let service: Arc<dyn UserService> = Arc::new(FixedUser);
        let a = RenderContext::default().with_user_service(Arc::clone(&service));
        let b = RenderContext::default().with_user_service(service);
        let c = RenderContext::default().with_user_service(Arc::new(FixedUser));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, RenderContext::default());
        assert_eq!(
            a.user_service.unwrap().current_user().unwrap().display_name,
            "Ada"
        );
    }
}
