//! Access to the hosting environment.
//!
//! In a browser these would be `location.origin`, the `<base href>` of the
//! document and `location.href = ...`. Keeping them behind a trait lets the
//! session holder run, and be tested, anywhere.

use std::sync::Mutex;

use tracing::info;

use crate::types::Origin;

/// The hosting environment of a session holder.
pub trait Environment: Send + Sync {
    /// Origin the application was served from.
    fn origin(&self) -> Origin;

    /// Declared base URL of the document, either absolute or root-relative.
    fn base_href(&self) -> String;

    /// Full navigation to `url`. Expected to unload the application.
    fn navigate(&self, url: &str);
}

/// An environment with a fixed origin and base.
///
/// Navigation requests are logged and remembered instead of performed.
#[derive(Debug)]
pub struct StaticEnvironment {
    origin: Origin,
    base_href: String,
    last_navigation: Mutex<Option<String>>,
}

impl StaticEnvironment {
    pub fn new(origin: Origin, base_href: impl Into<String>) -> Self {
        Self {
            origin,
            base_href: base_href.into(),
            last_navigation: Mutex::new(None),
        }
    }

    /// The most recent URL passed to [`Environment::navigate`].
    pub fn last_navigation(&self) -> Option<String> {
        self.last_navigation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Environment for StaticEnvironment {
    fn origin(&self) -> Origin {
        self.origin.clone()
    }

    fn base_href(&self) -> String {
        self.base_href.clone()
    }

    fn navigate(&self, url: &str) {
        info!(%url, "Navigation requested");
        *self
            .last_navigation
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(url.to_string());
    }
}
