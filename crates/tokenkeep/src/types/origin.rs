//! Origin type and token endpoint resolution.

use std::fmt;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path segment appended to the document base to reach the token endpoint.
pub const TOKEN_PATH: &str = "token";

/// A validated web origin: scheme, host and optional port, nothing else.
///
/// # Example
///
/// ```
/// use tokenkeep::Origin;
///
/// let origin = Origin::new("https://app.example.com/").unwrap();
/// assert_eq!(origin.as_str(), "https://app.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Origin(Url);

impl Origin {
    /// Create a new origin from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error unless the value is an `http`/`https` URL with a host
    /// and no path, query or fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: &str| InvalidInputError::Origin {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(s).map_err(|e| invalid(&e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("must use http or https").into());
        }
        if url.host_str().is_none() {
            return Err(invalid("must have a host").into());
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a path, query or fragment").into());
        }

        Ok(Self(url))
    }

    /// Returns the origin without a trailing slash.
    pub fn as_str(&self) -> &str {
        self.0.as_str().trim_end_matches('/')
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the token endpoint from the document base URL.
///
/// A base starting with `/` (or an empty base) is resolved against `origin`;
/// any other base must be an absolute URL. [`TOKEN_PATH`] is then appended as
/// a single path segment.
///
/// # Example
///
/// ```
/// use tokenkeep::{Origin, token_endpoint};
///
/// let origin = Origin::new("https://app.example.com").unwrap();
/// let url = token_endpoint(&origin, "/ui/").unwrap();
/// assert_eq!(url.as_str(), "https://app.example.com/ui/token");
/// ```
pub fn token_endpoint(origin: &Origin, base_href: &str) -> Result<Url, Error> {
    let base_href = base_href.trim();

    let computed = if base_href.is_empty() {
        origin.as_str().to_string()
    } else if base_href.starts_with('/') {
        format!("{}{}", origin.as_str(), base_href)
    } else {
        base_href.to_string()
    };

    let invalid = |reason: String| InvalidInputError::BaseUrl {
        value: base_href.to_string(),
        reason,
    };

    let mut url = Url::parse(&computed).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("must be a hierarchical URL".to_string()).into());
    }

    let path = format!("{}/{}", url.path().trim_end_matches('/'), TOKEN_PATH);
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
