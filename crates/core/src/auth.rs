/// Per-request caller information used for access decisions.
///
/// Either part may be missing: a request without a verified subject or
/// without a bearer credential is treated as anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    caller_id: Option<String>,
    credential: Option<String>,
}

impl CallerContext {
    /// Creates a caller context, normalizing blank values to absent.
    #[must_use]
    pub fn new(caller_id: Option<String>, credential: Option<String>) -> Self {
        Self {
            caller_id: caller_id.filter(|value| !value.trim().is_empty()),
            credential: credential.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Creates a context for an authenticated caller.
    #[must_use]
    pub fn authenticated(caller_id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self::new(Some(caller_id.into()), Some(credential.into()))
    }

    /// Creates a context for a caller without identity.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Returns the caller identifier, if present.
    #[must_use]
    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    /// Returns the bearer credential, if present.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Returns both identity parts when the caller is fully identified.
    #[must_use]
    pub fn identity(&self) -> Option<(&str, &str)> {
        self.caller_id().zip(self.credential())
    }

    /// Returns whether the caller lacks an id or a credential.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.identity().is_none()
    }
}
