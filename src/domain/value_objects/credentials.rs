/// Telegram bot credentials. The token is a bearer secret and never appears
/// in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    chat_id: String,
}

impl Credentials {
    /// Returns `None` if either value is missing or blank.
    #[must_use]
    pub fn from_parts(token: Option<&str>, chat_id: Option<&str>) -> Option<Self> {
        let token = token.map(str::trim).filter(|t| !t.is_empty())?;
        let chat_id = chat_id.map(str::trim).filter(|c| !c.is_empty())?;
        Some(Self {
            token: token.to_owned(),
            chat_id: chat_id.to_owned(),
        })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn both_parts_required() {
        assert!(Credentials::from_parts(Some("123:abc"), None).is_none());
        assert!(Credentials::from_parts(None, Some("42")).is_none());
        assert!(Credentials::from_parts(None, None).is_none());
    }

    #[test]
    fn blank_parts_count_as_missing() {
        assert!(Credentials::from_parts(Some("   "), Some("42")).is_none());
        assert!(Credentials::from_parts(Some("123:abc"), Some("")).is_none());
    }

    #[test]
    fn values_are_trimmed() {
        let creds = Credentials::from_parts(Some(" 123:abc \n"), Some(" -100 ")).expect("creds");
        assert_eq!(creds.token(), "123:abc");
        assert_eq!(creds.chat_id(), "-100");
    }

    #[test]
    fn debug_never_prints_token() {
        let creds = Credentials::from_parts(Some("123:super-secret"), Some("42")).expect("creds");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("42"));
    }
}
