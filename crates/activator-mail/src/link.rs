//! Activation link construction.

use url::Url;

use crate::error::MailError;

/// Base address and path that activation tokens are appended to.
#[derive(Debug, Clone)]
pub struct ActivationLink {
    base: Url,
}

impl ActivationLink {
    /// `base_url` supplies scheme, host and port; `path` replaces any
    /// path it carries.
    pub fn new(base_url: &str, path: &str) -> Result<Self, MailError> {
        let mut base =
            Url::parse(base_url).map_err(|e| MailError::Link(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(MailError::Link(format!("{base_url}: not a base URL")));
        }
        base.set_path(path);
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    /// The link for one token, carried in the `token` query parameter.
    pub fn for_token(&self, token: &str) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("token", token);
        url
    }
}
