//! Append-only editors for the two redirect URI lists of the form.

use crate::shell::Shell;
use client_admin_model::has_allowed_scheme;
use tracing::debug;

/// Which URI list an editor manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriList {
    Redirect,
    PostLogout,
}

impl UriList {
    pub fn label(self) -> &'static str {
        match self {
            Self::Redirect => "Redirect URIs",
            Self::PostLogout => "Post Logout Redirect URIs",
        }
    }

    fn rejection(self) -> &'static str {
        match self {
            Self::Redirect => "Redirect URI must start with http:// or https://",
            Self::PostLogout => "Post logout URI must start with http:// or https://",
        }
    }
}

/// What happened to the staged input on "Add".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    /// Nothing but whitespace was staged.
    Ignored,
    /// The scheme check failed; the staged input is kept.
    Rejected,
    Added,
}

/// Staged text input plus add/remove over a borrowed URI list.
#[derive(Debug, Clone)]
pub struct UriListEditor {
    kind: UriList,
    staged: String,
}

impl UriListEditor {
    pub fn new(kind: UriList) -> Self {
        Self {
            kind,
            staged: String::new(),
        }
    }

    pub fn stage(&mut self, input: impl Into<String>) {
        self.staged = input.into();
    }

    pub fn staged(&self) -> &str {
        &self.staged
    }

    /// Append the staged input to `uris` if it passes the scheme check.
    ///
    /// The check runs on the raw input while the trimmed value is stored, so
    /// leading whitespace before the scheme is rejected.
    pub fn add(&mut self, uris: &mut Vec<String>, shell: &dyn Shell) -> AddResult {
        let trimmed = self.staged.trim();
        if trimmed.is_empty() {
            return AddResult::Ignored;
        }
        if !has_allowed_scheme(&self.staged) {
            debug!(list = ?self.kind, input = %self.staged, "Rejected URI");
            shell.alert(self.kind.rejection());
            return AddResult::Rejected;
        }

        uris.push(trimmed.to_string());
        self.staged.clear();
        AddResult::Added
    }

    /// Remove the entry at `index`, keeping the order of the rest.
    pub fn remove(uris: &mut Vec<String>, index: usize) -> Option<String> {
        (index < uris.len()).then(|| uris.remove(index))
    }
}
