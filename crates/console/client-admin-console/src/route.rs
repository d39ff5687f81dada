//! Console routes.

use client_admin_model::RecordId;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route '{0}'")]
pub struct RouteError(pub String);

/// A client-visible location in the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`, which redirects to [`Route::List`]
    Root,
    /// `/clients`
    List,
    /// `/clients/create`
    Create,
    /// `/clients/:id`
    Detail(RecordId),
    /// `/clients/:id/edit`
    Edit(RecordId),
}

impl Route {
    /// Follow redirects; only the root path redirects.
    pub fn resolve(self) -> Self {
        match self {
            Self::Root => Self::List,
            other => other,
        }
    }

    pub fn path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::List => f.write_str("/clients"),
            Self::Create => f.write_str("/clients/create"),
            Self::Detail(id) => write!(f, "/clients/{id}"),
            Self::Edit(id) => write!(f, "/clients/{id}/edit"),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let segments: Vec<&str> = trimmed
            .trim_matches('/')
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Ok(Self::Root),
            ["clients"] => Ok(Self::List),
            ["clients", "create"] => Ok(Self::Create),
            ["clients", id] => Ok(Self::Detail(RecordId::new(*id))),
            ["clients", id, "edit"] => Ok(Self::Edit(RecordId::new(*id))),
            _ => Err(RouteError(trimmed.to_string())),
        }
    }
}
