//! Headless console for administering OAuth2 client registrations.
//!
//! This crate provides:
//! - the list, detail and form views as async state machines
//! - [`Console`], which mounts the view for a [`Route`]
//! - the [`Shell`] trait every front end implements for prompts and alerts
//! - [`ConsoleConfig`], the layered configuration of the `client-admin` binary
//!
//! Views never render themselves; [`render`] turns them into styled text
//! for the terminal front end.

pub mod app;
pub mod config;
pub mod loadable;
pub mod render;
pub mod route;
pub mod shell;
pub mod views;

#[cfg(test)]
mod testing;

pub use app::{Console, View};
pub use config::ConsoleConfig;
pub use loadable::{Loadable, RequestGuard, Ticket};
pub use route::{Route, RouteError};
pub use shell::{Outcome, Shell};
