//! Headless view state machines.
//!
//! Each view fetches its own data on mount and talks to the backend only
//! through [`ClientsApi`](client_admin_api::ClientsApi). There is no shared
//! cache: navigating to a view always fetches again.

pub mod detail;
pub mod form;
pub mod list;
pub mod uri_editor;

pub use detail::DetailView;
pub use form::{ClientFormFields, FieldEdit, FieldErrors, FormField, FormMode, FormView};
pub use list::ListView;
pub use uri_editor::{AddResult, UriList, UriListEditor};
