//! Text rendering of the views for the terminal front end.

use crate::loadable::Loadable;
use crate::views::{DetailView, FormMode, FormView, ListView, UriList};
use client_admin_model::ClientRecord;
use console::style;
use std::fmt::Write;

const MISSING: &str = "-";

fn status(active: bool) -> String {
    if active {
        style("Active").green().to_string()
    } else {
        style("Inactive").red().to_string()
    }
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn uri_block(out: &mut String, title: &str, uris: &[String]) {
    let _ = writeln!(out, "{}", style(title).bold());
    if uris.is_empty() {
        let _ = writeln!(out, "  {}", style("(none)").dim());
    }
    for (index, uri) in uris.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, uri);
    }
}

pub fn render_list(view: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style("=== OAuth2 Clients ===").bold().cyan());

    match view.state() {
        Loadable::Loading => {
            let _ = writeln!(out, "{}", style("Loading...").dim());
        }
        Loadable::Failed(message) => {
            let _ = writeln!(out, "{} {}", style("✗").red(), style(message).red());
        }
        Loadable::Loaded(records) if records.is_empty() => {
            let _ = writeln!(out, "No clients found");
        }
        Loadable::Loaded(records) => {
            for record in records {
                list_row(&mut out, record);
            }
        }
    }
    out
}

fn list_row(out: &mut String, record: &ClientRecord) {
    let _ = writeln!(
        out,
        "{} {} {}",
        style(format!("[{}]", record.id)).dim(),
        style(&record.name).cyan().bold(),
        status(record.active)
    );
    let _ = writeln!(out, "    {}", or_missing(record.description()));
    let _ = writeln!(
        out,
        "    client id: {}  type: {}  auth: {}",
        record.client_id,
        or_missing(record.application_type.map(|t| t.as_str())),
        or_missing(record.auth_method.map(|m| m.as_str())),
    );
}

pub fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();

    let record = match view.state() {
        Loadable::Loading => {
            let _ = writeln!(out, "{}", style("Loading...").dim());
            return out;
        }
        Loadable::Failed(message) => {
            let _ = writeln!(out, "{} {}", style("✗").red(), style(message).red());
            return out;
        }
        Loadable::Loaded(None) => {
            let _ = writeln!(out, "Client not found");
            return out;
        }
        Loadable::Loaded(Some(record)) => record,
    };

    let _ = writeln!(
        out,
        "{} {}",
        style(format!("=== {} ===", record.name)).bold().cyan(),
        status(record.active)
    );
    let _ = writeln!(out, "Client ID:          {}", record.client_id);
    let _ = writeln!(out, "Description:        {}", or_missing(record.description()));
    let _ = writeln!(
        out,
        "Application Type:   {}",
        or_missing(record.application_type.map(|t| t.label()))
    );
    let _ = writeln!(
        out,
        "Auth Method:        {}",
        or_missing(record.auth_method.map(|m| m.label()))
    );
    let _ = writeln!(out, "JWK Set URL:        {}", or_missing(record.jwk_set_url.as_deref()));
    if let Some(uri) = record.uri.as_deref() {
        let _ = writeln!(out, "URI:                {uri}");
    }
    if !record.scopes.is_empty() {
        let _ = writeln!(out, "Scopes:             {}", record.scopes.join(", "));
    }
    let _ = writeln!(out);

    uri_block(&mut out, "Redirect URIs", &record.redirect_uris);
    uri_block(
        &mut out,
        "Post Logout Redirect URIs",
        &record.post_logout_redirect_uris,
    );

    if let Some(settings) = record.token_settings {
        let _ = writeln!(out, "{}", style("Token Settings").bold());
        let _ = writeln!(out, "  Access Token TTL:          {}s", settings.access_token_ttl);
        let _ = writeln!(out, "  Refresh Token TTL:         {}s", settings.refresh_token_ttl);
        let _ = writeln!(out, "  Auth Code TTL:             {}s", settings.auth_code_ttl);
        let _ = writeln!(out, "  Device Code TTL:           {}s", settings.device_code_ttl);
        let _ = writeln!(
            out,
            "  Reuse Refresh Tokens:      {}",
            if settings.reuse_refresh_tokens { "Yes" } else { "No" }
        );
        let _ = writeln!(
            out,
            "  Max Request Transit Time:  {}s",
            settings.max_request_transit_time
        );
    }
    out
}

pub fn render_form(view: &FormView) -> String {
    let mut out = String::new();
    let title = match view.mode() {
        FormMode::Create => "Create New Client".to_string(),
        FormMode::Edit(id) => format!("Edit Client {id}"),
    };
    let _ = writeln!(out, "{}", style(format!("=== {title} ===")).bold().cyan());

    if view.is_loading() {
        let _ = writeln!(out, "{}", style("Loading...").dim());
        return out;
    }

    let fields = view.fields();
    let settings = fields.token_settings();
    let rows = [
        ("Client Name", fields.name.clone()),
        ("Description", fields.description.clone().unwrap_or_default()),
        (
            "Application Type",
            fields.application_type.map(|t| t.as_str().to_string()).unwrap_or_default(),
        ),
        (
            "Authentication Method",
            fields.auth_method.map(|m| m.as_str().to_string()).unwrap_or_default(),
        ),
        ("JWK Set URL", fields.jwk_set_url.clone().unwrap_or_default()),
        ("Access Token TTL", settings.access_token_ttl.to_string()),
        ("Refresh Token TTL", settings.refresh_token_ttl.to_string()),
        ("Auth Code TTL", settings.auth_code_ttl.to_string()),
        ("Device Code TTL", settings.device_code_ttl.to_string()),
        ("Reuse Refresh Tokens", settings.reuse_refresh_tokens.to_string()),
        ("Max Request Transit Time", settings.max_request_transit_time.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{:<26}{}", format!("{label}:"), value);
    }

    uri_block(&mut out, UriList::Redirect.label(), &fields.redirect_uris);
    uri_block(
        &mut out,
        UriList::PostLogout.label(),
        &fields.post_logout_redirect_uris,
    );

    for (field, message) in view.errors().iter() {
        let _ = writeln!(
            out,
            "{} {}: {}",
            style("✗").red(),
            field.label(),
            style(message).red()
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeApi, Op, RecordingShell, record};
    use client_admin_api::ClientsApi;
    use client_admin_model::RecordId;
    use console::strip_ansi_codes;
    use std::sync::Arc;

    fn plain(text: String) -> String {
        strip_ansi_codes(&text).into_owned()
    }

    #[tokio::test]
    async fn test_render_list_rows() {
        let mut inactive = record("2", "Batch");
        inactive.active = false;
        inactive.description = None;
        let api: Arc<dyn ClientsApi> =
            Arc::new(FakeApi::with_records(vec![record("1", "Portal"), inactive]));
        let mut view = ListView::new(api);
        view.load().await;

        let text = plain(render_list(&view));
        assert!(text.contains("[1] Portal Active"));
        assert!(text.contains("[2] Batch Inactive"));
        assert!(text.contains("client id: client-1  type: WEB  auth: CLIENT_SECRET_JWT"));
    }

    #[tokio::test]
    async fn test_render_list_states() {
        let fake = Arc::new(FakeApi::default());
        let api: Arc<dyn ClientsApi> = fake.clone();
        let mut view = ListView::new(api);
        assert!(plain(render_list(&view)).contains("Loading..."));

        view.load().await;
        assert!(plain(render_list(&view)).contains("No clients found"));

        fake.fail(Op::List);
        view.load().await;
        assert!(plain(render_list(&view)).contains("Failed to load clients. Please try again."));
    }

    #[tokio::test]
    async fn test_render_detail() {
        let mut source = record("5", "Portal");
        source.uri = Some("https://portal.example.com".to_string());
        source.scopes = vec!["openid".to_string(), "profile".to_string()];
        let api: Arc<dyn ClientsApi> = Arc::new(FakeApi::with_records(vec![source]));
        let mut view = DetailView::new(api, RecordId::new("5"));
        view.load().await;

        let text = plain(render_detail(&view));
        assert!(text.contains("=== Portal === Active"));
        assert!(text.contains("Application Type:   Web Application"));
        assert!(text.contains("URI:                https://portal.example.com"));
        assert!(text.contains("Scopes:             openid, profile"));
        assert!(text.contains("1. https://5.example.com/callback"));
        assert!(text.contains("Access Token TTL:          3600s"));
        assert!(text.contains("Reuse Refresh Tokens:      No"));
    }

    #[tokio::test]
    async fn test_render_missing_detail() {
        let api: Arc<dyn ClientsApi> = Arc::new(FakeApi::default());
        let mut view = DetailView::new(api, RecordId::new("5"));
        view.load().await;

        assert_eq!(plain(render_detail(&view)).trim(), "Client not found");
    }

    #[tokio::test]
    async fn test_render_form_errors() {
        let api: Arc<dyn ClientsApi> = Arc::new(FakeApi::default());
        let shell = RecordingShell::confirming();
        let mut form = FormView::create(api);
        form.submit(&shell).await;

        let text = plain(render_form(&form));
        assert!(text.contains("=== Create New Client ==="));
        assert!(text.contains("Access Token TTL:         3600"));
        assert!(text.contains("✗ Client Name: Name is required"));
    }
}
