//! `client-admin`: terminal console for OAuth2 client registrations
//!
//! Runs either one-shot commands (`list`, `show`, `delete`, ...) or an
//! interactive session that walks the list, detail and form views.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_admin_api::model::{ApplicationType, AuthMethod, RecordId, has_allowed_scheme};
use client_admin_api::{ClientAdminApi, ClientsApi, OrgId};
use client_admin_console::render::{render_detail, render_form, render_list};
use client_admin_console::views::{FieldEdit, FormField, FormView, UriList};
use client_admin_console::{Console, ConsoleConfig, Outcome, Route, Shell, View};
use console::{Term, style};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL
    #[arg(short, long, global = true, env = "CLIENT_ADMIN_SERVER")]
    server: Option<String>,

    /// Organization scope of every request
    #[arg(long, global = true)]
    org_id: Option<i64>,

    /// Configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session at the client list
    Shell,
    /// Start an interactive session at a route, e.g. /clients/7/edit
    Open { route: Route },
    /// List all clients
    List,
    /// Show one client
    Show { id: String },
    /// Create a client interactively
    Create,
    /// Edit a client interactively
    Edit { id: String },
    /// Delete a client
    Delete { id: String },
    /// Rotate the secret of a client
    RotateSecret { id: String },
    /// Manage redirect URIs directly
    RedirectUris {
        #[command(subcommand)]
        action: RedirectUriAction,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum RedirectUriAction {
    List { id: String },
    Add { id: String, uri: String },
    Remove { id: String, uri: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

/// [`Shell`] over the terminal. Prompts go through `dialoguer`; alerts and
/// notices go to stderr so stdout only carries rendered views.
struct TerminalShell {
    assume_yes: bool,
    term: Term,
    theme: ColorfulTheme,
}

impl TerminalShell {
    fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            term: Term::stderr(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl Shell for TerminalShell {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact_on(&self.term)
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}", style("✗").red().bold(), style(message).red()));
    }

    fn notify(&self, message: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}", style("✓").green(), message));
    }

    fn disclose_secret(&self, secret: &str) {
        let _ = self.term.write_line(&format!(
            "{} {}",
            style("New client secret:").yellow().bold(),
            style(secret).bold()
        ));
        let _ = self.term.write_line(&format!(
            "{}",
            style("Copy it now. It cannot be retrieved again.").yellow()
        ));
    }
}

fn init_tracing(config: &ConsoleConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .context("Invalid log filter")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format.to_lowercase().as_str() {
        "json" => builder.json().init(),
        "pretty" => builder.pretty().init(),
        _ => builder.compact().init(),
    }
    Ok(())
}

fn build_api(config: &ConsoleConfig) -> Result<Arc<dyn ClientsApi>> {
    let api = ClientAdminApi::builder(config.api.server_url.clone())
        .with_org_id(OrgId(config.api.org_id))
        .with_bearer_token(config.api.bearer_token.clone())
        .with_timeout(config.timeout())
        .build()
        .context("Failed to create API client")?;
    Ok(Arc::new(api))
}

fn print_view(view: &View) {
    let text = match view {
        View::List(view) => render_list(view),
        View::Detail(view) => render_detail(view),
        View::Form(view) => render_form(view),
    };
    println!("{text}");
}

/// Interactive session. Returns when the user quits.
async fn run_session(api: Arc<dyn ClientsApi>, route: Route, shell: &TerminalShell) -> Result<()> {
    let mut console = Console::open(api, route, shell).await;

    loop {
        shell.term.write_line(&format!("{}", style(console.route()).dim()))?;
        print_view(console.view());

        let keep_going = if matches!(console.view(), View::List(_)) {
            list_step(&mut console, shell).await?
        } else if matches!(console.view(), View::Detail(_)) {
            detail_step(&mut console, shell).await?
        } else {
            form_step(&mut console, shell).await?
        };
        if !keep_going {
            return Ok(());
        }
    }
}

fn pick(shell: &TerminalShell, prompt: &str, items: &[String]) -> Result<Option<usize>> {
    Ok(Select::with_theme(&shell.theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_on_opt(&shell.term)?)
}

fn pick_record(console: &Console, shell: &TerminalShell) -> Result<Option<RecordId>> {
    let View::List(view) = console.view() else {
        return Ok(None);
    };
    let records = view.records();
    if records.is_empty() {
        shell.notify("No clients found");
        return Ok(None);
    }
    let items: Vec<String> = records
        .iter()
        .map(|record| format!("{} ({})", record.name, record.client_id))
        .collect();
    Ok(pick(shell, "Client", &items)?.map(|index| records[index].id.clone()))
}

async fn list_step(console: &mut Console, shell: &TerminalShell) -> Result<bool> {
    let actions = ["Open client", "Edit client", "Delete client", "Create client", "Reload", "Quit"];
    let items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();

    match pick(shell, "Action", &items)? {
        Some(0) => {
            if let Some(id) = pick_record(console, shell)? {
                console.navigate(Route::Detail(id), shell).await;
            }
        }
        Some(1) => {
            if let Some(id) = pick_record(console, shell)? {
                console.navigate(Route::Edit(id), shell).await;
            }
        }
        Some(2) => {
            if let Some(id) = pick_record(console, shell)? {
                if let View::List(view) = console.view_mut() {
                    view.delete(&id, shell).await;
                }
            }
        }
        Some(3) => console.navigate(Route::Create, shell).await,
        Some(4) => {
            if let View::List(view) = console.view_mut() {
                view.load().await;
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

async fn detail_step(console: &mut Console, shell: &TerminalShell) -> Result<bool> {
    let actions = ["Edit", "Delete", "Rotate secret", "Back to list", "Reload", "Quit"];
    let items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
    let choice = pick(shell, "Action", &items)?;

    let View::Detail(view) = console.view_mut() else {
        return Ok(true);
    };
    let outcome = match choice {
        Some(0) => Outcome::Navigate(view.edit_route()),
        Some(1) => view.delete(shell).await,
        Some(2) => view.rotate_secret(shell).await,
        Some(3) => Outcome::Navigate(view.back_route()),
        Some(4) => {
            view.load().await;
            Outcome::Completed
        }
        _ => return Ok(false),
    };
    console.follow(outcome, shell).await;
    Ok(true)
}

async fn form_step(console: &mut Console, shell: &TerminalShell) -> Result<bool> {
    let actions = [
        "Edit field",
        "Add redirect URI",
        "Remove redirect URI",
        "Add post logout redirect URI",
        "Remove post logout redirect URI",
        "Submit",
        "Cancel",
        "Quit",
    ];
    let items: Vec<String> = actions.iter().map(|a| a.to_string()).collect();
    let choice = pick(shell, "Action", &items)?;

    let View::Form(form) = console.view_mut() else {
        return Ok(true);
    };
    let outcome = match choice {
        Some(0) => {
            let labels: Vec<String> = FormField::ALL.iter().map(|f| f.label().to_string()).collect();
            if let Some(index) = pick(shell, "Field", &labels)? {
                let edit = prompt_field(form, FormField::ALL[index], shell)?;
                form.edit_field(edit);
            }
            Outcome::Completed
        }
        Some(1) => add_uri(form, UriList::Redirect, shell)?,
        Some(2) => remove_uri(form, UriList::Redirect, shell)?,
        Some(3) => add_uri(form, UriList::PostLogout, shell)?,
        Some(4) => remove_uri(form, UriList::PostLogout, shell)?,
        Some(5) => form.submit(shell).await,
        Some(6) => Outcome::Navigate(form.cancel_route()),
        _ => return Ok(false),
    };
    console.follow(outcome, shell).await;
    Ok(true)
}

fn prompt_text(shell: &TerminalShell, prompt: &str, initial: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&shell.theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text_on(&shell.term)?)
}

fn prompt_seconds(shell: &TerminalShell, prompt: &str, current: u32) -> Result<u32> {
    Ok(Input::<u32>::with_theme(&shell.theme)
        .with_prompt(format!("{prompt} (seconds)"))
        .default(current)
        .interact_text_on(&shell.term)?)
}

fn prompt_field(form: &FormView, field: FormField, shell: &TerminalShell) -> Result<FieldEdit> {
    let fields = form.fields();
    let label = field.label();
    let edit = match field {
        FormField::Name => FieldEdit::Name(prompt_text(shell, label, &fields.name)?),
        FormField::Description => {
            FieldEdit::Description(prompt_text(
                shell,
                label,
                fields.description.as_deref().unwrap_or_default(),
            )?)
        }
        FormField::JwkSetUrl => FieldEdit::JwkSetUrl(prompt_text(
            shell,
            label,
            fields.jwk_set_url.as_deref().unwrap_or_default(),
        )?),
        FormField::ApplicationType => {
            let items: Vec<String> =
                ApplicationType::ALL.iter().map(|t| t.label().to_string()).collect();
            FieldEdit::ApplicationType(
                pick(shell, label, &items)?.map(|index| ApplicationType::ALL[index]),
            )
        }
        FormField::AuthMethod => {
            let items: Vec<String> = AuthMethod::ALL.iter().map(|m| m.label().to_string()).collect();
            FieldEdit::AuthMethod(pick(shell, label, &items)?.map(|index| AuthMethod::ALL[index]))
        }
        FormField::AccessTokenTtl => {
            FieldEdit::AccessTokenTtl(prompt_seconds(shell, label, fields.access_token_ttl)?)
        }
        FormField::RefreshTokenTtl => {
            FieldEdit::RefreshTokenTtl(prompt_seconds(shell, label, fields.refresh_token_ttl)?)
        }
        FormField::AuthCodeTtl => {
            FieldEdit::AuthCodeTtl(prompt_seconds(shell, label, fields.auth_code_ttl)?)
        }
        FormField::DeviceCodeTtl => {
            FieldEdit::DeviceCodeTtl(prompt_seconds(shell, label, fields.device_code_ttl)?)
        }
        FormField::MaxRequestTransitTime => FieldEdit::MaxRequestTransitTime(prompt_seconds(
            shell,
            label,
            fields.max_request_transit_time,
        )?),
        FormField::ReuseRefreshTokens => FieldEdit::ReuseRefreshTokens(
            Confirm::with_theme(&shell.theme)
                .with_prompt(label)
                .default(fields.reuse_refresh_tokens)
                .interact_on(&shell.term)?,
        ),
    };
    Ok(edit)
}

fn add_uri(form: &mut FormView, list: UriList, shell: &TerminalShell) -> Result<Outcome> {
    let input = prompt_text(shell, list.label(), form.staged_uri(list))?;
    form.stage_uri(list, input);
    form.add_uri(list, shell);
    Ok(Outcome::Completed)
}

fn remove_uri(form: &mut FormView, list: UriList, shell: &TerminalShell) -> Result<Outcome> {
    let uris = match list {
        UriList::Redirect => form.fields().redirect_uris.clone(),
        UriList::PostLogout => form.fields().post_logout_redirect_uris.clone(),
    };
    if uris.is_empty() {
        return Ok(Outcome::Cancelled);
    }
    if let Some(index) = pick(shell, "Remove", &uris)? {
        form.remove_uri(list, index);
    }
    Ok(Outcome::Completed)
}

async fn redirect_uris(api: &dyn ClientsApi, action: RedirectUriAction) -> Result<()> {
    match action {
        RedirectUriAction::List { id } => {
            let uris = api
                .list_redirect_uris(&RecordId::new(id))
                .await
                .context("Failed to list redirect URIs")?
                .into_data();
            if uris.is_empty() {
                println!("{}", style("(none)").dim());
            }
            for uri in uris {
                println!("{uri}");
            }
        }
        RedirectUriAction::Add { id, uri } => {
            if !has_allowed_scheme(&uri) {
                anyhow::bail!("Redirect URI must start with http:// or https://");
            }
            api.add_redirect_uri(&RecordId::new(id), uri.trim())
                .await
                .context("Failed to add redirect URI")?;
            println!("{} Added {}", style("✓").green(), uri.trim());
        }
        RedirectUriAction::Remove { id, uri } => {
            api.delete_redirect_uri(&RecordId::new(id), &uri)
                .await
                .context("Failed to remove redirect URI")?;
            println!("{} Removed {}", style("✓").green(), uri);
        }
    }
    Ok(())
}

/// Write the default configuration. Runs before any existing file is loaded
/// so a broken file can still be replaced.
fn init_config(cli: &Cli, force: bool) -> Result<()> {
    let path = ConsoleConfig::resolve_path(cli.config.as_deref())?;
    if path.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists; pass --force to overwrite",
            path.display()
        );
    }
    ConsoleConfig::default().save(&path)?;
    println!("{} Wrote {}", style("✓").green(), path.display());
    Ok(())
}

/// Load the layered configuration and apply command line overrides.
fn load_config(cli: &Cli, path: &Path) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::load_from(path)?;
    if let Some(server) = &cli.server {
        config.api.server_url = server.clone();
    }
    if let Some(org_id) = cli.org_id {
        config.api.org_id = org_id;
    }
    config.validate()?;
    Ok(config)
}

/// Print the view, failing when it has nothing to show.
fn print_loaded(console: &Console) -> Result<()> {
    print_view(console.view());
    if let Some(message) = console.view().load_error() {
        anyhow::bail!("{message}");
    }
    Ok(())
}

/// Delete or rotate from the detail view of one record.
async fn detail_action(
    api: Arc<dyn ClientsApi>,
    id: RecordId,
    rotate: bool,
    shell: &TerminalShell,
) -> Result<()> {
    let mut console = Console::open(api, Route::Detail(id.clone()), shell).await;
    if console.view().load_error().is_some() {
        return print_loaded(&console);
    }
    let View::Detail(view) = console.view_mut() else {
        anyhow::bail!("Detail view did not mount");
    };

    let outcome = if rotate {
        view.rotate_secret(shell).await
    } else {
        view.delete(shell).await
    };
    if outcome == Outcome::Failed {
        error!(%id, rotate, "Client action failed");
        anyhow::bail!("Client action failed");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Shell);

    if let Commands::Config {
        action: ConfigAction::Init { force },
    } = &command
    {
        return init_config(&cli, *force);
    }

    let config_path = ConsoleConfig::resolve_path(cli.config.as_deref())?;
    let config = load_config(&cli, &config_path)?;
    init_tracing(&config)?;
    if config_path.exists() {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        debug!("No config file found at {}, using defaults", config_path.display());
    }

    if let Commands::Config { .. } = &command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let shell = TerminalShell::new(cli.yes);
    info!(server = %config.api.server_url, org_id = config.api.org_id, "Starting client admin console");
    let api = build_api(&config)?;

    match command {
        Commands::Shell => run_session(api, Route::List, &shell).await?,
        Commands::Open { route } => run_session(api, route, &shell).await?,
        Commands::Create => run_session(api, Route::Create, &shell).await?,
        Commands::Edit { id } => run_session(api, Route::Edit(RecordId::new(id)), &shell).await?,
        Commands::List => {
            let console = Console::open(api, Route::List, &shell).await;
            print_loaded(&console)?;
        }
        Commands::Show { id } => {
            let console = Console::open(api, Route::Detail(RecordId::new(id)), &shell).await;
            print_loaded(&console)?;
        }
        Commands::Delete { id } => detail_action(api, RecordId::new(id), false, &shell).await?,
        Commands::RotateSecret { id } => {
            detail_action(api, RecordId::new(id), true, &shell).await?
        }
        Commands::RedirectUris { action } => redirect_uris(api.as_ref(), action).await?,
        Commands::Config { .. } => {}
    }

    Ok(())
}
