mod api;
mod config;
mod routing;
mod services;
mod state;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::api::{ApiError, AuthApi, DemoAuth, HttpAuthApi, RegisterForm, Role};
use crate::config::Config;
use crate::routing::Category;
use crate::services::directory::{self, SearchFilter, ServiceProvider, SortKey};
use crate::services::guard::{self, Navigator};
use crate::services::{AuthError, SessionManager, UserUpdate};
use crate::state::AppState;
use crate::storage::{FileStore, MemoryStore, SessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("not signed in")]
    NotSignedIn,
    #[error("registration form is invalid")]
    InvalidForm,
    #[error("requires the {0} role")]
    RequiresRole(Role),
    #[error("no provider found for slug `{0}`")]
    UnknownSlug(String),
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "servicerw", about = "ServiceRW business directory and account CLI")]
struct Cli {
    /// Backend API base URL.
    #[arg(long, env = "SERVICERW_API_URL")]
    api_url: Option<String>,

    /// Use the built-in fixture accounts instead of the HTTP backend.
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// Keep the session in memory only; nothing is written to disk.
    #[arg(long, default_value_t = false)]
    no_persist: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Keep the session across restarts.
        #[arg(long, default_value_t = false)]
        remember: bool,
    },
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Sign out and clear the stored session.
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// Change profile fields on the signed-in account.
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Print the landing page for the current role.
    Dashboard {
        /// Require the admin dashboard specifically.
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    /// Answer yes or no: does the signed-in account hold a permission?
    Can { permission: String },
    /// Search the provider directory.
    Search(SearchArgs),
    /// Show one provider by its URL slug.
    Show { slug: String },
    /// Print the profile URL for a business name.
    Url {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    /// Account role: admin, business, provider, or customer.
    #[arg(long, default_value = "customer")]
    role: Role,
    /// Accept the terms of service.
    #[arg(long, default_value_t = false)]
    accept_terms: bool,
    #[arg(long)]
    business_name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Match against provider names and offered services.
    #[arg(long)]
    query: Option<String>,
    /// Restrict to one category segment, e.g. `plumbing` or `real-estate`.
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    district: Option<String>,
    /// Only verified providers.
    #[arg(long, default_value_t = false)]
    verified: bool,
    /// Minimum rating, 0 to 5.
    #[arg(long)]
    min_rating: Option<f32>,
    /// Listing order: rating, reviews, or name.
    #[arg(long, default_value = "rating")]
    sort: SortKey,
}

/// Prints each navigation the way the router would perform it.
struct AnnouncingNavigator;

impl Navigator for AnnouncingNavigator {
    fn navigate(&self, path: &str) {
        eprintln!("-> {path}");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let api: Arc<dyn AuthApi> = if cli.demo {
        Arc::new(DemoAuth::default())
    } else {
        let api_url = cli.api_url.unwrap_or_else(|| config.api_url.clone());
        Arc::new(HttpAuthApi::new(
            &api_url,
            Duration::from_secs(config.timeouts.request_secs),
            Duration::from_secs(config.timeouts.connect_secs),
        )?)
    };

    let store: Arc<dyn SessionStore> = if cli.no_persist {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(&config.data_dir))
    };

    let state = AppState::new(Arc::new(SessionManager::new(api, store)));

    match cli.command {
        Command::Login { email, password, remember } => {
            run_login(&state, &email, &password, remember).await?;
        }
        Command::Register(args) => run_register(&state, args).await?,
        Command::Logout => run_logout(&state).await,
        Command::Whoami => run_whoami(&state)?,
        Command::Update { name, phone } => run_update(&state, name, phone)?,
        Command::Dashboard { admin } => run_dashboard(&state, admin)?,
        Command::Can { permission } => run_can(&state, &permission),
        Command::Search(args) => run_search(&state, &args),
        Command::Show { slug } => run_show(&state, &slug)?,
        Command::Url { name } => run_url(&state, &name.join(" ")),
    }
    Ok(())
}

async fn run_login(
    state: &AppState,
    email: &str,
    password: &str,
    remember: bool,
) -> Result<(), CliError> {
    let session = state.session.login(email, password, remember).await?;
    if let Some(user) = &session.user {
        println!("signed in as {} ({})", user.email, user.role);
    }
    AnnouncingNavigator.navigate(guard::default_landing(session.role()));
    Ok(())
}

async fn run_register(state: &AppState, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegisterForm {
        name: args.name,
        email: args.email,
        phone: args.phone,
        password: args.password,
        confirm_password: args.confirm_password,
        accept_terms: args.accept_terms,
        role: args.role,
        business_name: args.business_name.unwrap_or_default(),
        category: args.category.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        address: args.address.unwrap_or_default(),
    };
    let session = match state.session.register(&form).await {
        Ok(session) => session,
        Err(AuthError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                eprintln!("{field}: {message}");
            }
            return Err(CliError::InvalidForm);
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(user) = &session.user {
        println!("account created for {} ({})", user.email, user.role);
    }
    AnnouncingNavigator.navigate(guard::default_landing(session.role()));
    Ok(())
}

async fn run_logout(state: &AppState) {
    state.session.logout().await;
    println!("signed out");
}

fn run_whoami(state: &AppState) -> Result<(), CliError> {
    if !guard::require_auth(&state.session, &AnnouncingNavigator, "/profile") {
        return Err(CliError::NotSignedIn);
    }
    let Some(user) = state.session.current_user() else {
        return Err(CliError::NotSignedIn);
    };
    let document = serde_json::json!({
        "user": user,
        "isAuthenticated": state.session.is_authenticated(),
        "rememberMe": state.session.remember_me(),
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn run_update(
    state: &AppState,
    name: Option<String>,
    phone: Option<String>,
) -> Result<(), CliError> {
    if !guard::require_auth(&state.session, &AnnouncingNavigator, "/profile/edit") {
        return Err(CliError::NotSignedIn);
    }
    let update = UserUpdate { name, phone, business: None };
    if update.is_empty() {
        println!("nothing to update");
        return Ok(());
    }
    let session = state.session.update_user(&update)?;
    if let Some(user) = &session.user {
        println!("profile updated for {}", user.email);
    }
    Ok(())
}

fn run_dashboard(state: &AppState, admin: bool) -> Result<(), CliError> {
    let landing = guard::default_landing(state.session.session().role());
    if admin {
        let allowed = guard::require_role(
            &state.session,
            Role::Admin,
            &AnnouncingNavigator,
            "/admin/dashboard",
            landing,
        );
        if !allowed {
            return Err(CliError::RequiresRole(Role::Admin));
        }
        println!("/admin/dashboard");
        return Ok(());
    }
    println!("{landing}");
    Ok(())
}

fn run_can(state: &AppState, permission: &str) {
    let allowed = state.session.has_permission(permission);
    println!("{}", if allowed { "yes" } else { "no" });
}

fn run_search(state: &AppState, args: &SearchArgs) {
    let filter = SearchFilter {
        query: args.query.clone(),
        category: args.category,
        district: args.district.clone(),
        verified_only: args.verified,
        min_rating: args.min_rating,
        sort: args.sort,
    };
    let hits = directory::search(&state.providers, &filter);
    if hits.is_empty() {
        println!("no providers matched");
        return;
    }
    for provider in hits {
        println!("{}", provider_line(provider));
    }
}

fn run_show(state: &AppState, slug: &str) -> Result<(), CliError> {
    let Some(provider) = directory::find_by_slug(&state.providers, &state.registry, slug) else {
        return Err(CliError::UnknownSlug(slug.to_string()));
    };
    println!("{}", provider.name);
    println!("  category: {}", provider.category.label());
    println!("  district: {}", provider.district);
    println!("  rating:   {:.1} ({} reviews)", provider.rating, provider.review_count);
    println!("  verified: {}", if provider.verified { "yes" } else { "no" });
    if !provider.services.is_empty() {
        println!("  services: {}", provider.services.join(", "));
    }
    println!("  url:      {}", state.registry.resolve_url(&provider.name));
    Ok(())
}

fn run_url(state: &AppState, name: &str) {
    println!("{}", state.registry.resolve_url(name));
}

fn provider_line(provider: &ServiceProvider) -> String {
    format!(
        "{:<28} {:<12} {:<12} {:.1} ({} reviews){}",
        provider.name,
        provider.category.label(),
        provider.district,
        provider.rating,
        provider.review_count,
        if provider.verified { "  verified" } else { "" },
    )
}
