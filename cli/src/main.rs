use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use client::net::api::{ApiClient, ApiError};
use client::net::types::{LoginCredentials, UserPatch};
use client::session::SessionStore;
use client::state::auth::SessionManager;
use client::state::users::UsersManager;
use client::util::forms::{
    FieldErrors, RegisterDraft, UserForm, validate_login, validate_register, validate_user_form,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    Fetch(String),
}

fn validation_error(errors: &FieldErrors) -> CliError {
    let joined: Vec<String> = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect();
    CliError::Validation(joined.join("; "))
}

#[derive(Parser, Debug)]
#[command(name = "roster", about = "Roster dashboard CLI")]
struct Cli {
    #[arg(long, env = "ROSTER_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Directory holding the persisted session; unset entries behave like
    /// an environment without storage.
    #[arg(long, env = "ROSTER_STATE_DIR", default_value = ".roster")]
    state_dir: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    state_dir: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and persist the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account and persist the session.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Clear the persisted session.
    Logout,
    /// Show the persisted session, if any.
    Whoami,
    Users(UsersCommand),
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    /// List one page of users.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        job: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        job: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, state_dir: cli.state_dir };

    match cli.command {
        Command::Login { email, password } => run_login(&ctx, email, password).await,
        Command::Register { email, password, confirm_password, first_name, last_name } => {
            run_register(&ctx, RegisterDraft { first_name, last_name, email, password, confirm_password })
                .await
        }
        Command::Logout => run_logout(&ctx),
        Command::Whoami => run_whoami(&ctx),
        Command::Users(users) => run_users(&ctx, users).await,
    }
}

fn session_manager(ctx: &CliContext) -> SessionManager {
    let api = Arc::new(ApiClient::new(&ctx.base_url));
    let mut manager = SessionManager::new(api, SessionStore::new(&ctx.state_dir));
    manager.initialize();
    manager
}

fn users_manager(ctx: &CliContext) -> UsersManager {
    UsersManager::new(Arc::new(ApiClient::new(&ctx.base_url)))
}

async fn run_login(ctx: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let credentials = LoginCredentials { email, password };
    let errors = validate_login(&credentials);
    if !errors.is_empty() {
        return Err(validation_error(&errors));
    }

    let mut manager = session_manager(ctx);
    manager.login(&credentials).await?;
    let state = manager.state();
    if let Some(user) = &state.user {
        println!("logged in as {} {} <{}>", user.first_name, user.last_name, user.email);
    }
    Ok(())
}

async fn run_register(ctx: &CliContext, draft: RegisterDraft) -> Result<(), CliError> {
    let errors = validate_register(&draft);
    if !errors.is_empty() {
        return Err(validation_error(&errors));
    }

    let mut manager = session_manager(ctx);
    manager.register(&draft.into_credentials()).await?;
    let state = manager.state();
    if let Some(user) = &state.user {
        println!("registered {} {} <{}> (id {})", user.first_name, user.last_name, user.email, user.id);
    }
    Ok(())
}

fn run_logout(ctx: &CliContext) -> Result<(), CliError> {
    let mut manager = session_manager(ctx);
    manager.logout();
    println!("logged out");
    Ok(())
}

fn run_whoami(ctx: &CliContext) -> Result<(), CliError> {
    let manager = session_manager(ctx);
    let state = manager.state();
    match &state.user {
        Some(user) if state.is_authenticated() => {
            println!("{} {} <{}> (id {})", user.first_name, user.last_name, user.email, user.id);
        }
        _ => println!("not logged in"),
    }
    Ok(())
}

async fn run_users(ctx: &CliContext, users: UsersCommand) -> Result<(), CliError> {
    match users.command {
        UsersSubcommand::List { page } => run_users_list(ctx, page).await,
        UsersSubcommand::Create { email, first_name, last_name, job } => {
            run_users_create(ctx, UserForm { first_name, last_name, email, job }).await
        }
        UsersSubcommand::Update { id, email, first_name, last_name, job } => {
            let patch = UserPatch { email, first_name, last_name, job };
            let mut manager = users_manager(ctx);
            manager.update(id, &patch).await?;
            println!("updated user {id}");
            Ok(())
        }
        UsersSubcommand::Delete { id } => {
            let mut manager = users_manager(ctx);
            manager.delete(id).await?;
            println!("deleted user {id}");
            Ok(())
        }
    }
}

async fn run_users_list(ctx: &CliContext, page: u32) -> Result<(), CliError> {
    let mut manager = users_manager(ctx);
    manager.activate(page).await;

    let state = manager.state();
    if let Some(message) = &state.error {
        return Err(CliError::Fetch(message.clone()));
    }
    for user in &state.items {
        println!("{:>6}  {} {} <{}>", user.id, user.first_name, user.last_name, user.email);
    }
    let pagination = &state.pagination;
    println!("page {} of {} ({} users)", pagination.page, pagination.total_pages, pagination.total);
    Ok(())
}

async fn run_users_create(ctx: &CliContext, form: UserForm) -> Result<(), CliError> {
    let errors = validate_user_form(&form);
    if !errors.is_empty() {
        return Err(validation_error(&errors));
    }

    let mut manager = users_manager(ctx);
    let created = manager.create(&form.into_new_user()).await?;
    println!("created user {} {} <{}> (local id {})", created.first_name, created.last_name, created.email, created.id);
    Ok(())
}
