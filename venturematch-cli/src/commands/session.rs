use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use rpassword::prompt_password;
use shared::api::ApiClient;
use shared::auth::AuthGateway;
use shared::config::ClientConfig;
use shared::models::RegistrationForm;
use shared::session::decode_claims;

/// Session management subcommands.
#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Exchange a username and password for a session token
    Login(LoginArgs),
    /// Create an account and start a session for it
    Register(RegisterArgs),
    /// Forget the stored session token
    Logout,
    /// Show whether a session is stored and whom it belongs to
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account name; prompted for when omitted
    #[arg(long, short)]
    pub username: Option<String>,

    /// Password; prompted for without echo when omitted
    #[arg(long, env = "VENTUREMATCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account name
    #[arg(long, short)]
    pub username: String,

    /// Contact email address
    #[arg(long, short)]
    pub email: String,

    /// Password; prompted for twice without echo when omitted
    #[arg(long, env = "VENTUREMATCH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn run(command: SessionCommand, client: &ApiClient, config: &ClientConfig) -> Result<()> {
    let gateway = AuthGateway::new(client.clone());
    match command {
        SessionCommand::Login(args) => login(&gateway, args, config).await,
        SessionCommand::Register(args) => register(&gateway, args, config).await,
        SessionCommand::Logout => logout(&gateway, config),
        SessionCommand::Status => {
            status(&gateway, config);
            Ok(())
        }
    }
}

async fn login(gateway: &AuthGateway, args: LoginArgs, config: &ClientConfig) -> Result<()> {
    let username = match args.username {
        Some(username) => username,
        None => prompt("Username: ")?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password("Password: ").context("failed to read password")?,
    };

    let response = gateway
        .login(&username, &password)
        .await
        .context("login failed")?;
    println!("Logged in as {username}");
    print_session_summary(&response.token, config);
    Ok(())
}

async fn register(gateway: &AuthGateway, args: RegisterArgs, config: &ClientConfig) -> Result<()> {
    let (password, confirm_password) = match args.password {
        Some(password) => (password.clone(), password),
        None => (
            prompt_password("Password: ").context("failed to read password")?,
            prompt_password("Confirm password: ").context("failed to read password")?,
        ),
    };
    let form = RegistrationForm {
        username: args.username,
        email: args.email,
        password,
        confirm_password,
    };

    let response = gateway.register(&form).await.context("registration failed")?;
    println!("Registered {}", form.username);
    print_session_summary(&response.token, config);
    Ok(())
}

fn logout(gateway: &AuthGateway, config: &ClientConfig) -> Result<()> {
    let had_session = gateway.session().is_authenticated();
    gateway.logout().with_context(|| {
        format!(
            "failed to remove session at {}",
            config.session_path.display()
        )
    })?;
    if had_session {
        println!("Logged out; removed token from {}", config.session_path.display());
    } else {
        println!("No session found at {}", config.session_path.display());
    }
    Ok(())
}

fn status(gateway: &AuthGateway, config: &ClientConfig) {
    match gateway.session().get() {
        Some(token) => {
            println!("Logged in");
            print_session_summary(&token, config);
        }
        None => println!("Not logged in"),
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim().to_string();
    if trimmed.is_empty() {
        bail!("input must not be empty");
    }
    Ok(trimmed)
}

fn print_session_summary(token: &str, config: &ClientConfig) {
    match decode_claims(token) {
        Some(claims) => {
            if let Some(id) = claims.subject_id() {
                println!("user id: {id}");
            }
            if let Some(exp) = claims.exp {
                println!("token expires at: {exp} (unix seconds)");
            }
        }
        None => println!("token carries no readable claims"),
    }
    println!("api: {}", config.api_base());
    println!("token stored at {}", config.session_path.display());
}
