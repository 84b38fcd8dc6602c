use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use validator::Validate;

use sno_api::modules::auth::service::AuthService;
use sno_api::repository::PgCredentialStore;
use sno_db::init_db_pool;
use sno_models::RegisterRequest;

#[derive(Parser)]
#[command(name = "sno-cli")]
#[command(about = "SNO CLI - Administrative tools for the SNO API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// Login, also the token subject
        #[arg(short = 'u', long)]
        login: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply pending database migrations
    Migrate,
}

fn prompt(value: Option<String>, label: &str) -> anyhow::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateUser {
            login,
            email,
            first_name,
            last_name,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .context("Failed to read password")?,
            };

            let request = RegisterRequest {
                login: prompt(login, "Login")?,
                email: prompt(email, "Email address")?,
                password,
                first_name: prompt(first_name, "First name")?,
                last_name: prompt(last_name, "Last name")?,
            };
            request.validate().context("Invalid user details")?;

            let store = PgCredentialStore::new(pool);
            match AuthService::register_user(&store, request).await {
                Ok(user) => {
                    println!("\n✅ User created successfully!");
                    println!("   ID: {}", user.id);
                    println!("   Login: {}", user.login);
                    println!("   Name: {} {}", user.first_name, user.last_name);
                }
                Err(e) => anyhow::bail!("Error creating user: {}", e.error),
            }
        }
        Commands::Migrate => {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            println!("✅ Migrations applied");
        }
    }

    Ok(())
}
