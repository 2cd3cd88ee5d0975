use clap::{Parser, Subcommand};
use dialoguer::Password;
use dotenvy::dotenv;
use medadmin_access::PermissionDirectory;
use medadmin_cli::report;
use medadmin_client::ApiClient;
use medadmin_config::UpstreamConfig;

#[derive(Parser)]
#[command(name = "medadmin-cli")]
#[command(about = "MedAdmin CLI - Inspect what a console account can see", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the marketplace API and list the account's permissions
    Permissions {
        /// Email address of the staff account
        #[arg(short = 'e', long)]
        email: String,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Marketplace API base URL (defaults to API_BASE_URL)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Print the navigation a permission set would see
    Navigation {
        /// Granted permission, e.g. `doctor-read` (repeatable)
        #[arg(short = 'g', long = "grant")]
        grants: Vec<String>,
    },
    /// Check whether a console path renders for a permission set
    Check {
        /// Granted permission, e.g. `doctor-read` (repeatable)
        #[arg(short = 'g', long = "grant")]
        grants: Vec<String>,

        /// Console path, e.g. `/doctors/42`
        #[arg(long)]
        path: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Permissions {
            email,
            password,
            api_url,
        } => handle_permissions(email, password, api_url).await,
        Commands::Navigation { grants } => {
            let directory = directory_for(&grants);
            print!("{}", report::render_navigation(&directory));
        }
        Commands::Check { grants, path } => {
            let directory = directory_for(&grants);
            match report::render_check(&directory, &path) {
                Ok(out) => print!("{}", out),
                Err(e) => {
                    eprintln!("❌ {}", e);
                    std::process::exit(2);
                }
            }
        }
    }
}

fn directory_for(grants: &[String]) -> PermissionDirectory {
    for name in report::unknown_grants(grants) {
        eprintln!("⚠️  Ignoring unknown permission: {}", name);
    }
    PermissionDirectory::with_permissions(grants)
}

async fn handle_permissions(email: String, password: Option<String>, api_url: Option<String>) {
    let password = match password {
        Some(password) => password,
        None => match Password::new().with_prompt("Password").interact() {
            Ok(password) => password,
            Err(e) => {
                eprintln!("❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        },
    };

    let config = api_url
        .map(UpstreamConfig::new)
        .unwrap_or_else(UpstreamConfig::from_env);
    let api = ApiClient::new(config);

    let token = match api.login(&email, &password).await {
        Ok(token) => token,
        Err(e) => {
            eprintln!("❌ Login failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("✅ Logged in as {}", email);

    let directory = PermissionDirectory::new();
    if let Err(e) = directory.load(api.permissions(&token)).await {
        eprintln!("⚠️  Permission fetch failed: {}", e);
    }
    print!("{}", report::render_permissions(&directory.snapshot()));
}
