use std::collections::HashMap;
use std::net::SocketAddr;
use std::process;
use std::sync::{Arc, Mutex};

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use yansi::Paint;

use cirrus::api;
use cirrus::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use cirrus::models::{AppState, CreateForm, ServerRow};
use cirrus::routes::build_router;
use cirrus::services::{perform_server_action, validate_submission, CreateController};

async fn build_state_from_env(env_file: Option<&str>) -> AppState {
    config::load_env_file(env_file);

    let client = reqwest::Client::builder()
        .user_agent(format!("Cirrus/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client");

    AppState {
        api_base_url: config::get_api_base_url(),
        api_token: config::get_api_token(),
        public_base_url: config::get_public_base_url(),
        services: Arc::new(config::get_services()),
        client,
        flash_store: Arc::new(Mutex::new(HashMap::new())),
        create_forms: Arc::new(Mutex::new(HashMap::new())),
        custom_css: None,
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    if state.services.is_empty() {
        eprintln!(
            "{}",
            Paint::yellow("SERVICES is not configured; the creation form will have no service endpoints.")
        );
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting Cirrus console");
    println!(
        "{} {}",
        Paint::new("Console running on").green(),
        Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                Paint::new("Stop the process using this port, or start with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn colored_status(row: &ServerRow) -> String {
    match row.status_class.as_str() {
        "success" => Paint::new(&row.status_label).green().to_string(),
        "danger" => Paint::new(&row.status_label).red().to_string(),
        "warning" => Paint::new(&row.status_label).yellow().to_string(),
        "info" | "secondary" => Paint::new(&row.status_label).cyan().to_string(),
        _ => row.status_label.clone(),
    }
}

fn print_servers_table(rows: &[ServerRow]) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w - 4);
    }
    table.set_header(vec!["ID", "Name", "IP", "Configuration", "Image", "Status", "Created"]);
    for row in rows {
        table.add_row(vec![
            row.id.clone(),
            row.name.clone(),
            row.ipv4.clone(),
            row.spec_display.clone(),
            row.image.clone(),
            colored_status(row),
            row.created_display.clone(),
        ]);
    }
    println!("\n{table}\n");
}

#[derive(Parser)]
#[command(
    name = "cirrus",
    author,
    version,
    about = "Cirrus — a self-hosted console for cloud servers",
    long_about = r#"Cirrus serves a small web console for creating and managing servers on a
cloud compute service, and exposes the same operations as subcommands.

Configuration comes from environment variables or an .env file:
  API_BASE_URL     base URL of the compute service API
  API_TOKEN        token for the API (optional)
  PUBLIC_BASE_URL  external base URL of this console (optional)
  SERVICES         service endpoints as id=name pairs, e.g. "1=East Cloud,2=West Cloud"

Examples:
  cirrus serve --host 127.0.0.1 --port 8080
  cirrus servers list
  cirrus create --service-id 1 --network-id n1 --image-id i1 --flavor-id f1
"#,
    after_help = "Use `cirrus <subcommand> --help` for subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web console
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration (env vars / API connectivity)
    CheckConfig { env_file: Option<String> },
    /// Manage servers via the configured API
    Servers {
        #[command(subcommand)]
        sub: ServerCommands,
    },
    /// Create a server from the command line
    Create {
        #[arg(long)]
        service_id: i64,
        #[arg(long)]
        network_id: String,
        #[arg(long)]
        image_id: String,
        #[arg(long)]
        flavor_id: String,
        #[arg(long)]
        quota_id: Option<String>,
        #[arg(long)]
        azone_id: Option<String>,
        /// "prepaid" or "postpaid"
        #[arg(long)]
        pay_type: Option<String>,
        /// Billing period in months; only applies to prepaid
        #[arg(long)]
        period: Option<i64>,
    },
}

#[derive(Subcommand)]
enum ServerCommands {
    /// List servers
    List,
    /// Show the raw detail payload of a server
    Show { server_id: String },
    /// Start a server
    Start { server_id: String },
    /// Reboot a server
    Reboot { server_id: String },
    /// Shut a server down
    Shutdown { server_id: String },
    /// Cut a server's power
    Poweroff { server_id: String },
    /// Delete a server
    Delete {
        server_id: String,
        /// Force removal of a running server
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

async fn run_server_action(state: &AppState, server_id: &str, action: &str) {
    match perform_server_action(state, server_id, action).await {
        Ok(()) => println!(
            "{} {}",
            Paint::new(format!("{} requested for", action)).green(),
            Paint::new(server_id).cyan()
        ),
        Err(e) => {
            eprintln!("{} {}: {}", Paint::new(format!("{} failed for", action)).red(), server_id, e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::client::set_silent(true);
    }

    // No subcommand: serve the console with the defaults
    if cli.command.is_none() {
        let state = build_state_from_env(None).await;
        start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    }
    match cli.command.unwrap() {
        Commands::Serve {
            host,
            port,
            env_file,
            stylesheet,
        } => {
            let state = build_state_from_env(env_file.as_deref()).await;
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::CheckConfig { env_file } => {
            let state = build_state_from_env(env_file.as_deref()).await;
            let mut ok = true;
            if std::env::var("API_BASE_URL").unwrap_or_default().trim().is_empty() {
                eprintln!("{}", Paint::new("API_BASE_URL is not configured").red());
                ok = false;
            }
            if state.services.is_empty() {
                eprintln!("{}", Paint::new("SERVICES is not configured").red());
                ok = false;
            }
            if !ok {
                process::exit(1);
            }
            let service_id = state.services[0].id;
            match api::load_azones(&state.client, &state.api_base_url, &state.api_token, service_id).await {
                Ok(zones) => {
                    println!(
                        "{}",
                        Paint::new(format!("Configuration looks valid ({} zones returned)", zones.len())).green()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", Paint::new("Configuration appears invalid").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Servers { sub } => {
            let state = build_state_from_env(None).await;
            match sub {
                ServerCommands::List => {
                    match api::load_servers(&state.client, &state.api_base_url, &state.api_token).await {
                        Ok(list) => {
                            let rows: Vec<ServerRow> = list.iter().map(ServerRow::from_view).collect();
                            print_servers_table(&rows);
                        }
                        Err(e) => {
                            eprintln!("{}: {}", Paint::new("Failed to load servers").red(), e);
                            process::exit(1);
                        }
                    }
                }
                ServerCommands::Show { server_id } => {
                    match api::get_server(&state.client, &state.api_base_url, &state.api_token, &server_id).await
                    {
                        Ok(payload) => {
                            let pretty = serde_json::to_string_pretty(&payload)
                                .unwrap_or_else(|_| "<non-json>".into());
                            println!("{}", pretty);
                        }
                        Err(e) => {
                            eprintln!("{}: {}", Paint::new("Failed to load server").red(), e);
                            process::exit(1);
                        }
                    }
                }
                ServerCommands::Start { server_id } => run_server_action(&state, &server_id, "start").await,
                ServerCommands::Reboot { server_id } => run_server_action(&state, &server_id, "reboot").await,
                ServerCommands::Shutdown { server_id } => {
                    run_server_action(&state, &server_id, "shutdown").await
                }
                ServerCommands::Poweroff { server_id } => {
                    run_server_action(&state, &server_id, "poweroff").await
                }
                ServerCommands::Delete { server_id, force } => {
                    let action = if force { "delete_force" } else { "delete" };
                    run_server_action(&state, &server_id, action).await
                }
            }
        }
        Commands::Create {
            service_id,
            network_id,
            image_id,
            flavor_id,
            quota_id,
            azone_id,
            pay_type,
            period,
        } => {
            let state = build_state_from_env(None).await;
            let form = CreateForm {
                service_id: service_id.to_string(),
                network_id,
                image_id,
                flavor_id,
                quota_id: quota_id.unwrap_or_default(),
                azone_id: azone_id.unwrap_or_default(),
                pay_type: pay_type.unwrap_or_default(),
                period: period.map(|p| p.to_string()).unwrap_or_default(),
                network_tag: String::new(),
            };
            let request = match validate_submission(&form) {
                Ok(request) => request,
                Err(msg) => {
                    eprintln!("{}", Paint::new(msg).red());
                    process::exit(1);
                }
            };
            let http = api::HttpComputeApi {
                client: &state.client,
                api_base_url: &state.api_base_url,
                api_token: &state.api_token,
            };
            let mut controller = CreateController::default();
            match controller.submit_creation(&http, &request).await {
                Ok(api::CreateOutcome::Created) => {
                    println!("{}", Paint::new("Server instance created.").green());
                }
                Ok(api::CreateOutcome::Accepted) => {
                    println!(
                        "{}",
                        Paint::new("Creation accepted; the server is being provisioned in the background.")
                            .yellow()
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", Paint::new("Failed to create server").red(), e);
                    process::exit(1);
                }
            }
        }
    }
}
