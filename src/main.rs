//! Cumulus CLI
//!
//! Entry point for the `cumulus` command-line tool. Composes launch
//! requests for inspection and validates settings files; actual submission
//! happens through the deployed service, not this tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cumulus::clients::{ConfigurationSource, RemoteConfiguration};
use cumulus::provisioner::jobs::{JOB_LOG_DIR, JOB_NAME_COMPONENT};
use cumulus::provisioner::{assemble_job_flow, compose_submission, JobParams};
use cumulus::{logger, Settings};

#[derive(Parser)]
#[command(name = "cumulus")]
#[command(about = "Ephemeral Spark cluster provisioning", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a job's launch request and print it without submitting
    Explain {
        /// Path to the settings file
        #[arg(long, short = 's', default_value = "cumulus.toml")]
        settings: PathBuf,

        /// Username of the job owner
        #[arg(long)]
        owner: String,

        /// Email address of the job owner
        #[arg(long)]
        email: String,

        /// Unique job identifier (generated when omitted)
        #[arg(long)]
        identifier: Option<String>,

        /// EMR release version
        #[arg(long, default_value = "5.0.0")]
        release: String,

        /// Requested cluster size
        #[arg(long, default_value_t = 1)]
        size: u32,

        /// Storage key of an uploaded notebook; adds the bootstrap action
        /// and execution steps to the output
        #[arg(long)]
        notebook_key: Option<String>,

        /// Target the public data bucket instead of the private one
        #[arg(long)]
        public: bool,

        /// Remote job timeout in minutes
        #[arg(long, default_value_t = 60)]
        timeout: u32,

        /// Read the configuration blob from a local JSON file instead of
        /// fetching it from the shared configuration URL
        #[arg(long)]
        configurations: Option<PathBuf>,
    },

    /// Validate a settings file
    Verify {
        /// Path to the settings file
        #[arg(long, short = 's', default_value = "cumulus.toml")]
        settings: PathBuf,
    },
}

fn main() {
    logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            settings,
            owner,
            email,
            identifier,
            release,
            size,
            notebook_key,
            public,
            timeout,
            configurations,
        } => {
            run_explain(ExplainArgs {
                settings,
                owner,
                email,
                identifier,
                release,
                size,
                notebook_key,
                public,
                timeout,
                configurations,
            });
        }
        Commands::Verify { settings } => {
            run_verify(&settings);
        }
    }
}

struct ExplainArgs {
    settings: PathBuf,
    owner: String,
    email: String,
    identifier: Option<String>,
    release: String,
    size: u32,
    notebook_key: Option<String>,
    public: bool,
    timeout: u32,
    configurations: Option<PathBuf>,
}

fn run_explain(args: ExplainArgs) {
    let settings = load_settings(&args.settings);
    let configurations = load_configurations(&settings, args.configurations.as_deref());

    let params = JobParams {
        owner_username: args.owner,
        owner_email: args.email,
        identifier: args
            .identifier
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        emr_release: args.release,
        size: args.size,
    };

    let base = match assemble_job_flow(
        &settings,
        &params,
        configurations,
        JOB_LOG_DIR,
        JOB_NAME_COMPONENT,
        chrono::Utc::now(),
    ) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let request = match args.notebook_key {
        Some(key) => compose_submission(
            &settings,
            base,
            &params.identifier,
            &key,
            args.public,
            args.timeout,
        ),
        None => base,
    };

    match serde_json::to_string_pretty(&request) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: failed to serialize request: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(settings_path: &std::path::Path) {
    let settings = load_settings(settings_path);

    println!("Settings OK: {}", settings_path.display());
    println!("  product:         {}", settings.product);
    println!("  environment:     {}", settings.environment);
    println!("  region:          {}", settings.region);
    println!("  code bucket:     {}", settings.code_bucket);
    println!("  log bucket:      {}", settings.log_bucket);
    println!("  configuration:   {}", settings.configuration_url());
    println!(
        "  spot instances:  {} (bid {})",
        if settings.use_spot_instances { "on" } else { "off" },
        settings.spot_bid_price
    );
}

fn load_settings(path: &std::path::Path) -> Settings {
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn load_configurations(settings: &Settings, path: Option<&std::path::Path>) -> serde_json::Value {
    match path {
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
            match parsed {
                Ok(value) => value,
                Err(e) => {
                    eprintln!(
                        "Error: failed to read configurations from {}: {}",
                        path.display(),
                        e
                    );
                    process::exit(1);
                }
            }
        }
        None => {
            let remote = RemoteConfiguration::new(settings.configuration_url());
            match remote.fetch() {
                Ok(value) => value,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
