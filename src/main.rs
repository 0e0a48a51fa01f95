mod catalog;
mod config;
mod contact;
mod error;
mod gallery;
mod modal;
mod notify;
mod pagination;
mod preferences;
mod theme;
mod tui;

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    catalog::{preview_tags, Catalog},
    config::Config,
    contact::{ContactForm, Field, Subject},
    error::Result,
    preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore},
    theme::Theme,
};

const APP_NAME: &str = "portfolio-tui";

#[derive(Parser)]
#[command(name = "portfolio-tui")]
#[command(about = "Portfolio in the terminal: projects, DevOps work and a contact form")]
struct Cli {
    /// Config file [default: <config dir>/portfolio-tui/config.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Start with this theme instead of the saved or system one
    #[arg(long, value_enum, global = true)]
    theme: Option<Theme>,
    /// Preferences file [default: <data dir>/portfolio-tui/preferences.json]
    #[arg(long, global = true, conflicts_with = "no_persist")]
    preferences: Option<PathBuf>,
    /// Keep theme changes for this session only
    #[arg(long, global = true)]
    no_persist: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive viewer (default)
    Tui,
    /// Print the project catalogue
    List {
        /// List DevOps projects instead of the main work
        #[arg(long)]
        devops: bool,
        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one project or DevOps record as JSON
    Show {
        /// Record id, e.g. `lumen-analytics`
        id: String,
    },
    /// Send one contact message through the configured relay
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, value_enum, default_value_t = Subject::Collaboration)]
        subject: Subject,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // The TUI owns the terminal, so it logs to a file.
    init_tracing(matches!(command, Commands::Tui));

    let preferences: Box<dyn PreferenceStore> = match (cli.no_persist, cli.preferences) {
        (true, _) => Box::new(MemoryPreferenceStore::default()),
        (false, Some(path)) => Box::new(FilePreferenceStore::at(path)),
        (false, None) => Box::new(FilePreferenceStore::new()),
    };
    let result = run(command, cli.config.as_deref(), cli.theme, preferences).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(
    command: Commands,
    config_path: Option<&Path>,
    theme: Option<Theme>,
    preferences: Box<dyn PreferenceStore>,
) -> Result<()> {
    let config = config::load(config_path)?;
    match command {
        Commands::Tui => {
            let sender = notify::sender_for(config.relay.as_ref())?;
            tui::run(config, theme, preferences, sender).await
        }
        Commands::List { devops, json } => list(devops, json),
        Commands::Show { id } => show(&id),
        Commands::Send {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let fields = [
                (Field::Name, name),
                (Field::Email, email),
                (Field::Phone, phone),
                (Field::Subject, subject.label().to_owned()),
                (Field::Message, message),
            ];
            send(&config, fields).await
        }
    }
}

fn init_tracing(to_file: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("portfolio_tui=info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if !to_file {
        subscriber.with_writer(io::stderr).init();
        return;
    }
    if let Some(log_file) = open_log_file() {
        subscriber
            .with_writer(log_file)
            .with_ansi(false)
            .init();
    }
}

/// `<cache dir>/portfolio-tui/portfolio-tui.log`, else the temp dir.
fn open_log_file() -> Option<File> {
    let file_name = format!("{APP_NAME}.log");
    let cache = dirs::cache_dir().map(|dir| dir.join(APP_NAME));
    cache
        .into_iter()
        .chain([std::env::temp_dir()])
        .find_map(|dir| {
            fs::create_dir_all(&dir).ok()?;
            File::create(dir.join(&file_name)).ok()
        })
}

fn list(devops: bool, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if devops {
        let records = Catalog::devops().list();
        if json {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
            return Ok(());
        }
        for project in records {
            writeln!(
                out,
                "{:<28} {:<22} {}",
                project.title,
                project.slug,
                project.tools.join(", ")
            )?;
        }
    } else {
        let records = Catalog::projects().list();
        if json {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
            return Ok(());
        }
        for project in records {
            writeln!(
                out,
                "{:<20} {:<18} {}",
                project.title,
                project.status.label(),
                preview_tags(&project.tags).join(", ")
            )?;
        }
    }
    Ok(())
}

fn show(id: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    if let Some(project) = Catalog::projects().get(id) {
        serde_json::to_writer_pretty(&mut out, project)?;
    } else if let Some(project) = Catalog::devops().get(id) {
        serde_json::to_writer_pretty(&mut out, project)?;
    } else {
        return Err(io::Error::new(io::ErrorKind::NotFound, format!("No record with id `{id}`")).into());
    }
    writeln!(out)?;
    Ok(())
}

/// Headless submission through the same form state machine as the TUI.
async fn send(config: &Config, fields: [(Field, String); 5]) -> Result<()> {
    let sender = notify::sender_for(config.relay.as_ref())?;
    let mut form = ContactForm::new(config.contact.to_name.clone(), config.contact.success_reset());
    for (field, value) in &fields {
        form.update_field(*field, value);
    }

    let submission = form.submit()?;
    let result = sender.send(submission.params).await;
    form.complete(submission.ticket, result.clone());
    result?;

    println!("Message sent.");
    Ok(())
}
