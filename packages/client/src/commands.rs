//! Command definitions and execution.
//!
//! Commands:
//! - `tree [--json]` - Connect to every server and show the combined tree
//! - `servers` - List configured servers
//! - `add <name> <url>` / `remove <name>` / `edit <name>` - Manage servers
//! - `check <url>` - Ask a URL whether it is a WFM server
//! - `kind <server> <path>` - Ask a server whether a path is a file
//! - `download <server> <path> [--open]` - Fetch a file into the download directory
//! - `download-dir [dir]` - Show or change the download directory

use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;

use wfm_http::{
    combined_tree, download_destination, file_url, HttpExecutor, MatchMode, ReqwestExecutor,
    ServerEntry, WfmClient,
};

use crate::error::Error;
use crate::open::open_with_system;
use crate::render::{render_failures, render_tree};
use crate::settings::Settings;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Connect to every server and print the combined tree
    Tree {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// List configured servers
    Servers,

    /// Add a server
    Add { name: String, url: String },

    /// Remove a server
    Remove { name: String },

    /// Rename a server or change its URL
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },

    /// Check whether a URL hosts a WFM server
    Check { url: String },

    /// Report whether a path on a server is a file or a directory
    Kind { server: String, path: String },

    /// Download a file into the download directory
    Download {
        server: String,
        path: String,
        /// Open the file with the default application afterwards
        #[arg(long)]
        open: bool,
    },

    /// Show or set the download directory
    DownloadDir { dir: Option<PathBuf> },
}

/// Text produced by a command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// For stdout.
    pub display: String,
    /// For stderr; per-server failures and similar.
    pub warnings: String,
}

impl CommandOutput {
    fn display(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            warnings: String::new(),
        }
    }
}

/// Everything a command needs: settings on disk and a client.
pub struct Context<E: HttpExecutor = ReqwestExecutor> {
    pub settings: Settings,
    pub client: WfmClient<E>,
    pub color: bool,
}

impl Context<ReqwestExecutor> {
    /// Open settings (`config_dir`, or the default location) and build a
    /// reqwest-backed client.
    pub fn new(
        config_dir: Option<PathBuf>,
        timeout: Option<Duration>,
        mode: MatchMode,
    ) -> Result<Self, Error> {
        let settings = match config_dir {
            Some(dir) => Settings::open(dir)?,
            None => Settings::open_default()?,
        };
        let client = WfmClient::with_timeout(timeout)?.with_match_mode(mode);

        Ok(Self {
            settings,
            client,
            color: false,
        })
    }
}

impl<E: HttpExecutor> Context<E> {
    pub fn with_client(settings: Settings, client: WfmClient<E>) -> Self {
        Self {
            settings,
            client,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Run `command` against `ctx`.
pub fn execute<E: HttpExecutor>(command: Command, ctx: &Context<E>) -> Result<CommandOutput, Error> {
    match command {
        Command::Tree { json } => tree(ctx, json),
        Command::Servers => servers(ctx),
        Command::Add { name, url } => {
            let mut list = ctx.settings.servers()?;
            list.add(ServerEntry::new(name.as_str(), url.as_str()))?;
            list.save()?;
            Ok(CommandOutput::display(format!("Added {} ({})", name, url)))
        }
        Command::Remove { name } => {
            let mut list = ctx.settings.servers()?;
            let removed = list.remove(&name)?;
            list.save()?;
            Ok(CommandOutput::display(format!("Removed {}", removed)))
        }
        Command::Edit {
            name,
            new_name,
            url,
        } => {
            let mut list = ctx.settings.servers()?;
            let edited = list.edit(&name, new_name, url)?.clone();
            list.save()?;
            Ok(CommandOutput::display(format!("Updated {}", edited)))
        }
        Command::Check { url } => {
            let message = if ctx.client.verify_server(&url)? {
                format!("{} is a WFM server", url)
            } else {
                format!("{} is not a WFM server", url)
            };
            Ok(CommandOutput::display(message))
        }
        Command::Kind { server, path } => {
            let entry = server_entry(ctx, &server)?;
            let path = normalize(&path);
            let kind = if ctx.client.is_file(&entry.url, path)? {
                "file"
            } else {
                "directory"
            };
            Ok(CommandOutput::display(kind))
        }
        Command::Download { server, path, open } => download(ctx, &server, &path, open),
        Command::DownloadDir { dir: Some(dir) } => {
            ctx.settings.set_download_dir(&dir)?;
            Ok(CommandOutput::display(format!(
                "Download directory set to {}",
                dir.display()
            )))
        }
        Command::DownloadDir { dir: None } => Ok(CommandOutput::display(
            ctx.settings.download_dir()?.display().to_string(),
        )),
    }
}

fn tree<E: HttpExecutor>(ctx: &Context<E>, json: bool) -> Result<CommandOutput, Error> {
    let list = ctx.settings.servers()?;
    let outcomes = ctx.client.refresh(list.entries());
    let root = combined_tree(&outcomes);

    let display = if json {
        serde_json::to_string_pretty(&root)?
    } else {
        render_tree(&root, ctx.color)
    };

    Ok(CommandOutput {
        display,
        warnings: render_failures(&outcomes, ctx.color),
    })
}

fn servers<E: HttpExecutor>(ctx: &Context<E>) -> Result<CommandOutput, Error> {
    let list = ctx.settings.servers()?;
    if list.is_empty() {
        return Ok(CommandOutput::display(
            "No servers configured; add one with `wfm add <name> <url>`",
        ));
    }

    let width = list.entries().iter().map(|e| e.name.len()).max().unwrap_or(0);
    let lines: Vec<String> = list
        .entries()
        .iter()
        .map(|e| format!("{:width$}  {}", e.name, e.url, width = width))
        .collect();
    Ok(CommandOutput::display(lines.join("\n")))
}

fn download<E: HttpExecutor>(
    ctx: &Context<E>,
    server: &str,
    path: &str,
    open: bool,
) -> Result<CommandOutput, Error> {
    let entry = server_entry(ctx, server)?;
    let path = normalize(path);

    if !ctx.client.is_file(&entry.url, path)? {
        return Err(Error::NotAFile {
            server: entry.name,
            path: path.to_string(),
        });
    }

    let destination = download_destination(&ctx.settings.download_dir()?, &entry.name, path)?;
    let written = ctx
        .client
        .download_file(&file_url(&entry.url, path), &destination)?;

    if open {
        open_with_system(&destination)?;
    }

    Ok(CommandOutput::display(format!(
        "{} ({} bytes)",
        destination.display(),
        written
    )))
}

fn server_entry<E: HttpExecutor>(ctx: &Context<E>, name: &str) -> Result<ServerEntry, Error> {
    ctx.settings
        .servers()?
        .get(name)
        .cloned()
        .ok_or_else(|| Error::UnknownServer(name.to_string()))
}

/// Server paths never start or end with `/`.
fn normalize(path: &str) -> &str {
    path.trim_matches('/')
}
