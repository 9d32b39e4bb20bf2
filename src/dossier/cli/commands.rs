//! # CLI Layer
//!
//! The shell is **one possible UI client** for the dossier library. It is the
//! only place that:
//! - parses arguments and shell lines (clap);
//! - reads stdin and writes stdout/stderr;
//! - installs the tracing subscriber.
//!
//! A session lives as long as the process: documents named on the command
//! line are loaded, then commands are read from stdin one per line until
//! `quit` or end of input. A failing line prints its error and the shell
//! carries on.

use super::render::{
    render_config, render_documents, render_dossier_view, render_dossiers, render_messages,
    render_previews,
};
use super::setup::{get_grouped_help, Cli, ShellCommand, ShellLine};
use clap::Parser;
use directories::ProjectDirs;
use dossier::api::{CmdResult, ConfigAction, DossierApi};
use dossier::catalog::derive_display_name;
use dossier::config::DossierConfig;
use dossier::error::{DossierError, Result};
use dossier::id::Id;
use dossier::source::TextSource;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DOSSIER_LOG";
const HOME_ENV: &str = "DOSSIER_HOME";
const PROMPT: &str = "dossier> ";

struct AppContext {
    api: DossierApi,
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;
    for file in &cli.files {
        if let Err(e) = handle_load(&mut ctx, file, None).await {
            eprintln!("Error: {}", e);
        }
    }

    let interactive = std::io::stdin().is_terminal();
    if interactive {
        println!("Type `help` to list commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            let _ = std::io::stdout().flush();
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match dispatch_line(&mut ctx, &line).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir(cli: &Cli) -> Option<PathBuf> {
    if let Some(dir) = &cli.config_dir {
        return Some(dir.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Some(PathBuf::from(home));
    }
    ProjectDirs::from("com", "dossier", "dossier").map(|dirs| dirs.config_dir().to_path_buf())
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let api = match config_dir(cli) {
        Some(dir) => DossierApi::new(DossierConfig::load(&dir)?).with_config_dir(dir),
        None => DossierApi::new(DossierConfig::default()),
    };
    Ok(AppContext { api })
}

/// What follows the first `skip` words of `line`, inner spacing kept.
fn rest_of_line(line: &str, skip: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..skip {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest.trim_end()
}

async fn dispatch_line(ctx: &mut AppContext, line: &str) -> Result<Flow> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Flow::Continue);
    }

    let parsed = match ShellLine::try_parse_from(line.split_whitespace()) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprint!("{}", e.render());
            return Ok(Flow::Continue);
        }
    };

    match parsed.command {
        ShellCommand::Docs => handle_docs(ctx)?,
        ShellCommand::Load { file, name } => handle_load(ctx, &file, name).await?,
        ShellCommand::Browse { document } => handle_browse(ctx, document).await?,
        ShellCommand::Dossiers => handle_dossiers(ctx)?,
        ShellCommand::New { .. } => handle_new(ctx, rest_of_line(line, 1))?,
        ShellCommand::Select { dossier } => handle_select(ctx, dossier)?,
        ShellCommand::Show { json } => handle_show(ctx, json).await?,
        ShellCommand::Add { document, page } => handle_add(ctx, document, page)?,
        ShellCommand::Remove { positions } => handle_remove(ctx, &positions)?,
        ShellCommand::Order { positions } => handle_order(ctx, &positions)?,
        ShellCommand::Mark { position, .. } => {
            handle_mark(ctx, &position, rest_of_line(line, 2))?
        }
        ShellCommand::Unmark { position, marker } => handle_unmark(ctx, &position, marker)?,
        ShellCommand::Config { key, value } => {
            let value = (!value.is_empty()).then(|| rest_of_line(line, 2).to_string());
            handle_config(ctx, key, value)?
        }
        ShellCommand::Help => print!("{}", get_grouped_help()),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_messages(result: &CmdResult) {
    print!("{}", render_messages(&result.messages));
}

fn document_at(ctx: &AppContext, position: usize) -> Result<Id> {
    position
        .checked_sub(1)
        .and_then(|i| ctx.api.catalog().list().nth(i))
        .map(|doc| doc.id().clone())
        .ok_or_else(|| DossierError::InvalidIndex(format!("No document {}", position)))
}

fn dossier_at(ctx: &AppContext, position: usize) -> Result<Id> {
    ctx.api
        .registry()
        .nth(position)
        .map(|dossier| dossier.id().clone())
        .ok_or_else(|| DossierError::InvalidIndex(format!("No dossier {}", position)))
}

fn single_page_at(ctx: &AppContext, dossier_id: &Id, position: &str) -> Result<Id> {
    let ids = ctx.api.page_ids_at(dossier_id, &[position])?;
    match ids.as_slice() {
        [id] => Ok(id.clone()),
        _ => Err(DossierError::InvalidIndex(format!(
            "Expected a single page, got {}",
            position
        ))),
    }
}

fn handle_docs(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_documents()?;
    print!("{}", render_documents(&result.listed_documents));
    print_messages(&result);
    Ok(())
}

async fn handle_load(ctx: &mut AppContext, file: &Path, name: Option<String>) -> Result<()> {
    let source = TextSource::from_path(file).await?;
    let name = name.unwrap_or_else(|| {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        derive_display_name(&file_name)
    });
    let result = ctx.api.add_document(&name, source)?;
    print_messages(&result);
    Ok(())
}

async fn handle_browse(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = document_at(ctx, position)?;
    ctx.api.select_document(id.clone())?;
    let result = ctx.api.browse_document(&id).await?;
    let name = ctx.api.catalog().get(&id)?.display_name().to_string();
    print!(
        "{}",
        render_previews(
            &name,
            &result.document_pages,
            ctx.api.settings().thumbnail_scale
        )
    );
    print_messages(&result);
    Ok(())
}

fn handle_dossiers(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.list_dossiers()?;
    print!("{}", render_dossiers(&result.listed_dossiers));
    print_messages(&result);
    Ok(())
}

fn handle_new(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.create_dossier(name)?;
    print_messages(&result);
    Ok(())
}

fn handle_select(ctx: &mut AppContext, position: usize) -> Result<()> {
    let id = dossier_at(ctx, position)?;
    let result = ctx.api.select_dossier(id)?;
    print_messages(&result);
    Ok(())
}

async fn handle_show(ctx: &mut AppContext, json: bool) -> Result<()> {
    let id = ctx.api.require_selection()?;
    if json {
        let dossier = ctx.api.registry().get(&id)?;
        println!("{}", serde_json::to_string_pretty(dossier)?);
        return Ok(());
    }

    let result = ctx.api.view_dossier(&id).await?;
    if let Some(view) = &result.dossier_view {
        print!(
            "{}",
            render_dossier_view(view, ctx.api.settings().thumbnail_scale)
        );
    }
    print_messages(&result);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, document: usize, page: u32) -> Result<()> {
    let document_id = document_at(ctx, document)?;
    let result = ctx.api.add_page(document_id, page)?;
    print_messages(&result);
    Ok(())
}

fn handle_remove(ctx: &mut AppContext, positions: &[String]) -> Result<()> {
    let dossier_id = ctx.api.require_selection()?;
    let page_ids = ctx.api.page_ids_at(&dossier_id, positions)?;
    let result = ctx.api.remove_pages(&dossier_id, &page_ids)?;
    print_messages(&result);
    Ok(())
}

fn handle_order(ctx: &mut AppContext, positions: &[String]) -> Result<()> {
    let dossier_id = ctx.api.require_selection()?;
    let order = ctx.api.page_ids_at(&dossier_id, positions)?;
    let result = ctx.api.reorder_pages(&dossier_id, &order)?;
    print_messages(&result);
    Ok(())
}

fn handle_mark(ctx: &mut AppContext, position: &str, text: &str) -> Result<()> {
    let dossier_id = ctx.api.require_selection()?;
    let page_id = single_page_at(ctx, &dossier_id, position)?;
    let result = ctx.api.add_marker(&dossier_id, &page_id, text)?;
    print_messages(&result);
    Ok(())
}

fn handle_unmark(ctx: &mut AppContext, position: &str, marker: usize) -> Result<()> {
    let dossier_id = ctx.api.require_selection()?;
    let page_id = single_page_at(ctx, &dossier_id, position)?;
    let marker_id = ctx
        .api
        .registry()
        .get(&dossier_id)?
        .content_page(&page_id)
        .and_then(|page| marker.checked_sub(1).and_then(|i| page.markers.get(i)))
        .map(|m| m.id.clone())
        .ok_or_else(|| {
            DossierError::InvalidIndex(format!("No marker {} on page {}", marker, position))
        })?;
    let result = ctx.api.remove_marker(&dossier_id, &page_id, &marker_id)?;
    print_messages(&result);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result);
    Ok(())
}
