use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::{info, info_span};

use outreach_cli::workflow::Workspace;
use outreach_core::{
    GuestEdit, GuestQuery, MarkAction, StatusCounts, build_messenger_link, classify_status,
    query_guests,
};
use outreach_draft::{MessageDrafter, OllamaClient, draft_or_fallback};
use outreach_ingest::{fetch_csv, read_csv_path};
use outreach_map::detect_fields;
use outreach_model::{GuestId, non_empty};
use outreach_store::DataPaths;

use crate::cli::{AddArgs, ListArgs, OllamaCommand, ReviewArgs, SettingsCommand, SettingsSetArgs};
use crate::summary::{
    print_guest, print_guest_page, print_history, print_import_report, print_mapping,
    print_review, print_settings, print_stats,
};

fn open_workspace(data_dir: Option<&Path>) -> Result<Workspace> {
    let paths = DataPaths::resolve(data_dir).context("resolve data directory")?;
    Workspace::open(paths)
}

pub fn run_import(data_dir: Option<&Path>, path: &Path) -> Result<()> {
    let span = info_span!("import", path = %path.display());
    let _guard = span.enter();
    let mut workspace = open_workspace(data_dir)?;
    let report = workspace.import_csv_file(path, Utc::now())?;
    print_import_report(&report);
    Ok(())
}

pub fn run_detect(path: &Path) -> Result<()> {
    let table = read_csv_path(path)?;
    let mapping = detect_fields(&table.headers)?;
    print_mapping(&mapping);
    println!("{} data rows.", table.row_count());
    Ok(())
}

pub fn run_sync(data_dir: Option<&Path>, url: Option<&str>) -> Result<()> {
    let mut workspace = open_workspace(data_dir)?;
    if let Some(url) = url {
        let sheet = workspace.set_sheet_url(url)?;
        info!(spreadsheet_id = %sheet.spreadsheet_id, gid = %sheet.gid, "sheet configured");
    }
    let csv_url = workspace
        .settings
        .sheet
        .csv_url
        .clone()
        .ok_or_else(|| anyhow!("no Google Sheet configured; pass --url or run `settings set --sheet-url`"))?;
    let span = info_span!("sync", url = %csv_url);
    let _guard = span.enter();
    let csv_text = fetch_csv(&csv_url)?;
    let report = workspace.sync_from_sheet(&csv_text, Utc::now())?;
    print_import_report(&report);
    Ok(())
}

pub fn run_stats(data_dir: Option<&Path>) -> Result<()> {
    let workspace = open_workspace(data_dir)?;
    print_stats(&StatusCounts::tally(&workspace.store));
    Ok(())
}

pub fn run_list(data_dir: Option<&Path>, args: &ListArgs) -> Result<()> {
    let workspace = open_workspace(data_dir)?;
    let query = GuestQuery {
        status: args.status,
        search: args.search.clone(),
        page: args.page,
        ..GuestQuery::manage()
    };
    let page = query_guests(&workspace.store, &query)?;
    print_guest_page(&page);
    Ok(())
}

pub fn run_review(data_dir: Option<&Path>, args: &ReviewArgs) -> Result<()> {
    let workspace = open_workspace(data_dir)?;
    let query = GuestQuery {
        status: args.status,
        search: args.search.clone(),
        page: args.page,
        ..GuestQuery::review()
    };
    let client = if args.no_draft {
        None
    } else {
        workspace.drafter()
    };
    let drafter = client.as_ref().map(|client| client as &dyn MessageDrafter);
    let (page, items) = workspace.review_page(&query, drafter)?;
    print_review(&page, &items);
    Ok(())
}

pub fn run_add(data_dir: Option<&Path>, args: &AddArgs) -> Result<()> {
    let mut workspace = open_workspace(data_dir)?;
    let id = workspace.add_guest(
        &args.name,
        args.address.as_deref(),
        args.note.as_deref(),
        args.profile.as_deref(),
        Utc::now(),
    )?;
    print_guest(workspace.guest(id)?);
    Ok(())
}

pub fn run_edit(data_dir: Option<&Path>, id: GuestId, field: &str, value: &str) -> Result<()> {
    let edit = GuestEdit::parse(field, value)?;
    let mut workspace = open_workspace(data_dir)?;
    let change = workspace.edit_guest(id, edit, Utc::now())?;
    println!("Guest {id}: {}", change.meta);
    if change.status_changed() {
        println!("Status is now {}.", change.new_status.label());
    }
    Ok(())
}

pub fn run_mark(data_dir: Option<&Path>, id: GuestId, action: MarkAction) -> Result<()> {
    let mut workspace = open_workspace(data_dir)?;
    let change = workspace.mark_guest(id, action, Utc::now())?;
    println!("Guest {id}: {}", change.meta);
    Ok(())
}

pub fn run_delete(data_dir: Option<&Path>, id: GuestId) -> Result<()> {
    let mut workspace = open_workspace(data_dir)?;
    let removed = workspace.delete_guest(id)?;
    println!("Deleted guest {id} ({}).", removed.name);
    Ok(())
}

pub fn run_history(data_dir: Option<&Path>, id: GuestId) -> Result<()> {
    let workspace = open_workspace(data_dir)?;
    print_guest(workspace.guest(id)?);
    print_history(workspace.store.actions_for(id));
    Ok(())
}

pub fn run_settings(data_dir: Option<&Path>, command: &SettingsCommand) -> Result<()> {
    let mut workspace = open_workspace(data_dir)?;
    match command {
        SettingsCommand::Show => {}
        SettingsCommand::Set(args) => {
            apply_settings(&mut workspace, args)?;
            workspace.save_settings(Utc::now())?;
            info!("settings saved");
        }
    }
    print_settings(&workspace.paths, &workspace.settings);
    Ok(())
}

fn apply_settings(workspace: &mut Workspace, args: &SettingsSetArgs) -> Result<()> {
    if let Some(url) = &args.sheet_url {
        if url.trim().is_empty() {
            workspace.clear_sheet_url();
        } else {
            workspace.set_sheet_url(url)?;
        }
    }
    let ollama = &mut workspace.settings.ollama;
    if let Some(base) = &args.ollama_base {
        ollama.base = base.trim().to_string();
    }
    if let Some(model) = &args.ollama_model {
        ollama.model = model.trim().to_string();
    }
    let wedding = &mut workspace.settings.wedding;
    if let Some(bride) = &args.bride {
        wedding.bride_name = non_empty(bride);
    }
    if let Some(groom) = &args.groom {
        wedding.groom_name = non_empty(groom);
    }
    if let Some(date) = &args.wedding_date {
        wedding.wedding_date = non_empty(date);
    }
    if let Some(sender) = args.sender {
        wedding.message_sender = sender;
    }
    Ok(())
}

pub fn run_ollama(data_dir: Option<&Path>, command: &OllamaCommand) -> Result<()> {
    let workspace = open_workspace(data_dir)?;
    let settings = &workspace.settings.ollama;
    let client = OllamaClient::new(&settings.base, &settings.model)?;
    match command {
        OllamaCommand::Test => {
            client.test_connection()?;
            println!("Ollama is reachable at {}.", settings.base);
        }
        OllamaCommand::Models => {
            let models = client.list_models()?;
            if models.is_empty() {
                println!("No models installed.");
            }
            for model in models {
                let marker = if model == settings.model { " (configured)" } else { "" };
                println!("{model}{marker}");
            }
        }
        OllamaCommand::Pull { model } => {
            println!("Pulling {model}; this can take several minutes.");
            client.pull_model(model)?;
            println!("Model {model} is ready.");
        }
        OllamaCommand::Try { model, name: Some(name) } => {
            let client = match model {
                Some(model) => OllamaClient::new(&settings.base, model)?,
                None => client,
            };
            let message = draft_or_fallback(Some(&client as &dyn MessageDrafter), name, &workspace.settings.wedding);
            println!("{message}");
        }
        OllamaCommand::Try { model, name: None } => {
            let model = model.as_deref().unwrap_or(client.model());
            let reply = client.test_model(model)?;
            println!("{model} replied: {reply}");
        }
    }
    Ok(())
}

pub fn run_classify(note: &str, address: &str) {
    let status = classify_status(note, address);
    println!("{} ({})", status.label(), status.as_str());
}

pub fn run_link(profile: Option<&str>, message: Option<&str>, name: Option<&str>) {
    println!("{}", build_messenger_link(profile, message, name));
}
