use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use outreach_cli::workflow::Workspace;
use outreach_core::{GuestEdit, GuestQuery, MarkAction};
use outreach_draft::{DraftError, MessageDrafter, fallback_message};
use outreach_model::{GuestId, GuestStatus, WeddingDetails};
use outreach_store::DataPaths;

const GUEST_CSV: &str = "\
Guest Name,Mailing Address,Notes,Facebook
Ada Lovelace,,college friend,ada.l
nan,,,
Grace Hopper,1 Navy Way,Facebook Mar 2024,
Alan Turing,,messaged on 3/1,
";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 2, 9, 30, 0).unwrap()
}

struct Fixture {
    _dir: TempDir,
    paths: DataPaths,
    source: PathBuf,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("guests.csv");
    fs::write(&source, GUEST_CSV).unwrap();
    let paths = DataPaths::new(dir.path().join("data"));
    Fixture {
        _dir: dir,
        paths,
        source,
    }
}

fn imported(fixture: &Fixture) -> (Workspace, PathBuf) {
    let mut workspace = Workspace::open(fixture.paths.clone()).unwrap();
    let report = workspace.import_csv_file(&fixture.source, now()).unwrap();
    let copy = report.stored_copy.expect("stored copy");
    (workspace, copy)
}

fn data_line(path: &Path, prefix: &str) -> String {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .find(|line| line.starts_with(prefix))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn import_stores_upload_copy_and_persists() {
    let fixture = fixture();
    let mut workspace = Workspace::open(fixture.paths.clone()).unwrap();
    let report = workspace.import_csv_file(&fixture.source, now()).unwrap();

    assert_eq!(report.imported, 3);
    assert_eq!(report.skipped_rows, vec![2]);
    let copy = report.stored_copy.unwrap();
    assert!(copy.starts_with(fixture.paths.uploads_dir()));
    assert!(
        copy.file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("_guests.csv")
    );

    let reopened = Workspace::open(fixture.paths.clone()).unwrap();
    assert_eq!(reopened.store.len(), 3);
    assert_eq!(reopened.settings.csv.file_path.as_deref(), Some(copy.as_path()));
    assert_eq!(
        reopened.settings.csv.mapping.address.as_deref(),
        Some("Mailing Address")
    );
    let statuses: Vec<GuestStatus> = reopened.store.iter().map(|g| g.status).collect();
    assert_eq!(
        statuses,
        vec![
            GuestStatus::NeedsAddress,
            GuestStatus::NotOnFb,
            GuestStatus::Requested
        ]
    );
}

#[test]
fn address_edit_is_written_to_upload_copy_only() {
    let fixture = fixture();
    let (mut workspace, copy) = imported(&fixture);

    let change = workspace
        .edit_guest(
            GuestId::new(1),
            GuestEdit::Address("12 Engine Row".to_string()),
            now(),
        )
        .unwrap();

    assert_eq!(change.new_status, GuestStatus::HasAddress);
    assert_eq!(
        data_line(&copy, "Ada Lovelace"),
        "Ada Lovelace,12 Engine Row,college friend,ada.l"
    );
    assert_eq!(fs::read_to_string(&fixture.source).unwrap(), GUEST_CSV);
}

#[test]
fn marks_replace_status_markers_in_notes() {
    let fixture = fixture();
    let (mut workspace, copy) = imported(&fixture);

    workspace
        .mark_guest(GuestId::new(1), MarkAction::Requested, now())
        .unwrap();
    workspace
        .mark_guest(GuestId::new(2), MarkAction::Requested, now())
        .unwrap();

    assert_eq!(
        data_line(&copy, "Ada Lovelace"),
        "Ada Lovelace,,college friend | Address Requested,ada.l"
    );
    assert_eq!(
        data_line(&copy, "Grace Hopper"),
        "Grace Hopper,1 Navy Way,Address Requested,"
    );

    let history: Vec<&str> = workspace
        .store
        .actions_for(GuestId::new(2))
        .map(|entry| entry.action.as_str())
        .collect();
    assert_eq!(history, vec!["mark_requested"]);
}

#[test]
fn add_rejects_duplicate_names_and_skips_write_back() {
    let fixture = fixture();
    let (mut workspace, copy) = imported(&fixture);
    let before = fs::read_to_string(&copy).unwrap();

    let err = workspace
        .add_guest("  ada LOVELACE ", None, None, None, now())
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));

    let id = workspace
        .add_guest("Charles Babbage", Some("Dorset St"), None, None, now())
        .unwrap();
    assert_eq!(id, GuestId::new(4));
    assert_eq!(workspace.guest(id).unwrap().status, GuestStatus::HasAddress);

    workspace
        .mark_guest(id, MarkAction::NotOnFb, now())
        .unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), before);
}

#[test]
fn delete_removes_guest_and_history() {
    let fixture = fixture();
    let (mut workspace, _copy) = imported(&fixture);
    workspace
        .mark_guest(GuestId::new(3), MarkAction::NotOnFb, now())
        .unwrap();

    let removed = workspace.delete_guest(GuestId::new(3)).unwrap();
    assert_eq!(removed.name, "Alan Turing");
    assert!(workspace.guest(GuestId::new(3)).is_err());
    assert_eq!(workspace.store.actions_for(GuestId::new(3)).count(), 0);
    assert!(workspace.delete_guest(GuestId::new(3)).is_err());

    let reopened = Workspace::open(fixture.paths.clone()).unwrap();
    assert_eq!(reopened.store.len(), 2);
}

#[test]
fn sheet_sync_replaces_guests_and_disables_write_back() {
    let fixture = fixture();
    let (mut workspace, copy) = imported(&fixture);
    let before = fs::read_to_string(&copy).unwrap();

    let report = workspace
        .sync_from_sheet("Name,Address\nKatherine Johnson,\n", now())
        .unwrap();
    assert_eq!(report.imported, 1);
    assert_eq!(report.stored_copy, None);
    assert_eq!(workspace.settings.csv.file_path, None);

    let id = workspace.store.iter().next().unwrap().id;
    assert_eq!(id, GuestId::new(4));
    workspace
        .edit_guest(id, GuestEdit::Address("Hampton".to_string()), now())
        .unwrap();
    assert_eq!(fs::read_to_string(&copy).unwrap(), before);
}

#[test]
fn sheet_url_is_parsed_into_settings() {
    let fixture = fixture();
    let mut workspace = Workspace::open(fixture.paths.clone()).unwrap();

    assert!(workspace.set_sheet_url("https://example.com/sheet").is_err());
    let sheet = workspace
        .set_sheet_url("https://docs.google.com/spreadsheets/d/abc123/edit#gid=42")
        .unwrap();
    assert_eq!(sheet.spreadsheet_id, "abc123");
    assert_eq!(workspace.settings.sheet.gid.as_deref(), Some("42"));
    assert!(workspace.settings.sheet.csv_url.is_some());

    workspace.clear_sheet_url();
    assert_eq!(workspace.settings.sheet.public_url, None);
}

struct FailingDrafter;

impl MessageDrafter for FailingDrafter {
    fn draft(&self, _first_name: &str, _details: &WeddingDetails) -> outreach_draft::Result<String> {
        Err(DraftError::NotConfigured("test"))
    }
}

#[test]
fn review_queue_uses_fallback_messages_and_profile_links() {
    let fixture = fixture();
    let (workspace, _copy) = imported(&fixture);

    let (page, items) = workspace
        .review_page(&GuestQuery::review(), Some(&FailingDrafter as &dyn MessageDrafter))
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.guest.name, "Ada Lovelace");
    assert_eq!(item.message, fallback_message("Ada Lovelace"));
    assert!(
        item.link
            .starts_with("https://www.facebook.com/messages/t/ada.l?text=")
    );
}
