use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use outreach_ingest::{
    IngestError, RowUpdate, import_table, read_csv_path, read_csv_str, write_back,
};
use outreach_model::GuestStatus;

const GUEST_CSV: &str = "\
Guest Name,Mailing Address,Notes,Facebook
Ada Lovelace,,college friend,ada.l
nan,,,
Grace Hopper,1 Navy Way,Facebook Mar 2024,
Alan Turing,,messaged on 3/1,
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn import_detects_columns_and_classifies_rows() {
    let table = read_csv_str(GUEST_CSV).unwrap();
    let outcome = import_table(&table).unwrap();

    assert_eq!(outcome.mapping.name.as_deref(), Some("Guest Name"));
    assert_eq!(outcome.mapping.address.as_deref(), Some("Mailing Address"));
    assert_eq!(outcome.mapping.notes.as_deref(), Some("Notes"));
    assert_eq!(outcome.mapping.social_profile.as_deref(), Some("Facebook"));
    assert_eq!(outcome.skipped_rows, vec![2]);

    let summary: Vec<(&str, GuestStatus, Option<usize>)> = outcome
        .guests
        .iter()
        .map(|g| (g.name.as_str(), g.status, g.import_row_number))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Ada Lovelace", GuestStatus::NeedsAddress, Some(1)),
            ("Grace Hopper", GuestStatus::NotOnFb, Some(3)),
            ("Alan Turing", GuestStatus::Requested, Some(4)),
        ]
    );
    assert_eq!(outcome.guests[0].social_profile.as_deref(), Some("ada.l"));
}

#[test]
fn import_without_name_column_fails() {
    let table = read_csv_str("Street,Phone\n1 Main,555\n").unwrap();
    let err = import_table(&table).unwrap_err();
    assert!(matches!(err, IngestError::Mapping(_)));
    assert!(err.to_string().contains("Street, Phone"));
}

#[test]
fn path_import_requires_csv_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "guests.txt", GUEST_CSV);
    assert!(matches!(
        read_csv_path(&path),
        Err(IngestError::NotCsv { .. })
    ));

    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        read_csv_path(&missing),
        Err(IngestError::FileNotFound { .. })
    ));
}

#[test]
fn write_back_updates_rows_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "guests.csv", GUEST_CSV);
    let mapping = import_table(&read_csv_path(&path).unwrap()).unwrap().mapping;

    let updates = vec![
        RowUpdate {
            row_number: 1,
            address: Some("12 Oak St, Springfield".to_string()),
            status: Some(GuestStatus::HasAddress),
        },
        RowUpdate {
            row_number: 3,
            address: None,
            status: Some(GuestStatus::Requested),
        },
        RowUpdate {
            row_number: 9,
            address: None,
            status: Some(GuestStatus::NotOnFb),
        },
    ];
    let summary = write_back(&path, &mapping, &updates).unwrap();
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.out_of_range, 1);

    let written = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(written, @r#"
    Guest Name,Mailing Address,Notes,Facebook
    Ada Lovelace,"12 Oak St, Springfield",college friend,ada.l
    nan,,,
    Grace Hopper,1 Navy Way,Address Requested,
    Alan Turing,,messaged on 3/1,
    "#);
    assert!(!dir.path().join("guests.csv.tmp").exists());
}

#[test]
fn write_back_leaves_untouched_rows_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "ragged.csv",
        "Name,Address,Notes\nAda,,friend,RSVP yes,+1\nBob,  7 Elm St  ,\nCy,  9 Pine Rd  ,cousin\n",
    );
    let mapping = import_table(&read_csv_path(&path).unwrap()).unwrap().mapping;

    let update = RowUpdate {
        row_number: 2,
        address: None,
        status: Some(GuestStatus::Requested),
    };
    let summary = write_back(&path, &mapping, &[update]).unwrap();
    assert_eq!(summary.updated, 1);

    let written = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!(written, @r"
    Name,Address,Notes
    Ada,,friend,RSVP yes,+1
    Bob,  7 Elm St  ,Address Requested
    Cy,  9 Pine Rd  ,cousin
    ");
}
