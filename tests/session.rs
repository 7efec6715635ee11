mod common;

use common::fixture_path;
use csv_charts::{
    ChartError, ChartKind, Value,
    session::{Session, UploadOutcome},
    sort::SortDirection,
    upload::UploadedFile,
};

fn upload(session: &mut Session, name: &str, text: &str) -> Result<UploadOutcome, ChartError> {
    session.upload(vec![UploadedFile::new(name, text)])
}

#[test]
fn upload_recommends_and_builds_default_config() {
    let mut session = Session::new();
    let file = UploadedFile::from_path(&fixture_path("scores.csv")).expect("read fixture");
    let outcome = session.upload(vec![file]).expect("upload");
    assert_eq!(
        outcome,
        UploadOutcome::Applied {
            rows: 3,
            kind: ChartKind::Pie
        }
    );
    let config = session.config().expect("config");
    assert_eq!(config.x_axis_key(), Some("name"));
    assert_eq!(config.y_axis_keys(), ["score"]);
    assert_eq!(session.source(), Some("scores.csv"));
}

#[test]
fn parse_failure_leaves_previous_state_untouched() {
    let mut session = Session::new();
    upload(&mut session, "good.csv", "name,score\nAlice,90\n").expect("first upload");
    session.set_title("Kept").expect("title");

    let bad = UploadedFile::new("bad.csv", b"name,score\nAl\xffce,90\n".to_vec());
    let err = session.upload(vec![bad]).unwrap_err();
    assert!(matches!(err, ChartError::ParseFailure { .. }));
    assert!(err.is_upload_error());

    assert_eq!(session.source(), Some("good.csv"));
    assert_eq!(session.config().map(|c| c.title()), Some("Kept"));
}

#[test]
fn invalid_file_type_is_rejected_before_parsing() {
    let mut session = Session::new();
    let err = upload(&mut session, "notes.txt", "name,score\nAlice,90\n").unwrap_err();
    assert!(matches!(err, ChartError::InvalidFileType { .. }));
    assert!(!session.is_loaded());
}

#[test]
fn empty_dataset_is_valid_and_renders_nothing() {
    let mut session = Session::new();
    let outcome = upload(&mut session, "empty.csv", "name,score\n,\n").expect("upload");
    assert!(matches!(outcome, UploadOutcome::Applied { rows: 0, .. }));
    let view = session.chart_view().expect("view");
    assert!(view.is_empty());
    assert!(!view.ready);
    assert!(session.table_view().expect("table").is_empty());
}

#[test]
fn new_upload_replaces_config_and_sort_together() {
    let mut session = Session::new();
    upload(&mut session, "a.csv", "name,score\nAlice,90\nBob,70\n").expect("first");
    session.request_sort("score").expect("sort");
    session.set_kind(ChartKind::Line).expect("kind");

    upload(&mut session, "b.csv", "city,temp,rain\nOslo,3,20\n").expect("second");
    assert!(session.sort().is_none());
    let config = session.config().expect("config");
    assert_eq!(config.kind(), ChartKind::Bar);
    assert_eq!(config.x_axis_key(), Some("city"));
}

#[test]
fn set_kind_resets_axes() {
    let mut session = Session::new();
    upload(&mut session, "a.csv", "name,score,bonus\nAlice,90,5\n").expect("upload");
    session.toggle_y_axis("bonus", false).expect("drop bonus");
    let config = session.set_kind(ChartKind::Pie).expect("pie");
    assert_eq!(config.y_axis_keys(), ["score", "bonus"]);
    assert!(config.columns()[1].is_pie_value());
}

#[test]
fn table_sort_toggles_and_keeps_missing_values_last() {
    let mut session = Session::new();
    upload(
        &mut session,
        "scores.csv",
        "name,score\nAlice,90\nBob,\nCara,75\nDan,100\n",
    )
    .expect("upload");

    let names = |session: &Session| -> Vec<String> {
        let view = session.table_view().expect("table");
        view.rows
            .iter()
            .map(|row| row.get(0).map(Value::as_display).unwrap_or_default())
            .collect()
    };

    let state = session.request_sort("score").expect("sort asc");
    assert_eq!(state.direction, SortDirection::Ascending);
    assert_eq!(names(&session), ["Cara", "Alice", "Dan", "Bob"]);

    let state = session.request_sort("score").expect("sort desc");
    assert_eq!(state.direction, SortDirection::Descending);
    assert_eq!(names(&session), ["Dan", "Alice", "Cara", "Bob"]);

    let state = session.request_sort("score").expect("sort asc again");
    assert_eq!(state.direction, SortDirection::Ascending);

    let dataset = session.dataset().expect("dataset");
    assert_eq!(dataset.rows()[1].get(0), Some(&Value::Text("Bob".into())));
}

#[test]
fn sorting_an_unknown_column_fails() {
    let mut session = Session::new();
    upload(&mut session, "a.csv", "name,score\nAlice,90\n").expect("upload");
    assert!(matches!(
        session.request_sort("missing"),
        Err(ChartError::UnknownColumn { .. })
    ));
    assert!(session.sort().is_none());
}

#[test]
fn export_is_stubbed() {
    let mut session = Session::new();
    upload(&mut session, "a.csv", "name,score\nAlice,90\n").expect("upload");
    assert!(matches!(
        session.request_export(),
        Err(ChartError::ExportUnsupported)
    ));
}

#[test]
fn chart_view_colors_follow_series_or_slices() {
    let mut session = Session::new();
    upload(
        &mut session,
        "a.csv",
        "name,score,bonus\nAlice,90,5\nBob,70,3\nCara,60,1\n",
    )
    .expect("upload");
    let view = session.chart_view().expect("bar view");
    assert_eq!(view.colors.len(), 2);
    assert!(view.ready);

    session.set_kind(ChartKind::Pie).expect("pie");
    let view = session.chart_view().expect("pie view");
    assert_eq!(view.colors.len(), 3);
}

#[test]
fn unterminated_quote_keeps_the_earlier_upload() {
    let mut session = Session::new();
    upload(&mut session, "a.csv", "name,score\nAlice,90\nBob,70\n").expect("first upload");
    session.set_kind(ChartKind::Line).expect("kind");

    let err = upload(&mut session, "b.csv", "name,score\n\"Bob,70\nx,1\n").unwrap_err();
    assert!(matches!(err, ChartError::ParseFailure { line: 2, .. }));

    assert_eq!(session.source(), Some("a.csv"));
    assert_eq!(session.dataset().map(|d| d.len()), Some(2));
    assert_eq!(session.config().map(|c| c.kind()), Some(ChartKind::Line));
}
