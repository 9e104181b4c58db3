//! Batch pipeline over several files.

use std::path::PathBuf;

use cleangraph::{clean_files, MockLlm, PipelineState, ScriptedLlm};

use crate::common::runner;

/// **Scenario**: One unreadable file is recorded as a failure; the other files are cleaned.
#[tokio::test]
async fn failed_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("a.csv");
    std::fs::write(&good, "x,y\n1,2\n1,2\n").unwrap();
    let missing = dir.path().join("gone.csv");
    let also_good = dir.path().join("b.tsv");
    std::fs::write(&also_good, "x\ty\n3\t4\n").unwrap();
    let notes = dir.path().join("notes.pdf");
    std::fs::write(&notes, "not a table").unwrap();
    let out_dir = dir.path().join("cleaned");

    let state = PipelineState::new(
        vec![good.clone(), missing.clone(), notes, also_good.clone()],
        &out_dir,
    );
    let runner = runner(MockLlm::with_no_tool_calls("Looks clean."));
    let state = clean_files(&runner, state, None).await;

    assert_eq!(
        state.cleaned_file_paths,
        vec![out_dir.join("cleaned_a.csv"), out_dir.join("cleaned_b.tsv")]
    );
    assert_eq!(state.failures.len(), 1);
    assert_eq!(state.failures[0].path, missing);
    assert!(state.has_failures());
    assert_eq!(
        std::fs::read_to_string(out_dir.join("cleaned_b.tsv")).unwrap(),
        "x\ty\n3\t4\n"
    );
}

/// **Scenario**: Tables are not shared between files; each file gets its own engine.
#[tokio::test]
async fn files_do_not_share_table_state() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    std::fs::write(&first, "a,b\n1,2\n").unwrap();
    let second = dir.path().join("second.csv");
    std::fs::write(&second, "a,b\n3,4\n").unwrap();

    let llm = ScriptedLlm::from_calls([("drop_columns", r#"{"columns":["b"]}"#)]);
    let state = PipelineState::new(vec![first, second], dir.path()).with_debug(true);
    let state = clean_files(&runner(llm), state, None).await;

    let outputs: Vec<String> = state
        .cleaned_file_paths
        .iter()
        .map(|p: &PathBuf| std::fs::read_to_string(p).unwrap())
        .collect();
    assert_eq!(outputs, vec!["a\n1\n".to_string(), "a,b\n3,4\n".to_string()]);
}

/// **Scenario**: A workbook upload is cleaned and written as `cleaned_<stem>.csv`,
/// with missing cells as empty fields.
#[tokio::test]
async fn spreadsheet_is_cleaned_to_csv() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("people.xlsx");
    std::fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/people.xlsx"),
        &src,
    )
    .unwrap();
    let out_dir = dir.path().join("cleaned");

    let runner = runner(ScriptedLlm::from_calls([("remove_duplicates", "{}")]));
    let state = clean_files(&runner, PipelineState::new(vec![src], &out_dir), None).await;

    assert!(!state.has_failures(), "{:?}", state.failures);
    let written = out_dir.join("cleaned_people.csv");
    assert_eq!(state.cleaned_file_paths, vec![written.clone()]);
    assert_eq!(
        std::fs::read_to_string(written).unwrap(),
        "id,name,score\n1,ann,1.5\n2,,\n3,bob,\n"
    );
}
