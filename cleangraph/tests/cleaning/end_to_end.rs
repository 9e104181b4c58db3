//! Dedupe then mean-impute, driven by a scripted decision sequence.

use cleangraph::table::Value;
use cleangraph::{CleanState, ScriptedLlm, StreamEvent};

use crate::common::{people, people_engine, runner};

/// **Scenario**: Remove duplicates then fill missing ages with the mean.
/// Given `[id, name, age]` with two identical rows and one missing age,
/// when the decision-maker calls remove_duplicates then handle_missing_values(age, mean),
/// then one row is gone, no age is missing, and the filled value is the mean of the others.
#[tokio::test]
async fn dedupe_then_mean_impute() {
    let llm = ScriptedLlm::from_calls([
        ("remove_duplicates", "{}"),
        (
            "handle_missing_values",
            r#"{"column":"age","strategy":"mean"}"#,
        ),
    ])
    .with_final_answer("Removed one duplicate row and filled the missing age.");

    let before = people();
    let out = runner(llm).invoke(people_engine(), "people.csv").await.unwrap();
    let table = out.engine.table().unwrap();

    assert_eq!(table.row_count(), before.row_count() - 1);
    let age = table.column_index("age").unwrap();
    assert_eq!(table.missing_count(age), 0);

    let expected = (30.0 + 40.0 + 50.0) / 3.0;
    let filled = table.cell(2, "age").cloned().flatten();
    assert_eq!(filled, Some(Value::Number(expected)));
    assert_eq!(out.operations_applied, 2);
}

/// **Scenario**: Tool results are fed back to the decision-maker as user messages.
#[tokio::test]
async fn tool_results_are_observed_in_messages() {
    let llm = ScriptedLlm::from_calls([("remove_duplicates", "{}")]);
    let out = runner(llm).invoke(people_engine(), "people.csv").await.unwrap();
    assert!(out
        .messages
        .iter()
        .any(|m| m.content().contains("Removed 1 duplicate rows")));
}

/// **Scenario**: Invalid arguments are reported back as a result, and the loop goes on.
#[tokio::test]
async fn invalid_arguments_do_not_abort_the_run() {
    let llm = ScriptedLlm::from_calls([
        ("drop_columns", r#"{"columns": 5}"#),
        ("drop_columns", r#"{"columns": ["name"]}"#),
    ]);
    let out = runner(llm).invoke(people_engine(), "people.csv").await.unwrap();
    assert_eq!(out.operations_applied, 2);
    assert_eq!(
        out.engine.table().unwrap().column_names(),
        vec!["id", "age"]
    );
}

/// **Scenario**: Streaming delivers a final Values event equal to the returned state.
#[tokio::test]
async fn stream_returns_same_table_as_invoke() {
    let calls = [("remove_duplicates", "{}")];
    let invoked = runner(ScriptedLlm::from_calls(calls))
        .invoke(people_engine(), "people.csv")
        .await
        .unwrap();

    let mut last_values = None;
    let streamed = runner(ScriptedLlm::from_calls(calls))
        .stream_with_callback(
            people_engine(),
            "people.csv",
            Some(|e: &StreamEvent<CleanState>| {
                if let StreamEvent::Values(s) = e {
                    last_values = Some(s.operations_applied);
                }
            }),
        )
        .await
        .unwrap();

    assert_eq!(invoked.engine.table(), streamed.engine.table());
    assert_eq!(last_values, Some(1));
}
