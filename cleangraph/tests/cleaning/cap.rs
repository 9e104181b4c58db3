//! Operation cap.

use cleangraph::{MockLlm, DEFAULT_MAX_OPERATIONS};

use crate::common::{people_engine, runner};

/// **Scenario**: A decision-maker that never stops is halted after exactly k operations.
#[tokio::test]
async fn never_stopping_decision_maker_halts_at_k() {
    for k in [1usize, 3, 7] {
        let out = runner(MockLlm::always_calling("table_info", "{}"))
            .with_max_operations(k)
            .invoke(people_engine(), "people.csv")
            .await
            .unwrap();
        assert_eq!(out.operations_applied, k, "cap {}", k);
        assert!(out.is_exhausted());
    }
}

/// **Scenario**: Mutating calls stop mutating once the cap is reached.
#[tokio::test]
async fn cap_stops_mutations() {
    let out = runner(MockLlm::always_calling(
        "drop_columns",
        r#"{"columns":["name"]}"#,
    ))
    .with_max_operations(2)
    .invoke(people_engine(), "people.csv")
    .await
    .unwrap();
    assert_eq!(out.operations_applied, 2);
    assert_eq!(out.engine.table().unwrap().column_names(), vec!["id", "age"]);
}

/// **Scenario**: The default cap is 30.
#[tokio::test]
async fn default_cap_is_thirty() {
    let out = runner(MockLlm::always_calling("table_head", "{}"))
        .invoke(people_engine(), "people.csv")
        .await
        .unwrap();
    assert_eq!(DEFAULT_MAX_OPERATIONS, 30);
    assert_eq!(out.operations_applied, 30);
}
