//! Shared fixtures for cleaning integration tests.

use cleangraph::{CleaningRunner, LlmClient, Table, TableEngine, TableToolSource};

/// `[id, name, age]` with one fully duplicated row and one missing age.
pub fn people() -> Table {
    Table::from_text_records(
        ["id", "name", "age"],
        [
            ["1", "ann", "30"],
            ["2", "bob", "40"],
            ["2", "bob", "40"],
            ["3", "cy", ""],
            ["4", "di", "50"],
        ],
    )
}

pub fn people_engine() -> TableEngine {
    TableEngine::with_table(people())
}

pub fn runner(llm: impl LlmClient + 'static) -> CleaningRunner {
    CleaningRunner::new(Box::new(llm), Box::new(TableToolSource::new()))
        .expect("cleaning graph compiles")
}
