//! Integration tests for the cleaning loop: engine properties, scripted runs, batch pipeline.
//!
//! Tests are split into modules under `cleaning/`:
//! - `common`: shared tables and runners
//! - `end_to_end`: dedupe + mean-impute through the full loop
//! - `cap`: the operation cap halts a never-stopping decision-maker
//! - `batch`: multi-file pipeline, failures do not stop the batch
//! - `properties`: proptest checks of the engine's algebraic properties

#[path = "cleaning/common.rs"]
mod common;

#[path = "cleaning/end_to_end.rs"]
mod end_to_end;

#[path = "cleaning/cap.rs"]
mod cap;

#[path = "cleaning/batch.rs"]
mod batch;

#[path = "cleaning/properties.rs"]
mod properties;
