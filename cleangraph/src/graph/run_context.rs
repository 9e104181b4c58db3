//! Run context passed into nodes for streaming-aware execution.

use std::collections::HashSet;
use std::fmt::Debug;

use tokio::sync::mpsc;

use crate::stream::{StreamEvent, StreamMode};

/// Stream sender plus the selected stream modes for one `stream()` run.
#[derive(Clone)]
pub struct RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub stream_tx: Option<mpsc::Sender<StreamEvent<S>>>,
    pub stream_mode: HashSet<StreamMode>,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// True when events of `mode` should be sent.
    pub fn wants(&self, mode: StreamMode) -> bool {
        self.stream_tx.is_some() && self.stream_mode.contains(&mode)
    }
}
