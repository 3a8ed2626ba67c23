//! Event dispatch.
//!
//! Every page interaction becomes a [`Message`] on one bounded queue. A single
//! task drains it, so interactions are applied strictly one after another
//! against the shared, read-only dataset.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::chart::{render, BarChart};
use crate::error::DispatchError;
use crate::model::census::Dataset;
use crate::model::options::{category_options, year_options, DropdownOption};
use crate::model::selection::{apply_event, dependent_dropdowns, DependentDropdown, Event, Selection, StalePolicy};

/// Everything the page needs to draw itself after one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub years: Vec<DropdownOption>,
    pub sido: DependentDropdown,
    pub sgg: DependentDropdown,
    pub categories: Vec<DropdownOption>,
    pub chart: BarChart,
}

/// Pure handler: apply `event` (if any) to `sel` and snapshot the result.
pub fn handle(dataset: &Dataset, sel: Selection, event: Option<Event>, policy: StalePolicy) -> DashboardView {
    let selection = match event {
        Some(event) => apply_event(dataset, sel, event, policy),
        None => sel,
    };
    let (sido, sgg) = dependent_dropdowns(dataset, &selection);
    let chart = render(dataset, &selection);
    DashboardView {
        years: year_options(dataset),
        sido,
        sgg,
        categories: category_options(),
        chart,
        selection,
    }
}

#[derive(Debug)]
pub struct Message {
    pub selection: Selection,
    pub event: Option<Event>,
    pub reply: oneshot::Sender<DashboardView>,
}

/// Cloneable sender side of the dispatcher queue.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Message>,
}

impl Dispatcher {
    /// Start the dispatcher task. It stops once every `Dispatcher` clone is dropped.
    pub fn spawn(dataset: Arc<Dataset>, policy: StalePolicy, queue_depth: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Message>(queue_depth.max(1));
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                debug!(event = ?msg.event, year = msg.selection.year, "dispatch");
                let view = handle(&dataset, msg.selection, msg.event, policy);
                // The requester may have gone away; nothing to do then.
                let _ = msg.reply.send(view);
            }
            debug!("dispatcher queue closed");
        });
        Self { tx }
    }

    pub async fn dispatch(&self, selection: Selection, event: Option<Event>) -> Result<DashboardView, DispatchError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Message {
                selection,
                event,
                reply,
            })
            .await
            .map_err(|_| DispatchError::Closed)?;
        rx.await.map_err(|_| DispatchError::NoReply)
    }
}
