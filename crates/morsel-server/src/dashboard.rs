//! Adapter between filter selections and rendered outputs.
//!
//! [`Dashboard`] owns nothing but a handle to the loaded records and the
//! cutoff date. Each call computes a fresh view and projects it into the
//! chart, cards and insight outputs; nothing is cached between calls.

use std::sync::Arc;

use chrono::NaiveDate;
use morsel_core::insight::narrative;
use morsel_core::widgets::{REGION_FILTER_ID, WidgetValue, resolve_region_filter};
use morsel_core::{RegionFilter, SalesStore, ViewModel};

use crate::chart::render_chart;
use crate::error::ServerResult;
use crate::page::{render_cards, render_page};
use crate::protocol::{ClientMessage, ServerMessage};

/// The three outputs of one filter change, plus the view they came from.
#[derive(Debug, Clone)]
pub struct DashboardUpdate {
    pub view: ViewModel,
    pub chart: String,
    pub cards: String,
    pub insight: String,
}

impl From<DashboardUpdate> for ServerMessage {
    fn from(update: DashboardUpdate) -> Self {
        ServerMessage::ViewUpdated {
            region: update.view.filter.slug().to_string(),
            view: update.view,
            chart: update.chart,
            cards: update.cards,
            insight: update.insight,
        }
    }
}

/// Read-only dashboard over a loaded [`SalesStore`].
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: Arc<SalesStore>,
    cutoff: NaiveDate,
}

impl Dashboard {
    pub fn new(store: Arc<SalesStore>, cutoff: NaiveDate) -> Self {
        Self { store, cutoff }
    }

    pub fn view(&self, filter: RegionFilter) -> ViewModel {
        self.store.view(filter, self.cutoff)
    }

    /// Compute the outputs for `filter`.
    pub fn update(&self, filter: RegionFilter) -> ServerResult<DashboardUpdate> {
        let view = self.view(filter);
        Ok(DashboardUpdate {
            chart: render_chart(&view)?,
            cards: render_cards(&view),
            insight: narrative(&view),
            view,
        })
    }

    /// Full page for `filter`.
    pub fn page(&self, filter: RegionFilter) -> ServerResult<String> {
        render_page(&self.view(filter))
    }

    /// Answer one client message.
    pub fn handle(&self, msg: ClientMessage) -> ServerMessage {
        let update = match msg {
            ClientMessage::GetView => self.update(RegionFilter::default()),
            ClientMessage::WidgetUpdate { widget_id, value } => {
                if widget_id != REGION_FILTER_ID {
                    return ServerMessage::Error {
                        message: format!("unknown widget: {widget_id}"),
                    };
                }
                self.widget_update(&value)
            }
        };

        match update {
            Ok(update) => update.into(),
            Err(e) => {
                tracing::error!("Failed to render view: {}", e);
                ServerMessage::Error {
                    message: e.to_string(),
                }
            }
        }
    }

    fn widget_update(&self, value: &WidgetValue) -> ServerResult<DashboardUpdate> {
        let filter = resolve_region_filter(value);
        tracing::debug!("region filter changed to {}", filter.slug());
        self.update(filter)
    }
}
