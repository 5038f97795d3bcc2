//! WebSocket protocol messages for the dashboard.
//!
//! Defines the message types exchanged between the page script and the
//! server.

use morsel_core::ViewModel;
use morsel_core::widgets::WidgetValue;
use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the view for the default filter.
    GetView,

    /// Update a widget value.
    WidgetUpdate {
        /// Widget identifier on the page.
        widget_id: String,
        /// New widget value.
        value: WidgetValue,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Fresh outputs for the selected region.
    ViewUpdated {
        /// Slug of the applied filter.
        region: String,
        /// Computed view model.
        view: ViewModel,
        /// Rendered chart fragment.
        chart: String,
        /// Rendered stat cards fragment.
        cards: String,
        /// Insight sentence.
        insight: String,
    },

    /// The client message could not be handled.
    Error {
        /// Error message.
        message: String,
    },
}
