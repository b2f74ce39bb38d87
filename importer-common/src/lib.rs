//! importer-common - Target-independent logic for the import status widget
//!
//! Query string lookup, the layer status model, widget configuration, the
//! poller state machine and the poll loop driving it. Nothing here touches
//! the browser, so it all runs under plain `cargo test`.

pub mod config;
pub mod error;
pub mod poll_loop;
pub mod poller;
pub mod query;
pub mod render;
pub mod snapshot;
pub mod status;

pub use config::{ConfigError, IconPaths, WidgetConfig};
pub use error::PollError;
pub use poll_loop::{apply_fetch_result, run_poll_loop, PollHost};
pub use poller::{JobId, PollerState, RequestTicket, ResponseOutcome};
pub use render::{render_model, FileBlock, LayerRow, StatusView};
pub use snapshot::{LayerStatusMap, ProgressSummary, StatusSnapshot};
pub use status::{LayerStatus, StatusIcon};
