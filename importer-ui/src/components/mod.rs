mod import_status;
mod progress_summary;
mod status_icon;

pub use import_status::ImportStatusView;
pub use progress_summary::ProgressSummaryLine;
pub use status_icon::StatusIconView;
