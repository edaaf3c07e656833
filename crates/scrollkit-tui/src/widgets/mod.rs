mod list_view;
mod status_bar;

pub use list_view::{row_at, thumb_span, track_position, ListLayout, ListView, ListViewWidget};
pub use status_bar::StatusBarWidget;
