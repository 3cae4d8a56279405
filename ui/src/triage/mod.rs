mod history;
mod view;

pub use history::{HistoryPanel, HistoryState};
pub use view::AnalyzeView;
