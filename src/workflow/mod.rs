pub mod record_view;
pub mod review_engine;

pub use record_view::{RecordView, RenderOutcome, SummaryView};
pub use review_engine::{ReviewEngine, ReviewState};
