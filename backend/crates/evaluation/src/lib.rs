pub mod derived;
pub mod error;
pub mod events;
pub mod format;
pub mod readiness;
pub mod status;
pub mod value;

pub use derived::{derive_ltv_cac, derive_metrics, infer_well_known_kind, DerivedMetric};
pub use error::ValueParseError;
pub use events::{apply_metric_event, MetricEvent, MetricEventKind};
pub use format::format_metric_value;
pub use readiness::{overall_progress, readiness_progress, summarize, ReadinessSummary, StatusColor};
pub use status::{
    classify_metric_status, evaluate_metric, metric_status_or_default, validate_metric_values,
};
