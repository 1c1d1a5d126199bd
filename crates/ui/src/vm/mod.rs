mod drill_vm;
mod time_fmt;

pub use drill_vm::{DrillVm, FeedbackTone, FeedbackVm, LmsStatus, SummaryVm};
pub use time_fmt::format_elapsed;
