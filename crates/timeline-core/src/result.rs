use crate::error::TimelineError;

pub type TimelineResult<T> = Result<T, TimelineError>;
