pub mod config;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod selection;
pub mod traits;

pub use config::AppConfig;
pub use error::{RateLimitHint, TimelineError};
pub use id::ItemId;
pub use pagination::{display_window, window_range, WindowInfo, WindowSize};
pub use result::TimelineResult;
pub use selection::Position;
pub use traits::Identified;
