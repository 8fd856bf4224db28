pub mod cursor;
pub mod mover;
pub mod position_cache;
pub mod post;
pub mod source;
pub mod timeline;
pub mod view;

pub use cursor::{CursorTokens, FetchBounds};
pub use mover::{FetchDirection, Movement, NavIntent};
pub use position_cache::PositionCache;
pub use post::Post;
pub use source::TimelineSource;
pub use timeline::Timeline;
pub use view::ViewKind;
