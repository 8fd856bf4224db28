pub mod engine;
pub mod session;
pub mod status;
pub mod store;
pub mod view_state;

pub use engine::{EngineOptions, PaginationEngine};
pub use session::{Session, SwitchOutcome};
pub use status::{FetchOutcome, NavOutcome, StatusLine};
pub use store::{Activation, StoreEvent, TimelineStore, ViewSnapshot, ViewTransaction};
pub use view_state::{Activity, ViewState};
