pub mod constants;
pub mod error;
pub mod page_registry;
pub mod page_view;
pub mod ring_buffer;
pub mod shared_spin_tracker;
pub mod spin;
pub mod validation;

pub use error::TrackerError;
pub use page_registry::PageRegistry;
pub use shared_spin_tracker::{HitEvent, PageState, RecordOutcome};
pub use spin::Spin;
