use serde::Serialize;

use crate::constants::PAGE_COUNT;
use crate::error::TrackerError;
use crate::shared_spin_tracker::{PageState, RecordOutcome, TrackerStateResponse};
use crate::spin::Spin;

/// The fixed set of pages and which one is active.
///
/// Pages live as long as the registry; restarting resets them in place.
#[derive(Debug, Serialize, Clone)]
pub struct PageRegistry {
    pages: [PageState; PAGE_COUNT],
    active_index: usize,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self {
            pages: std::array::from_fn(|_| PageState::new()),
            active_index: 0,
        }
    }

    /// Validates `number` and records it on the active page. Rejected input
    /// leaves every page untouched.
    pub fn submit(&mut self, number: i64) -> Result<RecordOutcome, TrackerError> {
        let spin = Spin::new(number)?;
        Ok(self.submit_spin(spin))
    }

    pub fn submit_spin(&mut self, spin: Spin) -> RecordOutcome {
        self.active_page_mut().record_spin(spin)
    }

    pub fn switch_active(&mut self, index: usize) -> Result<(), TrackerError> {
        if index >= PAGE_COUNT {
            return Err(TrackerError::InvalidPageIndex(index));
        }
        if index != self.active_index {
            log::info!("Switching active page {} -> {}", self.active_index, index);
            self.active_index = index;
        }
        Ok(())
    }

    pub fn restart_all(&mut self) {
        for page in self.pages.iter_mut() {
            page.reset();
        }
        log::info!("Restarted all {} pages", PAGE_COUNT);
    }

    pub fn set_unique_limit(&mut self, limit: i64) -> u8 {
        self.active_page_mut().set_unique_limit(limit)
    }

    pub fn replace_history(&mut self, numbers: &[i64]) {
        self.active_page_mut().replace_history(numbers);
    }

    pub fn replace_history_text(&mut self, text: &str) {
        self.active_page_mut().replace_history_text(text);
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_page(&self) -> &PageState {
        &self.pages[self.active_index]
    }

    pub fn active_page_mut(&mut self) -> &mut PageState {
        &mut self.pages[self.active_index]
    }

    pub fn page(&self, index: usize) -> Result<&PageState, TrackerError> {
        self.pages
            .get(index)
            .ok_or(TrackerError::InvalidPageIndex(index))
    }

    pub fn to_public(&self) -> TrackerStateResponse {
        TrackerStateResponse {
            active_index: self.active_index,
            page_count: PAGE_COUNT,
            page: self.active_page().to_public(),
        }
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
