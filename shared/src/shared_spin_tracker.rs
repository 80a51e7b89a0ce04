use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{
    DEFAULT_UNIQUE_LIMIT, HISTORY_CAPACITY, HIT_HISTORY_CAPACITY, MAX_SPIN, MAX_UNIQUE_LIMIT,
    MIN_UNIQUE_LIMIT,
};
use crate::page_view::PublicPage;
use crate::ring_buffer::RingBuffer;
use crate::spin::{valid_spins, Spin};
use crate::error::TrackerError;
use crate::validation::{parse_history_text, parse_limit, parse_spin};

/// A repeat of a number that was still in the unique ranking.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    /// Cycle counter at the moment the repeat was entered.
    pub cycle: u32,
    pub number: Spin,
    /// 1-based rank the number held in the ranking before it was entered.
    pub previous_position: usize,
}

/// Hit lifecycle of a page.
///
/// A hit stays pending until the next submission, which archives it and
/// restarts the cycle counter before doing anything else.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitState {
    #[default]
    Idle,
    PendingCommit(HitEvent),
}

/// What a single `record_spin` call did, for the caller to render.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub number: Spin,
    pub cycle: u32,
    /// Set when this spin repeated a ranked number.
    pub hit: Option<HitEvent>,
    /// The previous hit, if this spin moved it into the hit history.
    pub archived: Option<HitEvent>,
    pub ranking: Vec<Spin>,
}

pub type SpinHistory = RingBuffer<Spin, HISTORY_CAPACITY>;
pub type HitHistory = RingBuffer<HitEvent, HIT_HISTORY_CAPACITY>;

/// Returns up to `limit` distinct numbers ordered by where they *first*
/// appear in `history`, latest first appearance first.
///
/// A number that shows up early and repeats later keeps its early slot.
pub fn compute_unique_ranking<'a, I>(history: I, limit: usize) -> Vec<Spin>
where
    I: IntoIterator<Item = &'a Spin>,
{
    let mut seen = [false; MAX_SPIN as usize + 1];
    let mut by_first_appearance = Vec::new();
    for &spin in history {
        let slot = &mut seen[spin.value() as usize];
        if !*slot {
            *slot = true;
            by_first_appearance.push(spin);
        }
    }
    let skip = by_first_appearance.len().saturating_sub(limit);
    by_first_appearance.into_iter().skip(skip).rev().collect()
}

pub fn clamp_unique_limit(limit: i64) -> u8 {
    limit.clamp(MIN_UNIQUE_LIMIT as i64, MAX_UNIQUE_LIMIT as i64) as u8
}

/// One independent tracking session.
#[derive(Debug, Serialize, Clone)]
pub struct PageState {
    history: SpinHistory,
    cycle_count: u32,
    unique_limit: u8,
    hit_state: HitState,
    hit_history: HitHistory,
    // Materialized from history + unique_limit; only populated once the
    // history window is full.
    unique_ranking: Vec<Spin>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            history: SpinHistory::new(),
            cycle_count: 0,
            unique_limit: DEFAULT_UNIQUE_LIMIT,
            hit_state: HitState::Idle,
            hit_history: HitHistory::new(),
            unique_ranking: Vec::new(),
        }
    }

    /// Records a spin and advances the hit state machine.
    pub fn record_spin(&mut self, number: Spin) -> RecordOutcome {
        let archived = match std::mem::take(&mut self.hit_state) {
            HitState::PendingCommit(hit) => {
                self.hit_history.push(hit);
                self.cycle_count = 0;
                log::info!(
                    "Archived hit C{}({}, S{}); cycle restarts",
                    hit.cycle,
                    hit.number,
                    hit.previous_position
                );
                Some(hit)
            }
            HitState::Idle => None,
        };

        self.cycle_count += 1;

        // Ranking still reflects the history before this spin
        let hit = self
            .unique_ranking
            .iter()
            .position(|&ranked| ranked == number)
            .map(|index| HitEvent {
                cycle: self.cycle_count,
                number,
                previous_position: index + 1,
            });

        if let Some(hit) = hit {
            log::info!(
                "Hit: {} repeated from slot {} at cycle {}",
                hit.number,
                hit.previous_position,
                hit.cycle
            );
            self.hit_state = HitState::PendingCommit(hit);
        }

        self.history.push(number);
        self.refresh_ranking();
        log::debug!(
            "Recorded spin {} (cycle {}, {} in history)",
            number,
            self.cycle_count,
            self.history.len()
        );

        RecordOutcome {
            number,
            cycle: self.cycle_count,
            hit,
            archived,
            ranking: self.unique_ranking.clone(),
        }
    }

    /// Stores `limit` clamped to the allowed range and returns the stored value.
    pub fn set_unique_limit(&mut self, limit: i64) -> u8 {
        self.unique_limit = clamp_unique_limit(limit);
        self.refresh_ranking();
        self.unique_limit
    }

    /// Bulk edit: keeps the last window of valid numbers and clears all hit
    /// bookkeeping.
    pub fn replace_history(&mut self, numbers: &[i64]) {
        self.history.replace_with(valid_spins(numbers.iter().copied()));
        self.hit_state = HitState::Idle;
        self.hit_history.clear();
        self.cycle_count = 1;
        self.refresh_ranking();
    }

    pub fn replace_history_text(&mut self, text: &str) {
        self.replace_history(&parse_history_text(text));
    }

    /// Clears spins and hits. The unique limit is kept.
    pub fn reset(&mut self) {
        self.replace_history(&[]);
    }

    fn refresh_ranking(&mut self) {
        self.unique_ranking = if self.history.is_full() {
            compute_unique_ranking(self.history.iter(), self.unique_limit as usize)
        } else {
            Vec::new()
        };
    }

    pub fn history(&self) -> impl DoubleEndedIterator<Item = &Spin> + ExactSizeIterator {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_spin(&self) -> Option<Spin> {
        self.history.last().copied()
    }

    pub fn unique_ranking(&self) -> &[Spin] {
        &self.unique_ranking
    }

    pub fn hit_state(&self) -> HitState {
        self.hit_state
    }

    pub fn current_hit(&self) -> Option<&HitEvent> {
        match &self.hit_state {
            HitState::PendingCommit(hit) => Some(hit),
            HitState::Idle => None,
        }
    }

    pub fn pending_commit(&self) -> bool {
        matches!(self.hit_state, HitState::PendingCommit(_))
    }

    /// Oldest first.
    pub fn hit_history(&self) -> impl Iterator<Item = &HitEvent> {
        self.hit_history.iter()
    }

    pub fn recent_hits(&self) -> impl Iterator<Item = &HitEvent> {
        self.hit_history.iter_newest_first()
    }

    pub fn hit_history_len(&self) -> usize {
        self.hit_history.len()
    }

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn unique_limit(&self) -> u8 {
        self.unique_limit
    }

    pub fn history_text(&self) -> String {
        self.history
            .iter()
            .map(|spin| spin.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_public(&self) -> PublicPage {
        PublicPage::from_page(self)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

// === API Types ===

/// A number from a numeric field, or the raw text the user typed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum NumberInput {
    Number(i64),
    Text(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitSpinRequest {
    pub number: NumberInput,
}

impl SubmitSpinRequest {
    pub fn spin(&self) -> Result<Spin, TrackerError> {
        match &self.number {
            NumberInput::Number(n) => Spin::new(*n),
            NumberInput::Text(text) => parse_spin(text),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitSpinResponse {
    pub outcome: RecordOutcome,
    pub state: TrackerStateResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetLimitRequest {
    pub limit: NumberInput,
}

impl SetLimitRequest {
    /// `None` when the text is not a number; such input is ignored.
    pub fn requested_limit(&self) -> Option<i64> {
        match &self.limit {
            NumberInput::Number(n) => Some(*n),
            NumberInput::Text(text) => parse_limit(text),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetLimitResponse {
    pub limit: u8,
    pub state: TrackerStateResponse,
}

/// Either explicit numbers or the raw text of the edit form.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EditHistoryRequest {
    #[validate(length(max = 10000))]
    pub numbers: Option<Vec<i64>>,
    #[validate(length(max = 100000))]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwitchPageRequest {
    pub index: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TrackerStateResponse {
    pub active_index: usize,
    pub page_count: usize,
    pub page: PublicPage,
}
