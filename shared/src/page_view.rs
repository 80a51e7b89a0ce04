//! Read-only snapshots of a page for whatever renders it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{GRID_COLUMNS, HOT_SLOTS};
use crate::shared_spin_tracker::{HitEvent, PageState};
use crate::spin::Spin;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub number: Spin,
    pub rank: usize,
    pub hot: bool,
}

/// The unique ranking laid out row-major, rank 1 in the top-left cell.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct UniqueGrid {
    pub rows: Vec<Vec<GridCell>>,
}

impl UniqueGrid {
    pub fn from_ranking(ranking: &[Spin]) -> Self {
        let cells: Vec<GridCell> = ranking
            .iter()
            .enumerate()
            .map(|(index, &number)| GridCell {
                number,
                rank: index + 1,
                hot: index < HOT_SLOTS,
            })
            .collect();
        Self {
            rows: cells.chunks(GRID_COLUMNS).map(|row| row.to_vec()).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CycleLine {
    pub cycle: u32,
    pub number: Option<Spin>,
    pub previous_position: Option<usize>,
    pub label: String,
}

struct CycleText<'a> {
    cycle: u32,
    number: Option<Spin>,
    position: Option<usize>,
    prefix: &'a str,
}

impl fmt::Display for CycleText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: C{}(", self.prefix, self.cycle)?;
        match self.number {
            Some(number) => write!(f, "{}", number)?,
            None => write!(f, "-")?,
        }
        if let Some(position) = self.position {
            write!(f, ", S{}", position)?;
        }
        write!(f, ")")
    }
}

impl CycleLine {
    fn from_hit(hit: &HitEvent, prefix: &str) -> Self {
        let label = CycleText {
            cycle: hit.cycle,
            number: Some(hit.number),
            position: Some(hit.previous_position),
            prefix,
        }
        .to_string();
        Self {
            cycle: hit.cycle,
            number: Some(hit.number),
            previous_position: Some(hit.previous_position),
            label,
        }
    }
}

/// The current cycle plus the most recent archived hits, newest first.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub current: CycleLine,
    pub last: Vec<CycleLine>,
}

impl CycleSummary {
    pub fn from_page(page: &PageState) -> Self {
        let current = match page.current_hit() {
            Some(hit) => CycleLine::from_hit(hit, "Current"),
            None => {
                let number = page.last_spin();
                let label = CycleText {
                    cycle: page.cycle_count(),
                    number,
                    position: None,
                    prefix: "Current",
                }
                .to_string();
                CycleLine {
                    cycle: page.cycle_count(),
                    number,
                    previous_position: None,
                    label,
                }
            }
        };
        let last = page
            .recent_hits()
            .enumerate()
            .map(|(i, hit)| CycleLine::from_hit(hit, &format!("Last {}", i + 1)))
            .collect();
        Self { current, last }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PublicPage {
    /// Oldest first.
    pub history: Vec<Spin>,
    pub history_text: String,
    pub unique_ranking: Vec<Spin>,
    pub unique_grid: UniqueGrid,
    pub unique_limit: u8,
    pub cycle_count: u32,
    pub current_hit: Option<HitEvent>,
    /// Oldest first.
    pub hit_history: Vec<HitEvent>,
    pub cycle_summary: CycleSummary,
}

impl PublicPage {
    pub fn from_page(page: &PageState) -> Self {
        Self {
            history: page.history().copied().collect(),
            history_text: page.history_text(),
            unique_ranking: page.unique_ranking().to_vec(),
            unique_grid: UniqueGrid::from_ranking(page.unique_ranking()),
            unique_limit: page.unique_limit(),
            cycle_count: page.cycle_count(),
            current_hit: page.current_hit().copied(),
            hit_history: page.hit_history().copied().collect(),
            cycle_summary: CycleSummary::from_page(page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spin(n: i64) -> Spin {
        Spin::new(n).unwrap()
    }

    fn full_page() -> PageState {
        let mut page = PageState::new();
        for n in 0..=36 {
            page.record_spin(spin(n));
        }
        page
    }

    #[test]
    fn test_grid_layout_and_hot_slots() {
        let page = full_page();
        let grid = UniqueGrid::from_ranking(page.unique_ranking());
        assert_eq!(grid.rows.len(), 4);
        assert!(grid.rows.iter().all(|row| row.len() == 4));
        assert_eq!(grid.rows[0][0].number.value(), 36);
        assert_eq!(grid.rows[0][0].rank, 1);
        assert!(grid.rows[1][3].hot);
        assert!(!grid.rows[2][0].hot);
        assert_eq!(grid.rows[3][3].number.value(), 21);
    }

    #[test]
    fn test_grid_partial_rows() {
        let ranking: Vec<Spin> = [9, 8, 7, 6, 5].into_iter().map(spin).collect();
        let grid = UniqueGrid::from_ranking(&ranking);
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[1].len(), 1);
        assert!(UniqueGrid::from_ranking(&[]).rows.is_empty());
    }

    #[test]
    fn test_cycle_summary_labels() {
        let mut page = PageState::new();
        assert_eq!(CycleSummary::from_page(&page).current.label, "Current: C0(-)");

        page.record_spin(spin(4));
        assert_eq!(CycleSummary::from_page(&page).current.label, "Current: C1(4)");

        let mut page = full_page();
        page.record_spin(spin(36));
        let summary = CycleSummary::from_page(&page);
        assert_eq!(summary.current.label, "Current: C38(36, S1)");
        assert!(summary.last.is_empty());

        page.record_spin(spin(5));
        page.record_spin(spin(34));
        page.record_spin(spin(6));
        let summary = CycleSummary::from_page(&page);
        assert_eq!(summary.current.label, "Current: C1(6)");
        assert_eq!(summary.last.len(), 2);
        assert_eq!(summary.last[0].label, "Last 1: C2(34, S3)");
        assert_eq!(summary.last[1].label, "Last 2: C38(36, S1)");
    }

    #[test]
    fn test_public_page_snapshot() {
        let mut page = PageState::new();
        page.replace_history(&[3, 1, 4]);
        let public = page.to_public();
        assert_eq!(public.history_text, "3, 1, 4");
        assert_eq!(public.cycle_count, 1);
        assert_eq!(public.unique_limit, 16);
        assert!(public.unique_ranking.is_empty());
        assert!(public.current_hit.is_none());
    }
}
