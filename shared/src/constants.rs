pub const MIN_SPIN: u8 = 0;
pub const MAX_SPIN: u8 = 36;

pub const HISTORY_CAPACITY: usize = 37;
pub const HIT_HISTORY_CAPACITY: usize = 5;

pub const MIN_UNIQUE_LIMIT: u8 = 1;
pub const MAX_UNIQUE_LIMIT: u8 = 16;
pub const DEFAULT_UNIQUE_LIMIT: u8 = 16;

pub const PAGE_COUNT: usize = 5;

// Layout hints for the unique grid
pub const GRID_COLUMNS: usize = 4;
pub const HOT_SLOTS: usize = 8;

pub const INVALID_SPIN_ERROR: &str = "Please enter a number between 0 and 36";
pub const INVALID_PAGE_ERROR: &str = "Page does not exist";
