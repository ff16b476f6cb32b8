//! Constants for the interactive TUI module.

// Timing constants
/// Message auto-clear delay in milliseconds
pub const MESSAGE_CLEAR_DELAY_MS: u64 = 3000;

/// Event polling interval in milliseconds
pub const EVENT_POLL_INTERVAL_MS: u64 = 50;

/// Double Ctrl+C timeout in seconds
pub const DOUBLE_CTRL_C_TIMEOUT_SECS: u64 = 1;

// UI Layout constants
/// Height of the search bar component
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Lines scrolled by PageUp/PageDown in the result list
pub const RESULT_PAGE_LINES: usize = 10;

// Help dialog dimensions
/// Maximum width for help dialog
pub const HELP_DIALOG_MAX_WIDTH: u16 = 72;

/// Minimum margin around help dialog
pub const HELP_DIALOG_MARGIN: u16 = 4;
