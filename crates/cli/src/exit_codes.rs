//! CLI Exit Code Registry
//!
//! Single source of truth for the `mixxtools` exit codes. Exit codes are
//! part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, bad config)   |
//! | 3-9     | fix-paths | Reconciliation codes                     |
//! | 10-19   | export    | Rekordbox export codes                   |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unreadable or invalid config.
pub const EXIT_USAGE: u8 = 2;

/// The operator declined the "did you refresh the player library" check.
pub const EXIT_RECON_ABORTED: u8 = 3;

/// The operator rejected the echoed export settings.
pub const EXIT_EXPORT_ABORTED: u8 = 10;

/// The operator would not vouch for the bar-start hot cues being on grid.
pub const EXIT_GRID_UNCONFIRMED: u8 = 11;
