pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the fixed constants of the dashboard, organized by
    //! functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events between loaders and the UI.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // SPREADSHEET CONFIGURATION
    // =============================================================================

    /// Spreadsheets and sheet names used when no settings file overrides them.
    pub mod sheets {
        /// Spreadsheet holding the performance and history sheets.
        pub const RECORDS_SPREADSHEET_ID: &str = "1Qzzb5c26yWJdEpsSKXLgqcrwcxehmDhHBdldBETHKpY";

        /// Spreadsheet holding the credentials sheet and the per-user performance rows.
        pub const AUTH_SPREADSHEET_ID: &str = "1N2u0i7VDR4XRtNlb8_IulnUOCQO9Als5jLzo3ykEf9c";

        /// Credentials sheet.
        pub const MASTER_SHEET: &str = "Master";

        /// Per-employee performance sheet (ranking and login enrichment).
        pub const PERFORMANCE_SHEET: &str = "For Records";

        /// Full history sheet.
        pub const HISTORY_SHEET: &str = "Records";
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod network {
        use std::time::Duration;

        /// Connect timeout for every sheet request.
        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(10)
        }

        /// Total timeout for every sheet request.
        pub const fn request_timeout() -> Duration {
            Duration::from_secs(15)
        }

        /// Timeout for a single avatar candidate probe.
        pub const fn image_probe_timeout() -> Duration {
            Duration::from_secs(5)
        }
    }

    // =============================================================================
    // RANKING CONFIGURATION
    // =============================================================================

    pub mod ranking {
        /// Number of entries kept after ranking.
        pub const MAX_RANKED: usize = 5;

        /// Height of the first bar in the worst-performers chart.
        pub const BAR_TOP_HEIGHT: u64 = 100;

        /// Height lost by each following bar.
        pub const BAR_STEP: u64 = 15;

        /// Upper bound of the worst-performers y axis.
        pub const BAR_AXIS_MAX: u64 = 100;
    }

    // =============================================================================
    // SESSION STORAGE
    // =============================================================================

    pub mod storage {
        /// Key under which the signed-in user record is stored.
        pub const USER_KEY: &str = "user";

        /// Key under which the user's designation list is stored.
        pub const SELECTED_DESIGNATION_KEY: &str = "kpi_selected_designation";

        /// Directory (under $HOME) holding settings and storage.
        pub const APP_DIR: &str = ".kpi-dashboard";

        pub const SETTINGS_FILE: &str = "settings.json";

        pub const STORAGE_FILE: &str = "storage.json";
    }
}
