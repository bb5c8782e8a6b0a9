//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for timers and background polling
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Terminal gained focus
    FocusGained,
    /// Terminal lost focus
    FocusLost,
    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next table row
    NextRow,
    /// Move to previous table row
    PrevRow,
    /// Jump to first row
    FirstRow,
    /// Jump to last row
    LastRow,
    /// Move column selection right
    NextColumn,
    /// Move column selection left
    PrevColumn,
    /// Move to next dashboard tab
    NextTab,
    /// Move to previous dashboard tab
    PrevTab,
    /// Scroll down one page
    PageDown,
    /// Scroll up one page
    PageUp,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode for the active table
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    /// Sort the active table by the selected column
    SortColumn,
    /// Copy the selected row to the clipboard
    CopyRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Open an empty record form for the active tab
    OpenNewRecordForm,
    /// Open the record form populated from the selected row
    OpenEditRecordForm,
    /// Open the delete confirmation dialog for the selected row
    OpenConfirmDelete,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────────
    /// Add character to the focused form field
    FormInput(char),
    /// Remove last character from the focused form field
    FormBackspace,
    /// Move focus to the next form field
    FormNextField,
    /// Move focus to the previous form field
    FormPrevField,
    /// Toggle the focused checkbox field
    FormToggle,
    /// Submit the form through its submit control
    SubmitForm,

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard
    // ─────────────────────────────────────────────────────────────────────────
    /// Flip between light and dark theme and persist the choice
    ToggleTheme,
    /// Re-run the data fetch for every panel
    Refresh,
    /// Dismiss the newest alert banner
    DismissAlert,
}
