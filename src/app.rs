//! Root application component
//!
//! The App struct is the composition root: it constructs every service and
//! component at startup, routes events between them, and owns the single
//! teardown path for the timers and worker threads it created. App stays
//! lean - it coordinates, the models and services do the work.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, FormDialog, HelpDialog, HomeComponent, HomeRenderContext,
};
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::model::alert::{AlertKind, AlertStack};
use crate::model::domain::{Dataset, DomainState};
use crate::model::form::FieldValue;
use crate::model::modal::{Modal, ModalStack, PendingAction};
use crate::model::theme::Theme;
use crate::services::export::{align_rows, parse_export};
use crate::services::monitor::SLOW_LOAD;
use crate::services::{
    Binding, ClipboardService, ConnectivityEvent, ConnectivityMonitor, FetchRunner, JobKind,
    JobOutcome, RefreshScheduler, StartupTimer,
};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::Duration;

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
const PROBE_INTERVAL: Duration = Duration::from_secs(10);

const MSG_SERVER_ERROR: &str = "حدث خطأ في الاتصال بالخادم";
const MSG_COPIED: &str = "تم النسخ إلى الحافظة";
const MSG_COPY_FAILED: &str = "فشل في النسخ";
const MSG_ONLINE: &str = "تم استعادة الاتصال بالإنترنت";
const MSG_OFFLINE: &str = "تم فقدان الاتصال بالإنترنت";
const MSG_SAVED: &str = "تم الحفظ بنجاح";
const MSG_DELETED: &str = "تم حذف السجل";

/// Main application state - coordinates between components and services
pub struct App {
    pub config: Config,
    pub theme: Theme,
    /// Active dashboard tab
    pub tab: Dataset,

    /// Domain state (table data per dataset)
    pub domain: DomainState,
    /// Modal overlay stack
    pub modals: ModalStack,
    /// Live alert banners
    pub alerts: AlertStack,

    /// Background command runner
    pub fetcher: FetchRunner,
    /// Auto-refresh timers
    pub refresh: RefreshScheduler,
    /// Backend reachability probe
    pub connectivity: ConnectivityMonitor,
    /// System clipboard, when available
    pub clipboard: Binding<ClipboardService>,
    /// Time-to-first-load reporter
    pub startup: StartupTimer,
    /// Debounced (dataset, query) pairs from search input
    pub search_debounce: Debouncer<(Dataset, String)>,

    /// Whether the terminal currently has focus; auto-refresh reloads are
    /// skipped while it does not
    pub focused: bool,
    /// Last observed backend state
    pub online: Option<bool>,
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub form_dialog: FormDialog,
    pub confirm_dialog: ConfirmDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Build the app and all of its services from the loaded config
    pub fn new(config: Config) -> App {
        let theme = config.theme;

        let mut refresh = RefreshScheduler::new();
        for dataset in Dataset::all() {
            let interval = config
                .auto_refresh_ms
                .get(dataset.slug())
                .map(|ms| Duration::from_millis(*ms));
            refresh.register(dataset, interval);
        }

        let connectivity = ConnectivityMonitor::spawn(config.backend_addr.clone(), PROBE_INTERVAL);

        App {
            theme,
            tab: Dataset::Stores,
            domain: DomainState::new(),
            modals: ModalStack::new(),
            alerts: AlertStack::new(),
            fetcher: FetchRunner::new(),
            refresh,
            connectivity,
            clipboard: ClipboardService::bind(),
            startup: StartupTimer::new(),
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE),
            focused: true,
            online: None,
            should_quit: false,
            home: HomeComponent::default(),
            form_dialog: FormDialog::default(),
            confirm_dialog: ConfirmDialog,
            help_dialog: HelpDialog::default(),
            config,
        }
    }

    /// Kick off the initial data load
    pub fn init(&mut self) -> Result<()> {
        self.spawn_fetch_all();
        Ok(())
    }

    /// Tear down every timer and in-flight job this app created
    pub fn shutdown(&mut self) {
        self.refresh.clear();
        self.fetcher.clear();
        self.search_debounce.cancel();
        self.should_quit = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Handling
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+Enter submits the open form through its submit control, so
        // validation still runs
        if key.code == KeyCode::Enter
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(self.modals.top(), Some(Modal::RecordForm { .. }))
        {
            return Ok(Some(Action::SubmitForm));
        }

        // only the top modal receives input
        if let Some(modal) = self.modals.top() {
            return match modal {
                Modal::Help => self.help_dialog.handle_key_event(key),
                Modal::Confirm { .. } => self.confirm_dialog.handle_key_event(key),
                Modal::RecordForm { form, .. } => {
                    Ok(self.form_dialog.handle_key_event(key, form))
                }
            };
        }

        // search mode captures printable keys before the global shortcuts
        if self.home.table(self.tab).search_mode {
            return Ok(self.home.handle_key_event(key, self.tab));
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('x') => Some(Action::DismissAlert),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            _ => self.home.handle_key_event(key, self.tab),
        };
        Ok(action)
    }

    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // table components track search input state alongside the app
        self.home.update(self.tab, &action);

        match action {
            Action::Tick => self.on_tick(),
            Action::Resize(_, _) => {}
            Action::FocusGained => self.focused = true,
            Action::FocusLost => self.focused = false,
            Action::Quit => self.shutdown(),

            Action::NextRow => self.domain.table_mut(self.tab).select_next(),
            Action::PrevRow => self.domain.table_mut(self.tab).select_prev(),
            Action::FirstRow => self.domain.table_mut(self.tab).select_first(),
            Action::LastRow => self.domain.table_mut(self.tab).select_last(),
            Action::PageDown => self.domain.table_mut(self.tab).select_page_down(10),
            Action::PageUp => self.domain.table_mut(self.tab).select_page_up(10),
            Action::NextColumn => self.domain.table_mut(self.tab).next_column(),
            Action::PrevColumn => self.domain.table_mut(self.tab).prev_column(),
            Action::NextTab => self.tab = self.tab.next(),
            Action::PrevTab => self.tab = self.tab.prev(),

            Action::EnterSearchMode | Action::ExitSearchMode => {}
            Action::SearchInput(_) | Action::SearchBackspace => {
                let query = self.home.table(self.tab).search_buffer.clone();
                self.search_debounce.call((self.tab, query));
            }

            Action::SortColumn => {
                self.domain.table_mut(self.tab).sort_selected_column();
                self.home.table_mut(self.tab).scroll_to(0, 0);
            }
            Action::CopyRow => self.copy_selected_row(),

            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenNewRecordForm => self.open_record_form(false),
            Action::OpenEditRecordForm => self.open_record_form(true),
            Action::OpenConfirmDelete => self.open_confirm_delete(),
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => self.confirm_pending_action(),

            Action::FormInput(c) => self.with_open_form(|form| form.input_char(c)),
            Action::FormBackspace => self.with_open_form(|form| form.backspace()),
            Action::FormNextField => self.with_open_form(|form| form.focus_next()),
            Action::FormPrevField => self.with_open_form(|form| form.focus_prev()),
            Action::FormToggle => self.with_open_form(|form| form.toggle()),
            Action::SubmitForm => self.submit_form(),

            Action::ToggleTheme => self.toggle_theme(),
            Action::Refresh => self.spawn_fetch_all(),
            Action::DismissAlert => {
                self.alerts.dismiss_newest();
            }
        }
        Ok(None)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Tick
    // ─────────────────────────────────────────────────────────────────────────

    fn on_tick(&mut self) {
        self.alerts.expire();
        self.form_dialog.on_tick();

        // debounced search: apply the latest query once input quiesced
        if let Some((dataset, query)) = self.search_debounce.poll() {
            self.domain.table_mut(dataset).apply_filter(&query);
        }

        let outcomes = self.fetcher.poll();
        for outcome in outcomes {
            self.handle_job_outcome(outcome);
        }

        while let Some(event) = self.connectivity.poll() {
            match event {
                ConnectivityEvent::Online => {
                    self.online = Some(true);
                    self.alerts.push(MSG_ONLINE, AlertKind::Success);
                    tracing::info!("backend reachable again");
                }
                ConnectivityEvent::Offline => {
                    self.online = Some(false);
                    self.alerts.push(MSG_OFFLINE, AlertKind::Warning);
                    tracing::warn!("backend unreachable");
                }
            }
        }

        // auto-refresh fires only while the terminal is visible; the timer
        // itself keeps running either way
        for dataset in self.refresh.due() {
            if self.focused && !self.fetcher.is_dataset_busy(dataset) {
                self.spawn_fetch(dataset);
            }
        }
    }

    fn handle_job_outcome(&mut self, outcome: JobOutcome) {
        match (outcome.kind, outcome.result) {
            (JobKind::Fetch(dataset), Ok(raw)) => match parse_export(&raw) {
                Ok((_, rows)) => {
                    let columns = self.domain.table(dataset).columns.len();
                    self.domain
                        .table_mut(dataset)
                        .set_rows(align_rows(rows, columns));
                    self.domain.mark_loaded(dataset);
                    self.domain.last_refresh = Some(Local::now().naive_local());
                    tracing::debug!(
                        dataset = dataset.slug(),
                        elapsed_ms = outcome.elapsed.as_millis() as u64,
                        "fetch completed"
                    );
                    self.report_startup_once();
                }
                Err(e) => {
                    tracing::error!(dataset = dataset.slug(), "bad export output: {e:#}");
                    self.alerts.push(MSG_SERVER_ERROR, AlertKind::Error);
                }
            },
            (JobKind::Fetch(dataset), Err(e)) => {
                tracing::error!(dataset = dataset.slug(), "fetch failed: {e}");
                self.alerts.push(MSG_SERVER_ERROR, AlertKind::Error);
            }
            (JobKind::Save(dataset), Ok(_)) => {
                // hiding is a no-op when the user already closed the form
                if let Some(id) = dataset.form_id() {
                    self.modals.hide(id);
                }
                self.alerts.push(MSG_SAVED, AlertKind::Success);
                self.spawn_fetch(dataset);
            }
            (JobKind::Save(dataset), Err(e)) => {
                if let Some(Modal::RecordForm { form, .. }) = dataset
                    .form_id()
                    .and_then(|id| self.modals.find_mut(id))
                {
                    form.finish_submit();
                }
                tracing::error!(dataset = dataset.slug(), "save failed: {e}");
                self.alerts.push(MSG_SERVER_ERROR, AlertKind::Error);
            }
            (JobKind::Delete(dataset), Ok(_)) => {
                self.alerts.push(MSG_DELETED, AlertKind::Success);
                self.spawn_fetch(dataset);
            }
            (JobKind::Delete(dataset), Err(e)) => {
                tracing::error!(dataset = dataset.slug(), "delete failed: {e}");
                self.alerts.push(MSG_SERVER_ERROR, AlertKind::Error);
            }
        }
    }

    /// Log the time to the first complete load, once; warn when slow
    fn report_startup_once(&mut self) {
        if !self.domain.all_loaded() {
            return;
        }
        if let Some(elapsed) = self.startup.report() {
            let elapsed_ms = elapsed.as_millis() as u64;
            tracing::info!(elapsed_ms, "dashboard loaded");
            if elapsed > SLOW_LOAD {
                tracing::warn!(elapsed_ms, "slow dashboard load");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modals & Forms
    // ─────────────────────────────────────────────────────────────────────────

    /// Show the record form for a dataset, optionally populated from a
    /// data mapping; datasets without a form degrade to a no-op
    fn show_record_form(&mut self, dataset: Dataset, data: &[(String, FieldValue)]) {
        let Some(mut form) = dataset.form() else {
            return;
        };
        if !data.is_empty() {
            form.fill(data);
        }
        self.modals.push(Modal::RecordForm { dataset, form });
    }

    fn open_record_form(&mut self, populate: bool) {
        let data = if populate {
            let Some(row) = self.domain.table(self.tab).selected_row() else {
                return;
            };
            self.tab
                .form_population()
                .iter()
                .filter_map(|(cell, name)| {
                    row.cells
                        .get(*cell)
                        .map(|value| (name.to_string(), FieldValue::Text(value.clone())))
                })
                .collect()
        } else {
            Vec::new()
        };
        self.show_record_form(self.tab, &data);
    }

    fn open_confirm_delete(&mut self) {
        let Some(row) = self.domain.table(self.tab).selected_row() else {
            return;
        };
        let record_id = row.cells.first().cloned().unwrap_or_default();
        self.modals.push(Modal::Confirm {
            action: PendingAction::DeleteRecord {
                dataset: self.tab,
                record_id,
            },
        });
    }

    /// Run the action waiting behind the confirmation gate
    fn confirm_pending_action(&mut self) {
        match self.modals.pop() {
            Some(Modal::Confirm {
                action: PendingAction::DeleteRecord { dataset, record_id },
            }) => {
                let command = format!(
                    "{} {} {}",
                    self.config.commands.delete,
                    dataset.slug(),
                    shell_quote(&record_id)
                );
                self.fetcher.spawn(JobKind::Delete(dataset), &command);
            }
            Some(other) => self.modals.push(other),
            None => {}
        }
    }

    fn with_open_form(&mut self, f: impl FnOnce(&mut crate::model::form::FormModel)) {
        if let Some(Modal::RecordForm { form, .. }) = self.modals.top_mut() {
            if !form.submitting {
                f(form);
            }
        }
    }

    /// Validate and, when clean, hand the record to the save command
    fn submit_form(&mut self) {
        let Some(Modal::RecordForm { dataset, form }) = self.modals.top_mut() else {
            return;
        };
        if form.submitting || !form.validate_all() {
            return;
        }
        form.start_submit();
        let dataset = *dataset;
        let payload = form.payload().to_string();

        let command = format!(
            "{} {} {}",
            self.config.commands.save,
            dataset.slug(),
            shell_quote(&payload)
        );
        self.fetcher.spawn(JobKind::Save(dataset), &command);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard Actions
    // ─────────────────────────────────────────────────────────────────────────

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.config.theme = self.theme;
        if let Err(e) = self.config.save() {
            tracing::warn!("failed to persist theme: {e}");
        }
    }

    fn copy_selected_row(&mut self) {
        let Some(row) = self.domain.table(self.tab).selected_row() else {
            return;
        };
        let text = row.cells.join("\t");

        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.copy(&text) {
                Ok(()) => {
                    self.alerts.push(MSG_COPIED, AlertKind::Success);
                }
                Err(e) => {
                    tracing::warn!("clipboard copy failed: {e}");
                    self.alerts.push(MSG_COPY_FAILED, AlertKind::Error);
                }
            },
            None => {
                self.alerts.push(MSG_COPY_FAILED, AlertKind::Error);
            }
        }
    }

    fn fetch_command(&self, dataset: Dataset) -> &str {
        match dataset {
            Dataset::Stores => &self.config.commands.stores,
            Dataset::Products => &self.config.commands.products,
            Dataset::Orders => &self.config.commands.orders,
        }
    }

    fn spawn_fetch(&mut self, dataset: Dataset) {
        let command = self.fetch_command(dataset).to_string();
        self.fetcher.spawn(JobKind::Fetch(dataset), &command);
    }

    fn spawn_fetch_all(&mut self) {
        for dataset in Dataset::all() {
            self.spawn_fetch(dataset);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let palette = self.theme.palette();

        let ctx = HomeRenderContext {
            dataset: self.tab,
            domain: &self.domain,
            theme: self.theme,
            alerts: &self.alerts,
            loading: self.fetcher.is_running(JobKind::Fetch(self.tab)),
            online: self.online,
        };
        draw_home_screen(frame, area, &mut self.home, &ctx, &palette);

        // modals render bottom to top
        for modal in self.modals.iter() {
            match modal {
                Modal::Help => self.help_dialog.draw(frame, area, &palette)?,
                Modal::Confirm { .. } => self.confirm_dialog.draw(frame, area, &palette)?,
                Modal::RecordForm { form, .. } => {
                    self.form_dialog.draw(frame, area, form, &palette)
                }
            }
        }

        Ok(())
    }
}

/// Single-quote a value for the shell
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form::MSG_REQUIRED;
    use std::thread;

    fn test_app() -> App {
        let mut config = Config::default();
        // keep tests off the network and the real backend commands
        config.backend_addr = "127.0.0.1:1".to_string();
        config.commands.delete = "true".to_string();
        config.commands.save = "true".to_string();
        App::new(config)
    }

    fn store_rows() -> Vec<Vec<String>> {
        vec![
            vec![
                "1".into(),
                "متجر النيل".into(),
                "0912345678".into(),
                "الخرطوم".into(),
                "2026-01-10".into(),
                "true".into(),
            ],
            vec![
                "2".into(),
                "متجر البحر".into(),
                "0911111111".into(),
                "بورتسودان".into(),
                "2026-02-20".into(),
                "false".into(),
            ],
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_theme_toggle_flips_and_updates_config() {
        let mut app = test_app();
        assert_eq!(app.theme, Theme::Light);
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.config.theme, Theme::Dark);
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Light);
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = test_app();
        app.update(Action::NextTab).unwrap();
        assert_eq!(app.tab, Dataset::Products);
        app.update(Action::PrevTab).unwrap();
        assert_eq!(app.tab, Dataset::Stores);
    }

    #[test]
    fn test_search_filter_applies_after_debounce() {
        let mut app = test_app();
        app.domain.table_mut(Dataset::Stores).set_rows(store_rows());

        app.update(Action::EnterSearchMode).unwrap();
        for c in "النيل".chars() {
            app.update(Action::SearchInput(c)).unwrap();
        }

        // the filter waits for the debounce window
        app.update(Action::Tick).unwrap();
        assert_eq!(app.domain.table(Dataset::Stores).visible_count(), 2);

        thread::sleep(SEARCH_DEBOUNCE + Duration::from_millis(50));
        app.update(Action::Tick).unwrap();
        assert_eq!(app.domain.table(Dataset::Stores).visible_count(), 1);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = test_app();
        app.domain.table_mut(Dataset::Stores).set_rows(store_rows());

        app.update(Action::OpenConfirmDelete).unwrap();
        assert!(matches!(app.modals.top(), Some(Modal::Confirm { .. })));

        // cancelling aborts with no side effects
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(!app.fetcher.is_dataset_busy(Dataset::Stores));

        app.update(Action::OpenConfirmDelete).unwrap();
        app.update(Action::ConfirmModal).unwrap();
        assert!(app.modals.is_empty());
        assert!(app.fetcher.is_dataset_busy(Dataset::Stores));
        app.shutdown();
    }

    #[test]
    fn test_edit_form_is_populated_from_selected_row() {
        let mut app = test_app();
        app.domain.table_mut(Dataset::Stores).set_rows(store_rows());

        app.update(Action::OpenEditRecordForm).unwrap();
        let Some(Modal::RecordForm { form, .. }) = app.modals.top() else {
            panic!("expected record form");
        };
        assert_eq!(form.fields[0].value, "متجر النيل");
        assert_eq!(form.fields[1].value, "0912345678");
        assert!(form.fields[3].checked);
    }

    #[test]
    fn test_invalid_form_blocks_submission() {
        let mut app = test_app();
        app.update(Action::OpenNewRecordForm).unwrap();
        app.update(Action::SubmitForm).unwrap();

        let Some(Modal::RecordForm { form, .. }) = app.modals.top() else {
            panic!("expected record form");
        };
        assert!(!form.submitting);
        assert!(form.was_validated);
        // required name field is first invalid and takes focus
        assert_eq!(form.focused, 0);
        assert_eq!(form.fields[0].error.as_deref(), Some(MSG_REQUIRED));
    }

    #[test]
    fn test_valid_form_enters_loading_state() {
        let mut app = test_app();
        app.update(Action::OpenNewRecordForm).unwrap();
        for c in "متجر جديد".chars() {
            app.update(Action::FormInput(c)).unwrap();
        }
        app.update(Action::SubmitForm).unwrap();

        let Some(Modal::RecordForm { form, .. }) = app.modals.top() else {
            panic!("expected record form");
        };
        assert!(form.submitting);
        assert_eq!(form.submit_label, crate::model::form::LABEL_LOADING);
        assert!(app.fetcher.is_dataset_busy(Dataset::Stores));
        app.shutdown();
    }

    #[test]
    fn test_ctrl_enter_submits_open_form() {
        let mut app = test_app();
        app.update(Action::OpenNewRecordForm).unwrap();
        let ctrl_enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL);
        assert_eq!(
            app.handle_key_event(ctrl_enter).unwrap(),
            Some(Action::SubmitForm)
        );
    }

    #[test]
    fn test_escape_closes_top_modal() {
        let mut app = test_app();
        app.update(Action::OpenHelp).unwrap();
        let action = app.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));
        app.update(Action::CloseModal).unwrap();
        assert!(app.modals.is_empty());

        // no modal open: escape is a no-op
        assert_eq!(app.handle_key_event(key(KeyCode::Esc)).unwrap(), None);
    }

    #[test]
    fn test_orders_tab_has_no_record_form() {
        let mut app = test_app();
        app.tab = Dataset::Orders;
        app.update(Action::OpenNewRecordForm).unwrap();
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_quit_tears_down_timers() {
        let mut app = test_app();
        app.update(Action::Quit).unwrap();
        assert!(app.should_quit);
        assert!(app.refresh.is_empty());
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("ab"), "'ab'");
        assert_eq!(shell_quote("a'b"), "'a'\\''b'");
    }
}
