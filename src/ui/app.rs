use chrono::{Datelike, Local, Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::ledger::Ledger;
use crate::models::IncomeRecord;
use crate::report;
use crate::report::calendar::{self, DayBucket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Records,
    Summary,
    Calendar,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Records, Self::Summary, Self::Calendar]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Records => write!(f, "Records"),
            Self::Summary => write!(f, "Summary"),
            Self::Calendar => write!(f, "Calendar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Insert,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Insert => write!(f, "INSERT"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Amount,
    Remark,
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteRecord { id: u64, line: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Records, most-recent-first view of the store
    pub(crate) records: Vec<IncomeRecord>,
    pub(crate) record_index: usize,
    pub(crate) record_scroll: usize,

    // Insert form
    pub(crate) form_amount: String,
    pub(crate) form_remark: String,
    pub(crate) form_field: FormField,

    // Summary
    pub(crate) summary: Vec<(String, Decimal)>,

    // Calendar
    pub(crate) cal_year: i32,
    pub(crate) cal_month: u32,
    pub(crate) cal_day: u32,
    pub(crate) cal_grid: Vec<[u32; 7]>,
    pub(crate) buckets: HashMap<String, DayBucket>,
    pub(crate) selected_day: Option<String>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let today = Local::now();

        Self {
            running: true,
            screen: Screen::Records,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            records: Vec::new(),
            record_index: 0,
            record_scroll: 0,

            form_amount: String::new(),
            form_remark: String::new(),
            form_field: FormField::Amount,

            summary: Vec::new(),

            cal_year: today.year(),
            cal_month: today.month(),
            cal_day: today.day(),
            cal_grid: Vec::new(),
            buckets: HashMap::new(),
            selected_day: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_records(&mut self, ledger: &Ledger) {
        self.records = ledger.records().iter().rev().cloned().collect();
        if self.records.is_empty() {
            self.record_index = 0;
            self.record_scroll = 0;
        } else if self.record_index >= self.records.len() {
            self.record_index = self.records.len() - 1;
        }
    }

    pub(crate) fn refresh_summary(&mut self, ledger: &Ledger) {
        self.summary = report::remark_summary(ledger.records());
    }

    pub(crate) fn refresh_calendar(&mut self, ledger: &Ledger) {
        self.cal_grid = calendar::month_grid(self.cal_year, self.cal_month);
        self.buckets = calendar::day_buckets(ledger.records());
        let days = calendar::days_in_month(self.cal_year, self.cal_month);
        if days > 0 {
            self.cal_day = self.cal_day.clamp(1, days);
        }
    }

    pub(crate) fn refresh_all(&mut self, ledger: &Ledger) {
        self.refresh_records(ledger);
        self.refresh_summary(ledger);
        self.refresh_calendar(ledger);
    }

    /// Open the insert form on the Records screen with empty inputs.
    pub(crate) fn open_form(&mut self) {
        self.form_amount.clear();
        self.form_remark.clear();
        self.form_field = FormField::Amount;
        self.screen = Screen::Records;
        self.input_mode = InputMode::Insert;
    }

    pub(crate) fn selected_record(&self) -> Option<&IncomeRecord> {
        self.records.get(self.record_index)
    }

    /// Day key under the calendar cursor.
    pub(crate) fn cursor_day_key(&self) -> String {
        calendar::day_key_for(self.cal_year, self.cal_month, self.cal_day)
    }

    /// Move the calendar cursor by `delta` days, staying inside the
    /// current month.
    pub(crate) fn move_cal_day(&mut self, delta: i32) {
        let days = calendar::days_in_month(self.cal_year, self.cal_month) as i32;
        if days == 0 {
            return;
        }
        let target = self.cal_day as i32 + delta;
        self.cal_day = target.clamp(1, days) as u32;
    }

    /// Step the calendar month, staying inside the selectable year
    /// window. The caller refreshes the grid afterwards.
    pub(crate) fn move_cal_month(&mut self, delta: i32) {
        let base = match NaiveDate::from_ymd_opt(self.cal_year, self.cal_month, 1) {
            Some(d) => d,
            None => return,
        };
        let next = if delta > 0 {
            base.checked_add_months(Months::new(1))
        } else {
            base.checked_sub_months(Months::new(1))
        };
        if let Some(d) = next {
            if calendar::year_range().contains(&d.year()) {
                self.cal_year = d.year();
                self.cal_month = d.month();
                self.selected_day = None;
            }
        }
    }

    /// Step the calendar year, staying inside the selectable window.
    pub(crate) fn move_cal_year(&mut self, delta: i32) {
        let target = self.cal_year + delta;
        if calendar::year_range().contains(&target) {
            self.cal_year = target;
            self.selected_day = None;
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
