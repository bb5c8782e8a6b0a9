//! Client-side table state: search and sort
//!
//! Rows are mutated in place: search toggles visibility, sort reorders the
//! whole row set. No copy is retained, so repeated operations recompute
//! from current state. Rows are never created or destroyed here.

use crate::collate;
use crate::format::parse_date;
use std::cmp::Ordering;

/// Comparison mode for a sortable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Number,
    Date,
    Text,
}

/// How a column's cells are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellDisplay {
    #[default]
    Plain,
    Currency,
    Date,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    /// `Some` marks the column sortable with the given comparison mode
    pub sort: Option<SortKind>,
    pub display: CellDisplay,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sort: None,
            display: CellDisplay::Plain,
        }
    }

    pub fn sortable(mut self, kind: SortKind) -> Self {
        self.sort = Some(kind);
        self
    }

    pub fn display(mut self, display: CellDisplay) -> Self {
        self.display = display;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<String>,
    pub visible: bool,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            visible: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableModel {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Current search query; empty shows all rows
    pub query: String,
    /// Selection index among visible rows
    pub selected: usize,
    pub selected_col: usize,
    /// Column the rows are currently ordered by, for the header marker
    pub sorted_by: Option<usize>,
}

impl TableModel {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            query: String::new(),
            selected: 0,
            selected_col: 0,
            sorted_by: None,
        }
    }

    /// Replace the row set with freshly fetched data
    ///
    /// The search query survives a refresh and is re-applied; the sort
    /// order does not (fresh data arrives in backend order).
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows.into_iter().map(Row::new).collect();
        self.sorted_by = None;
        let query = self.query.clone();
        self.apply_filter(&query);
    }

    /// Hide every row whose concatenated cell text does not contain the
    /// query, case-insensitively. An empty query shows all rows.
    pub fn apply_filter(&mut self, query: &str) {
        self.query = query.to_string();
        let needle = query.to_lowercase();
        for row in &mut self.rows {
            row.visible =
                needle.is_empty() || row.cells.join(" ").to_lowercase().contains(&needle);
        }
        self.clamp_selection();
    }

    /// Reorder all rows ascending by the given column
    ///
    /// Unparseable numeric/date cells order after every parseable one; the
    /// sort is stable, so ties keep their current relative order. A column
    /// without a sort kind is left untouched.
    pub fn sort_by_column(&mut self, col: usize) {
        let Some(kind) = self.columns.get(col).and_then(|c| c.sort) else {
            return;
        };

        self.rows.sort_by(|a, b| {
            let left = a.cells.get(col).map(|s| s.trim()).unwrap_or("");
            let right = b.cells.get(col).map(|s| s.trim()).unwrap_or("");
            match kind {
                SortKind::Number => cmp_parsed(
                    left.parse::<f64>().ok(),
                    right.parse::<f64>().ok(),
                    f64::total_cmp,
                ),
                SortKind::Date => cmp_parsed(parse_date(left), parse_date(right), |a, b| a.cmp(b)),
                SortKind::Text => collate::compare(left, right),
            }
        });
        self.sorted_by = Some(col);
        self.selected = 0;
    }

    /// Sort by the currently selected column
    pub fn sort_selected_column(&mut self) {
        self.sort_by_column(self.selected_col);
    }

    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|r| r.visible)
    }

    /// The selected row, if any row is visible
    pub fn selected_row(&self) -> Option<&Row> {
        self.visible_rows().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        let count = self.visible_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_count().saturating_sub(1);
    }

    pub fn select_page_down(&mut self, page: usize) {
        let count = self.visible_count();
        if count > 0 {
            self.selected = (self.selected + page).min(count - 1);
        }
    }

    pub fn select_page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
    }

    pub fn next_column(&mut self) {
        if !self.columns.is_empty() {
            self.selected_col = (self.selected_col + 1) % self.columns.len();
        }
    }

    pub fn prev_column(&mut self) {
        if !self.columns.is_empty() {
            self.selected_col = if self.selected_col == 0 {
                self.columns.len() - 1
            } else {
                self.selected_col - 1
            };
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }
}

/// Order parsed values ascending, placing unparseable ones after every
/// parseable one. Equal keys report `Equal` so a stable sort keeps the
/// current relative order.
fn cmp_parsed<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(left), Some(right)) => cmp(&left, &right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
