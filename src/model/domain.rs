//! Marketplace datasets shown on the dashboard
//!
//! Each dataset is one tab backed by a table; column sort kinds and the
//! record forms are fixed here, the rows come from the backend export
//! commands.

use crate::model::form::{Field, FieldKind, FormModel};
use crate::model::table::{CellDisplay, Column, SortKind, TableModel};
use chrono::NaiveDateTime;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Dataset {
    Stores,
    Products,
    Orders,
}

impl Dataset {
    pub fn all() -> [Dataset; 3] {
        [Dataset::Stores, Dataset::Products, Dataset::Orders]
    }

    /// Identifier used in config keys and command arguments
    pub fn slug(&self) -> &'static str {
        match self {
            Dataset::Stores => "stores",
            Dataset::Products => "products",
            Dataset::Orders => "orders",
        }
    }

    /// Tab title
    pub fn title(&self) -> &'static str {
        match self {
            Dataset::Stores => "المتاجر",
            Dataset::Products => "المنتجات",
            Dataset::Orders => "الطلبات",
        }
    }

    pub fn next(&self) -> Dataset {
        match self {
            Dataset::Stores => Dataset::Products,
            Dataset::Products => Dataset::Orders,
            Dataset::Orders => Dataset::Stores,
        }
    }

    pub fn prev(&self) -> Dataset {
        match self {
            Dataset::Stores => Dataset::Orders,
            Dataset::Products => Dataset::Stores,
            Dataset::Orders => Dataset::Products,
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        match self {
            Dataset::Stores => vec![
                Column::new("المعرف").sortable(SortKind::Number),
                Column::new("الاسم").sortable(SortKind::Text),
                Column::new("الهاتف"),
                Column::new("العنوان").sortable(SortKind::Text),
                Column::new("تاريخ الإنشاء")
                    .sortable(SortKind::Date)
                    .display(CellDisplay::Date),
                Column::new("نشط"),
            ],
            Dataset::Products => vec![
                Column::new("المعرف").sortable(SortKind::Number),
                Column::new("الاسم").sortable(SortKind::Text),
                Column::new("السعر")
                    .sortable(SortKind::Number)
                    .display(CellDisplay::Currency),
                Column::new("المتجر").sortable(SortKind::Text),
                Column::new("تاريخ الإضافة")
                    .sortable(SortKind::Date)
                    .display(CellDisplay::Date),
            ],
            Dataset::Orders => vec![
                Column::new("المعرف").sortable(SortKind::Number),
                Column::new("العميل").sortable(SortKind::Text),
                Column::new("الإجمالي")
                    .sortable(SortKind::Number)
                    .display(CellDisplay::Currency),
                Column::new("الحالة"),
                Column::new("التاريخ")
                    .sortable(SortKind::Date)
                    .display(CellDisplay::Date),
            ],
        }
    }

    /// Record form for this dataset; orders are read-only
    pub fn form(&self) -> Option<FormModel> {
        match self {
            Dataset::Stores => Some(FormModel::new(
                "store-form",
                "بيانات المتجر",
                vec![
                    Field::new("name", "اسم المتجر", FieldKind::Text).required(),
                    Field::new("phone", "رقم الهاتف", FieldKind::Telephone),
                    Field::new("address", "العنوان", FieldKind::Text),
                    Field::new("active", "نشط", FieldKind::Checkbox),
                ],
            )),
            Dataset::Products => Some(FormModel::new(
                "product-form",
                "بيانات المنتج",
                vec![
                    Field::new("name", "اسم المنتج", FieldKind::Text).required(),
                    Field::new("price", "السعر", FieldKind::Price),
                    Field::new("store", "المتجر", FieldKind::Text),
                    Field::new("featured", "منتج مميز", FieldKind::Checkbox),
                ],
            )),
            Dataset::Orders => None,
        }
    }

    /// Modal identifier of this dataset's record form
    pub fn form_id(&self) -> Option<&'static str> {
        match self {
            Dataset::Stores => Some("store-form"),
            Dataset::Products => Some("product-form"),
            Dataset::Orders => None,
        }
    }

    /// Mapping from row cell index to the form field it populates
    pub fn form_population(&self) -> &'static [(usize, &'static str)] {
        match self {
            Dataset::Stores => &[(1, "name"), (2, "phone"), (3, "address"), (5, "active")],
            Dataset::Products => &[(1, "name"), (2, "price"), (3, "store")],
            Dataset::Orders => &[],
        }
    }
}

/// Domain state: one table per dataset plus load bookkeeping
#[derive(Debug)]
pub struct DomainState {
    pub stores: TableModel,
    pub products: TableModel,
    pub orders: TableModel,
    loaded: BTreeSet<Dataset>,
    pub last_refresh: Option<NaiveDateTime>,
}

impl Default for DomainState {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainState {
    pub fn new() -> Self {
        Self {
            stores: TableModel::new(Dataset::Stores.columns()),
            products: TableModel::new(Dataset::Products.columns()),
            orders: TableModel::new(Dataset::Orders.columns()),
            loaded: BTreeSet::new(),
            last_refresh: None,
        }
    }

    pub fn table(&self, dataset: Dataset) -> &TableModel {
        match dataset {
            Dataset::Stores => &self.stores,
            Dataset::Products => &self.products,
            Dataset::Orders => &self.orders,
        }
    }

    pub fn table_mut(&mut self, dataset: Dataset) -> &mut TableModel {
        match dataset {
            Dataset::Stores => &mut self.stores,
            Dataset::Products => &mut self.products,
            Dataset::Orders => &mut self.orders,
        }
    }

    pub fn mark_loaded(&mut self, dataset: Dataset) {
        self.loaded.insert(dataset);
    }

    /// Whether every dataset has completed at least one load
    pub fn all_loaded(&self) -> bool {
        self.loaded.len() == Dataset::all().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_covers_all_datasets() {
        let mut dataset = Dataset::Stores;
        let mut seen = BTreeSet::new();
        for _ in 0..Dataset::all().len() {
            seen.insert(dataset);
            dataset = dataset.next();
        }
        assert_eq!(seen.len(), 3);
        assert_eq!(dataset, Dataset::Stores);
        assert_eq!(Dataset::Stores.prev(), Dataset::Orders);
    }

    #[test]
    fn test_price_column_is_numeric_currency() {
        let columns = Dataset::Products.columns();
        let price = columns.iter().find(|c| c.title == "السعر").unwrap();
        assert_eq!(price.sort, Some(SortKind::Number));
        assert_eq!(price.display, CellDisplay::Currency);
    }

    #[test]
    fn test_orders_have_no_form() {
        assert!(Dataset::Orders.form().is_none());
        assert!(Dataset::Stores.form().is_some());
        assert!(Dataset::Products.form().is_some());
    }

    #[test]
    fn test_all_loaded_requires_every_dataset() {
        let mut domain = DomainState::new();
        assert!(!domain.all_loaded());
        domain.mark_loaded(Dataset::Stores);
        domain.mark_loaded(Dataset::Products);
        assert!(!domain.all_loaded());
        domain.mark_loaded(Dataset::Orders);
        assert!(domain.all_loaded());
    }
}
