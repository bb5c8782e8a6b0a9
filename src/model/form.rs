//! Form state and validation
//!
//! A form is a list of typed fields plus a submit control, shown inside a
//! modal dialog. Submission runs every validator; failure blocks the submit
//! and moves focus to the first invalid field. After the first failed
//! submit the form is marked validated, and a field is re-checked whenever
//! focus leaves it.

use regex::Regex;
use std::sync::LazyLock;

/// Sudanese phone numbers: optional +249 or 0 prefix, then nine digits not
/// starting with zero. Checked after stripping whitespace.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+249|0)?[1-9]\d{8}$").unwrap());

pub const MSG_REQUIRED: &str = "هذا الحقل مطلوب";
pub const MSG_INVALID_PHONE: &str = "يرجى إدخال رقم هاتف صحيح (مثال: +249123456789)";
pub const MSG_INVALID_PRICE: &str = "السعر يجب أن يكون أكبر من أو يساوي الصفر";

/// Default submit control label
pub const LABEL_SAVE: &str = "حفظ";
/// Submit control label while the request is in flight
pub const LABEL_LOADING: &str = "جاري التحميل...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Telephone,
    Price,
    Checkbox,
}

/// A value supplied when populating a form from existing data
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Stable identifier, matched against population keys
    pub name: String,
    /// Label shown next to the input
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub error: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            value: String::new(),
            checked: false,
            required: false,
            error: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Check this field, recording the failure message if any
    pub fn validate(&mut self) -> bool {
        self.error = None;

        if self.required && self.kind != FieldKind::Checkbox && self.value.trim().is_empty() {
            self.error = Some(MSG_REQUIRED.to_string());
            return false;
        }

        match self.kind {
            FieldKind::Telephone => {
                let stripped: String = self.value.chars().filter(|c| !c.is_whitespace()).collect();
                // empty value is valid by omission
                if !stripped.is_empty() && !PHONE_RE.is_match(&stripped) {
                    self.error = Some(MSG_INVALID_PHONE.to_string());
                }
            }
            FieldKind::Price => {
                let trimmed = self.value.trim();
                if !trimmed.is_empty() {
                    match trimmed.parse::<f64>() {
                        Ok(price) if price >= 0.0 => {}
                        _ => self.error = Some(MSG_INVALID_PRICE.to_string()),
                    }
                }
            }
            FieldKind::Text | FieldKind::Checkbox => {}
        }

        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormModel {
    /// Modal identifier used for show/hide by id
    pub id: String,
    /// Dialog title
    pub title: String,
    pub fields: Vec<Field>,
    /// Focused control: a field index, or `fields.len()` for the submit
    /// control
    pub focused: usize,
    /// Set by the first submit attempt; enables re-checking on blur
    pub was_validated: bool,
    /// Whether the submit request is in flight
    pub submitting: bool,
    pub submit_label: String,
    cached_submit_label: Option<String>,
}

impl FormModel {
    pub fn new(id: impl Into<String>, title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields,
            focused: 0,
            was_validated: false,
            submitting: false,
            submit_label: LABEL_SAVE.to_string(),
            cached_submit_label: None,
        }
    }

    /// Index of the submit control in the focus order
    pub fn submit_index(&self) -> usize {
        self.fields.len()
    }

    pub fn focused_field(&self) -> Option<&Field> {
        self.fields.get(self.focused)
    }

    /// Move focus forward, re-checking the field being left when the form
    /// has already been through a failed submit
    pub fn focus_next(&mut self) {
        self.blur_current();
        self.focused = (self.focused + 1) % (self.fields.len() + 1);
    }

    pub fn focus_prev(&mut self) {
        self.blur_current();
        self.focused = if self.focused == 0 {
            self.fields.len()
        } else {
            self.focused - 1
        };
    }

    fn blur_current(&mut self) {
        if self.was_validated {
            if let Some(field) = self.fields.get_mut(self.focused) {
                field.validate();
            }
        }
    }

    /// Run every validator; on failure, block submission and focus the
    /// first invalid field. Returns whether the form may be submitted.
    pub fn validate_all(&mut self) -> bool {
        self.was_validated = true;
        let mut ok = true;
        for field in &mut self.fields {
            if !field.validate() {
                ok = false;
            }
        }
        if let Some(first_invalid) = self.first_invalid() {
            self.focused = first_invalid;
        }
        ok
    }

    pub fn first_invalid(&self) -> Option<usize> {
        self.fields.iter().position(|f| f.error.is_some())
    }

    /// Populate fields from a data mapping: checkbox-style controls get
    /// their checked state set, everything else its value. Keys without a
    /// matching field are ignored.
    pub fn fill(&mut self, data: &[(String, FieldValue)]) {
        for (key, value) in data {
            if let Some(field) = self.fields.iter_mut().find(|f| &f.name == key) {
                match (field.kind, value) {
                    (FieldKind::Checkbox, FieldValue::Checked(checked)) => {
                        field.checked = *checked;
                    }
                    (FieldKind::Checkbox, FieldValue::Text(text)) => {
                        field.checked = matches!(text.as_str(), "true" | "1" | "نعم");
                    }
                    (_, FieldValue::Text(text)) => field.value = text.clone(),
                    (_, FieldValue::Checked(checked)) => field.value = checked.to_string(),
                }
            }
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            if field.kind != FieldKind::Checkbox {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.value.pop();
        }
    }

    pub fn toggle(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused) {
            if field.kind == FieldKind::Checkbox {
                field.checked = !field.checked;
            }
        }
    }

    /// Enter the loading state: cache the submit label and replace it
    pub fn start_submit(&mut self) {
        if !self.submitting {
            self.cached_submit_label = Some(std::mem::replace(
                &mut self.submit_label,
                LABEL_LOADING.to_string(),
            ));
            self.submitting = true;
        }
    }

    /// Leave the loading state: restore the cached label
    pub fn finish_submit(&mut self) {
        if let Some(label) = self.cached_submit_label.take() {
            self.submit_label = label;
        }
        self.submitting = false;
    }

    /// Record payload handed to the save command
    pub fn payload(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for field in &self.fields {
            let value = match field.kind {
                FieldKind::Checkbox => serde_json::Value::Bool(field.checked),
                _ => serde_json::Value::String(field.value.clone()),
            };
            object.insert(field.name.clone(), value);
        }
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_field(value: &str) -> Field {
        let mut field = Field::new("phone", "رقم الهاتف", FieldKind::Telephone);
        field.value = value.to_string();
        field
    }

    fn price_field(value: &str) -> Field {
        let mut field = Field::new("price", "السعر", FieldKind::Price);
        field.value = value.to_string();
        field
    }

    #[test]
    fn test_phone_accepts_valid_shapes() {
        for value in ["+249123456789", "0912345678", "912345678"] {
            let mut field = phone_field(value);
            assert!(field.validate(), "{value} should be valid");
        }
    }

    #[test]
    fn test_phone_accepts_value_with_spaces() {
        let mut field = phone_field("+249 123 456 789");
        assert!(field.validate());
    }

    #[test]
    fn test_phone_rejects_other_values() {
        for value in ["12345", "+249012345678", "abc", "99123456789"] {
            let mut field = phone_field(value);
            assert!(!field.validate(), "{value} should be rejected");
            assert_eq!(field.error.as_deref(), Some(MSG_INVALID_PHONE));
        }
    }

    #[test]
    fn test_empty_phone_is_valid_by_omission() {
        let mut field = phone_field("");
        assert!(field.validate());
    }

    #[test]
    fn test_price_sign_rule() {
        assert!(price_field("0").validate());
        assert!(price_field("149.99").validate());

        let mut negative = price_field("-1");
        assert!(!negative.validate());
        assert_eq!(negative.error.as_deref(), Some(MSG_INVALID_PRICE));
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let mut field = price_field("مجانا");
        assert!(!field.validate());
    }

    #[test]
    fn test_required_field_rejects_empty() {
        let mut field = Field::new("name", "الاسم", FieldKind::Text).required();
        assert!(!field.validate());
        assert_eq!(field.error.as_deref(), Some(MSG_REQUIRED));

        field.value = "متجر الخرطوم".to_string();
        assert!(field.validate());
    }

    fn sample_form() -> FormModel {
        FormModel::new(
            "store-form",
            "متجر",
            vec![
                Field::new("name", "الاسم", FieldKind::Text).required(),
                Field::new("phone", "الهاتف", FieldKind::Telephone),
                Field::new("active", "نشط", FieldKind::Checkbox),
            ],
        )
    }

    #[test]
    fn test_failed_submit_focuses_first_invalid() {
        let mut form = sample_form();
        form.focused = 2;
        form.fields[1].value = "bad".to_string();

        assert!(!form.validate_all());
        // name (index 0) is the first invalid field
        assert_eq!(form.focused, 0);
        assert!(form.was_validated);
    }

    #[test]
    fn test_blur_revalidates_only_after_failed_submit() {
        let mut form = sample_form();
        form.fields[1].value = "bad".to_string();

        // before any submit, moving focus does not check
        form.focused = 1;
        form.focus_next();
        assert!(form.fields[1].error.is_none());

        form.validate_all();
        form.fields[1].value = "0912345678".to_string();
        form.focused = 1;
        form.focus_next();
        assert!(form.fields[1].error.is_none());

        form.fields[1].value = "bad again".to_string();
        form.focused = 1;
        form.focus_next();
        assert!(form.fields[1].error.is_some());
    }

    #[test]
    fn test_focus_wraps_through_submit_control() {
        let mut form = sample_form();
        form.focused = form.submit_index();
        form.focus_next();
        assert_eq!(form.focused, 0);
        form.focus_prev();
        assert_eq!(form.focused, form.submit_index());
    }

    #[test]
    fn test_fill_sets_values_and_checked_state() {
        let mut form = sample_form();
        form.fill(&[
            ("name".to_string(), FieldValue::Text("متجر أم درمان".to_string())),
            ("active".to_string(), FieldValue::Checked(true)),
            ("unknown".to_string(), FieldValue::Text("ignored".to_string())),
        ]);
        assert_eq!(form.fields[0].value, "متجر أم درمان");
        assert!(form.fields[2].checked);
    }

    #[test]
    fn test_submit_label_cached_and_restored() {
        let mut form = sample_form();
        form.start_submit();
        assert!(form.submitting);
        assert_eq!(form.submit_label, LABEL_LOADING);

        form.finish_submit();
        assert!(!form.submitting);
        assert_eq!(form.submit_label, LABEL_SAVE);
    }

    #[test]
    fn test_payload_carries_checkbox_as_bool() {
        let mut form = sample_form();
        form.fields[0].value = "متجر".to_string();
        form.fields[2].checked = true;
        let payload = form.payload();
        assert_eq!(payload["name"], "متجر");
        assert_eq!(payload["active"], true);
    }
}
