use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;

use super::field::{Field, FormLayout};
use super::phone::mask_input;
use super::rating::Rating;
use super::upload::{FileInfo, FileSelection, Rejection, SelectedFile, UploadLimits};
use super::validate::{self, Invalid};

/// What gets handed over when the form is submitted
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub comment: String,
    /// Hidden rating input value: empty or "1".."5"
    pub rating: String,
    pub files: Vec<String>,
    /// RFC 3339 timestamp
    pub submitted_at: String,
}

impl Submission {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Owns one form's interactive behavior: text values, phone mask, rating,
/// selected photos and validation state
#[derive(Debug)]
pub struct FormController {
    layout: FormLayout,
    limits: UploadLimits,
    values: BTreeMap<Field, String>,
    rating: Rating,
    files: FileSelection,
    /// Fields flagged by the last validation, with the first failed rule
    invalid: BTreeMap<Field, Invalid>,
    thank_you_visible: bool,
}

impl FormController {
    /// Bind to a form layout. No layout means there is no form to drive.
    pub fn attach(layout: Option<FormLayout>, limits: UploadLimits) -> Option<Self> {
        let layout = layout?;

        tracing::debug!(
            fields = layout.fields.len(),
            rating = layout.rating,
            upload = layout.upload,
            "form attached"
        );

        Some(Self {
            layout,
            limits,
            values: BTreeMap::new(),
            rating: Rating::new(),
            files: FileSelection::new(),
            invalid: BTreeMap::new(),
            thank_you_visible: false,
        })
    }

    pub fn layout(&self) -> &FormLayout {
        &self.layout
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    // ========== Text fields ==========

    /// Store what the user typed; the phone field goes through the mask
    pub fn on_input(&mut self, field: Field, raw: &str) {
        if !Field::TEXT.contains(&field) || !self.layout.has(field) {
            return;
        }

        let value = match field {
            Field::Phone => mask_input(raw),
            _ => raw.to_string(),
        };
        self.values.insert(field, value);
    }

    /// Current value of a text field, empty when never typed into
    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    // ========== Rating ==========

    pub fn rating(&self) -> &Rating {
        &self.rating
    }

    pub fn set_rating(&mut self, n: u8) {
        if self.layout.rating {
            self.rating.set_rating(n);
        }
    }

    pub fn highlight_stars(&mut self, n: u8) {
        if self.layout.rating {
            self.rating.highlight_stars(n);
        }
    }

    pub fn reset_highlight(&mut self) {
        self.rating.reset_highlight();
    }

    pub fn reset_rating(&mut self) {
        self.rating.reset_rating();
    }

    // ========== Photos ==========

    pub fn files(&self) -> &FileSelection {
        &self.files
    }

    /// Add picked files; returns the accepted entries and the rejections to alert about
    pub fn on_files_selected(&mut self, picked: Vec<FileInfo>) -> (Vec<SelectedFile>, Vec<Rejection>) {
        if !self.layout.upload {
            return (Vec::new(), Vec::new());
        }

        let (added, rejected) = self.files.on_files_selected(picked, &self.limits);
        for rejection in &rejected {
            tracing::info!("🚫 Rejected {}", rejection.name);
        }
        (added, rejected)
    }

    /// Remove the preview at `index` along with its file
    pub fn remove_file_preview(&mut self, index: usize) -> Option<SelectedFile> {
        let removed = self.files.remove(index)?;
        tracing::debug!(id = removed.id, name = %removed.info.name, "file removed");
        Some(removed)
    }

    // ========== Validation ==========

    /// Why `field` was flagged by the last validation, if it was
    pub fn error(&self, field: Field) -> Option<Invalid> {
        self.invalid.get(&field).copied()
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.invalid.contains_key(&field)
    }

    /// Fields flagged by the last validation
    pub fn invalid_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.invalid.keys().copied()
    }

    /// Run every rule and rebuild the invalid set from scratch
    pub fn validate_form(&mut self) -> bool {
        let mut invalid = BTreeMap::new();
        let mut flag = |field: Field, reason: Invalid| {
            invalid.entry(field).or_insert(reason);
        };

        for field in self.layout.required_fields() {
            let filled = match field {
                Field::Rating => self.rating.is_set(),
                Field::File => !self.files.is_empty(),
                _ => validate::validate_required(self.value(field)),
            };
            if !filled {
                flag(field, Invalid::Required);
            }
        }

        if self.layout.has(Field::Email) {
            let email = self.value(Field::Email);
            if !email.is_empty() && !validate::validate_email(email) {
                flag(Field::Email, Invalid::Email);
            }
        }

        if self.layout.upload {
            if let Some(first) = self.files.first() {
                if !self.limits.validate_file(&first.info) {
                    flag(Field::File, Invalid::File);
                }
            }
        }

        if self.layout.rating && !self.rating.is_set() {
            flag(Field::Rating, Invalid::Rating);
        }

        if self.layout.has(Field::Phone) && !validate::validate_phone(self.value(Field::Phone)) {
            flag(Field::Phone, Invalid::Phone);
        }

        for field in [Field::Name, Field::Comment] {
            if self.layout.has(field) && !validate::validate_length(self.value(field)) {
                flag(field, Invalid::Length);
            }
        }

        self.invalid = invalid;
        self.invalid.is_empty()
    }

    // ========== Submission ==========

    /// Intercept a submit: validate, and on success hand over the values,
    /// show the thank-you note and reset the form
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.validate_form() {
            tracing::info!(
                invalid = ?self.invalid.keys().collect::<Vec<_>>(),
                "submission blocked"
            );
            return None;
        }

        let submission = Submission {
            name: self.value(Field::Name).to_string(),
            email: self.value(Field::Email).to_string(),
            phone: self.value(Field::Phone).to_string(),
            comment: self.value(Field::Comment).to_string(),
            rating: self.rating.hidden_value(),
            files: self.files.files().iter().map(|f| f.info.name.clone()).collect(),
            submitted_at: Utc::now().to_rfc3339(),
        };

        self.thank_you_visible = true;
        self.reset();
        Some(submission)
    }

    /// Clear every value: text fields, rating, selected photos, flags
    pub fn reset(&mut self) {
        self.values.clear();
        self.files.clear();
        self.invalid.clear();
        self.reset_rating();
    }

    pub fn thank_you_visible(&self) -> bool {
        self.thank_you_visible
    }

    /// The form is hidden once the thank-you note shows
    pub fn form_visible(&self) -> bool {
        !self.thank_you_visible
    }
}
