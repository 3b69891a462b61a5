/// Form fields and the layout contract
///
/// A `FormLayout` describes which widgets a form provides and which of them
/// carry a required marker. Widgets that are missing from the layout are
/// simply never validated.

use serde::{Deserialize, Serialize};

/// Every field the feedback form knows about
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Comment,
    Rating,
    File,
}

impl Field {
    /// Text fields, in display order
    pub const TEXT: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Comment];

    /// Label shown above the field
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Comment => "Comment",
            Field::Rating => "Rating",
            Field::File => "Photos",
        }
    }

    /// Placeholder for text inputs
    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "name@example.com",
            Field::Phone => "+7 (___) ___-__-__",
            Field::Comment => "Tell us what you think",
            Field::Rating | Field::File => "",
        }
    }
}

/// One text field in the layout
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub field: Field,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    pub fn optional(field: Field) -> Self {
        Self { field, required: false }
    }

    pub fn required(field: Field) -> Self {
        Self { field, required: true }
    }
}

/// The widgets a form provides
///
/// `fields` lists every input with its required marker (rating and file
/// may appear here too, to mark them required). `rating` and `upload`
/// say whether the star widget and the file widget exist at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormLayout {
    pub fields: Vec<FieldSpec>,
    #[serde(default = "enabled")]
    pub rating: bool,
    #[serde(default = "enabled")]
    pub upload: bool,
}

fn enabled() -> bool {
    true
}

impl Default for FormLayout {
    /// The stock feedback form: name is required, everything else optional
    fn default() -> Self {
        Self {
            fields: vec![
                FieldSpec::required(Field::Name),
                FieldSpec::optional(Field::Email),
                FieldSpec::optional(Field::Phone),
                FieldSpec::optional(Field::Comment),
            ],
            rating: true,
            upload: true,
        }
    }
}

impl FormLayout {
    /// Whether the layout provides this field
    pub fn has(&self, field: Field) -> bool {
        match field {
            Field::Rating => self.rating,
            Field::File => self.upload,
            _ => self.fields.iter().any(|spec| spec.field == field),
        }
    }

    /// Whether the field carries a required marker
    pub fn is_required(&self, field: Field) -> bool {
        self.has(field)
            && self
                .fields
                .iter()
                .any(|spec| spec.field == field && spec.required)
    }

    /// Text fields present in the layout, in display order
    pub fn text_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::TEXT.into_iter().filter(|field| self.has(*field))
    }

    /// All fields carrying a required marker
    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields
            .iter()
            .filter(|spec| spec.required && self.has(spec.field))
            .map(|spec| spec.field)
    }
}
