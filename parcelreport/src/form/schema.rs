use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::validators::{
    five_characters, is_num, non_empty, required, validate_chain, ValidateFn,
};
use super::values::{
    FormValues, Issue, DETAILS_FIELD, ISSUE_FIELD, TRACKING_NUMBER_FIELD,
};

pub const DELIVERY_FORM: &str = "Delivery";
pub const CONTACT_FORM: &str = "Contact";

const REPORT_TITLE: &str = "Report a problem with your delivery";
const SUBMIT_LABEL: &str = "Send message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Select(Vec<String>),
    TextArea,
}

impl InputKind {
    pub fn html_type(&self) -> Option<&'static str> {
        match self {
            InputKind::Text => Some("text"),
            InputKind::Number => Some("number"),
            InputKind::Select(_) | InputKind::TextArea => None,
        }
    }
}

#[derive(Clone)]
pub struct FieldSchema {
    name: String,
    label: String,
    input: InputKind,
    validators: Vec<ValidateFn>,
}

impl FieldSchema {
    pub fn new<S: Into<String>>(name: S, input: InputKind) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            input,
            validators: Vec::new(),
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = label.into();
        self
    }

    pub fn validator<F>(mut self, validate_fn: F) -> Self
    where
        F: Fn(Option<&str>) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validate_fn));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn input(&self) -> &InputKind {
        &self.input
    }

    pub fn validators(&self) -> &[ValidateFn] {
        &self.validators
    }

    pub fn is_required(&self) -> bool {
        validate_chain(&self.validators, None).is_err()
    }

    pub fn validate(&self, value: Option<&str>) -> Result<(), String> {
        validate_chain(&self.validators, value)
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("input", &self.input)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// Describes one form variant: its identifier, how it is titled and which
/// fields it renders and validates.
#[derive(Debug, Clone)]
pub struct FormSchema {
    form_id: String,
    title: String,
    submit_label: String,
    fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new<S: Into<String>>(form_id: S) -> Self {
        Self {
            form_id: form_id.into(),
            title: REPORT_TITLE.to_string(),
            submit_label: SUBMIT_LABEL.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_submit_label<S: Into<String>>(mut self, label: S) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = FieldSchema>,
    {
        self.fields.extend(fields);
        self
    }

    pub fn delivery() -> Self {
        let tracking_number =
            FieldSchema::new(TRACKING_NUMBER_FIELD, InputKind::Text)
                .with_label("Tracking number")
                .validator(required)
                .validator(non_empty)
                .validator(five_characters)
                .validator(is_num);

        FormSchema::new(DELIVERY_FORM)
            .with_field(tracking_number)
            .with_fields(common_fields())
    }

    pub fn contact() -> Self {
        let tracking_number =
            FieldSchema::new(TRACKING_NUMBER_FIELD, InputKind::Number)
                .with_label("Tracking number")
                .validator(required)
                .validator(five_characters)
                .validator(is_num);

        FormSchema::new(CONTACT_FORM)
            .with_field(tracking_number)
            .with_fields(common_fields())
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "delivery" => Some(Self::delivery()),
            "contact" => Some(Self::contact()),
            _ => None,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// First validation error per field, keyed by field name. An empty map
    /// means the values may be submitted.
    pub fn validate(&self, values: &FormValues) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter_map(|field| {
                field
                    .validate(values.get(field.name()))
                    .err()
                    .map(|message| (field.name().to_string(), message))
            })
            .collect()
    }

    /// Name of the first field, in display order, that has an entry in
    /// `errors`.
    pub fn first_failing_field<V>(
        &self,
        errors: &BTreeMap<String, V>,
    ) -> Option<&str> {
        self.fields
            .iter()
            .map(|field| field.name())
            .find(|name| errors.contains_key(*name))
    }
}

fn common_fields() -> Vec<FieldSchema> {
    let issue_options =
        Issue::ALL.iter().map(|issue| issue.as_str().to_string()).collect();
    vec![
        FieldSchema::new(ISSUE_FIELD, InputKind::Select(issue_options))
            .with_label("What is your issue?")
            .validator(required),
        FieldSchema::new(DETAILS_FIELD, InputKind::TextArea)
            .with_label("Give more details (optional)"),
    ]
}
