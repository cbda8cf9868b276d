mod schema;
mod state;
pub mod validators;
mod values;

pub use schema::{
    FieldSchema, FormSchema, InputKind, CONTACT_FORM, DELIVERY_FORM,
};
pub use state::{FormState, SubmitFailure};
pub use values::{
    DeliveryReport, FormValues, Issue, DETAILS_FIELD, ISSUE_FIELD,
    TRACKING_NUMBER_FIELD,
};
