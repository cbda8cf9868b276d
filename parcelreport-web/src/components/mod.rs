mod field_view;
mod report_form;
mod submission_status_view;

pub mod buttons;

pub use field_view::{field_element_id, FieldView};
pub use report_form::ReportForm;
pub use submission_status_view::SubmissionStatusView;
