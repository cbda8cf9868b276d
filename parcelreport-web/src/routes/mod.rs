use leptos::*;
use parcelreport::FormSchema;

use crate::components::ReportForm;

#[component]
pub fn Delivery() -> impl IntoView {
    view! {
        <ReportForm schema=FormSchema::delivery()/>
    }
}

#[component]
pub fn Contact() -> impl IntoView {
    view! {
        <ReportForm schema=FormSchema::contact()/>
    }
}
