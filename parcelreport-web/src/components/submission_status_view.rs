use leptos::*;
use parcelreport::SUCCESS_MESSAGE;

#[component]
pub fn SubmissionStatusView(
    is_submitting: Signal<bool>,
    submit_succeeded: Signal<bool>,
    global_error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
       // Show a loading message while the form is submitting
       { move || if is_submitting.get() {
           view! {
               <div>
                   "Submitting..."
               </div>
           }.into_view()
       } else {
           view! { }.into_view()
       }}

       { move || if submit_succeeded.get() {
           view! {
               <div class="text-green-600">
                   {SUCCESS_MESSAGE}
               </div>
           }.into_view()
       } else {
           view! { }.into_view()
       }}

       // form-wide error, field errors are shown next to their input
       { move || if let Some(error) = global_error.get() {
           view! {
               <div class="text-red-500">
                   {error}
               </div>
           }.into_view()
       } else {
           view! { }.into_view()
       }}
    }
}
