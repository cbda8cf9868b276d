use std::rc::Rc;
use std::sync::Arc;

use leptos::ev::SubmitEvent;
use leptos::*;
use parcelreport::{
    FormSchema, FormState, FormValues, HttpClient, ReportConfig,
    SubmissionError, Submitter, ENDPOINT_KEY,
};
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use super::buttons::FormButton;
use super::{field_element_id, FieldView, SubmissionStatusView};

/// Endpoint can be overridden when building the bundle.
fn report_config() -> ReportConfig {
    let mut config = ReportConfig::default();
    if let Some(endpoint) = option_env!("PARCELREPORT_ENDPOINT") {
        config.set(ENDPOINT_KEY.to_string(), endpoint.to_string());
    }
    config
}

fn create_submitter() -> Option<Rc<Submitter<HttpClient>>> {
    match Submitter::from_config(&report_config()) {
        Ok(submitter) => Some(Rc::new(submitter.with_on_success(Arc::new(
            |values: &FormValues| {
                log::info!("Submitted with values {:?}", values);
            },
        )))),
        Err(e) => {
            log::error!("Invalid report configuration: {}", e);
            None
        }
    }
}

fn focus_field(element_id: &str) {
    let element = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(element_id))
        .and_then(|element| element.dyn_into::<HtmlElement>().ok());
    match element {
        Some(element) => {
            if let Err(e) = element.focus() {
                log::warn!("Unable to focus {}: {:?}", element_id, e);
            }
        }
        None => log::warn!("No element with id {}", element_id),
    }
}

#[derive(Clone)]
struct ReportSubmit {
    state: RwSignal<FormState>,
    form_uid: String,
    submitter: Option<Rc<Submitter<HttpClient>>>,
}

impl ReportSubmit {
    fn focus(&self, field: Option<String>) {
        if let Some(field) = field {
            focus_field(&field_element_id(&self.form_uid, &field));
        }
    }

    fn complete(&self, result: Result<(), SubmissionError>) {
        let mut focus = None;
        self.state.update(|state| {
            if let Err(failure) = state.complete(result) {
                log::debug!("Submission failed: {}", failure);
                focus = failure.focus().map(str::to_string);
            }
        });
        self.focus(focus);
    }

    fn handle_submit(&self, ev: SubmitEvent) {
        ev.prevent_default();

        let mut values = None;
        let mut focus = None;
        self.state.update(|state| match state.begin_submit() {
            Ok(begun) => values = Some(begun),
            Err(failure) => focus = failure.focus().map(str::to_string),
        });
        self.focus(focus);
        let Some(values) = values else {
            return;
        };

        let Some(submitter) = self.submitter.clone() else {
            self.complete(Err(SubmissionError::generic()));
            return;
        };
        let report_submit = self.clone();
        spawn_local(async move {
            let result = submitter.submit(&values).await;
            report_submit.complete(result);
        });
    }
}

#[component]
pub fn ReportForm(schema: FormSchema) -> impl IntoView {
    // ids must stay unique when the same form is mounted twice
    let form_uid = format!("{}-{}", schema.form_id(), Uuid::new_v4());
    let title = schema.title().to_string();
    let submit_label = schema.submit_label().to_string();
    let fields = schema.fields().to_vec();

    let state = create_rw_signal(FormState::new(schema));
    let report_submit = ReportSubmit {
        state,
        form_uid: form_uid.clone(),
        submitter: create_submitter(),
    };

    let is_submitting =
        Signal::derive(move || state.with(FormState::is_submitting));
    let submit_succeeded =
        Signal::derive(move || state.with(FormState::submit_succeeded));
    let global_error = Signal::derive(move || {
        state.with(|state| state.global_error().map(str::to_string))
    });
    let can_submit = Signal::derive(move || state.with(FormState::can_submit));

    let submit_button = FormButton::new(submit_label, can_submit);

    view! {
        <div class="bg-white rounded shadow p-4">
            <h1 class="text-2xl font-bold mb-4">{title}</h1>
            <form
                id=form_uid.clone()
                on:submit=move |ev: SubmitEvent| report_submit.handle_submit(ev)
            >
                {fields
                    .into_iter()
                    .map(|field| {
                        let element_id =
                            field_element_id(&form_uid, field.name());
                        view! {
                            <FieldView state field element_id/>
                        }
                    })
                    .collect_view()}
                <SubmissionStatusView
                    is_submitting
                    submit_succeeded
                    global_error
                />
                {submit_button.into_view()}
            </form>
        </div>
    }
}
