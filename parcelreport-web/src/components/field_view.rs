use leptos::ev::{Event, FocusEvent};
use leptos::*;
use parcelreport::{FieldSchema, FormState, InputKind};

const INPUT_CLASS: &str =
    "w-full shadow appearance-none border rounded py-2 px-3 text-gray-700";

/// DOM id of the input rendering `field` inside the form instance `form_uid`.
pub fn field_element_id(form_uid: &str, field: &str) -> String {
    format!("{}-{}", form_uid, field)
}

fn current_value(
    state: RwSignal<FormState>,
    name: String,
) -> impl Fn() -> String + 'static {
    move || {
        state.with(|state| {
            state.values().get(&name).unwrap_or_default().to_string()
        })
    }
}

fn change_handler(
    state: RwSignal<FormState>,
    name: String,
) -> impl Fn(Event) + 'static {
    move |ev| {
        let value = event_target_value(&ev);
        state.update(|state| state.change(&name, value));
    }
}

fn blur_handler(
    state: RwSignal<FormState>,
    name: String,
) -> impl Fn(FocusEvent) + 'static {
    move |_| state.update(|state| state.blur(&name))
}

#[component]
pub fn FieldView(
    state: RwSignal<FormState>,
    field: FieldSchema,
    element_id: String,
) -> impl IntoView {
    let name = field.name().to_string();
    let label_text = field.label().to_string();

    let value = current_value(state, name.clone());
    let on_change = change_handler(state, name.clone());
    let on_blur = blur_handler(state, name.clone());

    let input_view = match field.input() {
        InputKind::Select(options) => {
            let options = options.clone();
            view! {
                <select
                    id=element_id.clone()
                    name=name.clone()
                    class=INPUT_CLASS
                    prop:value=value
                    on:change=on_change
                    on:blur=on_blur
                >
                    <option value="">"Select an issue"</option>
                    {options
                        .into_iter()
                        .map(|option| view! {
                            <option value=option.clone()>{option}</option>
                        })
                        .collect_view()}
                </select>
            }
            .into_view()
        }
        InputKind::TextArea => view! {
            <textarea
                id=element_id.clone()
                name=name.clone()
                class=INPUT_CLASS
                prop:value=value
                on:input=on_change
                on:blur=on_blur
            />
        }
        .into_view(),
        input => view! {
            <input
                id=element_id.clone()
                name=name.clone()
                type=input.html_type().unwrap_or("text")
                class=INPUT_CLASS
                prop:value=value
                on:input=on_change
                on:blur=on_blur
            />
        }
        .into_view(),
    };

    let error = move || {
        state.with(|state| state.visible_error(&name).map(str::to_string))
    };

    view! {
        <div class="w-full flex-col items-start text-left mb-2 p-2 bg-white text-gray-800">
            <label for=element_id class="text-base font-semibold text-gray-900">
                {label_text}
            </label>
            {input_view}
            { move || error().map(|error| view! {
                <div class="text-red-500 text-sm">{error}</div>
            })}
        </div>
    }
}
