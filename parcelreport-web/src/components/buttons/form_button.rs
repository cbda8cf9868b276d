use leptos::*;

#[derive(Clone)]
pub struct FormButton {
    text: String,
    enabled: Signal<bool>,
}

impl FormButton {
    pub fn new<S: Into<String>>(text: S, enabled: Signal<bool>) -> Self {
        Self {
            text: text.into(),
            enabled,
        }
    }

    pub fn button_class(is_enabled: bool) -> &'static str {
        if is_enabled {
            "inline-block px-3 bg-purple-600 hover:bg-purple-700 text-white \
             font-bold py-2 rounded"
        } else {
            "inline-block px-3 bg-gray-300 text-white font-bold py-2 rounded \
             cursor-not-allowed"
        }
    }

    pub fn into_view(self) -> impl IntoView {
        let enabled = self.enabled;
        view! {
            <button
                type="submit"
                class=move || Self::button_class(enabled.get())
                disabled=move || !enabled.get()
            >
                {self.text}
            </button>
        }
    }
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;

    #[wasm_bindgen_test]
    fn test_button_class() {
        assert!(FormButton::button_class(true).contains("bg-purple-600"));
        assert!(FormButton::button_class(false).contains("cursor-not-allowed"));
    }
}
