//! Disease search field with autocomplete suggestions.

use crate::state::AppState;
use dioxus::prelude::*;

const OPTIONS_ID: &str = "disease-options";

/// Free-text disease search.
///
/// Suggestions are case-insensitive prefix matches from the loaded dataset.
/// Committing a value (enter, blur, or picking a suggestion) selects it; an
/// unknown name is reported and leaves the current selection in place.
#[component]
pub fn DiseaseSearch() -> Element {
    let mut state = use_context::<AppState>();
    let query = (state.search_text)();
    let dashboard = state.dashboard.read();
    let current = dashboard.selection().disease.clone().unwrap_or_default();
    let interactive = dashboard.phase().is_interactive();
    let suggestions: Vec<String> = dashboard
        .search_diseases(&query)
        .into_iter()
        .map(str::to_string)
        .collect();
    drop(dashboard);

    let on_input = move |evt: Event<FormData>| {
        state.search_text.set(evt.value());
    };

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let value = value.trim();
        if !value.is_empty() {
            state.select_disease(value);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "disease-search",
                style: "font-weight: bold; margin-right: 8px;",
                "Disease: "
            }
            input {
                id: "disease-search",
                r#type: "search",
                list: OPTIONS_ID,
                placeholder: "{current}",
                disabled: !interactive,
                oninput: on_input,
                onchange: on_change,
            }
            datalist {
                id: OPTIONS_ID,
                for name in suggestions {
                    option { key: "{name}", value: "{name}" }
                }
            }
        }
    }
}
