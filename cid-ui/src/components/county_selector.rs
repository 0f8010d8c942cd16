//! Dropdown selector for choosing a county, mirroring map clicks.

use crate::state::AppState;
use cid_core::record::STATEWIDE_COUNTY;
use dioxus::prelude::*;

/// County dropdown. Lists the statewide entry first, then every county of
/// the map by label.
#[component]
pub fn CountySelector() -> Element {
    let mut state = use_context::<AppState>();
    let dashboard = state.dashboard.read();
    let selected = dashboard.selection().county.clone();
    let interactive = dashboard.phase().is_interactive();
    let counties: Vec<(String, String)> = dashboard
        .dataset()
        .map(|dataset| {
            dataset
                .counties()
                .iter()
                .map(|c| (c.name.clone(), c.label().to_string()))
                .collect()
        })
        .unwrap_or_default();
    drop(dashboard);

    let on_change = move |evt: Event<FormData>| {
        state.select_county(&evt.value());
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "county-select",
                style: "font-weight: bold; margin-right: 8px;",
                "County: "
            }
            select {
                id: "county-select",
                disabled: !interactive,
                onchange: on_change,
                option {
                    value: STATEWIDE_COUNTY,
                    selected: selected == STATEWIDE_COUNTY,
                    "All of California"
                }
                for (name, label) in counties {
                    option {
                        key: "{name}",
                        value: "{name}",
                        selected: name == selected,
                        "{label}"
                    }
                }
            }
        }
    }
}
