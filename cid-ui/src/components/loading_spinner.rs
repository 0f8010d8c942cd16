use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadingSpinnerProps {
    /// Locations being fetched, listed under the message
    #[props(default)]
    pub sources: Vec<String>,
}

/// Shown until both the disease table and the county map have arrived.
#[component]
pub fn LoadingSpinner(props: LoadingSpinnerProps) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; align-items: center; padding: 40px; color: #666;",
            "Loading surveillance data..."
            ul {
                style: "margin: 8px 0 0 0; padding: 0; list-style: none; font-size: 11px; color: #999;",
                for source in props.sources {
                    li { key: "{source}", "{source}" }
                }
            }
        }
    }
}
