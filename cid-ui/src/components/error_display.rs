//! Error and warning banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// A failed load: the dashboard stays disabled until the page is reloaded.
    /// Otherwise the message is a rejected input and the last view stays valid.
    #[props(default = false)]
    pub fatal: bool,
}

/// ARIA role, inline style and title prefix of the banner.
fn banner(fatal: bool) -> (&'static str, String, &'static str) {
    let (role, background, color, border, title) = if fatal {
        ("alert", "#FFEBEE", "#C62828", "#EF9A9A", "Data unavailable: ")
    } else {
        ("status", "#FFF8E1", "#8D6E00", "#FFE082", "Not applied: ")
    };
    let style = format!(
        "padding: 12px 16px; margin: 8px 0; background: {background}; color: {color}; border-radius: 4px; border: 1px solid {border};"
    );
    (role, style, title)
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    let (role, style, title) = banner(props.fatal);

    rsx! {
        div {
            role,
            style: "{style}",
            strong { "{title}" }
            "{props.message}"
            if props.fatal {
                p {
                    style: "margin: 4px 0 0 0; font-size: 12px;",
                    "The map and charts are disabled. Reload the page to try again."
                }
            }
        }
    }
}
