//! Container div a D3 renderer draws into.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id the renderer looks up
    pub id: String,
    /// Greyed out while the dashboard rejects input
    #[props(default = false)]
    pub disabled: bool,
    #[props(default = 320)]
    pub min_height: u32,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let opacity = if props.disabled { "0.4" } else { "1" };
    let style = format!(
        "min-height: {}px; position: relative; width: 100%; opacity: {};",
        props.min_height, opacity
    );

    rsx! {
        div {
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%;",
            }
        }
    }
}
