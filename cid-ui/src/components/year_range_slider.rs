//! Year range slider with start and end handles.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handle {
    Start,
    End,
}

/// Range after dragging `handle` to `year`. A handle cannot cross the other
/// one; it stops on the same year instead.
fn dragged_range(handle: Handle, year: i32, start: i32, end: i32) -> (i32, i32) {
    match handle {
        Handle::Start => (year.min(end), end),
        Handle::End => (start, year.max(start)),
    }
}

/// Two range inputs bounded by the dataset's year span. Each handle's input
/// is also bounded by the other handle, so the browser never shows a thumb
/// past it.
#[component]
pub fn YearRangeSlider() -> Element {
    let mut state = use_context::<AppState>();
    let dashboard = state.dashboard.read();
    let years = dashboard.selection().years;
    let span = dashboard.year_span();
    let interactive = dashboard.phase().is_interactive();
    drop(dashboard);

    let Some(span) = span else {
        return rsx! {};
    };
    let (min, max) = (*span.start(), *span.end());
    let (start, end) = (years.start, years.end);

    let on_start = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            let (start, end) = dragged_range(Handle::Start, year, start, end);
            state.set_year_range(start, end);
        }
    };

    let on_end = move |evt: Event<FormData>| {
        if let Ok(year) = evt.value().parse::<i32>() {
            let (start, end) = dragged_range(Handle::End, year, start, end);
            state.set_year_range(start, end);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From {start} "
                input {
                    r#type: "range",
                    min: "{min}",
                    max: "{end}",
                    step: "1",
                    value: "{start}",
                    disabled: !interactive,
                    onchange: on_start,
                }
            }
            label {
                style: "font-weight: bold;",
                "To {end} "
                input {
                    r#type: "range",
                    min: "{start}",
                    max: "{max}",
                    step: "1",
                    value: "{end}",
                    disabled: !interactive,
                    onchange: on_end,
                }
            }
        }
    }
}
