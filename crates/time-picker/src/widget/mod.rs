// The button and popup are based on egui_timepicker v0.1.0 (https://crates.io/crates/egui_timepicker).
//
// Changes from the original:
// - Driven by a `WidgetConfig` and reporting `WidgetEvent`s instead of editing a `NaiveTime` in place
// - Hour and second columns follow the format; 12-hour formats get an AM/PM toggle
// - Disabled options are greyed out (or hidden) and cannot be picked
// - Placement of the popup around the button, and a clear button next to it
// - The icon, drag values and clock face are always shown; their builder toggles are gone

mod button;
mod popup;

pub use button::{popup_anchor, ButtonOutput, TimePickerButton};

use crate::temporal::TimeValue;

/// What the widget reports after a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEvent {
    Selected(TimeValue),
    Cleared,
}

impl WidgetEvent {
    pub fn into_value(self) -> Option<TimeValue> {
        match self {
            WidgetEvent::Selected(value) => Some(value),
            WidgetEvent::Cleared => None,
        }
    }
}
