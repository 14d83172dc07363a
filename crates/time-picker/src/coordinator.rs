use chrono::{DateTime, Local};

use crate::format::FormatSpec;
use crate::props::{ChangeHandler, TimePickerProps};
use crate::temporal::{TimeInput, TimeValue};

/// Who owns the displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// The host passes `value` on every update.
    Controlled,
    /// The picker keeps the value itself.
    Uncontrolled,
}

impl ControlMode {
    /// Presence of `value` decides, not its content: an explicitly empty
    /// value still means controlled.
    pub fn of(props: &TimePickerProps) -> Self {
        if props.has_value() {
            ControlMode::Controlled
        } else {
            ControlMode::Uncontrolled
        }
    }
}

/// What was reported to the host after a widget change.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeChange {
    pub time: Option<DateTime<Local>>,
    pub text: String,
}

/// Keeps the displayed value in sync with the host.
pub struct ValueCoordinator {
    props: TimePickerProps,
    on_change: ChangeHandler,
    value: Option<TimeValue>,
    initial_mode: ControlMode,
    mode_warned: bool,
}

impl ValueCoordinator {
    pub fn new(mut props: TimePickerProps) -> Self {
        let value = match &props.value {
            Some(Some(input)) => convert(Some(input), &props.format),
            _ => convert(props.default_value.as_ref(), &props.format),
        };
        let on_change = take_handler(&mut props);
        let initial_mode = ControlMode::of(&props);
        log::debug!("Time picker created ({initial_mode:?}) with value {value:?}");
        Self {
            props,
            on_change,
            value,
            initial_mode,
            mode_warned: false,
        }
    }

    /// Takes the host's latest props.
    ///
    /// The displayed value is only touched when `value` is present; an
    /// uncontrolled picker is its own source of truth.
    pub fn reconcile(&mut self, mut next: TimePickerProps) {
        let mode = ControlMode::of(&next);
        if mode != self.initial_mode && !self.mode_warned {
            log::warn!(
                "Time picker switched from {:?} to {:?}; a picker should stay either controlled or uncontrolled for its whole lifetime",
                self.initial_mode,
                mode
            );
            self.mode_warned = true;
        }

        if let Some(value) = &next.value {
            self.value = convert(value.as_ref(), &next.format);
        }
        self.on_change = take_handler(&mut next);
        self.props = next;
    }

    /// Handles a selection (or a clear) coming from the widget.
    ///
    /// The handler is called exactly once, in both modes. Only an
    /// uncontrolled picker keeps the new value; a controlled one waits for
    /// the host to pass it back.
    pub fn on_widget_change(&mut self, raw: Option<TimeValue>) -> TimeChange {
        if self.control_mode() == ControlMode::Uncontrolled {
            self.value = raw;
        }
        let change = TimeChange {
            time: raw.map(|v| v.to_native()),
            text: raw
                .map(|v| v.format(&self.props.format))
                .unwrap_or_default(),
        };
        log::trace!("Time picker changed to {:?}", change.text);
        (self.on_change)(change.time, &change.text);
        change
    }

    pub fn value(&self) -> Option<TimeValue> {
        self.value
    }

    pub fn props(&self) -> &TimePickerProps {
        &self.props
    }

    pub fn control_mode(&self) -> ControlMode {
        ControlMode::of(&self.props)
    }
}

fn take_handler(props: &mut TimePickerProps) -> ChangeHandler {
    match props.on_change.take() {
        Some(handler) => handler,
        None => Box::new(ignore_change),
    }
}

fn ignore_change(_time: Option<DateTime<Local>>, _text: &str) {}

/// Turns a host value into a displayed value. Unreadable strings mean
/// "nothing selected".
pub(crate) fn convert(input: Option<&TimeInput>, format: &FormatSpec) -> Option<TimeValue> {
    let input = input?;
    match input.resolve(format) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring time value {input:?} under format {format}: {e}");
            None
        }
    }
}
