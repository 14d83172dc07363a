//! A time input for egui.
//!
//! The picker can be *controlled*, when the host passes `value` with its
//! props and stays the owner of the time, or *uncontrolled*, when the picker
//! keeps the time itself after an optional `default_value`. Values cross the
//! boundary as strings in the picker's format, native `chrono` instants or
//! [`TimeValue`]s, and changes are reported both as an instant and as text.
// #![warn(missing_docs)]

/// Widget configuration derived from the props
pub mod adapter;
/// Controlled/uncontrolled value handling
pub mod coordinator;
/// Moment-style format strings
pub mod format;
/// Display strings and locale files
pub mod locale;
/// The component tying everything together
pub mod picker;
/// Host-facing configuration
pub mod props;
/// Time values and host inputs
pub mod temporal;
/// The egui button and popup
pub mod widget;

pub use adapter::{derive_display_flags, resolve_placeholder, sanitize_props, DisplayFlags, WidgetConfig};
pub use coordinator::{ControlMode, TimeChange, ValueCoordinator};
pub use format::{FormatSpec, ParseError, DEFAULT_FORMAT};
pub use locale::{resolve_locale, LocaleBundle, LocaleConfig, LocaleError};
pub use picker::{TimePicker, TimePickerResponse};
pub use props::{Placement, Size, TimePickerProps};
pub use temporal::{TimeInput, TimeValue};
pub use widget::WidgetEvent;
