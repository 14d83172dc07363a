use chrono::{DateTime, Local};
use egui::{Style, Vec2};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::format::FormatSpec;
use crate::temporal::TimeInput;

/// Called with the selected instant (or `None` when cleared) and the same
/// value written with the picker's format (or `""`).
pub type ChangeHandler = Box<dyn FnMut(Option<DateTime<Local>>, &str)>;
/// Returns the hours that cannot be selected.
pub type DisabledHours = Rc<dyn Fn() -> Vec<u32>>;
/// Returns the minutes that cannot be selected within the given hour.
pub type DisabledMinutes = Rc<dyn Fn(u32) -> Vec<u32>>;
/// Returns the seconds that cannot be selected within the given hour and minute.
pub type DisabledSeconds = Rc<dyn Fn(u32, u32) -> Vec<u32>>;

pub const DEFAULT_PREFIX_CLS: &str = "time-picker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Large,
    #[default]
    Default,
    Small,
}

impl Size {
    pub fn as_str(&self) -> &'static str {
        match self {
            Size::Large => "large",
            Size::Default => "default",
            Size::Small => "small",
        }
    }

    pub(crate) fn text_size(&self) -> f32 {
        match self {
            Size::Large => 16.,
            Size::Default => 14.,
            Size::Small => 12.,
        }
    }
}

/// Where the popup opens relative to the input button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

/// Everything a host can configure on a [`crate::TimePicker`].
///
/// Built with consuming setters:
///
/// ```ignore
/// let props = TimePickerProps::new()
///     .format("HH:mm")
///     .default_value("08:30")
///     .on_change(|time, text| log::info!("{time:?} {text}"));
/// ```
pub struct TimePickerProps {
    /// `None`: not provided (uncontrolled). `Some(None)`: provided but empty.
    pub(crate) value: Option<Option<TimeInput>>,
    pub(crate) default_value: Option<TimeInput>,
    pub(crate) format: FormatSpec,
    pub(crate) on_change: Option<ChangeHandler>,
    pub(crate) disabled: bool,
    pub(crate) placeholder: Option<String>,
    pub(crate) hide_disabled_options: bool,
    pub(crate) disabled_hours: Option<DisabledHours>,
    pub(crate) disabled_minutes: Option<DisabledMinutes>,
    pub(crate) disabled_seconds: Option<DisabledSeconds>,
    pub(crate) size: Option<Size>,
    pub(crate) class_name: Option<String>,
    pub(crate) style: Option<Arc<Style>>,
    pub(crate) prefix_cls: String,
    pub(crate) placement: Placement,
    pub(crate) offset: Vec2,
    pub(crate) id_salt: Option<String>,
}

impl Default for TimePickerProps {
    fn default() -> Self {
        Self {
            value: None,
            default_value: None,
            format: FormatSpec::default(),
            on_change: None,
            disabled: false,
            placeholder: None,
            hide_disabled_options: false,
            disabled_hours: None,
            disabled_minutes: None,
            disabled_seconds: None,
            size: None,
            class_name: None,
            style: None,
            prefix_cls: DEFAULT_PREFIX_CLS.to_string(),
            placement: Placement::default(),
            offset: Vec2::new(0., -2.),
            id_salt: None,
        }
    }
}

impl fmt::Debug for TimePickerProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimePickerProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("format", &self.format.as_str())
            .field("on_change", &self.on_change.is_some())
            .field("disabled", &self.disabled)
            .field("placeholder", &self.placeholder)
            .field("hide_disabled_options", &self.hide_disabled_options)
            .field("size", &self.size)
            .field("class_name", &self.class_name)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

impl TimePickerProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the picker controlled, showing `value`.
    pub fn value(mut self, value: impl Into<TimeInput>) -> Self {
        self.value = Some(Some(value.into()));
        self
    }

    /// Makes the picker controlled; `None` shows an empty picker.
    pub fn maybe_value(mut self, value: Option<TimeInput>) -> Self {
        self.value = Some(value);
        self
    }

    /// Initial value of an uncontrolled picker. Only read at construction.
    pub fn default_value(mut self, value: impl Into<TimeInput>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.format = format.into();
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(Option<DateTime<Local>>, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Overrides the locale placeholder. An empty string is honoured as is.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn hide_disabled_options(mut self, hide: bool) -> Self {
        self.hide_disabled_options = hide;
        self
    }

    pub fn disabled_hours(mut self, selector: impl Fn() -> Vec<u32> + 'static) -> Self {
        self.disabled_hours = Some(Rc::new(selector));
        self
    }

    pub fn disabled_minutes(mut self, selector: impl Fn(u32) -> Vec<u32> + 'static) -> Self {
        self.disabled_minutes = Some(Rc::new(selector));
        self
    }

    pub fn disabled_seconds(mut self, selector: impl Fn(u32, u32) -> Vec<u32> + 'static) -> Self {
        self.disabled_seconds = Some(Rc::new(selector));
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn style(mut self, style: impl Into<Arc<Style>>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn prefix_cls(mut self, prefix_cls: impl Into<String>) -> Self {
        self.prefix_cls = prefix_cls.into();
        self
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Distinguishes several pickers drawn in the same `Ui`.
    pub fn id_salt(mut self, id_salt: impl Into<String>) -> Self {
        self.id_salt = Some(id_salt.into());
        self
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
