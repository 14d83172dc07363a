use egui::{Style, Vec2};
use std::sync::Arc;

use crate::format::FormatSpec;
use crate::locale::LocaleBundle;
use crate::props::{DisabledHours, DisabledMinutes, DisabledSeconds, Placement, Size, TimePickerProps};
use crate::temporal::TimeValue;

/// Which columns the widget shows. Minutes are always shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub show_hour: bool,
    pub show_second: bool,
    pub use_12_hour_clock: bool,
}

pub fn derive_display_flags(format: &FormatSpec) -> DisplayFlags {
    DisplayFlags {
        show_hour: format.has_hour(),
        show_second: format.has_second(),
        use_12_hour_clock: format.is_12_hour(),
    }
}

/// The host's placeholder wins whenever it was given, even if empty.
pub fn resolve_placeholder(explicit: Option<&str>, locale: &LocaleBundle) -> String {
    match explicit {
        Some(placeholder) => placeholder.to_string(),
        None => locale.placeholder.clone(),
    }
}

/// `"{class_name} {prefix_cls}-{size}"`, leaving out whichever part is unset.
pub fn compose_class_name(class_name: Option<&str>, prefix_cls: &str, size: Option<Size>) -> String {
    let mut classes = Vec::new();
    if let Some(class_name) = class_name.filter(|c| !c.is_empty()) {
        classes.push(class_name.to_string());
    }
    if let Some(size) = size {
        classes.push(format!("{prefix_cls}-{}", size.as_str()));
    }
    classes.join(" ")
}

/// The part of the host's props that reaches the widget.
///
/// There is no initial value here: the widget always shows what the
/// coordinator currently holds.
#[derive(Clone)]
pub struct ForwardedProps {
    pub format: FormatSpec,
    pub disabled: bool,
    pub placeholder: Option<String>,
    pub hide_disabled_options: bool,
    pub disabled_hours: Option<DisabledHours>,
    pub disabled_minutes: Option<DisabledMinutes>,
    pub disabled_seconds: Option<DisabledSeconds>,
    pub size: Option<Size>,
    pub class_name: String,
    pub style: Option<Arc<Style>>,
    pub prefix_cls: String,
    pub placement: Placement,
    pub offset: Vec2,
    pub id_salt: Option<String>,
}

pub fn sanitize_props(props: &TimePickerProps) -> ForwardedProps {
    ForwardedProps {
        format: props.format.clone(),
        disabled: props.disabled,
        placeholder: props.placeholder.clone(),
        hide_disabled_options: props.hide_disabled_options,
        disabled_hours: props.disabled_hours.clone(),
        disabled_minutes: props.disabled_minutes.clone(),
        disabled_seconds: props.disabled_seconds.clone(),
        size: props.size,
        class_name: compose_class_name(props.class_name.as_deref(), &props.prefix_cls, props.size),
        style: props.style.clone(),
        prefix_cls: props.prefix_cls.clone(),
        placement: props.placement,
        offset: props.offset,
        id_salt: props.id_salt.clone(),
    }
}

/// Everything the widget needs for one frame.
#[derive(Clone)]
pub struct WidgetConfig {
    pub value: Option<TimeValue>,
    pub flags: DisplayFlags,
    pub placeholder: String,
    pub props: ForwardedProps,
}

impl WidgetConfig {
    pub fn new(props: &TimePickerProps, value: Option<TimeValue>, locale: &LocaleBundle) -> Self {
        let props = sanitize_props(props);
        WidgetConfig {
            value,
            flags: derive_display_flags(&props.format),
            placeholder: resolve_placeholder(props.placeholder.as_deref(), locale),
            props,
        }
    }

    pub fn is_hour_disabled(&self, hour: u32) -> bool {
        self.props
            .disabled_hours
            .as_ref()
            .is_some_and(|selector| selector().contains(&hour))
    }

    pub fn is_minute_disabled(&self, hour: u32, minute: u32) -> bool {
        self.props
            .disabled_minutes
            .as_ref()
            .is_some_and(|selector| selector(hour).contains(&minute))
    }

    pub fn is_second_disabled(&self, hour: u32, minute: u32, second: u32) -> bool {
        self.props
            .disabled_seconds
            .as_ref()
            .is_some_and(|selector| selector(hour, minute).contains(&second))
    }

    /// Text on the input button: the formatted value, or the placeholder.
    pub fn display_text(&self) -> Option<String> {
        self.value.map(|v| v.format(&self.props.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_flags_follow_format() {
        let cases = [
            ("HH:mm:ss", true, true, false),
            ("HH:mm", true, false, false),
            ("mm:ss", false, true, false),
            ("H:m", true, false, false),
            ("hh:mm A", true, false, true),
            ("[ss] mm", false, false, false),
        ];
        for (pattern, show_hour, show_second, twelve) in cases {
            let flags = derive_display_flags(&FormatSpec::new(pattern));
            assert_eq!(
                flags,
                DisplayFlags {
                    show_hour,
                    show_second,
                    use_12_hour_clock: twelve
                },
                "format {pattern}"
            );
        }
    }

    #[test]
    fn test_placeholder_policy() {
        let locale = LocaleBundle::en_us();
        assert_eq!(resolve_placeholder(None, &locale), "Select a time");
        assert_eq!(resolve_placeholder(Some("Start"), &locale), "Start");
        assert_eq!(resolve_placeholder(Some(""), &locale), "");
    }

    #[test]
    fn test_class_name_composition() {
        assert_eq!(compose_class_name(None, "time-picker", None), "");
        assert_eq!(compose_class_name(Some("mine"), "time-picker", None), "mine");
        assert_eq!(
            compose_class_name(Some("mine"), "time-picker", Some(Size::Large)),
            "mine time-picker-large"
        );
        assert_eq!(
            compose_class_name(Some(""), "tp", Some(Size::Small)),
            "tp-small"
        );
    }

    #[test]
    fn test_sanitize_props() {
        let props = TimePickerProps::new()
            .default_value("08:00:00")
            .class_name("field")
            .size(Size::Default)
            .disabled(true)
            .hide_disabled_options(true)
            .placement(Placement::TopRight);
        let forwarded = sanitize_props(&props);
        assert_eq!(forwarded.class_name, "field time-picker-default");
        assert!(forwarded.disabled);
        assert!(forwarded.hide_disabled_options);
        assert_eq!(forwarded.placement, Placement::TopRight);
        assert_eq!(forwarded.offset, Vec2::new(0., -2.));
    }

    #[test]
    fn test_widget_config_selectors() {
        let props = TimePickerProps::new()
            .disabled_hours(|| vec![0, 1, 2])
            .disabled_minutes(|hour| if hour == 12 { vec![30] } else { vec![] })
            .disabled_seconds(|_, minute| vec![minute]);
        let config = WidgetConfig::new(&props, None, &LocaleBundle::default());

        assert!(config.is_hour_disabled(1));
        assert!(!config.is_hour_disabled(3));
        assert!(config.is_minute_disabled(12, 30));
        assert!(!config.is_minute_disabled(13, 30));
        assert!(config.is_second_disabled(0, 5, 5));
        assert!(!config.is_second_disabled(0, 5, 6));
        assert_eq!(config.placeholder, LocaleBundle::zh_cn().placeholder);
    }

    #[test]
    fn test_widget_config_without_selectors() {
        let value = TimeValue::from_hms(8, 30, 15);
        let config = WidgetConfig::new(&TimePickerProps::new(), value, &LocaleBundle::en_us());
        assert!(!config.is_hour_disabled(0));
        assert_eq!(config.display_text().as_deref(), Some("08:30:15"));
        assert!(config.flags.show_second);
    }
}
