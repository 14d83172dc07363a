use crate::adapter::WidgetConfig;
use crate::coordinator::{ControlMode, TimeChange, ValueCoordinator};
use crate::locale::{resolve_locale, LocaleBundle, LocaleConfig};
use crate::props::TimePickerProps;
use crate::temporal::TimeValue;
use crate::widget::{TimePickerButton, WidgetEvent};

/// A time input for egui that can be controlled or uncontrolled.
///
/// Keep one `TimePicker` per input in the host's state. Uncontrolled
/// pickers own their value:
///
/// ```ignore
/// let mut picker = TimePicker::new(TimePickerProps::new().default_value("08:30:00"));
/// // every frame
/// picker.ui(ui);
/// ```
///
/// Controlled pickers get the host's value back on every frame through
/// [`TimePicker::show`]:
///
/// ```ignore
/// let response = picker.show(ui, TimePickerProps::new().maybe_value(self.start.clone()));
/// if let Some(change) = response.change {
///     self.start = change.time.map(Into::into);
/// }
/// ```
pub struct TimePicker {
    coordinator: ValueCoordinator,
    locale: LocaleBundle,
}

pub struct TimePickerResponse {
    pub response: egui::Response,
    /// Set on the frame the user picked or cleared a time.
    pub change: Option<TimeChange>,
}

impl TimePicker {
    /// A picker using the built-in locale.
    pub fn new(props: TimePickerProps) -> Self {
        TimePicker::with_locale(props, None)
    }

    /// A picker reading its strings from the host's locale configuration,
    /// falling back to the built-in locale when it has none for the picker.
    pub fn with_locale(props: TimePickerProps, locale: Option<&LocaleConfig>) -> Self {
        TimePicker {
            coordinator: ValueCoordinator::new(props),
            locale: resolve_locale(locale),
        }
    }

    pub fn set_locale(&mut self, locale: Option<&LocaleConfig>) {
        self.locale = resolve_locale(locale);
    }

    /// Takes new props from the host. See [`ValueCoordinator::reconcile`].
    pub fn reconcile(&mut self, props: TimePickerProps) {
        self.coordinator.reconcile(props);
    }

    pub fn value(&self) -> Option<TimeValue> {
        self.coordinator.value()
    }

    pub fn control_mode(&self) -> ControlMode {
        self.coordinator.control_mode()
    }

    pub fn locale(&self) -> &LocaleBundle {
        &self.locale
    }

    /// What the widget is drawn with this frame.
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig::new(self.coordinator.props(), self.coordinator.value(), &self.locale)
    }

    /// Feeds a widget event through the coordinator.
    pub fn handle_event(&mut self, event: WidgetEvent) -> TimeChange {
        self.coordinator.on_widget_change(event.into_value())
    }

    /// Reconciles with `props`, then draws.
    pub fn show(&mut self, ui: &mut egui::Ui, props: TimePickerProps) -> TimePickerResponse {
        self.reconcile(props);
        self.ui(ui)
    }

    /// Draws with the props already held.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> TimePickerResponse {
        let config = self.widget_config();
        let output = ui
            .scope(|ui| {
                if let Some(style) = &config.props.style {
                    ui.set_style(style.clone());
                }
                TimePickerButton::new(&config).show(ui)
            })
            .inner;

        let change = output.event.map(|event| self.handle_event(event));
        TimePickerResponse {
            response: output.response,
            change,
        }
    }
}
