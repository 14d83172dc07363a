use chrono::{DateTime, Local, NaiveTime, Timelike};
use eframe::egui;
use std::cell::RefCell;
use std::rc::Rc;
use time_picker::{LocaleConfig, Size, TimeInput, TimePicker, TimePickerProps};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
enum CurrentTab {
    #[default]
    Uncontrolled,
    Controlled,
}

pub struct DemoApp {
    current_tab: CurrentTab,
    format: String,
    locale: Option<LocaleConfig>,
    /// Last change reported by the uncontrolled picker
    last_change: Rc<RefCell<Option<(Option<DateTime<Local>>, String)>>>,
    uncontrolled: TimePicker,
    /// The host-owned value of the controlled picker
    start: Option<TimeInput>,
    controlled: TimePicker,
}

impl DemoApp {
    pub fn new(format: &str, locale: Option<LocaleConfig>) -> Self {
        let last_change = Rc::new(RefCell::new(None));
        let sink = last_change.clone();
        let uncontrolled = TimePicker::with_locale(
            TimePickerProps::new()
                .format(format)
                .id_salt("uncontrolled")
                .on_change(move |time: Option<DateTime<Local>>, text: &str| {
                    log::info!("Uncontrolled picker changed to {text:?}");
                    *sink.borrow_mut() = Some((time, text.to_string()));
                }),
            locale.as_ref(),
        );
        let start = nine_o_clock();
        let controlled = TimePicker::with_locale(
            controlled_props(format, start.clone()),
            locale.as_ref(),
        );
        Self {
            current_tab: CurrentTab::default(),
            format: format.to_string(),
            locale,
            last_change,
            uncontrolled,
            start,
            controlled,
        }
    }

    fn show_uncontrolled(&mut self, ui: &mut egui::Ui) {
        ui.label("The picker owns its value.");
        ui.add_space(5.0);
        self.uncontrolled.ui(ui);
        ui.add_space(10.0);

        match &*self.last_change.borrow() {
            Some((Some(time), text)) => ui.label(format!("Last change: {text} ({time})")),
            Some((None, _)) => ui.label("Last change: cleared"),
            None => ui.label("No change yet"),
        };
    }

    fn show_controlled(&mut self, ui: &mut egui::Ui) {
        ui.label("The application owns the value; the picker only proposes changes.");
        ui.add_space(5.0);

        let response = self
            .controlled
            .show(ui, controlled_props(&self.format, self.start.clone()));
        if let Some(change) = response.change {
            // Only accept times on the hour or the half hour
            let accepted = change.time.filter(|t| t.minute() % 30 == 0);
            if accepted.is_some() || change.time.is_none() {
                self.start = accepted.map(TimeInput::from);
            } else {
                log::info!("Rejected {:?}: not on the hour or half hour", change.text);
            }
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Reset to 09:00").clicked() {
                self.start = nine_o_clock();
            }
            if ui.button("Clear").clicked() {
                self.start = None;
            }
        });
        if let Some(locale) = &self.locale {
            ui.label(format!("Locale override: {:?}", locale.time_picker));
        }
    }
}

/// Passed as a time rather than text so it reads under any `--format`.
fn nine_o_clock() -> Option<TimeInput> {
    NaiveTime::from_hms_opt(9, 0, 0).map(TimeInput::from)
}

fn controlled_props(format: &str, value: Option<TimeInput>) -> TimePickerProps {
    TimePickerProps::new()
        .format(format)
        .id_salt("controlled")
        .size(Size::Large)
        .maybe_value(value)
        .disabled_minutes(|_| (0..60).filter(|m| m % 5 != 0).collect())
        .hide_disabled_options(true)
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui
                    .selectable_label(self.current_tab == CurrentTab::Uncontrolled, "Uncontrolled")
                    .clicked()
                {
                    self.current_tab = CurrentTab::Uncontrolled;
                }
                if ui
                    .selectable_label(self.current_tab == CurrentTab::Controlled, "Controlled")
                    .clicked()
                {
                    self.current_tab = CurrentTab::Controlled;
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            CurrentTab::Uncontrolled => self.show_uncontrolled(ui),
            CurrentTab::Controlled => self.show_controlled(ui),
        });
    }
}
