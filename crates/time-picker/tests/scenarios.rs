use chrono::{DateTime, Local, NaiveTime, Timelike};
use std::cell::RefCell;
use std::rc::Rc;
use time_picker::{
    ControlMode, FormatSpec, LocaleBundle, LocaleConfig, TimePicker, TimePickerProps, TimeValue,
    WidgetEvent,
};

type Calls = Rc<RefCell<Vec<(Option<DateTime<Local>>, String)>>>;

fn recording_props(calls: &Calls) -> TimePickerProps {
    let sink = calls.clone();
    TimePickerProps::new().on_change(move |time: Option<DateTime<Local>>, text: &str| {
        sink.borrow_mut().push((time, text.to_string()))
    })
}

fn shown_time(picker: &TimePicker) -> Option<NaiveTime> {
    picker.value().map(|v| v.time())
}

fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

#[test]
fn empty_picker_with_hour_minute_format() {
    let picker = TimePicker::new(TimePickerProps::new().format("HH:mm"));
    let config = picker.widget_config();

    assert_eq!(picker.value(), None);
    assert!(config.flags.show_hour);
    assert!(!config.flags.show_second);
}

#[test]
fn default_value_is_parsed_with_format() {
    let picker = TimePicker::new(
        TimePickerProps::new()
            .format("HH:mm:ss")
            .default_value("08:30:15"),
    );
    let config = picker.widget_config();

    assert_eq!(shown_time(&picker), Some(hms(8, 30, 15)));
    assert!(config.flags.show_second);
    assert_eq!(config.display_text().as_deref(), Some("08:30:15"));
}

#[test]
fn controlled_value_follows_host() {
    let mut picker = TimePicker::new(TimePickerProps::new().value("10:00:00"));
    assert_eq!(shown_time(&picker), Some(hms(10, 0, 0)));

    picker.reconcile(TimePickerProps::new().value("11:00:00"));
    assert_eq!(shown_time(&picker), Some(hms(11, 0, 0)));
    assert_eq!(picker.control_mode(), ControlMode::Controlled);
}

#[test]
fn malformed_value_shows_placeholder() {
    let picker = TimePicker::with_locale(
        TimePickerProps::new().format("HH:mm:ss").value("not-a-time"),
        Some(&LocaleConfig::new(LocaleBundle::en_us())),
    );
    let config = picker.widget_config();

    assert_eq!(picker.value(), None);
    assert_eq!(config.display_text(), None);
    assert_eq!(config.placeholder, "Select a time");
}

#[test]
fn uncontrolled_selection_reports_both_forms() {
    let calls = Calls::default();
    let mut picker = TimePicker::new(recording_props(&calls));

    let picked = TimeValue::from_hms(9, 15, 0).unwrap();
    picker.handle_event(WidgetEvent::Selected(picked));

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    let (time, text) = &calls[0];
    let time = time.expect("an instant is reported");
    assert_eq!((time.hour(), time.minute(), time.second()), (9, 15, 0));
    assert_eq!(text, "09:15:00");
    assert_eq!(shown_time(&picker), Some(hms(9, 15, 0)));
}

#[test]
fn controlled_selection_is_overwritten_by_host() {
    let calls = Calls::default();
    let mut picker = TimePicker::new(recording_props(&calls).value("10:00:00"));

    picker.handle_event(WidgetEvent::Selected(TimeValue::from_hms(12, 30, 0).unwrap()));
    assert_eq!(calls.borrow()[0].1, "12:30:00");
    assert_eq!(shown_time(&picker), Some(hms(10, 0, 0)));

    // host accepts the change and passes it back
    let accepted = calls.borrow()[0].0;
    picker.reconcile(TimePickerProps::new().maybe_value(accepted.map(Into::into)));
    assert_eq!(shown_time(&picker), Some(hms(12, 30, 0)));
}

#[test]
fn uncontrolled_ignores_prop_updates() {
    let mut picker = TimePicker::new(TimePickerProps::new().default_value("07:00:00"));
    picker.handle_event(WidgetEvent::Selected(TimeValue::from_hms(7, 45, 0).unwrap()));

    picker.reconcile(TimePickerProps::new().default_value("06:00:00"));
    assert_eq!(shown_time(&picker), Some(hms(7, 45, 0)));
    assert_eq!(picker.control_mode(), ControlMode::Uncontrolled);
}

#[test]
fn clearing_reports_null_in_both_modes() {
    for controlled in [true, false] {
        let calls = Calls::default();
        let props = if controlled {
            recording_props(&calls).value("10:00:00")
        } else {
            recording_props(&calls).default_value("10:00:00")
        };
        let mut picker = TimePicker::new(props);
        let change = picker.handle_event(WidgetEvent::Cleared);

        assert_eq!(change.time, None);
        assert_eq!(change.text, "");
        assert_eq!(*calls.borrow(), vec![(None, String::new())]);
        assert_eq!(picker.value().is_some(), controlled);
    }
}

#[test]
fn explicit_clear_from_host() {
    let mut picker = TimePicker::new(TimePickerProps::new().value("10:00:00"));
    picker.reconcile(TimePickerProps::new().maybe_value(None));
    assert_eq!(picker.value(), None);
    assert_eq!(picker.control_mode(), ControlMode::Controlled);
}

#[test]
fn native_instants_are_accepted() {
    let instant = TimeValue::from_hms(18, 5, 9).unwrap().to_native();
    let picker = TimePicker::new(TimePickerProps::new().format("HH:mm").value(instant));
    assert_eq!(shown_time(&picker), Some(hms(18, 5, 9)));
    assert_eq!(picker.widget_config().display_text().as_deref(), Some("18:05"));
}

#[test]
fn twelve_hour_format_round_trips_through_the_picker() {
    let calls = Calls::default();
    let format = FormatSpec::new("hh:mm A");
    let mut picker = TimePicker::new(recording_props(&calls).format(format.clone()).default_value("07:20 PM"));
    assert_eq!(shown_time(&picker), Some(hms(19, 20, 0)));
    assert!(picker.widget_config().flags.use_12_hour_clock);

    picker.handle_event(WidgetEvent::Selected(TimeValue::parse("11:05 am", &format).unwrap()));
    assert_eq!(calls.borrow()[0].1, "11:05 AM");
}

#[test]
fn twelve_hour_format_without_meridiem_reports_noon() {
    let calls = Calls::default();
    let mut picker = TimePicker::new(recording_props(&calls).format("hh:mm").default_value("12:30"));
    assert_eq!(shown_time(&picker), Some(hms(12, 30, 0)));

    let shown = picker.value().unwrap();
    picker.handle_event(WidgetEvent::Selected(shown));
    let (time, text) = calls.borrow()[0].clone();
    assert_eq!(time.map(|t| t.hour()), Some(12));
    assert_eq!(text, "12:30");
}
