use std::fmt::Display;

use chrono::{NaiveTime, Timelike};
use egui::{
    Align2, Button, Color32, DragValue, FontId, Id, Layout, Painter, Pos2, Response, RichText,
    Sense, Ui, Vec2,
};

use super::button::TimePickerButtonState;
use crate::adapter::WidgetConfig;
use crate::temporal::TimeValue;

#[derive(Default, Clone, Copy, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
enum TimeFrame {
    #[default]
    Hour,
    Minute,
    Second,
}

#[derive(Default, Clone, Copy, PartialEq, Debug, serde::Deserialize, serde::Serialize)]
enum AmPm {
    #[default]
    Am,
    Pm,
}

impl Display for AmPm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmPm::Am => write!(f, "AM"),
            AmPm::Pm => write!(f, "PM"),
        }
    }
}

/// Selection being edited while the popup is open. On a 12-hour clock
/// `hour` is 0-11 and `am_pm` carries the half of the day.
#[derive(Default, Clone, Debug, serde::Deserialize, serde::Serialize)]
pub(crate) struct TimePickerPopupState {
    hour: u32,
    minute: u32,
    second: u32,
    setup: bool,
    timeframe: TimeFrame,
    am_pm: AmPm,
}

impl TimePickerPopupState {
    fn load(&mut self, time: NaiveTime, use_12_hour_clock: bool, show_hour: bool) {
        self.hour = time.hour();
        self.minute = time.minute();
        self.second = time.second();
        if use_12_hour_clock {
            self.am_pm = if self.hour >= 12 { AmPm::Pm } else { AmPm::Am };
            self.hour %= 12;
        }
        self.timeframe = if show_hour {
            TimeFrame::Hour
        } else {
            TimeFrame::Minute
        };
        self.setup = true;
    }

    fn hour24(&self, use_12_hour_clock: bool) -> u32 {
        match (use_12_hour_clock, self.am_pm) {
            (false, _) => self.hour,
            (true, AmPm::Am) => self.hour % 12,
            (true, AmPm::Pm) => self.hour % 12 + 12,
        }
    }

    fn time(&self, use_12_hour_clock: bool) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour24(use_12_hour_clock), self.minute, self.second)
    }
}

pub(crate) struct TimePickerPopup<'a> {
    pub config: &'a WidgetConfig,
    pub button_id: Id,
}

impl TimePickerPopup<'_> {
    fn is_disabled(&self, state: &TimePickerPopupState, frame: TimeFrame, candidate: u32) -> bool {
        let twelve = self.config.flags.use_12_hour_clock;
        match frame {
            TimeFrame::Hour => {
                let hour = TimePickerPopupState {
                    hour: candidate,
                    ..state.clone()
                }
                .hour24(twelve);
                self.config.is_hour_disabled(hour)
            }
            TimeFrame::Minute => self.config.is_minute_disabled(state.hour24(twelve), candidate),
            TimeFrame::Second => self.config.is_second_disabled(
                state.hour24(twelve),
                state.minute,
                candidate,
            ),
        }
    }

    fn selection_disabled(&self, state: &TimePickerPopupState) -> bool {
        let flags = self.config.flags;
        (flags.show_hour && self.is_disabled(state, TimeFrame::Hour, state.hour))
            || self.is_disabled(state, TimeFrame::Minute, state.minute)
            || (flags.show_second && self.is_disabled(state, TimeFrame::Second, state.second))
    }

    /// Draws one field selector and returns its rect, so the active field
    /// can be outlined.
    fn field(&self, ui: &mut Ui, state: &mut TimePickerPopupState, frame: TimeFrame) -> egui::Rect {
        let max = match frame {
            TimeFrame::Hour if self.config.flags.use_12_hour_clock => 11,
            TimeFrame::Hour => 23,
            TimeFrame::Minute | TimeFrame::Second => 59,
        };
        let slot = match frame {
            TimeFrame::Hour => state.hour,
            TimeFrame::Minute => state.minute,
            TimeFrame::Second => state.second,
        };

        let mut edited = slot;
        let r = ui.add(DragValue::new(&mut edited).range(0..=max));
        if r.clicked() || r.changed() {
            state.timeframe = frame;
        }
        // a disabled option cannot be reached by dragging either
        if edited != slot && !self.is_disabled(state, frame, edited) {
            match frame {
                TimeFrame::Hour => state.hour = edited,
                TimeFrame::Minute => state.minute = edited,
                TimeFrame::Second => state.second = edited,
            }
        }
        r.rect
    }

    /// Returns the picked value once the user saves.
    pub fn draw(&mut self, ui: &mut Ui) -> Option<TimeValue> {
        let id = self.button_id.with("popup");
        let flags = self.config.flags;
        let mut popup_state = ui
            .data_mut(|data| data.get_persisted::<TimePickerPopupState>(id))
            .unwrap_or_default();
        if !popup_state.setup {
            let current = self.config.value.map(|v| v.time()).unwrap_or(NaiveTime::MIN);
            popup_state.load(current, flags.use_12_hour_clock, flags.show_hour);
            ui.data_mut(|data| data.insert_persisted(id, popup_state.clone()));
        }

        let (mut close, mut picked) = (false, None);

        ui.horizontal(|ui| {
            let mut hour_rect = None;
            if flags.show_hour {
                hour_rect = Some(self.field(ui, &mut popup_state, TimeFrame::Hour));
                ui.label(RichText::new("h :").monospace());
            }

            let minute_rect = Some(self.field(ui, &mut popup_state, TimeFrame::Minute));

            let mut second_rect = None;
            if flags.show_second {
                ui.label(RichText::new("m :").monospace());
                second_rect = Some(self.field(ui, &mut popup_state, TimeFrame::Second));
                ui.label(RichText::new("s").monospace());
            } else {
                ui.label(RichText::new("m").monospace());
            }

            if flags.use_12_hour_clock
                && ui
                    .button(RichText::new(popup_state.am_pm.to_string()).size(18.))
                    .clicked()
            {
                popup_state.am_pm = match popup_state.am_pm {
                    AmPm::Am => AmPm::Pm,
                    AmPm::Pm => AmPm::Am,
                };
            }

            // Highlight the active drag value with a border
            let active_rect = match popup_state.timeframe {
                TimeFrame::Hour => hour_rect,
                TimeFrame::Minute => minute_rect,
                TimeFrame::Second => second_rect,
            };
            if let Some(rect) = active_rect {
                let stroke = egui::Stroke::new(1.5, ui.visuals().selection.stroke.color);
                ui.painter()
                    .rect_stroke(rect.expand(1.0), 2.0, stroke, egui::StrokeKind::Outside);
            }
        });

        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(250., 250.), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let radius = rect.width() / 2.0;
        let face = ClockFace {
            radius_outer: radius * 0.8,
            radius_inner: radius * 0.55,
            center: rect.center(),
            use_12_hour_clock: flags.use_12_hour_clock,
            hide_disabled: self.config.props.hide_disabled_options,
            text_color: ui.visuals().text_color(),
            disabled_color: ui.visuals().weak_text_color(),
            highlight_color: ui.visuals().selection.bg_fill.linear_multiply(0.5),
        };

        let frame = popup_state.timeframe;
        let mut time = match frame {
            TimeFrame::Hour => popup_state.hour,
            TimeFrame::Minute => popup_state.minute,
            TimeFrame::Second => popup_state.second,
        };
        let snapshot = popup_state.clone();
        face.draw(&painter, &response, frame, &mut time, &|candidate| {
            self.is_disabled(&snapshot, frame, candidate)
        });
        match frame {
            TimeFrame::Hour => popup_state.hour = time,
            TimeFrame::Minute => popup_state.minute = time,
            TimeFrame::Second => popup_state.second = time,
        }

        // Auto-advance to next timeframe when the user releases the pointer on the clock
        if response.drag_stopped() || response.clicked() {
            popup_state.timeframe = match popup_state.timeframe {
                TimeFrame::Hour => TimeFrame::Minute,
                TimeFrame::Minute if flags.show_second => TimeFrame::Second,
                other => other,
            };
        }

        let can_save = !self.selection_disabled(&popup_state);
        ui.horizontal(|ui| {
            ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(can_save, Button::new("Save")).clicked() {
                    if let Some(time) = popup_state.time(flags.use_12_hour_clock) {
                        picked = Some(match self.config.value {
                            Some(value) => value.with_time(time),
                            None => TimeValue::today_at(time),
                        });
                    }
                    close = true;
                }

                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });

        ui.data_mut(|data| {
            data.insert_persisted(id, popup_state.clone());
        });

        if close {
            popup_state.setup = false;
            ui.data_mut(|data| {
                data.insert_persisted(id, popup_state);
                data.get_persisted_mut_or_default::<TimePickerButtonState>(self.button_id)
                    .picker_visible = false;
            });
        }

        picked
    }
}

struct ClockFace {
    radius_outer: f32,
    radius_inner: f32,
    center: Pos2,
    use_12_hour_clock: bool,
    hide_disabled: bool,
    text_color: Color32,
    disabled_color: Color32,
    highlight_color: Color32,
}

impl ClockFace {
    fn label(&self, painter: &Painter, pos: Pos2, value: u32, disabled: bool) {
        if disabled && self.hide_disabled {
            return;
        }
        let color = if disabled {
            self.disabled_color
        } else {
            self.text_color
        };
        painter.text(
            pos,
            Align2::CENTER_CENTER,
            value.to_string(),
            FontId::monospace(12.0),
            color,
        );
    }

    fn draw(
        &self,
        painter: &Painter,
        response: &Response,
        timeframe: TimeFrame,
        time: &mut u32,
        is_disabled: &dyn Fn(u32) -> bool,
    ) {
        let center = self.center;
        for i in 0..12 {
            let angle = (-90. + 30. * i as f32).to_radians();
            let outer = center + Vec2::angled(angle) * self.radius_outer;
            let inner = center + Vec2::angled(angle) * self.radius_inner;

            match timeframe {
                TimeFrame::Hour => {
                    self.label(painter, outer, i, is_disabled(i));
                    if !self.use_12_hour_clock {
                        self.label(painter, inner, i + 12, is_disabled(i + 12));
                    }

                    if *time == i {
                        painter.circle_filled(outer, 15., self.highlight_color);
                    }
                    if *time == i + 12 {
                        painter.circle_filled(inner, 15., self.highlight_color);
                    }
                }
                TimeFrame::Minute | TimeFrame::Second => {
                    self.label(painter, outer, i * 5, is_disabled(i * 5));
                    if *time == i * 5 {
                        painter.circle_filled(outer, 15., self.highlight_color);
                    }
                }
            }
        }

        if let Some(pos) = response.interact_pointer_pos() {
            let angle = (pos - center).angle();
            let distance = (pos - center).length();

            let candidate = match timeframe {
                TimeFrame::Hour => {
                    let mut h = (angle.to_degrees() + 90. + 15.).rem_euclid(360.) as u32 / 30;
                    if distance < self.radius_outer - 15. && !self.use_12_hour_clock {
                        h += 12;
                    }
                    h % 24
                }
                TimeFrame::Minute | TimeFrame::Second => {
                    (angle.to_degrees() + 90. + 3.).rem_euclid(360.) as u32 / 6 % 60
                }
            };
            if !is_disabled(candidate) {
                *time = candidate;
            }
        }

        let hand = match timeframe {
            TimeFrame::Hour => {
                let angle = (*time as f32 * 30. - 90.).to_radians();
                let length = if *time < 12 {
                    self.radius_outer
                } else {
                    self.radius_inner
                };
                center + Vec2::angled(angle) * (length - 15.)
            }
            TimeFrame::Minute | TimeFrame::Second => {
                let angle = (*time as f32 * 6. - 90.).to_radians();
                let length = if *time % 5 == 0 {
                    self.radius_outer - 15.
                } else {
                    self.radius_outer
                };
                center + Vec2::angled(angle) * length
            }
        };
        painter.line_segment([center, hand], (2., self.text_color));
        if matches!(timeframe, TimeFrame::Minute | TimeFrame::Second) && *time % 5 != 0 {
            painter.circle_filled(hand, 4., self.text_color);
        }

        painter.circle_filled(center, 4., self.text_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleBundle;
    use crate::props::TimePickerProps;

    fn config(props: TimePickerProps) -> WidgetConfig {
        WidgetConfig::new(&props, None, &LocaleBundle::default())
    }

    fn loaded(config: &WidgetConfig, h: u32, m: u32, s: u32) -> TimePickerPopupState {
        let mut state = TimePickerPopupState::default();
        let flags = config.flags;
        state.load(
            NaiveTime::from_hms_opt(h, m, s).unwrap(),
            flags.use_12_hour_clock,
            flags.show_hour,
        );
        state
    }

    #[test]
    fn test_load_splits_12_hour_clock() {
        let mut state = TimePickerPopupState::default();
        state.load(NaiveTime::from_hms_opt(15, 20, 5).unwrap(), true, true);
        assert_eq!((state.hour, state.am_pm), (3, AmPm::Pm));
        assert_eq!(state.hour24(true), 15);
        assert_eq!(state.time(true), NaiveTime::from_hms_opt(15, 20, 5));

        state.load(NaiveTime::from_hms_opt(0, 5, 0).unwrap(), true, true);
        assert_eq!((state.hour, state.am_pm), (0, AmPm::Am));
        assert_eq!(state.hour24(true), 0);
    }

    #[test]
    fn test_load_starts_on_minutes_without_hours() {
        let mut state = TimePickerPopupState::default();
        state.load(NaiveTime::from_hms_opt(10, 20, 30).unwrap(), false, false);
        assert_eq!(state.timeframe, TimeFrame::Minute);
        assert_eq!(state.hour24(false), 10);
    }

    #[test]
    fn test_disabled_selection_cannot_be_saved() {
        let config = config(
            TimePickerProps::new()
                .format("HH:mm:ss")
                .disabled_hours(|| vec![3])
                .disabled_minutes(|hour| if hour == 10 { vec![15] } else { vec![] })
                .disabled_seconds(|_, minute| if minute == 0 { vec![30] } else { vec![] }),
        );
        let popup = TimePickerPopup {
            config: &config,
            button_id: Id::new("picker"),
        };

        assert!(popup.selection_disabled(&loaded(&config, 3, 0, 0)));
        assert!(popup.selection_disabled(&loaded(&config, 10, 15, 0)));
        assert!(popup.selection_disabled(&loaded(&config, 10, 0, 30)));
        assert!(!popup.selection_disabled(&loaded(&config, 10, 16, 0)));
        assert!(!popup.selection_disabled(&loaded(&config, 11, 15, 0)));
        assert!(!popup.selection_disabled(&loaded(&config, 10, 1, 30)));
    }

    #[test]
    fn test_hidden_seconds_are_not_checked() {
        let config = config(
            TimePickerProps::new()
                .format("HH:mm")
                .disabled_seconds(|_, _| vec![30]),
        );
        let popup = TimePickerPopup {
            config: &config,
            button_id: Id::new("picker"),
        };
        assert!(!popup.selection_disabled(&loaded(&config, 10, 0, 30)));
    }

    #[test]
    fn test_disabled_options_on_12_hour_clock() {
        let config = config(
            TimePickerProps::new()
                .format("hh:mm A")
                .disabled_hours(|| vec![15])
                .disabled_minutes(|hour| if hour == 9 { vec![30] } else { vec![] }),
        );
        let popup = TimePickerPopup {
            config: &config,
            button_id: Id::new("picker"),
        };

        let afternoon = loaded(&config, 15, 0, 0);
        assert_eq!((afternoon.hour, afternoon.am_pm), (3, AmPm::Pm));
        assert!(popup.selection_disabled(&afternoon));
        assert!(popup.is_disabled(&afternoon, TimeFrame::Hour, 3));
        assert!(!popup.is_disabled(&afternoon, TimeFrame::Hour, 4));

        let morning = loaded(&config, 3, 0, 0);
        assert!(!popup.selection_disabled(&morning));
        assert!(!popup.is_disabled(&morning, TimeFrame::Hour, 3));

        // minutes are checked against the 24-hour hour
        assert!(popup.selection_disabled(&loaded(&config, 9, 30, 0)));
        assert!(!popup.selection_disabled(&loaded(&config, 21, 30, 0)));
    }
}
