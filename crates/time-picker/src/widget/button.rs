use egui::{Align2, Area, Button, Frame, InnerResponse, Key, Order, Pos2, Rect, RichText, Vec2};

use super::popup::TimePickerPopup;
use super::WidgetEvent;
use crate::adapter::WidgetConfig;
use crate::props::Placement;

#[derive(Default, Clone, serde::Deserialize, serde::Serialize)]
pub(crate) struct TimePickerButtonState {
    pub picker_visible: bool,
}

pub struct ButtonOutput {
    pub response: egui::Response,
    pub event: Option<WidgetEvent>,
}

pub struct TimePickerButton<'a> {
    config: &'a WidgetConfig,
}

impl<'a> TimePickerButton<'a> {
    pub fn new(config: &'a WidgetConfig) -> Self {
        Self { config }
    }

    pub fn show(self, ui: &mut egui::Ui) -> ButtonOutput {
        let config = self.config;
        let id = ui.make_persistent_id(config.props.id_salt.as_deref());
        let mut button_state = ui
            .data_mut(|data| data.get_persisted::<TimePickerButtonState>(id))
            .unwrap_or_default();

        if config.props.disabled && button_state.picker_visible {
            button_state.picker_visible = false;
            ui.data_mut(|data| data.insert_persisted(id, button_state.clone()));
        }

        let size = config.props.size.unwrap_or_default();
        let (label, is_placeholder) = match config.display_text() {
            Some(text) => (text, false),
            None => (config.placeholder.clone(), true),
        };
        let mut text = RichText::new(format!("{label} 🕒")).size(size.text_size());
        if is_placeholder {
            text = text.color(ui.visuals().weak_text_color());
        }

        let visuals = ui.visuals().widgets.open;
        if button_state.picker_visible {
            text = text.color(visuals.text_color());
        }

        let mut button = Button::new(text);
        if button_state.picker_visible {
            button = button.fill(visuals.weak_bg_fill).stroke(visuals.bg_stroke);
        }

        let mut event = None;
        let mut button_response = ui
            .horizontal(|ui| {
                let response = ui.add_enabled(!config.props.disabled, button);
                if config.value.is_some()
                    && !config.props.disabled
                    && ui.small_button("✖").on_hover_text("Clear").clicked()
                {
                    event = Some(WidgetEvent::Cleared);
                }
                response
            })
            .inner;

        if button_response.clicked() {
            button_state.picker_visible = true;
            ui.data_mut(|data| data.insert_persisted(id, button_state.clone()));
        }

        if button_state.picker_visible {
            let width = 250.;
            let width_with_padding = width
                + ui.style().spacing.item_spacing.x
                + ui.style().spacing.window_margin.leftf()
                + ui.style().spacing.window_margin.rightf();

            let (pos, pivot) = popup_anchor(
                config.props.placement,
                button_response.rect,
                width_with_padding,
                ui.clip_rect(),
                config.props.offset,
            );

            let InnerResponse {
                inner: picked,
                response: area_response,
            } = Area::new(id.with("area"))
                .kind(egui::UiKind::Picker)
                .order(Order::Foreground)
                .pivot(pivot)
                .fixed_pos(pos)
                .show(ui.ctx(), |ui| {
                    let frame = Frame::popup(ui.style());
                    frame
                        .show(ui, |ui| {
                            ui.set_min_width(width);
                            ui.set_max_width(width);

                            TimePickerPopup {
                                config,
                                button_id: id,
                            }
                            .draw(ui)
                        })
                        .inner
                });

            if let Some(value) = picked {
                event = Some(WidgetEvent::Selected(value));
            }

            let any_popup_open = ui.ctx().is_popup_open();
            if !button_response.clicked()
                && !any_popup_open
                && (ui.input(|i| i.key_pressed(Key::Escape)) || area_response.clicked_elsewhere())
            {
                button_state.picker_visible = false;
                ui.data_mut(|data| data.insert_persisted(id, button_state));
            }
        }

        if event.is_some() {
            button_response.mark_changed();
        }

        ButtonOutput {
            response: button_response,
            event,
        }
    }
}

/// Where to pin the popup and which of its corners goes there.
///
/// Left placements flip to the right when the popup would leave `clip`, and
/// the other way round. The vertical part of `offset` is mirrored for top
/// placements so the popup overlaps the button the same way on both sides.
pub fn popup_anchor(
    placement: Placement,
    anchor: Rect,
    popup_width: f32,
    clip: Rect,
    offset: Vec2,
) -> (Pos2, Align2) {
    let fits_right = anchor.left() + popup_width <= clip.right();
    let fits_left = anchor.right() - popup_width >= clip.left();
    let placement = match placement {
        Placement::BottomLeft if !fits_right && fits_left => Placement::BottomRight,
        Placement::TopLeft if !fits_right && fits_left => Placement::TopRight,
        Placement::BottomRight if !fits_left && fits_right => Placement::BottomLeft,
        Placement::TopRight if !fits_left && fits_right => Placement::TopLeft,
        other => other,
    };

    let (pos, pivot) = match placement {
        Placement::BottomLeft => (anchor.left_bottom(), Align2::LEFT_TOP),
        Placement::BottomRight => (anchor.right_bottom(), Align2::RIGHT_TOP),
        Placement::TopLeft => (anchor.left_top(), Align2::LEFT_BOTTOM),
        Placement::TopRight => (anchor.right_top(), Align2::RIGHT_BOTTOM),
    };
    let offset = match placement {
        Placement::TopLeft | Placement::TopRight => Vec2::new(offset.x, -offset.y),
        Placement::BottomLeft | Placement::BottomRight => offset,
    };
    (pos + offset, pivot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn anchor_at(x: f32) -> Rect {
        Rect::from_min_size(pos2(x, 100.), Vec2::new(120., 24.))
    }

    #[test]
    fn test_popup_anchor_default_placement() {
        let clip = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        let (pos, pivot) = popup_anchor(
            Placement::BottomLeft,
            anchor_at(10.),
            270.,
            clip,
            Vec2::new(0., -2.),
        );
        assert_eq!(pos, pos2(10., 122.));
        assert_eq!(pivot, Align2::LEFT_TOP);
    }

    #[test]
    fn test_popup_anchor_flips_near_right_edge() {
        let clip = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        let (pos, pivot) = popup_anchor(
            Placement::BottomLeft,
            anchor_at(650.),
            270.,
            clip,
            Vec2::ZERO,
        );
        assert_eq!(pos, pos2(770., 124.));
        assert_eq!(pivot, Align2::RIGHT_TOP);
    }

    #[test]
    fn test_popup_anchor_top_mirrors_offset() {
        let clip = Rect::from_min_size(Pos2::ZERO, Vec2::new(800., 600.));
        let (pos, pivot) = popup_anchor(
            Placement::TopRight,
            anchor_at(400.),
            270.,
            clip,
            Vec2::new(0., -2.),
        );
        assert_eq!(pos, pos2(520., 102.));
        assert_eq!(pivot, Align2::RIGHT_BOTTOM);
    }
}
