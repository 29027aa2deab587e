//! Button rows for browser controls.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::navigation::NavAction;
use super::token::{SessionId, build_custom_id};
use super::view::{Control, ControlKind};

/// Discord allows at most five buttons per action row.
const BUTTONS_PER_ROW: usize = 5;

fn control_label(kind: ControlKind) -> String {
    match kind {
        ControlKind::Nav(NavAction::First) => "⏮".to_owned(),
        ControlKind::Nav(NavAction::Prev) => "◀".to_owned(),
        ControlKind::Nav(NavAction::Next) => "▶".to_owned(),
        ControlKind::Nav(NavAction::Last) => "⏭".to_owned(),
        ControlKind::Slot(slot) => (slot + 1).to_string(),
    }
}

fn control_style(kind: ControlKind) -> ButtonStyle {
    match kind {
        ControlKind::Nav(_) => ButtonStyle::Secondary,
        ControlKind::Slot(_) => ButtonStyle::Primary,
    }
}

/// Build button rows for a set of controls.
pub fn build_control_components(session_id: SessionId, controls: &[Control]) -> Vec<Component> {
    controls
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            Component::ActionRow(ActionRow {
                id: None,
                components: row
                    .iter()
                    .map(|control| {
                        Component::Button(Button {
                            id: None,
                            custom_id: Some(build_custom_id(session_id, control.kind)),
                            disabled: control.disabled,
                            emoji: None,
                            label: Some(control_label(control.kind)),
                            style: control_style(control.kind),
                            url: None,
                            sku_id: None,
                        })
                    })
                    .collect(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buttons(components: &[Component]) -> Vec<&Button> {
        components
            .iter()
            .flat_map(|component| match component {
                Component::ActionRow(row) => row.components.iter().collect::<Vec<_>>(),
                _ => Vec::new(),
            })
            .filter_map(|component| match component {
                Component::Button(button) => Some(button),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn builds_one_button_per_control() {
        let controls = [
            Control::enabled(ControlKind::Nav(NavAction::Prev)),
            Control::disabled(ControlKind::Nav(NavAction::Next)),
        ];
        let components = build_control_components(9, &controls);
        let built = buttons(&components);

        assert_eq!(components.len(), 1);
        assert_eq!(built.len(), 2);
        assert_eq!(built[0].custom_id.as_deref(), Some("kb:9:prev"));
        assert!(!built[0].disabled);
        assert!(built[1].disabled);
    }

    #[test]
    fn slot_buttons_are_numbered_from_one() {
        let controls: Vec<Control> = (0..5)
            .map(|slot| Control::enabled(ControlKind::Slot(slot)))
            .collect();
        let components = build_control_components(1, &controls);
        let labels: Vec<_> = buttons(&components)
            .iter()
            .filter_map(|button| button.label.clone())
            .collect();

        assert_eq!(labels, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn no_controls_build_no_rows() {
        assert!(build_control_components(1, &[]).is_empty());
    }
}
