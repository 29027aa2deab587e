//! Component custom-ID encoding for browser controls.

use super::navigation::NavAction;
use super::view::ControlKind;

/// Prefix shared by every browser control custom ID.
pub const TOKEN_PREFIX: &str = "kb";

/// Identifier of a live browser session.
pub type SessionId = u64;

/// Parsed browser control custom ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlToken {
    pub session_id: SessionId,
    pub control: ControlKind,
}

/// Build the custom ID for one control of a session.
pub fn build_custom_id(session_id: SessionId, control: ControlKind) -> String {
    match control {
        ControlKind::Nav(action) => format!("{TOKEN_PREFIX}:{session_id}:{}", action.as_str()),
        ControlKind::Slot(slot) => format!("{TOKEN_PREFIX}:{session_id}:s{slot}"),
    }
}

/// Parse a browser control custom ID.
pub fn parse_custom_id(custom_id: &str) -> Option<ControlToken> {
    let mut parts = custom_id.split(':');

    let prefix = parts.next()?;
    if prefix != TOKEN_PREFIX {
        return None;
    }

    let session_id = parts.next()?.parse::<SessionId>().ok()?;
    let raw_control = parts.next()?;

    if parts.next().is_some() {
        return None;
    }

    let control = match raw_control.strip_prefix('s') {
        Some(slot) if !slot.is_empty() && slot.bytes().all(|b| b.is_ascii_digit()) => {
            ControlKind::Slot(slot.parse::<usize>().ok()?)
        }
        _ => ControlKind::Nav(NavAction::parse(raw_control)?),
    };

    Some(ControlToken {
        session_id,
        control,
    })
}

/// Whether a custom ID belongs to a browser control.
pub fn is_browser_custom_id(custom_id: &str) -> bool {
    custom_id
        .strip_prefix(TOKEN_PREFIX)
        .is_some_and(|rest| rest.starts_with(':'))
}
