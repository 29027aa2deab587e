//! Pure render descriptions shared by every browser flavour, and their
//! mapping onto Discord embeds and button rows.

use futures::future::BoxFuture;
use twilight_model::channel::message::component::Component;
use twilight_model::channel::message::embed::Embed;

use crate::embed::build_page_embed;

use super::components::build_control_components;
use super::navigation::NavAction;
use super::page::PageBody;
use super::token::SessionId;

/// Follow-up work produced by a terminal transition (e.g. a selection).
pub type Followup = BoxFuture<'static, anyhow::Result<()>>;

/// Which control a button represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Nav(NavAction),
    Slot(usize),
}

/// A rendered control and whether it can currently be pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub kind: ControlKind,
    pub disabled: bool,
}

impl Control {
    pub fn enabled(kind: ControlKind) -> Self {
        Self {
            kind,
            disabled: false,
        }
    }

    pub fn disabled(kind: ControlKind) -> Self {
        Self {
            kind,
            disabled: true,
        }
    }
}

/// One visible page of a render, with its optional footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub body: PageBody,
    pub footer: Option<String>,
}

/// Everything needed to draw a browser as a single updatable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    pub pages: Vec<RenderedPage>,
    pub controls: Vec<Control>,
}

impl BrowserView {
    /// Kinds of the controls in render order.
    pub fn control_kinds(&self) -> Vec<ControlKind> {
        self.controls.iter().map(|control| control.kind).collect()
    }

    /// Whether every control is rendered disabled.
    pub fn is_frozen(&self) -> bool {
        self.controls.iter().all(|control| control.disabled)
    }

    /// The same render with every control disabled.
    pub fn frozen(mut self) -> Self {
        for control in &mut self.controls {
            control.disabled = true;
        }
        self
    }
}

/// User input routed to a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserInput {
    Nav(NavAction),
    Select(usize),
}

impl From<ControlKind> for BrowserInput {
    fn from(kind: ControlKind) -> Self {
        match kind {
            ControlKind::Nav(action) => Self::Nav(action),
            ControlKind::Slot(slot) => Self::Select(slot),
        }
    }
}

/// Result of applying one input to a browser.
pub enum Transition {
    /// State changed (or was re-confirmed); redraw with this view.
    Rerender(BrowserView),
    /// The browser reached a terminal state and must be torn down.
    Finished {
        view: BrowserView,
        followup: Option<Followup>,
    },
    /// Input does not apply; acknowledge without redrawing.
    Ignored,
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rerender(view) => f.debug_tuple("Rerender").field(view).finish(),
            Self::Finished { view, followup } => f
                .debug_struct("Finished")
                .field("view", view)
                .field("followup", &followup.is_some())
                .finish(),
            Self::Ignored => f.write_str("Ignored"),
        }
    }
}

/// Stateful browser driven by button interactions.
pub trait Browser: Send {
    /// Render the current state.
    fn render(&self) -> BrowserView;

    /// Apply one input. Disabled browsers always return [`Transition::Ignored`].
    fn apply(&mut self, input: BrowserInput) -> Transition;

    /// Move into the disabled terminal state.
    ///
    /// Returns the frozen view the first time only.
    fn disable(&mut self) -> Option<BrowserView>;

    fn is_disabled(&self) -> bool;
}

/// Build the embeds and button rows for a browser view.
pub fn build_browser_message(
    session_id: SessionId,
    view: &BrowserView,
) -> anyhow::Result<(Vec<Embed>, Vec<Component>)> {
    let embeds = view
        .pages
        .iter()
        .map(|page| build_page_embed(&page.body, page.footer.as_deref()))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let components = build_control_components(session_id, &view.controls);

    Ok((embeds, components))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_view_keeps_pages_and_disables_every_control() {
        let view = BrowserView {
            pages: vec![RenderedPage {
                body: PageBody::new("Watching list"),
                footer: Some("Page 1 of 2".to_owned()),
            }],
            controls: vec![
                Control::enabled(ControlKind::Nav(NavAction::Prev)),
                Control::disabled(ControlKind::Nav(NavAction::First)),
                Control::enabled(ControlKind::Slot(0)),
            ],
        };
        assert!(!view.is_frozen());

        let frozen = view.clone().frozen();
        assert!(frozen.is_frozen());
        assert_eq!(frozen.pages, view.pages);
        assert_eq!(frozen.control_kinds(), view.control_kinds());
    }
}
