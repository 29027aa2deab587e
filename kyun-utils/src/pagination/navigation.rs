//! Wrap-around page navigation over a fixed [`PageSet`].

use super::BrowserError;
use super::page::PageSet;
use super::view::{Browser, BrowserInput, BrowserView, Control, ControlKind, RenderedPage, Transition};

/// Navigation buttons of a paged browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    First,
    Prev,
    Next,
    Last,
}

impl NavAction {
    /// Stable token used in component custom IDs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "first" => Some(Self::First),
            "prev" => Some(Self::Prev),
            "next" => Some(Self::Next),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Current position of a navigator. `Disabled` is terminal and keeps the
/// last index only for the frozen render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Active { index: usize },
    Disabled { index: usize },
}

impl NavigationState {
    pub fn index(self) -> usize {
        match self {
            Self::Active { index } | Self::Disabled { index } => index,
        }
    }
}

/// Page browser with first/prev/next/last controls.
#[derive(Debug, Clone)]
pub struct Navigator {
    pages: PageSet,
    state: NavigationState,
    show_all_controls: bool,
}

impl Navigator {
    /// Create a navigator positioned on the first page.
    ///
    /// Empty page sets are rejected: there is nothing to browse.
    pub fn new(pages: PageSet, show_all_controls: bool) -> Result<Self, BrowserError> {
        if pages.is_empty() {
            return Err(BrowserError::EmptyResult);
        }

        Ok(Self {
            pages,
            state: NavigationState::Active { index: 0 },
            show_all_controls,
        })
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.index()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Target index for `action` from `index` in a set of `len` pages.
    fn target(action: NavAction, index: usize, len: usize) -> usize {
        match action {
            NavAction::First => 0,
            NavAction::Prev => (index + len - 1) % len,
            NavAction::Next => (index + 1) % len,
            NavAction::Last => len - 1,
        }
    }

    /// Move according to `action`. Returns `None` once disabled.
    pub fn navigate(&mut self, action: NavAction) -> Option<BrowserView> {
        let NavigationState::Active { index } = self.state else {
            return None;
        };

        let next = Self::target(action, index, self.pages.len());
        self.state = NavigationState::Active { index: next };
        Some(self.render())
    }

    /// Controls for the current state.
    ///
    /// First/Last only appear with `show_all_controls` and more than one
    /// page; Prev/Next are always shown but disabled for a single page.
    pub fn controls(&self) -> Vec<Control> {
        let frozen = matches!(self.state, NavigationState::Disabled { .. });
        let single = self.pages.len() <= 1;
        let with_edges = self.show_all_controls && !single;

        let mut actions = Vec::with_capacity(4);
        if with_edges {
            actions.push(NavAction::First);
        }
        actions.push(NavAction::Prev);
        actions.push(NavAction::Next);
        if with_edges {
            actions.push(NavAction::Last);
        }

        actions
            .into_iter()
            .map(|action| Control {
                kind: ControlKind::Nav(action),
                disabled: frozen || single,
            })
            .collect()
    }
}

impl Browser for Navigator {
    fn render(&self) -> BrowserView {
        let pages = self
            .pages
            .get(self.current_index())
            .map(|page| RenderedPage {
                body: page.body().clone(),
                footer: Some(page.footer()),
            })
            .into_iter()
            .collect();

        BrowserView {
            pages,
            controls: self.controls(),
        }
    }

    fn apply(&mut self, input: BrowserInput) -> Transition {
        match input {
            BrowserInput::Nav(action) => self
                .navigate(action)
                .map_or(Transition::Ignored, Transition::Rerender),
            BrowserInput::Select(_) => Transition::Ignored,
        }
    }

    fn disable(&mut self) -> Option<BrowserView> {
        let NavigationState::Active { index } = self.state else {
            return None;
        };

        self.state = NavigationState::Disabled { index };
        Some(self.render())
    }

    fn is_disabled(&self) -> bool {
        matches!(self.state, NavigationState::Disabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::page::{PageBody, chunk_entries, list_page_template};

    fn pages(count: usize) -> PageSet {
        PageSet::from_bodies(
            (1..=count)
                .map(|index| PageBody::new(format!("page {index}")))
                .collect(),
        )
    }

    fn navigator(count: usize, show_all: bool) -> Navigator {
        Navigator::new(pages(count), show_all).expect("non-empty page set")
    }

    #[test]
    fn empty_page_set_is_rejected() {
        let empty = chunk_entries(&[], 10, list_page_template("Nothing"));
        assert_eq!(
            Navigator::new(empty, true).unwrap_err(),
            BrowserError::EmptyResult
        );
    }

    #[test]
    fn next_wraps_back_to_start() {
        for len in 1..=7 {
            let mut nav = navigator(len, true);
            for _ in 0..len {
                nav.navigate(NavAction::Next);
            }
            assert_eq!(nav.current_index(), 0);
        }
    }

    #[test]
    fn prev_cycle_returns_to_origin() {
        for len in 1..=7 {
            for start in 0..len {
                let mut nav = navigator(len, false);
                for _ in 0..start {
                    nav.navigate(NavAction::Next);
                }
                for _ in 0..len {
                    nav.navigate(NavAction::Prev);
                }
                assert_eq!(nav.current_index(), start);
            }
        }
    }

    #[test]
    fn prev_from_first_page_wraps_to_last() {
        let mut nav = navigator(4, false);
        nav.navigate(NavAction::Prev);
        assert_eq!(nav.current_index(), 3);
    }

    #[test]
    fn first_and_last_jump_to_edges() {
        for len in 1..=6 {
            for start in 0..len {
                let mut nav = navigator(len, true);
                for _ in 0..start {
                    nav.navigate(NavAction::Next);
                }
                nav.navigate(NavAction::Last);
                assert_eq!(nav.current_index(), len - 1);
                nav.navigate(NavAction::First);
                assert_eq!(nav.current_index(), 0);
            }
        }
    }

    #[test]
    fn single_page_keeps_disabled_prev_next() {
        let mut nav = navigator(1, true);
        let view = nav.render();

        assert_eq!(
            view.control_kinds(),
            vec![
                ControlKind::Nav(NavAction::Prev),
                ControlKind::Nav(NavAction::Next)
            ]
        );
        assert!(view.is_frozen());

        nav.navigate(NavAction::Next);
        nav.navigate(NavAction::Prev);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn edge_controls_follow_show_all_flag() {
        let compact = navigator(3, false).render();
        assert_eq!(
            compact.control_kinds(),
            vec![
                ControlKind::Nav(NavAction::Prev),
                ControlKind::Nav(NavAction::Next)
            ]
        );

        let full = navigator(3, true).render();
        assert_eq!(
            full.control_kinds(),
            vec![
                ControlKind::Nav(NavAction::First),
                ControlKind::Nav(NavAction::Prev),
                ControlKind::Nav(NavAction::Next),
                ControlKind::Nav(NavAction::Last),
            ]
        );
        assert!(full.controls.iter().all(|control| !control.disabled));
    }

    #[test]
    fn render_shows_current_page_footer() {
        let entries: Vec<String> = (1..=23).map(|index| format!("entry {index}")).collect();
        let set = chunk_entries(&entries, 10, list_page_template("List"));
        let mut nav = Navigator::new(set, false).expect("pages");

        let view = nav.navigate(NavAction::Last).expect("active");
        assert_eq!(view.pages.len(), 1);
        assert_eq!(view.pages[0].footer.as_deref(), Some("Page 3 of 3"));
    }

    #[test]
    fn disabled_navigator_ignores_transitions() {
        let mut nav = navigator(5, true);
        nav.navigate(NavAction::Next);

        let frozen = nav.disable().expect("first disable renders");
        assert!(frozen.is_frozen());
        assert!(nav.disable().is_none());

        assert!(nav.navigate(NavAction::Next).is_none());
        assert!(matches!(
            nav.apply(BrowserInput::Nav(NavAction::Last)),
            Transition::Ignored
        ));
        assert_eq!(nav.state(), NavigationState::Disabled { index: 1 });
    }

    #[test]
    fn slot_input_is_ignored() {
        let mut nav = navigator(3, true);
        assert!(matches!(nav.apply(BrowserInput::Select(0)), Transition::Ignored));
        assert_eq!(nav.current_index(), 0);
    }
}
