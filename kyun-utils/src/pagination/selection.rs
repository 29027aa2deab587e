//! Single-pick browser used to disambiguate a short list of candidates.

use super::page::PageBody;
use super::view::{
    Browser, BrowserInput, BrowserView, Control, ControlKind, Followup, RenderedPage, Transition,
};
use super::{BrowserError, MAX_CANDIDATES};

/// A selectable candidate. Buttons address candidates by position, not `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<P> {
    pub id: u64,
    pub preview: PageBody,
    pub payload: P,
}

/// Action run once with the picked candidate.
pub type Continuation<P> = Box<dyn FnOnce(Candidate<P>) -> Followup + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Open,
    Selected { slot: usize },
    Disabled,
}

/// Browser where picking a slot ends the session and runs a continuation.
pub struct SelectionBrowser<P> {
    candidates: Vec<Candidate<P>>,
    state: SelectionState,
    continuation: Option<Continuation<P>>,
}

impl<P> SelectionBrowser<P> {
    /// Build a selection over at most [`MAX_CANDIDATES`] candidates.
    ///
    /// Extra candidates are dropped from the tail; an empty list is rejected.
    pub fn new(
        mut candidates: Vec<Candidate<P>>,
        continuation: Continuation<P>,
    ) -> Result<Self, BrowserError> {
        if candidates.is_empty() {
            return Err(BrowserError::EmptyResult);
        }
        candidates.truncate(MAX_CANDIDATES);

        Ok(Self {
            candidates,
            state: SelectionState::Open,
            continuation: Some(continuation),
        })
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    fn controls(&self) -> Vec<Control> {
        let frozen = self.state != SelectionState::Open;
        (0..self.candidates.len())
            .map(|slot| Control {
                kind: ControlKind::Slot(slot),
                disabled: frozen,
            })
            .collect()
    }
}

impl<P: Clone + Send> SelectionBrowser<P> {
    /// Pick `slot`. Only the first valid pick runs the continuation.
    pub fn select(&mut self, slot: usize) -> Transition {
        if self.state != SelectionState::Open {
            return Transition::Ignored;
        }
        let Some(candidate) = self.candidates.get(slot).cloned() else {
            return Transition::Ignored;
        };

        self.state = SelectionState::Selected { slot };
        let followup = self.continuation.take().map(|run| run(candidate));

        Transition::Finished {
            view: self.render(),
            followup,
        }
    }
}

impl<P: Clone + Send> Browser for SelectionBrowser<P> {
    fn render(&self) -> BrowserView {
        let picked = match self.state {
            SelectionState::Selected { slot } => Some(slot),
            _ => None,
        };

        let pages = self
            .candidates
            .iter()
            .enumerate()
            .filter(|(slot, _)| picked.is_none_or(|chosen| chosen == *slot))
            .map(|(slot, candidate)| RenderedPage {
                body: candidate.preview.clone(),
                footer: Some(format!("Option {}", slot + 1)),
            })
            .collect();

        BrowserView {
            pages,
            controls: self.controls(),
        }
    }

    fn apply(&mut self, input: BrowserInput) -> Transition {
        match input {
            BrowserInput::Select(slot) => self.select(slot),
            BrowserInput::Nav(_) => Transition::Ignored,
        }
    }

    fn disable(&mut self) -> Option<BrowserView> {
        if self.state != SelectionState::Open {
            return None;
        }

        self.state = SelectionState::Disabled;
        self.continuation = None;
        Some(self.render())
    }

    fn is_disabled(&self) -> bool {
        self.state != SelectionState::Open
    }
}
