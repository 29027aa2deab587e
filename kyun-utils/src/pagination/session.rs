//! Owner-bound, time-limited browser sessions.
//!
//! Every session owns one browser and one expiry timer. The timer is armed
//! when the session opens and is never reset by interactions. Expiry,
//! selection and cancellation are terminal and release the timer.

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use super::token::SessionId;
use super::view::{Browser, BrowserInput, BrowserView, Followup, Transition};

/// Location of the message a session is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub channel_id: u64,
    pub message_id: u64,
}

/// Notification published when a session times out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionExpired {
    pub session_id: SessionId,
    pub message: Option<MessageRef>,
    pub view: BrowserView,
}

/// Outcome of routing one interaction to a session.
pub enum InteractionOutcome {
    /// Accepted; redraw the message with this view.
    Rerender(BrowserView),
    /// Accepted and terminal; redraw, then run the follow-up if any.
    Finished {
        view: BrowserView,
        followup: Option<Followup>,
    },
    /// Actor does not own the session. Nothing changed.
    WrongUser,
    /// Session expired, finished or never existed. Nothing changed.
    Stale,
    /// Input does not apply to this browser. Nothing changed.
    Ignored,
}

impl std::fmt::Debug for InteractionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rerender(view) => f.debug_tuple("Rerender").field(view).finish(),
            Self::Finished { view, followup } => f
                .debug_struct("Finished")
                .field("view", view)
                .field("followup", &followup.is_some())
                .finish(),
            Self::WrongUser => f.write_str("WrongUser"),
            Self::Stale => f.write_str("Stale"),
            Self::Ignored => f.write_str("Ignored"),
        }
    }
}

/// Expiry timer handle. Aborts the pending task when dropped.
struct SessionTimer {
    handle: Option<JoinHandle<()>>,
}

impl SessionTimer {
    /// Release the handle without aborting. Used by the timer task itself.
    fn detach(mut self) {
        self.handle.take();
    }
}

impl Drop for SessionTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

struct Session {
    owner: u64,
    browser: Box<dyn Browser>,
    message: Option<MessageRef>,
    timer: Option<SessionTimer>,
}

type SessionMap = HashMap<SessionId, Session>;

/// Low bits of a session id reserved for the per-process counter.
const SESSION_COUNTER_BITS: u32 = 20;

/// First session id of a registry started at `started_at_millis` (Unix time).
///
/// Ids embed the start time so buttons left over from an earlier process never
/// address a session of the current one.
pub fn first_session_id(started_at_millis: u64) -> SessionId {
    started_at_millis << SESSION_COUNTER_BITS
}

/// Registry of live sessions. Cheap to clone.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<SessionMap>>,
    next_id: Arc<AtomicU64>,
    expired_tx: mpsc::UnboundedSender<SessionExpired>,
    timeout: Duration,
}

impl SessionRegistry {
    /// Create a registry and the receiver of its expiry notifications.
    pub fn new(timeout: Duration) -> (Self, mpsc::UnboundedReceiver<SessionExpired>) {
        let started_at_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64);
        Self::starting_at(timeout, first_session_id(started_at_millis))
    }

    /// Create a registry whose first session gets `first_id`.
    pub fn starting_at(
        timeout: Duration,
        first_id: SessionId,
    ) -> (Self, mpsc::UnboundedReceiver<SessionExpired>) {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        let registry = Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(first_id.max(1))),
            expired_tx,
            timeout,
        };

        (registry, expired_rx)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Start a session for `owner` and arm its expiry timer.
    pub async fn open(&self, owner: u64, browser: Box<dyn Browser>) -> (SessionId, BrowserView) {
        let session_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let view = browser.render();

        let mut sessions = self.sessions.lock().await;
        let timer = self.arm_timer(session_id);
        sessions.insert(
            session_id,
            Session {
                owner,
                browser,
                message: None,
                timer: Some(timer),
            },
        );

        debug!(session_id, owner, "browser session opened");
        (session_id, view)
    }

    fn arm_timer(&self, session_id: SessionId) -> SessionTimer {
        let registry = self.clone();
        let deadline = Instant::now() + self.timeout;

        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            registry.expire(session_id).await;
        });

        SessionTimer {
            handle: Some(handle),
        }
    }

    /// Bind the rendered message so expiry can freeze it.
    ///
    /// Returns `false` when the session is already gone.
    pub async fn attach_message(&self, session_id: SessionId, message: MessageRef) -> bool {
        let mut sessions = self.sessions.lock().await;
        match sessions.get_mut(&session_id) {
            Some(session) => {
                session.message = Some(message);
                true
            }
            None => false,
        }
    }

    /// Route one interaction from `actor` to a session.
    pub async fn interact(
        &self,
        session_id: SessionId,
        actor: u64,
        input: BrowserInput,
    ) -> InteractionOutcome {
        let mut sessions = self.sessions.lock().await;

        let Some(session) = sessions.get_mut(&session_id) else {
            return InteractionOutcome::Stale;
        };

        if session.browser.is_disabled() {
            return InteractionOutcome::Stale;
        }

        if session.owner != actor {
            debug!(session_id, actor, owner = session.owner, "rejected foreign interaction");
            return InteractionOutcome::WrongUser;
        }

        match session.browser.apply(input) {
            Transition::Rerender(view) => InteractionOutcome::Rerender(view),
            Transition::Ignored => InteractionOutcome::Ignored,
            Transition::Finished { view, followup } => {
                sessions.remove(&session_id);
                debug!(session_id, "browser session finished");
                InteractionOutcome::Finished { view, followup }
            }
        }
    }

    /// Disable a session after its timeout and publish the frozen view.
    async fn expire(&self, session_id: SessionId) {
        let expired = {
            let mut sessions = self.sessions.lock().await;
            let Some(mut session) = sessions.remove(&session_id) else {
                return;
            };

            if let Some(timer) = session.timer.take() {
                timer.detach();
            }

            session.browser.disable().map(|view| SessionExpired {
                session_id,
                message: session.message,
                view,
            })
        };

        if let Some(expired) = expired {
            info!(session_id, "browser session expired");
            if self.expired_tx.send(expired).is_err() {
                debug!(session_id, "expiry listener closed");
            }
        }
    }

    /// Tear a session down and abort its timer.
    ///
    /// Returns `false` when the session is already gone.
    pub async fn cancel(&self, session_id: SessionId) -> bool {
        let removed = self.sessions.lock().await.remove(&session_id);
        if removed.is_some() {
            debug!(session_id, "browser session cancelled");
        }
        removed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::mpsc::error::TryRecvError;

    use super::*;
    use crate::pagination::navigation::{NavAction, Navigator};
    use crate::pagination::page::{PageBody, PageSet};
    use crate::pagination::selection::{Candidate, SelectionBrowser};

    const OWNER: u64 = 10;
    const STRANGER: u64 = 20;
    const TIMEOUT: Duration = Duration::from_secs(30);

    fn navigator(count: usize) -> Box<dyn Browser> {
        let pages = PageSet::from_bodies(
            (1..=count)
                .map(|index| PageBody::new(format!("page {index}")))
                .collect(),
        );
        Box::new(Navigator::new(pages, true).expect("pages"))
    }

    fn footer(view: &BrowserView) -> Option<&str> {
        view.pages.first().and_then(|page| page.footer.as_deref())
    }

    fn expect_rerender(outcome: InteractionOutcome) -> BrowserView {
        match outcome {
            InteractionOutcome::Rerender(view) => view,
            other => panic!("expected rerender, got {other:?}"),
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn owner_navigates_without_resetting_timer() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, view) = registry.open(OWNER, navigator(3)).await;
        assert_eq!(footer(&view), Some("Page 1 of 3"));

        tokio::time::advance(Duration::from_secs(20)).await;
        let outcome = registry
            .interact(id, OWNER, BrowserInput::Nav(NavAction::Next))
            .await;
        let view = expect_rerender(outcome);
        assert_eq!(footer(&view), Some("Page 2 of 3"));

        tokio::time::advance(Duration::from_secs(11)).await;
        settle().await;

        let expired = expired_rx.try_recv().expect("expired after fixed timeout");
        assert_eq!(expired.session_id, id);
        assert_eq!(footer(&expired.view), Some("Page 2 of 3"));
        assert!(expired.view.is_frozen());
    }

    #[tokio::test(start_paused = true)]
    async fn stranger_is_rejected_without_side_effects() {
        let (registry, _expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(3)).await;

        let outcome = registry
            .interact(id, STRANGER, BrowserInput::Nav(NavAction::Last))
            .await;
        assert!(matches!(outcome, InteractionOutcome::WrongUser));

        let outcome = registry
            .interact(id, OWNER, BrowserInput::Nav(NavAction::Next))
            .await;
        let view = expect_rerender(outcome);
        assert_eq!(footer(&view), Some("Page 2 of 3"));
    }

    #[tokio::test(start_paused = true)]
    async fn stranger_press_does_not_extend_timeout() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(3)).await;

        tokio::time::advance(Duration::from_secs(20)).await;
        let outcome = registry
            .interact(id, STRANGER, BrowserInput::Nav(NavAction::Next))
            .await;
        assert!(matches!(outcome, InteractionOutcome::WrongUser));

        tokio::time::advance(Duration::from_secs(9)).await;
        settle().await;
        assert!(matches!(expired_rx.try_recv(), Err(TryRecvError::Empty)));

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        let expired = expired_rx.try_recv().expect("expired 30s after open");
        assert_eq!(expired.session_id, id);
        assert_eq!(footer(&expired.view), Some("Page 1 of 3"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_counts_from_open_even_if_timer_starts_late() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(2)).await;

        tokio::time::advance(Duration::from_secs(25)).await;
        tokio::time::advance(Duration::from_secs(6)).await;
        settle().await;

        let expired = expired_rx.try_recv().expect("expired 30s after open");
        assert_eq!(expired.session_id, id);
        assert!(registry.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn ids_from_an_earlier_process_are_stale() {
        let started_at = 1_700_000_000_000;
        let (earlier, _earlier_rx) =
            SessionRegistry::starting_at(TIMEOUT, first_session_id(started_at));
        let (old_id, _) = earlier.open(OWNER, navigator(5)).await;
        drop(earlier);

        let (current, _current_rx) =
            SessionRegistry::starting_at(TIMEOUT, first_session_id(started_at + 1_000));
        let (new_id, _) = current.open(OWNER, navigator(5)).await;
        assert_ne!(old_id, new_id);

        let outcome = current
            .interact(old_id, OWNER, BrowserInput::Nav(NavAction::Last))
            .await;
        assert!(matches!(outcome, InteractionOutcome::Stale));
    }

    #[tokio::test(start_paused = true)]
    async fn message_cannot_bind_after_expiry() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(2)).await;

        tokio::time::advance(TIMEOUT).await;
        settle().await;

        let expired = expired_rx.try_recv().expect("expiry notification");
        assert_eq!(expired.message, None);
        let message = MessageRef {
            channel_id: 1,
            message_id: 2,
        };
        assert!(!registry.attach_message(id, message).await);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_freezes_message_and_rejects_everyone() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(2)).await;
        let message = MessageRef {
            channel_id: 1,
            message_id: 2,
        };
        assert!(registry.attach_message(id, message).await);

        tokio::time::advance(TIMEOUT).await;
        settle().await;

        let expired = expired_rx.try_recv().expect("expiry notification");
        assert_eq!(expired.message, Some(message));
        assert!(registry.is_empty().await);

        for actor in [OWNER, STRANGER] {
            let outcome = registry
                .interact(id, actor, BrowserInput::Nav(NavAction::Next))
                .await;
            assert!(matches!(outcome, InteractionOutcome::Stale));
        }

        tokio::time::advance(TIMEOUT * 2).await;
        settle().await;
        assert!(matches!(expired_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_aborts_pending_timer() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let (id, _) = registry.open(OWNER, navigator(2)).await;

        assert!(registry.cancel(id).await);
        assert!(!registry.cancel(id).await);
        assert!(!registry.attach_message(id, MessageRef { channel_id: 1, message_id: 1 }).await);

        tokio::time::advance(TIMEOUT * 2).await;
        settle().await;
        assert!(matches!(expired_rx.try_recv(), Err(TryRecvError::Empty)));

        let outcome = registry
            .interact(id, OWNER, BrowserInput::Nav(NavAction::Next))
            .await;
        assert!(matches!(outcome, InteractionOutcome::Stale));
    }

    #[tokio::test(start_paused = true)]
    async fn selection_finishes_session_before_timeout() {
        let (registry, mut expired_rx) = SessionRegistry::new(TIMEOUT);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in = Arc::clone(&calls);

        let candidates = (0..5)
            .map(|index| Candidate {
                id: index,
                preview: PageBody::new(format!("candidate {index}")),
                payload: (),
            })
            .collect();
        let browser = SelectionBrowser::new(
            candidates,
            Box::new(move |candidate: Candidate<()>| -> Followup {
                assert_eq!(candidate.id, 3);
                calls_in.fetch_add(1, Ordering::SeqCst);
                Box::pin(async { Ok(()) })
            }),
        )
        .expect("candidates");

        let (id, _) = registry.open(OWNER, Box::new(browser)).await;

        let outcome = registry.interact(id, OWNER, BrowserInput::Select(3)).await;
        let (view, followup) = match outcome {
            InteractionOutcome::Finished { view, followup } => (view, followup),
            other => panic!("expected finished, got {other:?}"),
        };
        assert!(view.is_frozen());
        followup.expect("followup").await.expect("followup ok");

        let outcome = registry.interact(id, OWNER, BrowserInput::Select(0)).await;
        assert!(matches!(outcome, InteractionOutcome::Stale));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(TIMEOUT * 2).await;
        settle().await;
        assert!(matches!(expired_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn sessions_are_independent() {
        let (registry, _expired_rx) = SessionRegistry::new(TIMEOUT);
        let (first, _) = registry.open(OWNER, navigator(3)).await;
        let (second, _) = registry.open(STRANGER, navigator(3)).await;
        assert_ne!(first, second);

        registry
            .interact(first, OWNER, BrowserInput::Nav(NavAction::Last))
            .await;
        let outcome = registry
            .interact(second, STRANGER, BrowserInput::Nav(NavAction::Next))
            .await;
        let view = expect_rerender(outcome);
        assert_eq!(footer(&view), Some("Page 2 of 3"));
        assert_eq!(registry.len().await, 2);
    }
}
