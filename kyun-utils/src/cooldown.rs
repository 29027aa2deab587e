use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Per-user rate limit: one command use per window.
#[derive(Debug, Clone)]
pub struct Cooldowns {
    window: Duration,
    last_use: Arc<Mutex<HashMap<u64, Instant>>>,
}

impl Cooldowns {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_use: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a use by `user_id`, or return how long they still have to wait.
    pub async fn try_acquire(&self, user_id: u64) -> Result<(), Duration> {
        let now = Instant::now();
        let mut last_use = self.last_use.lock().await;

        if let Some(used_at) = last_use.get(&user_id) {
            let ready_at = *used_at + self.window;
            if ready_at > now {
                return Err(ready_at - now);
            }
        }

        last_use.retain(|_, used_at| *used_at + self.window > now);
        last_use.insert(user_id, now);
        Ok(())
    }
}

/// Human readable wait such as `1 minute 5 seconds`. Partial seconds round up.
pub fn format_wait(wait: Duration) -> String {
    let mut secs = wait.as_secs();
    if wait.subsec_nanos() > 0 {
        secs += 1;
    }

    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;

    let parts: Vec<String> = [(hours, "hour"), (minutes, "minute"), (seconds, "second")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            let plural = if value == 1 { "" } else { "s" };
            format!("{value} {unit}{plural}")
        })
        .collect();

    if parts.is_empty() {
        "0 seconds".to_owned()
    } else {
        parts.join(" ")
    }
}
