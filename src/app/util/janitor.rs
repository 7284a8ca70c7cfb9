use std::{sync::Arc, time::Duration};

use tokio::{task, time::interval};

use super::rate_limit::RateLimits;

const SWEEP_INTERVAL: Duration = Duration::from_secs(600);

pub fn spawn(rate_limits: Arc<RateLimits>) {
    tracing::debug!("janitor spawned");

    task::spawn(async move {
        let mut interval = interval(SWEEP_INTERVAL);
        // first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            sweep(&rate_limits);
        }
    });
}

fn sweep(rate_limits: &RateLimits) {
    let tracked = rate_limits.default.retain_recent() + rate_limits.generate.retain_recent();
    tracing::debug!("rate limiter tracking {} client(s)", tracked);
}
