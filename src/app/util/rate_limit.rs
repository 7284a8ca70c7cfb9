use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Mutex,
    time::Duration,
};

use axum::{
    extract::{ConnectInfo, State},
    http::{header::RETRY_AFTER, HeaderValue, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::clock::{Clock, DefaultClock, Reference};

use crate::{
    app::{env::Envy, errors::DefaultApiError},
    AppState,
};

const DAY: Duration = Duration::from_secs(86_400);
const HOUR: Duration = Duration::from_secs(3_600);
const MINUTE: Duration = Duration::from_secs(60);

pub const DEFAULT_LIMIT_PER_DAY: u32 = 200;
pub const DEFAULT_LIMIT_PER_HOUR: u32 = 50;
pub const DEFAULT_LIMIT_PER_MINUTE: u32 = 10;
pub const DEFAULT_GENERATE_LIMIT_PER_MINUTE: u32 = 5;

struct Window {
    label: String,
    amount: u32,
    period: Duration,
}

#[derive(Clone, Copy)]
struct WindowState<I> {
    started_at: I,
    count: u32,
}

/// A set of fixed windows ("200 per day", "10 per minute", ...) that must
/// all admit a request. A window counts a client's requests from its first
/// one and resets once `period` has passed.
pub struct ClientRateLimiter<C: Clock = DefaultClock> {
    windows: Vec<Window>,
    clients: Mutex<HashMap<IpAddr, Vec<WindowState<C::Instant>>>>,
    clock: C,
}

impl ClientRateLimiter {
    pub fn new() -> Self {
        Self::with_clock(DefaultClock::default())
    }
}

impl Default for ClientRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ClientRateLimiter<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            windows: Vec::new(),
            clients: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Adds a window of `amount` requests per `period`. A zero amount
    /// leaves the window out.
    pub fn with_limit(mut self, amount: u32, period: Duration, label: &str) -> Self {
        if amount == 0 {
            return self;
        }

        self.windows.push(Window {
            label: format!("{} per {}", amount, label),
            amount,
            period,
        });
        self
    }

    /// Counts the request against every window, or rejects it without
    /// counting. On rejection returns how long until the blocking window
    /// resets.
    pub fn check(&self, ip: &IpAddr) -> Result<(), Duration> {
        let now = self.clock.now();
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        let states = clients.entry(*ip).or_insert_with(|| {
            self.windows
                .iter()
                .map(|_| WindowState {
                    started_at: now,
                    count: 0,
                })
                .collect()
        });

        let mut wait: Option<Duration> = None;

        for (window, state) in self.windows.iter().zip(states.iter_mut()) {
            let mut elapsed: Duration = now.duration_since(state.started_at).into();
            if elapsed >= window.period {
                state.started_at = now;
                state.count = 0;
                elapsed = Duration::ZERO;
            }

            if state.count >= window.amount {
                tracing::warn!("rate limit {} exceeded by {}", window.label, ip);
                let remaining = window.period.saturating_sub(elapsed);
                wait = Some(wait.map_or(remaining, |w| w.max(remaining)));
            }
        }

        if let Some(wait) = wait {
            return Err(wait);
        }

        for state in states.iter_mut() {
            state.count += 1;
        }

        Ok(())
    }

    /// Forgets clients whose windows have all reset. Returns how many
    /// clients are still tracked.
    pub fn retain_recent(&self) -> usize {
        let now = self.clock.now();
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        clients.retain(|_, states| {
            self.windows.iter().zip(states.iter()).any(|(window, state)| {
                let elapsed: Duration = now.duration_since(state.started_at).into();
                elapsed < window.period
            })
        });

        clients.len()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.windows.iter().map(|w| w.label.as_str()).collect()
    }
}

pub struct RateLimits {
    /// Applies to every route without its own limit.
    pub default: ClientRateLimiter,
    /// Replaces the default limits on image generation.
    pub generate: ClientRateLimiter,
}

impl RateLimits {
    pub fn from_envy(envy: &Envy) -> Self {
        let default = ClientRateLimiter::new()
            .with_limit(
                envy.rate_limit_per_day.unwrap_or(DEFAULT_LIMIT_PER_DAY),
                DAY,
                "day",
            )
            .with_limit(
                envy.rate_limit_per_hour.unwrap_or(DEFAULT_LIMIT_PER_HOUR),
                HOUR,
                "hour",
            )
            .with_limit(
                envy.rate_limit_per_minute
                    .unwrap_or(DEFAULT_LIMIT_PER_MINUTE),
                MINUTE,
                "minute",
            );

        let generate = ClientRateLimiter::new().with_limit(
            envy.generate_rate_limit_per_minute
                .unwrap_or(DEFAULT_GENERATE_LIMIT_PER_MINUTE),
            MINUTE,
            "minute",
        );

        Self { default, generate }
    }
}

pub async fn limit_default<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    enforce(&state.rate_limits.default, request, next).await
}

pub async fn limit_generate<B>(
    State(state): State<AppState>,
    request: Request<B>,
    next: Next<B>,
) -> Response {
    enforce(&state.rate_limits.generate, request, next).await
}

async fn enforce<B>(limiter: &ClientRateLimiter, request: Request<B>, next: Next<B>) -> Response {
    let ip = client_ip(&request);

    match limiter.check(&ip) {
        Ok(_) => next.run(request).await,
        Err(wait) => {
            let mut response = DefaultApiError::RateLimitExceeded.value().into_response();
            // round up so clients never retry before the window resets
            let retry_after = (wait.as_secs() + u64::from(wait.subsec_nanos() > 0)).max(1);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}

/// Peer address of the connection. Requests that did not come through a
/// socket (tests, in-process calls) share the unspecified address.
fn client_ip<B>(request: &Request<B>) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::env::test_envy;
    use governor::clock::FakeRelativeClock;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    fn limiter(clock: &FakeRelativeClock) -> ClientRateLimiter<FakeRelativeClock> {
        ClientRateLimiter::with_clock(clock.clone())
    }

    #[test]
    fn test_sixth_request_in_a_minute_is_rejected() {
        let limiter = ClientRateLimiter::new().with_limit(5, MINUTE, "minute");

        for _ in 0..5 {
            assert!(limiter.check(&ip(1)).is_ok());
        }

        let wait = limiter.check(&ip(1)).unwrap_err();
        assert!(wait > Duration::ZERO);
        assert!(wait <= MINUTE);
    }

    #[test]
    fn test_window_does_not_refill_before_it_resets() {
        let clock = FakeRelativeClock::default();
        let limiter = limiter(&clock).with_limit(5, MINUTE, "minute");

        for _ in 0..5 {
            assert!(limiter.check(&ip(1)).is_ok());
        }

        clock.advance(Duration::from_millis(12_100));
        let wait = limiter.check(&ip(1)).unwrap_err();
        assert_eq!(wait, Duration::from_millis(47_900));

        clock.advance(Duration::from_secs(47));
        assert!(limiter.check(&ip(1)).is_err());

        clock.advance(Duration::from_secs(1));
        for _ in 0..5 {
            assert!(limiter.check(&ip(1)).is_ok());
        }
        assert!(limiter.check(&ip(1)).is_err());
    }

    #[test]
    fn test_day_window_caps_total_requests() {
        let clock = FakeRelativeClock::default();
        let limiter = limiter(&clock).with_limit(200, DAY, "day");

        for _ in 0..200 {
            assert!(limiter.check(&ip(1)).is_ok());
            clock.advance(Duration::from_secs(60));
        }

        // 200 minutes in, the day has not reset
        assert!(limiter.check(&ip(1)).is_err());

        clock.advance(DAY);
        assert!(limiter.check(&ip(1)).is_ok());
    }

    #[test]
    fn test_rejected_requests_are_not_counted() {
        let clock = FakeRelativeClock::default();
        let limiter = limiter(&clock)
            .with_limit(5, HOUR, "hour")
            .with_limit(2, MINUTE, "minute");

        assert!(limiter.check(&ip(1)).is_ok());
        assert!(limiter.check(&ip(1)).is_ok());
        assert!(limiter.check(&ip(1)).is_err());
        assert!(limiter.check(&ip(1)).is_err());

        clock.advance(MINUTE);
        assert!(limiter.check(&ip(1)).is_ok());
        assert!(limiter.check(&ip(1)).is_ok());

        clock.advance(MINUTE);
        assert!(limiter.check(&ip(1)).is_ok());
        // hour window is now full: 5 counted, rejections excluded
        let wait = limiter.check(&ip(1)).unwrap_err();
        assert_eq!(wait, HOUR - MINUTE * 2);
    }

    #[test]
    fn test_clients_are_limited_independently() {
        let limiter = ClientRateLimiter::new().with_limit(2, MINUTE, "minute");

        assert!(limiter.check(&ip(1)).is_ok());
        assert!(limiter.check(&ip(1)).is_ok());
        assert!(limiter.check(&ip(1)).is_err());

        assert!(limiter.check(&ip(2)).is_ok());
    }

    #[test]
    fn test_strictest_window_wins() {
        let limiter = ClientRateLimiter::new()
            .with_limit(100, DAY, "day")
            .with_limit(3, HOUR, "hour")
            .with_limit(10, MINUTE, "minute");

        for _ in 0..3 {
            assert!(limiter.check(&ip(1)).is_ok());
        }
        assert!(limiter.check(&ip(1)).is_err());
    }

    #[test]
    fn test_zero_amount_disables_window() {
        let limiter = ClientRateLimiter::new().with_limit(0, MINUTE, "minute");
        assert!(limiter.labels().is_empty());

        for _ in 0..100 {
            assert!(limiter.check(&ip(1)).is_ok());
        }
    }

    #[test]
    fn test_default_has_no_windows() {
        let limiter = ClientRateLimiter::default();
        assert!(limiter.labels().is_empty());
        assert!(limiter.check(&ip(1)).is_ok());
    }

    #[test]
    fn test_from_envy_uses_defaults() {
        let limits = RateLimits::from_envy(&test_envy());

        assert_eq!(
            limits.default.labels(),
            vec!["200 per day", "50 per hour", "10 per minute"]
        );
        assert_eq!(limits.generate.labels(), vec!["5 per minute"]);
    }

    #[test]
    fn test_retain_recent_drops_reset_clients() {
        let clock = FakeRelativeClock::default();
        let limiter = limiter(&clock).with_limit(5, MINUTE, "minute");
        limiter.check(&ip(1)).unwrap();
        clock.advance(Duration::from_secs(30));
        limiter.check(&ip(2)).unwrap();

        assert_eq!(limiter.retain_recent(), 2);

        clock.advance(Duration::from_secs(31));
        assert_eq!(limiter.retain_recent(), 1);

        clock.advance(Duration::from_secs(30));
        assert_eq!(limiter.retain_recent(), 0);
    }
}
