//! Login rate limiting
//!
//! Keyed limiter over client IPs, applied only to POST /login. Panels are
//! session-gated and not limited.

use std::net::IpAddr;
use std::num::NonZeroU32;

use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tracing::warn;

use crate::utils::errors::{EscolarError, Result};

pub struct LoginRateLimiter {
    limiter: RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>,
}

impl LoginRateLimiter {
    /// `attempts_per_minute` comes from validated settings and is never 0
    pub fn new(attempts_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(attempts_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(per_minute)),
        }
    }

    /// Check whether another login attempt from this address is allowed
    pub fn check(&self, addr: IpAddr) -> Result<()> {
        self.limiter.check_key(&addr).map_err(|_| {
            warn!(addr = %addr, "Login rate limit exceeded");
            EscolarError::RateLimitExceeded
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_allows_up_to_quota_then_rejects() {
        let limiter = LoginRateLimiter::new(3);
        let addr: IpAddr = "10.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.check(addr).is_ok());
        }
        assert_matches!(limiter.check(addr), Err(EscolarError::RateLimitExceeded));
    }

    #[test]
    fn test_addresses_are_limited_independently() {
        let limiter = LoginRateLimiter::new(1);
        let first: IpAddr = "10.0.0.1".parse().unwrap();
        let second: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check(first).is_ok());
        assert!(limiter.check(second).is_ok());
        assert!(limiter.check(first).is_err());
    }

    #[test]
    fn test_zero_config_falls_back_to_minimum() {
        // Validation rejects 0, but the constructor still has to be total
        let limiter = LoginRateLimiter::new(0);
        let addr: IpAddr = "10.0.0.3".parse().unwrap();
        assert!(limiter.check(addr).is_ok());
    }
}
