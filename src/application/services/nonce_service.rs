//! Anti-forgery tokens bound to an action and a user.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

use crate::domain::action::AjaxAction;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of MAC kept in a nonce (20 hex characters).
const NONCE_BYTES: usize = 10;

/// Issues and verifies nonces.
///
/// A nonce is the truncated HMAC-SHA256 of `"{tick}|{action}|{user_id}"`,
/// keyed by a server secret. Time is divided into ticks of half the nonce
/// lifetime; a nonce verifies during the tick it was issued in and the one
/// after, so it lives between `lifetime / 2` and `lifetime`.
pub struct NonceService {
    secret: String,
    half_life_secs: i64,
}

impl NonceService {
    /// Creates a nonce service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key shared with the host platform
    /// - `lifetime` - maximum age of a nonce (rounded down to whole seconds, at least 2s)
    pub fn new(secret: String, lifetime: Duration) -> Self {
        let half_life_secs = (lifetime.as_secs() as i64 / 2).max(1);
        Self {
            secret,
            half_life_secs,
        }
    }

    /// Issues a nonce for `action` on behalf of `user_id`.
    pub fn create(&self, action: AjaxAction, user_id: i64) -> String {
        self.create_at(action, user_id, Utc::now().timestamp())
    }

    /// Verifies a nonce in constant time.
    pub fn verify(&self, action: AjaxAction, user_id: i64, nonce: &str) -> bool {
        self.verify_at(action, user_id, nonce, Utc::now().timestamp())
    }

    fn tick(&self, now: i64) -> i64 {
        // ceil(now / half_life)
        (now + self.half_life_secs - 1).div_euclid(self.half_life_secs)
    }

    fn mac(&self, tick: i64, action: AjaxAction, user_id: i64) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(format!("{}|{}|{}", tick, action.as_str(), user_id).as_bytes());
        mac
    }

    fn create_at(&self, action: AjaxAction, user_id: i64, now: i64) -> String {
        let tag = self.mac(self.tick(now), action, user_id).finalize().into_bytes();
        hex::encode(&tag[..NONCE_BYTES])
    }

    fn verify_at(&self, action: AjaxAction, user_id: i64, nonce: &str, now: i64) -> bool {
        let Ok(bytes) = hex::decode(nonce) else {
            return false;
        };
        if bytes.len() != NONCE_BYTES {
            return false;
        }

        let tick = self.tick(now);
        [tick, tick - 1].into_iter().any(|t| {
            self.mac(t, action, user_id)
                .verify_truncated_left(&bytes)
                .is_ok()
        })
    }
}
