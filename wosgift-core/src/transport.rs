// src/transport.rs
//! One logical POST with bounded retry.
//!
//! Two failure classes with different waits share a single attempt
//! budget: 429 responses back off exponentially (the remote enforces a
//! rate limit), while connect/timeout failures retry after a fixed
//! delay. Any other error status is surfaced immediately.

use std::sync::Arc;
use tokio::time::sleep;
use tracing::warn;

use crate::api::ApiResponse;
use crate::http::HttpClient;
use crate::retry::{classify_error, classify_status, RetryClass, RetryPolicy};
use crate::Error;

#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
    policy: RetryPolicy,
}

impl Transport {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(client: Arc<dyn HttpClient>, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Issues the POST and parses the JSON body, retrying per the
    /// policy. At most one call is in flight at a time; the worst case
    /// for full rate-limit exhaustion is 1+2+4+8+16 = 31s of backoff.
    pub async fn post(&self, url: &str, form: &[(String, String)]) -> Result<ApiResponse, Error> {
        let mut attempt: u32 = 0;
        loop {
            match self.client.post_form(url, form).await {
                Ok(resp) if resp.is_success() => {
                    return Ok(serde_json::from_str(&resp.body)?);
                }
                Ok(resp) => match classify_status(resp.status) {
                    RetryClass::RateLimited => {
                        let wait = self.policy.rate_limit_backoff(attempt);
                        warn!(
                            "rate limited on {url}; waiting {}s before retry",
                            wait.as_secs()
                        );
                        sleep(wait).await;
                        attempt += 1;
                        if attempt >= self.policy.max_attempts {
                            return Err(Error::RateLimited { attempts: attempt });
                        }
                    }
                    _ => {
                        return Err(Error::Status {
                            status: resp.status,
                        });
                    }
                },
                Err(err) => match classify_error(&err) {
                    RetryClass::Transient => {
                        attempt += 1;
                        if attempt >= self.policy.max_attempts {
                            return Err(Error::Exhausted {
                                attempts: attempt,
                                last: err.to_string(),
                            });
                        }
                        warn!("request to {url} failed ({err}); retrying");
                        sleep(self.policy.transient_delay).await;
                    }
                    _ => return Err(err),
                },
            }
        }
    }
}
