// src/batch.rs
//! Sequential batch driver.
//!
//! Identifiers are processed strictly one at a time with a fixed
//! pacing delay after each, because the remote endpoint rate-limits a
//! single client across the whole batch. One driver backs all three
//! entry points (lookup+redeem, lookup only, redeem over existing
//! records).

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tokio::time::sleep;
use tracing::{error, info};

use crate::api::{GiftCodeApi, PlayerProfile};
use crate::Error;

/// Delay enforced after every identifier, regardless of outcome.
pub const PACING: Duration = Duration::from_secs(2);

/// Splits the raw comma-separated identifier list. Tokens are trimmed;
/// empty tokens are dropped; duplicates are kept.
pub fn parse_fids(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRecord {
    pub fid: String,
    pub nickname: String,
    pub avatar_image: String,
    /// Redemption outcome, verbatim from the remote service. Empty
    /// until a redemption attempt for this fid completes.
    pub msg: String,
}

impl From<PlayerProfile> for PlayerRecord {
    fn from(p: PlayerProfile) -> Self {
        Self {
            fid: p.fid,
            nickname: p.nickname,
            avatar_image: p.avatar_image,
            msg: String::new(),
        }
    }
}

/// Ordered map keyed by fid: a sequence preserving insertion order plus
/// an index for patching a record's `msg` in place. A fid is never
/// duplicated; re-inserting replaces the existing record.
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    records: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl BatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: PlayerRecord) {
        match self.index.get(&record.fid) {
            Some(&i) => self.records[i] = record,
            None => {
                self.index.insert(record.fid.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn set_msg(&mut self, fid: &str, msg: String) {
        if let Some(&i) = self.index.get(fid) {
            self.records[i].msg = msg;
        }
    }

    pub fn contains(&self, fid: &str) -> bool {
        self.index.contains_key(fid)
    }

    pub fn get(&self, fid: &str) -> Option<&PlayerRecord> {
        self.index.get(fid).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Completed,
    Aborted,
}

/// Outcome of one orchestration run: the accumulated records (partial
/// if the run aborted) and, on abort, the error text for display.
#[derive(Debug)]
pub struct BatchReport {
    pub result: BatchResult,
    pub state: RunState,
    pub error: Option<String>,
}

pub struct BatchRunner {
    api: GiftCodeApi,
    pacing: Duration,
}

impl BatchRunner {
    pub fn new(api: GiftCodeApi) -> Self {
        Self {
            api,
            pacing: PACING,
        }
    }

    pub fn with_pacing(api: GiftCodeApi, pacing: Duration) -> Self {
        Self { api, pacing }
    }

    /// Looks up each fid and redeems `gift_code` for every fid that
    /// resolved to a profile. A fid with no profile is skipped; a
    /// transport failure aborts the run with whatever was accumulated.
    pub async fn redeem_all(&self, fids: &[String], gift_code: &str) -> BatchReport {
        self.drive(fids.to_vec(), BatchResult::new(), true, Some(gift_code))
            .await
    }

    /// Lookup-only pass: resolves profiles without redeeming.
    pub async fn fetch_profiles(&self, fids: &[String]) -> BatchReport {
        self.drive(fids.to_vec(), BatchResult::new(), true, None).await
    }

    /// Redemption-only pass over records from an earlier lookup run.
    /// Does not touch the player endpoint; patches each record's `msg`
    /// in place. Uses a fresh per-run timestamp.
    pub async fn redeem_fetched(&self, result: BatchResult, gift_code: &str) -> BatchReport {
        let fids: Vec<String> = result.records().iter().map(|r| r.fid.clone()).collect();
        self.drive(fids, result, false, Some(gift_code)).await
    }

    async fn drive(
        &self,
        fids: Vec<String>,
        mut result: BatchResult,
        lookup: bool,
        gift_code: Option<&str>,
    ) -> BatchReport {
        // One timestamp per run, shared by every request in it.
        let time = Utc::now().timestamp_millis().to_string();

        for fid in &fids {
            if let Err(e) = self
                .process_one(fid, &mut result, lookup, gift_code, &time)
                .await
            {
                // Transport failure anywhere halts the whole run; only
                // a logical "no profile" response skips a single fid.
                error!("batch aborted at fid {fid}: {e}");
                return BatchReport {
                    result,
                    state: RunState::Aborted,
                    error: Some(e.to_string()),
                };
            }
            sleep(self.pacing).await;
        }

        BatchReport {
            result,
            state: RunState::Completed,
            error: None,
        }
    }

    async fn process_one(
        &self,
        fid: &str,
        result: &mut BatchResult,
        lookup: bool,
        gift_code: Option<&str>,
        time: &str,
    ) -> Result<(), Error> {
        if lookup {
            match self.api.lookup_player(fid, time).await? {
                Some(profile) => {
                    info!("resolved fid {fid} => {}", profile.nickname);
                    result.insert(PlayerRecord::from(profile));
                }
                // No profile, no redemption attempt, no record.
                None => return Ok(()),
            }
        }

        if let Some(code) = gift_code {
            if result.contains(fid) {
                let msg = self.api.redeem(fid, code, time).await?;
                info!("redeemed for fid {fid}: {msg}");
                result.set_msg(fid, msg);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fids_trims_and_drops_empties() {
        let fids = parse_fids(" 123, 456 ,,789 ");
        assert_eq!(fids, vec!["123", "456", "789"]);
    }

    #[test]
    fn batch_result_patches_in_place_without_duplicating() {
        let mut result = BatchResult::new();
        result.insert(PlayerRecord {
            fid: "1".into(),
            nickname: "alpha".into(),
            avatar_image: "http://a/1.png".into(),
            msg: String::new(),
        });
        result.insert(PlayerRecord {
            fid: "2".into(),
            nickname: "beta".into(),
            avatar_image: "http://a/2.png".into(),
            msg: String::new(),
        });
        result.set_msg("1", "SUCCESS".into());

        assert_eq!(result.len(), 2);
        assert_eq!(result.records()[0].fid, "1");
        assert_eq!(result.records()[0].msg, "SUCCESS");
        assert_eq!(result.records()[1].msg, "");
        assert!(result.get("3").is_none());
    }
}
