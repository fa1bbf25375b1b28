//! Memoized document-id → status map shared by every selector.

use tracing::{debug, warn};

use crate::error::Result;
use crate::model::StatusMap;
use crate::remote::IngestionRemote;

#[derive(Debug)]
pub struct StatusCache {
    limit: usize,
    refresh_tick: u64,
    cached: Option<(CacheKey, StatusMap)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheKey {
    limit: usize,
    tick: u64,
}

impl StatusCache {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            refresh_tick: 0,
            cached: None,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    pub fn refresh_tick(&self) -> u64 {
        self.refresh_tick
    }

    /// The next `get_or_fetch` goes back to the remote.
    pub fn invalidate(&mut self) {
        self.refresh_tick += 1;
    }

    /// Last successfully fetched map, fresh or not.
    pub fn current(&self) -> Option<&StatusMap> {
        self.cached.as_ref().map(|(_, map)| map)
    }

    pub fn is_fresh(&self) -> bool {
        self.cached.as_ref().is_some_and(|(key, _)| *key == self.key())
    }

    pub fn get_or_fetch<R: IngestionRemote + ?Sized>(&mut self, remote: &R) -> Result<&StatusMap> {
        let key = self.key();
        let map = match self.cached.take() {
            Some((cached_key, map)) if cached_key == key => map,
            previous => match remote.list_status(self.limit, None) {
                Ok(listing) => {
                    let map = StatusMap::from_rows(listing.rows());
                    debug!(docs = map.len(), tick = key.tick, "status map rebuilt");
                    map
                }
                Err(e) => {
                    warn!(error = %e, "status listing failed; keeping previous map");
                    self.cached = previous;
                    return Err(e);
                }
            },
        };
        Ok(&self.cached.insert((key, map)).1)
    }

    fn key(&self) -> CacheKey {
        CacheKey {
            limit: self.limit,
            tick: self.refresh_tick,
        }
    }
}

#[cfg(test)]
#[path = "tests/status_tests.rs"]
mod tests;
