use super::CacheKey;
use crate::dns::forwarding::{MessageBuilder, ResponseParser};
use hickory_proto::op::Message;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(2048) {
    Some(n) => n,
    None => unreachable!(),
};

struct CacheEntry {
    message: Arc<Message>,
    expires_at: Instant,
}

/// Bounded, TTL-aware store of upstream responses.
///
/// - The TTL of an entry is the smallest answer TTL, raised to `min_ttl`.
/// - Reads hand out a copy rewritten for the new request, so ids are never echoed back.
/// - Expired entries are evicted when read.
/// - When full, the least recently used entry goes first.
pub struct ResponseCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    min_ttl: Duration,
}

impl ResponseCache {
    pub fn new(max_entries: usize, min_ttl_secs: u32) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(DEFAULT_CAPACITY);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            min_ttl: Duration::from_secs(u64::from(min_ttl_secs)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, request: &Message) -> Option<Message> {
        self.get_at(request, Instant::now())
    }

    pub fn put(&self, request: &Message, response: &Message) {
        self.put_at(request, response, Instant::now());
    }

    pub(crate) fn get_at(&self, request: &Message, now: Instant) -> Option<Message> {
        let key = CacheKey::from_request(request)?;

        let cached = {
            let mut entries = self.lock();
            match entries.get(&key) {
                Some(entry) if entry.expires_at > now => Arc::clone(&entry.message),
                Some(_) => {
                    entries.pop(&key);
                    debug!(key = %key, "Cache entry expired");
                    return None;
                }
                None => return None,
            }
        };

        Some(MessageBuilder::reply_from_cache(&cached, request))
    }

    pub(crate) fn put_at(&self, request: &Message, response: &Message, now: Instant) {
        let Some(key) = CacheKey::from_request(request) else {
            return;
        };

        let ttl = Duration::from_secs(u64::from(ResponseParser::min_answer_ttl(response)))
            .max(self.min_ttl);

        debug!(key = %key, ttl_secs = ttl.as_secs(), "Caching response");

        self.lock().put(
            key,
            CacheEntry {
                message: Arc::new(response.clone()),
                expires_at: now + ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }
}
