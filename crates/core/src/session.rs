use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::ChatMessage;

/// Process-wide conversation memory, keyed by an opaque session id.
///
/// Implementations must keep two bounds: each transcript never exceeds the
/// configured history depth (oldest entries evicted first), and the number
/// of retained sessions never exceeds the capacity (least-recently-accessed
/// session evicted first). A session is created lazily on its first
/// recorded exchange and is never explicitly destroyed.
pub trait SessionStore: Send + Sync {
    /// Snapshot of the transcript for `session_id`, oldest first. Empty for
    /// an unknown session.
    fn transcript(&self, session_id: &str) -> Vec<ChatMessage>;

    /// Record one completed exchange. The user turn is appended before the
    /// assistant turn, and trimming to the history bound happens in the
    /// same critical section.
    fn append_exchange(&self, session_id: &str, user_content: &str, assistant_content: &str);

    fn session_count(&self) -> usize;
}

struct SessionEntry {
    transcript: Vec<ChatMessage>,
    last_access: u64,
}

struct StoreInner {
    sessions: HashMap<String, SessionEntry>,
    access_clock: u64,
}

/// Volatile in-memory store. State lives for the process lifetime only.
pub struct InMemorySessionStore {
    inner: Mutex<StoreInner>,
    max_history: usize,
    capacity: usize,
}

impl InMemorySessionStore {
    pub fn new(max_history: usize, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner { sessions: HashMap::new(), access_clock: 0 }),
            max_history,
            capacity,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn transcript(&self, session_id: &str) -> Vec<ChatMessage> {
        let mut inner = self.lock();
        inner.access_clock += 1;
        let clock = inner.access_clock;

        match inner.sessions.get_mut(session_id) {
            Some(entry) => {
                entry.last_access = clock;
                entry.transcript.clone()
            }
            None => Vec::new(),
        }
    }

    fn append_exchange(&self, session_id: &str, user_content: &str, assistant_content: &str) {
        let mut inner = self.lock();
        inner.access_clock += 1;
        let clock = inner.access_clock;

        let entry = inner
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry { transcript: Vec::new(), last_access: clock });
        entry.last_access = clock;
        entry.transcript.push(ChatMessage::user(user_content));
        entry.transcript.push(ChatMessage::assistant(assistant_content));

        if entry.transcript.len() > self.max_history {
            let excess = entry.transcript.len() - self.max_history;
            entry.transcript.drain(..excess);
        }

        if inner.sessions.len() > self.capacity {
            let evict_key = inner
                .sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone());
            if let Some(key) = evict_key {
                inner.sessions.remove(&key);
            }
        }
    }

    fn session_count(&self) -> usize {
        self.lock().sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::Role;

    use super::{InMemorySessionStore, SessionStore};

    #[test]
    fn session_is_created_lazily_on_first_exchange() {
        let store = InMemorySessionStore::new(12, 8);
        assert!(store.transcript("s1").is_empty());
        assert_eq!(store.session_count(), 0);

        store.append_exchange("s1", "hola", "¡Hola!");
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.transcript("s1").len(), 2);
    }

    #[test]
    fn exchange_appends_user_then_assistant() {
        let store = InMemorySessionStore::new(12, 8);
        store.append_exchange("s1", "¿precio?", "Cuesta 150 DOP");

        let transcript = store.transcript("s1");
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].content, "¿precio?");
        assert_eq!(transcript[1].role, Role::Assistant);
        assert_eq!(transcript[1].content, "Cuesta 150 DOP");
    }

    #[test]
    fn transcript_never_exceeds_history_bound() {
        let store = InMemorySessionStore::new(12, 8);
        for turn in 0..15 {
            store.append_exchange("s1", &format!("user {turn}"), &format!("bot {turn}"));
            assert!(store.transcript("s1").len() <= 12);
        }

        // 15 exchanges with H = 12 keeps exactly the 12 newest entries in
        // arrival order: the tail of exchanges 9..=14.
        let transcript = store.transcript("s1");
        assert_eq!(transcript.len(), 12);
        assert_eq!(transcript[0].content, "user 9");
        assert_eq!(transcript[11].content, "bot 14");
    }

    #[test]
    fn odd_history_bound_still_holds() {
        let store = InMemorySessionStore::new(5, 8);
        for turn in 0..4 {
            store.append_exchange("s1", &format!("user {turn}"), &format!("bot {turn}"));
        }

        let transcript = store.transcript("s1");
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[0].content, "bot 1");
    }

    #[test]
    fn least_recently_accessed_session_is_evicted_at_capacity() {
        let store = InMemorySessionStore::new(12, 2);
        store.append_exchange("a", "1", "1");
        store.append_exchange("b", "2", "2");

        // Reading "a" refreshes it, so "b" is the eviction candidate.
        let _ = store.transcript("a");
        store.append_exchange("c", "3", "3");

        assert_eq!(store.session_count(), 2);
        assert!(!store.transcript("a").is_empty());
        assert!(store.transcript("b").is_empty());
        assert!(!store.transcript("c").is_empty());
    }

    #[test]
    fn sessions_are_isolated_by_id() {
        let store = InMemorySessionStore::new(12, 8);
        store.append_exchange("a", "hola", "buenas");
        store.append_exchange("b", "precio", "150 DOP");

        assert_eq!(store.transcript("a").len(), 2);
        assert_eq!(store.transcript("b").len(), 2);
        assert_eq!(store.transcript("a")[0].content, "hola");
        assert_eq!(store.transcript("b")[0].content, "precio");
    }
}
