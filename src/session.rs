//! In-memory storage of generated articles, keyed by session ID.
//!
//! Sessions live for the lifetime of the process.

use crate::error::{PodnewsError, Result};
use crate::news::NewsArticle;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

/// Process-wide store of article sessions.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<[NewsArticle]>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a non-empty list of articles under a fresh session ID.
    pub fn put(&self, articles: Vec<NewsArticle>) -> Result<String> {
        if articles.is_empty() {
            return Err(PodnewsError::InvalidInput(
                "A session needs at least one article".to_string(),
            ));
        }

        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id.clone(), articles.into());

        Ok(session_id)
    }

    /// Get all articles of a session.
    pub fn articles(&self, session_id: &str) -> Result<Arc<[NewsArticle]>> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
            .ok_or_else(|| PodnewsError::NotFound("Session".to_string()))
    }

    /// Get one article of a session by index.
    pub fn get(&self, session_id: &str, index: usize) -> Result<NewsArticle> {
        self.articles(session_id)?
            .get(index)
            .cloned()
            .ok_or_else(|| PodnewsError::NotFound("Article".to_string()))
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            content: format!("{} body", title),
            key_quote: String::new(),
        }
    }

    #[test]
    fn test_put_and_get() {
        let store = SessionStore::new();
        let id = store.put(vec![article("a"), article("b"), article("c")]).unwrap();

        assert_eq!(store.get(&id, 0).unwrap().title, "a");
        assert_eq!(store.get(&id, 2).unwrap().title, "c");
        assert_eq!(store.articles(&id).unwrap().len(), 3);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_out_of_range_and_unknown() {
        let store = SessionStore::new();
        let id = store.put(vec![article("a")]).unwrap();

        assert!(matches!(store.get(&id, 1), Err(PodnewsError::NotFound(ref what)) if what == "Article"));
        assert!(matches!(store.get("nope", 0), Err(PodnewsError::NotFound(ref what)) if what == "Session"));
    }

    #[test]
    fn test_ids_are_unique() {
        let store = SessionStore::new();
        let a = store.put(vec![article("a")]).unwrap();
        let b = store.put(vec![article("a")]).unwrap();

        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_empty_session_rejected() {
        let store = SessionStore::new();
        assert!(store.put(Vec::new()).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_puts() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.put(vec![article(&i.to_string())]).unwrap())
            })
            .collect();

        let ids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(store.len(), 8);
        for id in ids {
            assert!(store.get(&id, 0).is_ok());
        }
    }
}
