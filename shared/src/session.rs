//! 会话管理
//!
//! 访问令牌只能通过 `Session` 读写，视图层不直接操作存储。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 令牌在存储中的键名
pub const TOKEN_KEY: &str = "token";

/// 键值存储后端
///
/// 浏览器中由 LocalStorage 实现，测试中使用 `MemoryStore`。
pub trait SessionStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str) -> bool;
    fn remove(&self, key: &str) -> bool;
}

/// 内存存储
///
/// 克隆后共享同一份数据。
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) -> bool {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.inner.borrow_mut().remove(key);
        true
    }
}

/// 会话管理器
#[derive(Debug, Clone)]
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 当前令牌，空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.store.load(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn set_token(&self, token: &str) -> bool {
        self.store.save(TOKEN_KEY, token)
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `("Authorization", "Bearer <token>")`
    pub fn bearer_header(&self) -> Option<(&'static str, String)> {
        self.token()
            .map(|token| ("Authorization", format!("Bearer {}", token)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let session = Session::new(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(session.bearer_header().is_none());

        session.set_token("abc.def");
        assert!(session.is_authenticated());
        assert_eq!(
            session.bearer_header(),
            Some(("Authorization", "Bearer abc.def".to_string()))
        );

        session.clear();
        assert!(session.token().is_none());
    }

    #[test]
    fn test_blank_token_is_not_a_session() {
        let store = MemoryStore::new();
        store.save(TOKEN_KEY, "  ");
        assert!(!Session::new(store).is_authenticated());
    }

    #[test]
    fn test_clones_share_storage() {
        let store = MemoryStore::new();
        let a = Session::new(store.clone());
        let b = Session::new(store);
        a.set_token("t1");
        assert_eq!(b.token().as_deref(), Some("t1"));
    }
}
