//! 会话存储与导航抽象
//!
//! 浏览器里由 localStorage 和 History API 实现，测试里用内存版本替代。

use crate::config::ClientConfig;
use mentorai_shared::TokenPair;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// 同步键值存储
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// 页面导航
pub trait Navigator {
    fn current_path(&self) -> String;
    fn redirect(&self, path: &str);
}

// =========================================================
// 会话操作
// =========================================================

pub fn access_token<S: TokenStore>(store: &S, config: &ClientConfig) -> Option<String> {
    store
        .get(&config.access_token_key)
        .filter(|t| !t.is_empty())
}

/// 只检查令牌是否存在，不校验签名和过期时间
pub fn is_authenticated<S: TokenStore>(store: &S, config: &ClientConfig) -> bool {
    access_token(store, config).is_some()
}

pub fn store_tokens<S: TokenStore>(store: &S, config: &ClientConfig, tokens: &TokenPair) {
    store.set(&config.access_token_key, &tokens.access);
    match &tokens.refresh {
        Some(refresh) => store.set(&config.refresh_token_key, refresh),
        None => store.remove(&config.refresh_token_key),
    }
}

pub fn clear<S: TokenStore>(store: &S, config: &ClientConfig) {
    store.remove(&config.access_token_key);
    store.remove(&config.refresh_token_key);
}

// =========================================================
// 内存实现
// =========================================================

#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.data.borrow_mut().remove(key);
    }
}

/// 记录跳转历史的导航器
#[derive(Clone)]
pub struct MemoryNavigator {
    path: Rc<RefCell<String>>,
    pub redirects: Rc<RefCell<Vec<String>>>,
}

impl MemoryNavigator {
    pub fn at(path: &str) -> Self {
        Self {
            path: Rc::new(RefCell::new(path.to_string())),
            redirects: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        *self.path.borrow_mut() = path.to_string();
        self.redirects.borrow_mut().push(path.to_string());
    }
}
