//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，提供简洁的本地存储接口。

use mentorai::session::TokenStore;

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，失败时返回 `false`
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，失败时返回 `false`
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 令牌存储的 LocalStorage 实现
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl TokenStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get(key)
    }

    fn set(&self, key: &str, value: &str) {
        if !LocalStorage::set(key, value) {
            mentorai::log_warn!("[Storage] Failed to write {}", key);
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
