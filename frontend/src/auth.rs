//! 认证模块
//!
//! 管理会话、用户资料和界面语言，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。

use crate::web::router::RouterService;
use crate::web::{BrowserStore, FetchHttpClient, LocalStorage, browser_language};
use leptos::prelude::*;
use mentorai::error::ApiResult;
use mentorai::session::{self, TokenStore};
use mentorai::{ClientConfig, MentorApi};
use mentorai_shared::i18n::{Locale, t};
use mentorai_shared::{Theme, User};

/// 浏览器中使用的 API 客户端
pub type Api = MentorApi<FetchHttpClient, BrowserStore, RouterService>;

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 当前用户资料（登录后加载）
    pub user: RwSignal<Option<User>>,
    /// 界面语言
    pub locale: RwSignal<Locale>,
    /// 令牌每次变化时递增
    revision: RwSignal<u32>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            user: RwSignal::new(None),
            locale: RwSignal::new(detect_locale(config)),
            revision: RwSignal::new(0),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    ///
    /// 每次读取都重新检查存储中的令牌，只看是否存在。
    pub fn is_authenticated_signal(&self, config: ClientConfig) -> Signal<bool> {
        let revision = self.revision;
        Signal::derive(move || {
            revision.get();
            session::is_authenticated(&BrowserStore, &config)
        })
    }

    /// 通知令牌已变化
    pub fn session_changed(&self) {
        self.revision.update(|r| *r = r.wrapping_add(1));
    }

    pub fn theme(&self) -> Theme {
        self.user
            .with(|u| u.as_ref().map(User::theme))
            .unwrap_or(Theme::Adult)
    }

    pub fn is_child(&self) -> bool {
        self.theme() == Theme::Child
    }

    /// 切换语言并持久化
    pub fn set_locale(&self, locale: Locale, config: &ClientConfig) {
        BrowserStore.set(&config.locale_key, locale.code());
        self.locale.set(locale);
    }
}

/// 语言检测顺序：本地存储 -> 浏览器语言 -> 英语
pub fn detect_locale(config: &ClientConfig) -> Locale {
    LocalStorage::get(&config.locale_key)
        .or_else(browser_language)
        .map(|tag| Locale::from_tag(&tag))
        .unwrap_or_default()
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 从 Context 获取 API 客户端
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}

/// 当前语言下的翻译闭包
pub fn tr(key: &'static str) -> impl Fn() -> &'static str + Copy + Send + Sync + 'static {
    let locale = use_auth().locale;
    move || t(locale.get(), key)
}

/// 加载用户资料，失败时保持未加载状态
pub async fn refresh_profile(api: &Api, ctx: AuthContext) {
    if !api.is_authenticated() {
        return;
    }
    match api.profile().await {
        Ok(user) => ctx.user.set(Some(user)),
        Err(e) => mentorai::log_warn!("[Auth] Failed to load profile: {}", e),
    }
}

/// 登录：保存令牌并加载资料
pub async fn login(api: &Api, ctx: AuthContext, username: &str, password: &str) -> ApiResult<()> {
    api.login(username, password).await?;
    ctx.session_changed();
    refresh_profile(api, ctx).await;
    Ok(())
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(api: &Api, ctx: AuthContext) {
    api.logout();
    ctx.user.set(None);
    ctx.session_changed();
}
