//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use mentorai::session::Navigator;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, NavState};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与认证系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 随本次导航传递的状态
    nav_state: RwSignal<NavState>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `is_authenticated` - 认证状态信号，由外部注入实现解耦
    fn new(is_authenticated: Signal<bool>) -> Self {
        let path = current_path();
        let (current_route, set_route) = signal(AppRoute::from_path(&path));

        Self {
            current_route,
            set_route,
            nav_state: RwSignal::new(NavState::default()),
            is_authenticated,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 本次导航携带的状态
    pub fn nav_state(&self) -> NavState {
        self.nav_state.get_untracked()
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.navigate_with_state(path, NavState::default());
    }

    /// 带内存状态导航（如测验语言、分析报告）
    pub fn navigate_with_state(&self, path: &str, state: NavState) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true, state);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool, state: NavState) {
        let is_auth = self.is_authenticated.get_untracked();

        let (route, state) = if target_route.requires_auth() && !is_auth {
            mentorai::log_info!("[Router] Access Denied. Redirecting to Login.");
            (AppRoute::auth_failure_redirect(), NavState::default())
        } else if target_route.should_redirect_when_authenticated() && is_auth {
            mentorai::log_info!("[Router] Already authenticated. Redirecting to Dashboard.");
            (AppRoute::auth_success_redirect(), NavState::default())
        } else {
            (target_route, state)
        };

        let path = route.to_path();
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.nav_state.set(state);
        self.set_route.set(route);
    }

    /// 首次加载时对地址栏中的路由执行守卫
    fn guard_initial_route(&self) {
        let route = self.current_route.get_untracked();
        let is_auth = self.is_authenticated.get_untracked();
        let blocked = (route.requires_auth() && !is_auth)
            || (route.should_redirect_when_authenticated() && is_auth);
        // `/courses` 等别名需要改写地址栏
        let aliased = route != AppRoute::NotFound && route.to_path() != current_path();
        if blocked || aliased {
            self.navigate_to_route(route, false, NavState::default());
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑，历史记录不携带内存状态
            let target_route = AppRoute::from_path(&current_path());
            router.navigate_to_route(target_route, false, NavState::default());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;
        let is_authenticated = self.is_authenticated;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let route = router.current_route.get_untracked();

            if is_auth && route.should_redirect_when_authenticated() {
                mentorai::log_info!("[Router] Auth state changed: logged in.");
                router.navigate_to_route(AppRoute::auth_success_redirect(), true, NavState::default());
            } else if !is_auth && route.requires_auth() {
                mentorai::log_info!("[Router] Auth state changed: logged out.");
                router.navigate_to_route(AppRoute::auth_failure_redirect(), true, NavState::default());
            }
        });
    }
}

/// API 层通过此实现在 401 时跳转登录页
impl Navigator for RouterService {
    fn current_path(&self) -> String {
        current_path()
    }

    fn redirect(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), false, NavState::default());
    }
}

/// 提供路由服务到 Context 并初始化
pub fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);

    router.guard_initial_route();
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure provide_router was called.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改为路由导航
#[component]
pub fn Link(
    /// 目标路径
    #[prop(into)]
    to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
