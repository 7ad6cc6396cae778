//! MentorAI 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态与语言
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod chat;
    pub mod completion;
    pub mod course;
    pub mod course_map;
    pub mod dashboard;
    pub mod homework;
    pub mod landing;
    pub mod login;
    pub mod mentor_chat;
    pub mod nav_bar;
    pub mod register;
    pub mod results;
    pub mod test;
}

// 原生 Web API 封装模块
pub(crate) mod web;

use crate::auth::{AuthContext, refresh_profile, tr};
use crate::components::chat::ChatPage;
use crate::components::completion::CourseCompletionPage;
use crate::components::course::CoursePage;
use crate::components::dashboard::DashboardPage;
use crate::components::homework::HomeworkPage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::results::ResultsPage;
use crate::components::test::TestPage;

use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai::{ClientConfig, MentorApi};
use mentorai_shared::Theme;
use web::route::AppRoute;
use web::router::{RouterOutlet, provide_router};
use web::{BrowserStore, FetchHttpClient, set_body_class};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Test => view! { <TestPage /> }.into_any(),
        AppRoute::Results => view! { <ResultsPage /> }.into_any(),
        AppRoute::Homework => view! { <HomeworkPage /> }.into_any(),
        AppRoute::Chat => view! { <ChatPage /> }.into_any(),
        AppRoute::Course { slug } => view! { <CoursePage slug=slug /> }.into_any(),
        AppRoute::CourseCompletion { slug } => {
            view! { <CourseCompletionPage slug=slug /> }.into_any()
        }
        AppRoute::NotFound => view! { <NotFound /> }.into_any(),
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">{tr("app.not_found")}</p>
            </div>
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env();

    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 路由器：注入认证信号实现守卫
    let router = provide_router(auth_ctx.is_authenticated_signal(config.clone()));

    // 3. API 客户端：401 时通过路由器跳转登录页
    let api = MentorApi::new(FetchHttpClient, BrowserStore, router, config);
    provide_context(api.clone());

    // 4. 已有令牌时加载用户资料
    spawn_local(async move {
        refresh_profile(&api, auth_ctx).await;
    });

    // 5. 儿童主题
    Effect::new(move |_| {
        set_body_class(match auth_ctx.theme() {
            Theme::Child => "theme-child",
            Theme::Adult => "theme-adult",
        });
    });

    // 6. <html lang>
    Effect::new(move |_| {
        let code = auth_ctx.locale.get().code();
        if let Some(root) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = root.set_attribute("lang", code);
        }
    });

    view! { <RouterOutlet matcher=route_matcher /> }
}
