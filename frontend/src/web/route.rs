//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use mentorai_shared::AnalysisReport;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页
    #[default]
    Landing,
    Login,
    Register,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 入学测验
    Test,
    /// 分析结果
    Results,
    Homework,
    Chat,
    /// 课程地图与课时
    Course { slug: String },
    /// 结业报告
    CourseCompletion { slug: String },
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// `/courses` 没有独立页面，解析为控制面板。
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Landing,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] | ["courses"] => Self::Dashboard,
            ["test"] => Self::Test,
            ["results"] => Self::Results,
            ["homework"] => Self::Homework,
            ["chat"] => Self::Chat,
            ["courses", slug] => Self::Course {
                slug: slug.to_string(),
            },
            ["courses", slug, "completion"] => Self::CourseCompletion {
                slug: slug.to_string(),
            },
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Landing => "/".into(),
            Self::Login => "/login".into(),
            Self::Register => "/register".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::Test => "/test".into(),
            Self::Results => "/results".into(),
            Self::Homework => "/homework".into(),
            Self::Chat => "/chat".into(),
            Self::Course { slug } => format!("/courses/{}", slug),
            Self::CourseCompletion { slug } => format!("/courses/{}/completion", slug),
            Self::NotFound => "/404".into(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Landing | Self::Login | Self::Register | Self::NotFound
        )
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 随导航传递的内存状态
///
/// 直接通过 URL 访问时为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    /// 测验语言
    pub language: Option<String>,
    /// 结果页展示的分析报告
    pub analysis: Option<AnalysisReport>,
}

impl NavState {
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Default::default()
        }
    }

    pub fn analysis(report: AnalysisReport) -> Self {
        Self {
            analysis: Some(report),
            ..Default::default()
        }
    }
}
