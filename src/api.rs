use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use crate::session::{self, Navigator, TokenStore};
use mentorai_shared::protocol::*;
use mentorai_shared::{
    AnalysisReport, ChatMessage, CheckResult, Course, CourseReport, HEADER_AUTHORIZATION,
    Homework, HomeworkResult, Lesson, Progress, TestQuestion, TokenPair, User,
};

/// 仪表盘首屏数据
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub user: User,
    /// 进度加载失败不影响首屏
    pub progress: Option<Progress>,
}

/// MentorAI API 客户端
///
/// 每个请求自动附带 JSON 头和 Bearer 令牌（认证端点除外）；
/// 收到 401 时清除令牌并跳转登录页。
#[derive(Clone)]
pub struct MentorApi<C: HttpClient, S: TokenStore, N: Navigator> {
    client: C,
    store: S,
    navigator: N,
    config: ClientConfig,
}

impl<C: HttpClient, S: TokenStore, N: Navigator> MentorApi<C, S, N> {
    pub fn new(client: C, store: S, navigator: N, config: ClientConfig) -> Self {
        Self {
            client,
            store,
            navigator,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_authenticated(&self) -> bool {
        session::is_authenticated(&self.store, &self.config)
    }

    /// 发送类型化请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http = HttpRequest::new(&self.config.url(&path), R::METHOD)
            .with_header("Content-Type", "application/json");

        if !R::AUTH_ENDPOINT {
            if let Some(token) = session::access_token(&self.store, &self.config) {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req).map_err(|e| ApiError::request(e.to_string()))?;
            http = http.with_body(body);
        }

        let resp = match self.client.send(http).await {
            Ok(resp) => resp,
            Err(e) => {
                log_error!("[Api] {} {} failed: {}", R::METHOD.as_str(), path, e);
                return Err(e);
            }
        };

        if resp.status == 401 {
            self.handle_unauthorized();
        }

        if !resp.is_success() {
            let err = ApiError::from_response(resp.status, &resp.body);
            log_warn!("[Api] {} {} -> {}", R::METHOD.as_str(), path, resp.status);
            return Err(err);
        }

        resp.json::<R::Response>().inspect_err(|e| {
            log_error!("[Api] {} {} decode failed: {}", R::METHOD.as_str(), path, e);
        })
    }

    /// 令牌失效：清除并跳转登录页（已在登录页时不跳转）
    fn handle_unauthorized(&self) {
        self.store.remove(&self.config.access_token_key);
        if !self
            .navigator
            .current_path()
            .contains(&self.config.login_path)
        {
            log_info!("[Api] Session expired. Redirecting to {}", self.config.login_path);
            self.navigator.redirect(&self.config.login_path);
        }
    }

    // =========================================================
    // 认证
    // =========================================================

    /// 登录成功后保存令牌
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<TokenPair> {
        let tokens = self
            .call(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;
        session::store_tokens(&self.store, &self.config, &tokens);
        Ok(tokens)
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub fn logout(&self) {
        session::clear(&self.store, &self.config);
    }

    pub async fn profile(&self) -> ApiResult<User> {
        self.call(&GetProfileRequest).await
    }

    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> ApiResult<User> {
        self.call(req).await
    }

    /// 并发加载个人资料和进度
    pub async fn dashboard(&self) -> ApiResult<DashboardData> {
        let (user, progress) = futures::join!(self.profile(), self.progress());
        Ok(DashboardData {
            user: user?,
            progress: progress.ok(),
        })
    }

    // =========================================================
    // 课程与课时
    // =========================================================

    pub async fn course(&self, slug: &str) -> ApiResult<Course> {
        self.call(&GetCourseRequest {
            slug: slug.to_string(),
        })
        .await
    }

    pub async fn lesson(&self, slug: &str) -> ApiResult<Lesson> {
        self.call(&GetLessonRequest {
            slug: slug.to_string(),
        })
        .await
    }

    pub async fn check(&self, req: &CheckLessonRequest) -> ApiResult<CheckResult> {
        self.call(req).await
    }

    pub async fn complete(&self, req: &CompleteLessonRequest) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub async fn generate_report(&self, course_slug: &str) -> ApiResult<CourseReport> {
        self.call(&GenerateReportRequest {
            course_slug: course_slug.to_string(),
        })
        .await
    }

    pub async fn progress(&self) -> ApiResult<Progress> {
        self.call(&GetProgressRequest).await
    }

    // =========================================================
    // 测验与分析
    // =========================================================

    pub async fn questions(&self, language: &str) -> ApiResult<Vec<TestQuestion>> {
        self.call(&ListQuestionsRequest {
            language: language.to_string(),
        })
        .await
    }

    pub async fn submit_test(&self, req: &SubmitTestRequest) -> ApiResult<AnalysisReport> {
        self.call(req).await
    }

    pub async fn analyze(&self, code: &str) -> ApiResult<AnalysisReport> {
        self.call(&AnalyzeCodeRequest {
            code_text: code.to_string(),
        })
        .await
    }

    // =========================================================
    // 导师
    // =========================================================

    pub async fn chat_history(&self, req: &ChatHistoryRequest) -> ApiResult<Vec<ChatMessage>> {
        self.call(req).await
    }

    pub async fn send_chat(&self, req: &SendChatRequest) -> ApiResult<ChatReply> {
        self.call(req).await
    }

    pub async fn homework(&self, language: &str) -> ApiResult<Vec<Homework>> {
        self.call(&ListHomeworkRequest {
            language: language.to_string(),
        })
        .await
    }

    pub async fn submit_homework(&self, id: u64, submission: &str) -> ApiResult<HomeworkResult> {
        self.call(&SubmitHomeworkRequest {
            id,
            submission: submission.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests;
