use crate::{
    AnalysisReport, ChatMessage, CheckResult, Course, CourseReport, Homework, HomeworkResult,
    Lesson, Progress, TestAnswer, TestQuestion, TokenPair, Track, User,
};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 是否携带 JSON 请求体
    pub fn has_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// 认证端点（登录/注册）不附带 Bearer Token
    const AUTH_ENDPOINT: bool = false;
    /// The URL path, including path parameters and query string.
    fn path(&self) -> String;
}

/// 路径段编码。表单编码把空格写成 `+`，在路径里 `+` 是字面字符，
/// 这里改写为 `%20`；原文中的 `+` 已被编码为 `%2B`，不会混淆。
fn segment(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().copied())
        .finish();
    format!("{}?{}", path, query)
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH_ENDPOINT: bool = true;
    fn path(&self) -> String {
        "/auth/login/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub track: Track,
    pub primary_language: String,
    pub goal: String,
}

impl ApiRequest for RegisterRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH_ENDPOINT: bool = true;
    fn path(&self) -> String {
        "/auth/register/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/auth/profile/".into()
    }
}

/// PATCH 个人资料，仅发送被设置的字段
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
}

impl ApiRequest for UpdateProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        "/auth/profile/".into()
    }
}

// =========================================================
// Courses & Lessons
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCourseRequest {
    #[serde(skip_serializing)]
    pub slug: String,
}

impl ApiRequest for GetCourseRequest {
    type Response = Course;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/courses/{}/", segment(&self.slug))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetLessonRequest {
    #[serde(skip_serializing)]
    pub slug: String,
}

impl ApiRequest for GetLessonRequest {
    type Response = Lesson;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/api/lessons/{}/", segment(&self.slug))
    }
}

/// 提交练习代码判题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckLessonRequest {
    #[serde(skip_serializing)]
    pub slug: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<u64>,
}

impl ApiRequest for CheckLessonRequest {
    type Response = CheckResult;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/api/lessons/{}/check/", segment(&self.slug))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteLessonRequest {
    pub lesson_slug: String,
}

impl ApiRequest for CompleteLessonRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/lessons/complete/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    pub course_slug: String,
}

impl ApiRequest for GenerateReportRequest {
    type Response = CourseReport;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/courses/generate-report/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProgressRequest;

impl ApiRequest for GetProgressRequest {
    type Response = Progress;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/api/progress/".into()
    }
}

// =========================================================
// Quiz & Analysis
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuestionsRequest {
    #[serde(skip_serializing)]
    pub language: String,
}

impl ApiRequest for ListQuestionsRequest {
    type Response = Vec<TestQuestion>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        with_query("/api/questions/", &[("language", self.language.as_str())])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    pub language: String,
    pub answers: Vec<TestAnswer>,
}

impl ApiRequest for SubmitTestRequest {
    type Response = AnalysisReport;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/submit-test/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeCodeRequest {
    pub code_text: String,
}

impl ApiRequest for AnalyzeCodeRequest {
    type Response = AnalysisReport;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/analyze/".into()
    }
}

// =========================================================
// Mentor
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatHistoryRequest {
    #[serde(skip_serializing)]
    pub lesson_slug: Option<String>,
}

impl ApiRequest for ChatHistoryRequest {
    type Response = Vec<ChatMessage>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        match &self.lesson_slug {
            Some(slug) => with_query("/api/mentor/chat/", &[("lesson_slug", slug.as_str())]),
            None => "/api/mentor/chat/".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendChatRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_slug: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

impl ApiRequest for SendChatRequest {
    type Response = ChatReply;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/mentor/chat/".into()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListHomeworkRequest {
    #[serde(skip_serializing)]
    pub language: String,
}

impl ApiRequest for ListHomeworkRequest {
    type Response = Vec<Homework>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        with_query("/api/mentor/homework/", &[("language", self.language.as_str())])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitHomeworkRequest {
    pub id: u64,
    pub submission: String,
}

impl ApiRequest for SubmitHomeworkRequest {
    type Response = HomeworkResult;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/api/mentor/homework/".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_parameters_are_not_serialized() {
        let req = CheckLessonRequest {
            slug: "loops-1".into(),
            code: "for i in range(3): pass".into(),
            task_id: Some(4),
        };
        assert_eq!(req.path(), "/api/lessons/loops-1/check/");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"code": "for i in range(3): pass", "task_id": 4})
        );
    }

    #[test]
    fn query_values_are_encoded() {
        let req = ChatHistoryRequest {
            lesson_slug: Some("a b&c".into()),
        };
        assert_eq!(req.path(), "/api/mentor/chat/?lesson_slug=a+b%26c");

        let all = ChatHistoryRequest::default();
        assert_eq!(all.path(), "/api/mentor/chat/");

        let q = ListQuestionsRequest {
            language: "python".into(),
        };
        assert_eq!(q.path(), "/api/questions/?language=python");
    }

    #[test]
    fn path_segments_use_percent_twenty_for_spaces() {
        let req = GetLessonRequest {
            slug: "intro to loops".into(),
        };
        assert_eq!(req.path(), "/api/lessons/intro%20to%20loops/");

        let req = GetCourseRequest {
            slug: "c++/basics".into(),
        };
        assert_eq!(req.path(), "/api/courses/c%2B%2B%2Fbasics/");
    }

    #[test]
    fn only_login_and_register_are_auth_endpoints() {
        assert!(LoginRequest::AUTH_ENDPOINT);
        assert!(RegisterRequest::AUTH_ENDPOINT);
        assert!(!GetProfileRequest::AUTH_ENDPOINT);
        assert!(!SubmitTestRequest::AUTH_ENDPOINT);
    }

    #[test]
    fn profile_patch_sends_only_set_fields() {
        let req = UpdateProfileRequest {
            track: Some(Track::Frontend),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"track": "frontend"}));
        assert_eq!(UpdateProfileRequest::METHOD.as_str(), "PATCH");
    }
}
