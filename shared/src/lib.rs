use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub mod chat;
pub mod course_map;
pub mod i18n;
pub mod progression;
pub mod protocol;
pub mod quiz;

use i18n::Locale;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_ACCESS_TOKEN: &str = "access_token";
pub const STORAGE_REFRESH_TOKEN: &str = "refresh_token";
pub const STORAGE_LOCALE: &str = "i18nextLng";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 不超过此年龄的用户使用儿童主题
pub const CHILD_MAX_AGE: u32 = 14;

// =========================================================
// 本地化文本 (Localized Text)
// =========================================================

/// 服务端返回的本地化字段
///
/// 可能是纯字符串，也可能是 `{ "en": ..., "ru": ... }` 对象。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Map {
        en: String,
        #[serde(default)]
        ru: Option<String>,
    },
}

impl LocalizedText {
    /// 按语言取值，俄语缺失时回退到英语
    pub fn get(&self, locale: Locale) -> &str {
        match self {
            LocalizedText::Plain(s) => s,
            LocalizedText::Map { en, ru } => match (locale, ru) {
                (Locale::Ru, Some(ru)) if !ru.is_empty() => ru,
                _ => en,
            },
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Plain(String::new())
    }
}

impl From<&str> for LocalizedText {
    fn from(s: &str) -> Self {
        LocalizedText::Plain(s.to_string())
    }
}

// =========================================================
// 用户 (User)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    #[default]
    Backend,
    Frontend,
}

impl Track {
    /// 该方向对应的课程 slug
    pub fn course_slug(&self) -> &'static str {
        match self {
            Track::Backend => "backend",
            Track::Frontend => "frontend",
        }
    }

    /// 该方向对应的编程语言
    pub fn language(&self) -> &'static str {
        match self {
            Track::Backend => "python",
            Track::Frontend => "javascript",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Child,
    Adult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub track: Track,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl User {
    pub fn is_child(&self) -> bool {
        self.age.is_some_and(|age| age <= CHILD_MAX_AGE)
    }

    pub fn theme(&self) -> Theme {
        if self.is_child() {
            Theme::Child
        } else {
            Theme::Adult
        }
    }
}

// =========================================================
// 课程结构 (Course Tree)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    #[default]
    Theory,
    Practice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub slug: String,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Course {
    /// 按模块顺序展开所有课时
    pub fn lessons(&self) -> impl Iterator<Item = &LessonSummary> {
        self.modules.iter().flat_map(|m| m.lessons.iter())
    }

    pub fn lesson(&self, slug: &str) -> Option<&LessonSummary> {
        self.lessons().find(|l| l.slug == slug)
    }

    /// 第一个已解锁但未完成的课时
    pub fn next_lesson(&self) -> Option<&LessonSummary> {
        self.lessons().find(|l| l.is_unlocked && !l.is_completed)
    }

    pub fn is_finished(&self) -> bool {
        let mut lessons = self.lessons().peekable();
        lessons.peek().is_some() && lessons.all(|l| l.is_completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: u64,
    pub title: LocalizedText,
    #[serde(default)]
    pub lessons: Vec<LessonSummary>,
}

impl Module {
    pub fn is_unlocked(&self) -> bool {
        self.lessons.iter().any(|l| l.is_unlocked)
    }
}

/// 课程树中的课时摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: u64,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub kind: LessonKind,
    pub title: LocalizedText,
    #[serde(default)]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_completed: bool,
}

/// 课时详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub slug: String,
    #[serde(rename = "type", default)]
    pub kind: LessonKind,
    pub title: LocalizedText,
    #[serde(default)]
    pub content: Option<LocalizedText>,
    #[serde(default)]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub theory_steps: Vec<TheoryStep>,
    #[serde(default)]
    pub practice_tasks: Vec<PracticeTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryStep {
    pub text: LocalizedText,
    #[serde(default)]
    pub code_to_repeat: Option<String>,
}

impl TheoryStep {
    /// 需要逐字重打的代码（去掉空白后为空视为不需要）
    pub fn required_code(&self) -> Option<&str> {
        self.code_to_repeat
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// 输入去掉首尾空白后与目标完全一致才算通过
    pub fn accepts(&self, input: &str) -> bool {
        match self.required_code() {
            Some(code) => input.trim() == code,
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PracticeTask {
    pub id: u64,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default)]
    pub initial_code: String,
    #[serde(default)]
    pub solution_code: String,
}

/// 判题结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CheckResult {
    pub passed: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub correct_solution: Option<String>,
}

// =========================================================
// 测验 (Quiz)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestQuestion {
    pub id: u64,
    pub text_en: String,
    #[serde(default)]
    pub text_ru: String,
    #[serde(default)]
    pub options_en: Vec<String>,
    #[serde(default)]
    pub options_ru: Vec<String>,
}

impl TestQuestion {
    pub fn text(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ru if !self.text_ru.is_empty() => &self.text_ru,
            _ => &self.text_en,
        }
    }

    pub fn options(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::Ru if !self.options_ru.is_empty() => &self.options_ru,
            _ => &self.options_en,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestAnswer {
    pub id: u64,
    pub option: usize,
}

// =========================================================
// 分析报告 (Analysis Report)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Junior,
    StrongJunior,
    Middle,
    #[serde(other)]
    Unknown,
}

impl SkillLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Junior => "junior",
            SkillLevel::StrongJunior => "strong junior",
            SkillLevel::Middle => "middle",
            SkillLevel::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub topic: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectIdea {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub level: SkillLevel,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default)]
    pub projects: Vec<ProjectIdea>,
    #[serde(default)]
    pub score: Option<f32>,
}

/// 课程结业报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CourseReport {
    #[serde(default)]
    pub report_en: String,
    #[serde(default)]
    pub report_ru: String,
}

impl CourseReport {
    pub fn text(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ru if !self.report_ru.is_empty() => &self.report_ru,
            _ => &self.report_en,
        }
    }
}

// =========================================================
// 学习进度 (Progress)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LanguageProgress {
    #[serde(default)]
    pub unlocked_modules: Vec<u64>,
    #[serde(default)]
    pub completion: f32,
}

/// 按语言划分的进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Progress(pub BTreeMap<String, LanguageProgress>);

impl Progress {
    pub fn language(&self, language: &str) -> Option<&LanguageProgress> {
        self.0.get(language)
    }
}

// =========================================================
// 导师对话 (Mentor Chat)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Mentor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 仅用于前端列表渲染的 key
    #[serde(skip, default = "Uuid::new_v4")]
    pub local_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            role,
            content: content.into(),
            created_at: None,
        }
    }
}

// =========================================================
// 作业 (Homework)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HomeworkStatus {
    #[default]
    Pending,
    Passed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Homework {
    pub id: u64,
    #[serde(default)]
    pub category: String,
    pub task: String,
    #[serde(default)]
    pub status: HomeworkStatus,
    #[serde(default)]
    pub submission: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub correct_solution: Option<String>,
}

impl Homework {
    /// 任务列表中展示的摘要
    pub fn preview(&self, max_chars: usize) -> String {
        if self.task.chars().count() <= max_chars {
            return self.task.clone();
        }
        let head: String = self.task.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HomeworkResult {
    pub passed: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub correct_solution: Option<String>,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
