//! 入学测验
//!
//! 逐题作答，最后一题之后生成 `SubmitTestRequest`。

use crate::protocol::SubmitTestRequest;
use crate::{TestAnswer, TestQuestion};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// 当前题目尚未作答
    NotAnswered,
    /// 选项下标超出范围
    InvalidOption { option: usize, available: usize },
    /// 题目列表为空
    NoQuestions,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::NotAnswered => write!(f, "current question has no answer"),
            QuizError::InvalidOption { option, available } => {
                write!(f, "option {} out of range (0..{})", option, available)
            }
            QuizError::NoQuestions => write!(f, "quiz has no questions"),
        }
    }
}

impl std::error::Error for QuizError {}

/// `next` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum QuizStep {
    /// 进入下一题
    Advanced(usize),
    /// 全部作答完毕，提交
    Submit(SubmitTestRequest),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuizRunner {
    language: String,
    questions: Vec<TestQuestion>,
    current: usize,
    /// question id -> option
    answers: BTreeMap<u64, usize>,
}

impl QuizRunner {
    pub fn new(language: impl Into<String>, questions: Vec<TestQuestion>) -> Self {
        Self {
            language: language.into(),
            questions,
            current: 0,
            answers: BTreeMap::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&TestQuestion> {
        self.questions.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    /// 当前题目已选的选项
    pub fn selected(&self) -> Option<usize> {
        let q = self.current()?;
        self.answers.get(&q.id).copied()
    }

    /// 进度百分比，按已到达的题号计算
    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        ((self.current + 1) * 100 / self.questions.len()) as u32
    }

    /// 为当前题目记录答案，重复选择会覆盖
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        let q = self.current().ok_or(QuizError::NoQuestions)?;
        let available = q.options_en.len().max(q.options_ru.len());
        if option >= available {
            return Err(QuizError::InvalidOption { option, available });
        }
        let id = q.id;
        self.answers.insert(id, option);
        Ok(())
    }

    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        if self.selected().is_none() {
            return Err(QuizError::NotAnswered);
        }
        if self.is_last() {
            return Ok(QuizStep::Submit(self.submission()));
        }
        self.current += 1;
        Ok(QuizStep::Advanced(self.current))
    }

    /// 按题目 id 升序排列的答案
    pub fn submission(&self) -> SubmitTestRequest {
        SubmitTestRequest {
            language: self.language.clone(),
            answers: self
                .answers
                .iter()
                .map(|(&id, &option)| TestAnswer { id, option })
                .collect(),
        }
    }
}
