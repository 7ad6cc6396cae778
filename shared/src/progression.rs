//! 课时推进状态机
//!
//! 课程页的视图状态是一个显式的标签联合 (`LessonView`)，
//! 所有状态转换都经过纯函数 `LessonView::reduce`：
//! 输入旧状态和动作，输出新状态以及需要执行的副作用 (`LessonEffect`)。
//! 页面组件负责执行副作用（HTTP 调用），再把结果作为动作回送。

use crate::protocol::{CheckLessonRequest, CompleteLessonRequest};
use crate::{CheckResult, Lesson, LessonKind, LessonSummary, PracticeTask, TheoryStep};

/// 连续失败多少次后允许查看参考答案
pub const SOLUTION_UNLOCK_ATTEMPTS: u32 = 3;

// =========================================================
// 状态 / 动作 / 副作用
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LessonView {
    /// 浏览课程地图
    Map {
        /// 正在加载的课时 slug
        loading: Option<String>,
        error: Option<String>,
    },
    /// 理论课第 `step` 步
    Theory {
        lesson: Lesson,
        step: usize,
        /// 上一次输入与 `code_to_repeat` 不一致
        mismatch: bool,
    },
    /// 练习课第 `task` 题
    Practice {
        lesson: Lesson,
        task: usize,
        /// 当前题目的失败次数
        attempts: u32,
        checking: bool,
        result: Option<CheckResult>,
        solution_visible: bool,
        error: Option<String>,
    },
    /// 课时已完成
    Completed {
        lesson: Lesson,
        error: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonAction {
    /// 在地图上点选课时
    Select(LessonSummary),
    LessonLoaded(Lesson),
    LoadFailed(String),
    /// 理论课继续（附带用户重打的代码）
    Advance { input: String },
    /// 提交练习代码
    Submit { code: String },
    GradeReceived(CheckResult),
    GradeFailed(String),
    RevealSolution,
    CompletionFailed(String),
    /// 返回地图
    Close,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LessonEffect {
    FetchCourse,
    FetchLesson(String),
    CheckSolution(CheckLessonRequest),
    CompleteLesson(CompleteLessonRequest),
}

/// 一次状态转换的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub view: LessonView,
    pub effects: Vec<LessonEffect>,
}

impl Transition {
    fn to(view: LessonView) -> Self {
        Self {
            view,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: LessonEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

impl Default for LessonView {
    fn default() -> Self {
        LessonView::map()
    }
}

// =========================================================
// Reducer
// =========================================================

impl LessonView {
    pub fn map() -> Self {
        LessonView::Map {
            loading: None,
            error: None,
        }
    }

    /// 当前打开的课时
    pub fn lesson(&self) -> Option<&Lesson> {
        match self {
            LessonView::Map { .. } => None,
            LessonView::Theory { lesson, .. }
            | LessonView::Practice { lesson, .. }
            | LessonView::Completed { lesson, .. } => Some(lesson),
        }
    }

    /// 地图上高亮的课时 slug
    pub fn active_slug(&self) -> Option<&str> {
        match self {
            LessonView::Map { loading, .. } => loading.as_deref(),
            _ => self.lesson().map(|l| l.slug.as_str()),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, LessonView::Map { .. })
    }

    /// 理论课当前步骤
    pub fn current_step(&self) -> Option<&TheoryStep> {
        match self {
            LessonView::Theory { lesson, step, .. } => lesson.theory_steps.get(*step),
            _ => None,
        }
    }

    /// 练习课当前题目
    pub fn current_task(&self) -> Option<&PracticeTask> {
        match self {
            LessonView::Practice { lesson, task, .. } => lesson.practice_tasks.get(*task),
            _ => None,
        }
    }

    /// 是否可以查看参考答案
    pub fn can_reveal_solution(&self) -> bool {
        matches!(self, LessonView::Practice { attempts, .. } if *attempts >= SOLUTION_UNLOCK_ATTEMPTS)
    }

    /// 纯函数：根据动作计算下一个状态
    ///
    /// 不合法的动作（例如在地图上提交代码）保持原状态且不产生副作用。
    pub fn reduce(&self, action: LessonAction) -> Transition {
        match (self, action) {
            // --- 地图 ---
            (LessonView::Map { .. }, LessonAction::Select(summary)) => {
                if !summary.is_unlocked {
                    return Transition::to(self.clone());
                }
                Transition::to(LessonView::Map {
                    loading: Some(summary.slug.clone()),
                    error: None,
                })
                .with(LessonEffect::FetchLesson(summary.slug))
            }
            (LessonView::Map { loading, .. }, LessonAction::LessonLoaded(lesson)) => {
                // 只接受正在等待的那个课时，过期的响应直接丢弃
                if loading.as_deref() != Some(lesson.slug.as_str()) {
                    return Transition::to(self.clone());
                }
                if !lesson.is_unlocked {
                    return Transition::to(LessonView::Map {
                        loading: None,
                        error: Some("course.locked".into()),
                    });
                }
                Transition::to(Self::open(lesson)).with(LessonEffect::FetchCourse)
            }
            (LessonView::Map { loading: Some(_), .. }, LessonAction::LoadFailed(msg)) => {
                Transition::to(LessonView::Map {
                    loading: None,
                    error: Some(msg),
                })
            }

            // --- 理论课 ---
            (LessonView::Theory { lesson, step, .. }, LessonAction::Advance { input }) => {
                let accepted = lesson
                    .theory_steps
                    .get(*step)
                    .is_none_or(|s| s.accepts(&input));
                if !accepted {
                    return Transition::to(LessonView::Theory {
                        lesson: lesson.clone(),
                        step: *step,
                        mismatch: true,
                    });
                }
                let next = step + 1;
                if next < Self::step_count(lesson) {
                    Transition::to(LessonView::Theory {
                        lesson: lesson.clone(),
                        step: next,
                        mismatch: false,
                    })
                } else {
                    Self::complete(lesson)
                }
            }

            // --- 练习课 ---
            (
                LessonView::Practice {
                    lesson,
                    task,
                    attempts,
                    checking: false,
                    result,
                    solution_visible,
                    ..
                },
                LessonAction::Submit { code },
            ) => {
                let task_id = lesson.practice_tasks.get(*task).map(|t| t.id);
                Transition::to(LessonView::Practice {
                    lesson: lesson.clone(),
                    task: *task,
                    attempts: *attempts,
                    checking: true,
                    result: result.clone(),
                    solution_visible: *solution_visible,
                    error: None,
                })
                .with(LessonEffect::CheckSolution(CheckLessonRequest {
                    slug: lesson.slug.clone(),
                    code,
                    task_id,
                }))
            }
            (
                LessonView::Practice {
                    lesson,
                    task,
                    attempts,
                    checking: true,
                    solution_visible,
                    ..
                },
                LessonAction::GradeReceived(result),
            ) => {
                if !result.passed {
                    return Transition::to(LessonView::Practice {
                        lesson: lesson.clone(),
                        task: *task,
                        attempts: attempts + 1,
                        checking: false,
                        result: Some(result),
                        solution_visible: *solution_visible,
                        error: None,
                    });
                }
                let next = task + 1;
                if next < lesson.practice_tasks.len() {
                    Transition::to(LessonView::Practice {
                        lesson: lesson.clone(),
                        task: next,
                        attempts: 0,
                        checking: false,
                        result: None,
                        solution_visible: false,
                        error: None,
                    })
                } else {
                    Self::complete(lesson)
                }
            }
            (
                LessonView::Practice {
                    lesson,
                    task,
                    attempts,
                    checking: true,
                    result,
                    solution_visible,
                    ..
                },
                LessonAction::GradeFailed(msg),
            ) => Transition::to(LessonView::Practice {
                lesson: lesson.clone(),
                task: *task,
                attempts: *attempts,
                checking: false,
                result: result.clone(),
                solution_visible: *solution_visible,
                error: Some(msg),
            }),
            (
                LessonView::Practice {
                    lesson,
                    task,
                    attempts,
                    checking,
                    result,
                    error,
                    ..
                },
                LessonAction::RevealSolution,
            ) if *attempts >= SOLUTION_UNLOCK_ATTEMPTS => Transition::to(LessonView::Practice {
                lesson: lesson.clone(),
                task: *task,
                attempts: *attempts,
                checking: *checking,
                result: result.clone(),
                solution_visible: true,
                error: error.clone(),
            }),

            // --- 完成 ---
            (LessonView::Completed { lesson, .. }, LessonAction::CompletionFailed(msg)) => {
                Transition::to(LessonView::Completed {
                    lesson: lesson.clone(),
                    error: Some(msg),
                })
            }

            // --- 返回地图：任何状态都会重新拉取课程 ---
            (_, LessonAction::Close) => {
                Transition::to(LessonView::map()).with(LessonEffect::FetchCourse)
            }

            (state, _) => Transition::to(state.clone()),
        }
    }

    /// 理论课的步骤数；没有步骤时把正文视为一步
    pub fn step_count(lesson: &Lesson) -> usize {
        lesson.theory_steps.len().max(1)
    }

    fn open(lesson: Lesson) -> Self {
        match lesson.kind {
            LessonKind::Practice if !lesson.practice_tasks.is_empty() => LessonView::Practice {
                lesson,
                task: 0,
                attempts: 0,
                checking: false,
                result: None,
                solution_visible: false,
                error: None,
            },
            _ => LessonView::Theory {
                lesson,
                step: 0,
                mismatch: false,
            },
        }
    }

    fn complete(lesson: &Lesson) -> Transition {
        Transition::to(LessonView::Completed {
            lesson: lesson.clone(),
            error: None,
        })
        .with(LessonEffect::CompleteLesson(CompleteLessonRequest {
            lesson_slug: lesson.slug.clone(),
        }))
    }
}

#[cfg(test)]
mod tests;
