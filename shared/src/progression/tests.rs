use super::*;
use crate::{CheckResult, LocalizedText, PracticeTask, TheoryStep};

// =========================================================
// Fixtures
// =========================================================

fn summary(slug: &str, unlocked: bool) -> LessonSummary {
    LessonSummary {
        id: 1,
        slug: slug.into(),
        kind: LessonKind::Theory,
        title: slug.into(),
        is_unlocked: unlocked,
        is_completed: false,
    }
}

fn theory_lesson(codes: &[Option<&str>]) -> Lesson {
    Lesson {
        id: 10,
        slug: "variables".into(),
        kind: LessonKind::Theory,
        title: "Variables".into(),
        content: Some(LocalizedText::from("x = 1")),
        is_unlocked: true,
        is_completed: false,
        theory_steps: codes
            .iter()
            .map(|c| TheoryStep {
                text: "step".into(),
                code_to_repeat: c.map(str::to_string),
            })
            .collect(),
        practice_tasks: Vec::new(),
    }
}

fn practice_lesson(tasks: usize) -> Lesson {
    Lesson {
        id: 20,
        slug: "loops-practice".into(),
        kind: LessonKind::Practice,
        title: "Loops".into(),
        content: None,
        is_unlocked: true,
        is_completed: false,
        theory_steps: Vec::new(),
        practice_tasks: (0..tasks as u64)
            .map(|id| PracticeTask {
                id: 100 + id,
                title: "task".into(),
                description: "do it".into(),
                initial_code: "# start".into(),
                solution_code: "print(1)".into(),
            })
            .collect(),
    }
}

fn graded(passed: bool) -> CheckResult {
    CheckResult {
        passed,
        feedback: if passed { "ok" } else { "nope" }.into(),
        correct_solution: None,
    }
}

/// 从地图打开课时（选择 + 加载完成）
fn opened(lesson: Lesson) -> LessonView {
    let mut s = summary(&lesson.slug, true);
    s.kind = lesson.kind;
    let selecting = LessonView::map().reduce(LessonAction::Select(s)).view;
    selecting.reduce(LessonAction::LessonLoaded(lesson)).view
}

fn submit_and_grade(view: &LessonView, passed: bool) -> Transition {
    let checking = view.reduce(LessonAction::Submit {
        code: "print(1)".into(),
    });
    checking.view.reduce(LessonAction::GradeReceived(graded(passed)))
}

// =========================================================
// Map
// =========================================================

#[test]
fn locked_lesson_cannot_be_selected() {
    let map = LessonView::map();
    let t = map.reduce(LessonAction::Select(summary("closed", false)));
    assert_eq!(t.view, map);
    assert!(t.effects.is_empty());
}

#[test]
fn unlocked_lesson_selection_fetches_it() {
    let t = LessonView::map().reduce(LessonAction::Select(summary("open", true)));
    assert_eq!(t.effects, vec![LessonEffect::FetchLesson("open".into())]);
    assert_eq!(t.view.active_slug(), Some("open"));
}

#[test]
fn entering_a_lesson_refetches_course() {
    let lesson = theory_lesson(&[None]);
    let selecting = LessonView::map()
        .reduce(LessonAction::Select(summary("variables", true)))
        .view;
    let t = selecting.reduce(LessonAction::LessonLoaded(lesson));
    assert!(matches!(t.view, LessonView::Theory { step: 0, .. }));
    assert_eq!(t.effects, vec![LessonEffect::FetchCourse]);
}

#[test]
fn stale_lesson_response_is_ignored() {
    let selecting = LessonView::map()
        .reduce(LessonAction::Select(summary("other", true)))
        .view;
    let t = selecting.reduce(LessonAction::LessonLoaded(theory_lesson(&[None])));
    assert_eq!(t.view, selecting);
}

#[test]
fn load_failure_stays_on_map_with_error() {
    let selecting = LessonView::map()
        .reduce(LessonAction::Select(summary("variables", true)))
        .view;
    let t = selecting.reduce(LessonAction::LoadFailed("boom".into()));
    assert_eq!(
        t.view,
        LessonView::Map {
            loading: None,
            error: Some("boom".into())
        }
    );
}

#[test]
fn lesson_reported_locked_by_server_is_not_opened() {
    let mut lesson = theory_lesson(&[None]);
    lesson.is_unlocked = false;
    let selecting = LessonView::map()
        .reduce(LessonAction::Select(summary("variables", true)))
        .view;
    let t = selecting.reduce(LessonAction::LessonLoaded(lesson));
    assert!(t.view.is_map());
    assert!(t.effects.is_empty());
}

// =========================================================
// Theory
// =========================================================

#[test]
fn theory_mismatch_blocks_advance() {
    let view = opened(theory_lesson(&[Some("print('hi')"), None]));
    let t = view.reduce(LessonAction::Advance {
        input: "print('bye')".into(),
    });
    assert!(matches!(
        t.view,
        LessonView::Theory {
            step: 0,
            mismatch: true,
            ..
        }
    ));
    assert!(t.effects.is_empty());
}

#[test]
fn theory_advances_on_trimmed_match() {
    let view = opened(theory_lesson(&[Some("  print('hi')  "), None]));
    let t = view.reduce(LessonAction::Advance {
        input: "\nprint('hi')\n".into(),
    });
    assert!(matches!(
        t.view,
        LessonView::Theory {
            step: 1,
            mismatch: false,
            ..
        }
    ));
}

#[test]
fn last_theory_step_completes_lesson() {
    let view = opened(theory_lesson(&[None, None]));
    let second = view
        .reduce(LessonAction::Advance { input: String::new() })
        .view;
    let t = second.reduce(LessonAction::Advance { input: String::new() });
    assert!(matches!(t.view, LessonView::Completed { error: None, .. }));
    assert_eq!(
        t.effects,
        vec![LessonEffect::CompleteLesson(CompleteLessonRequest {
            lesson_slug: "variables".into()
        })]
    );
}

#[test]
fn theory_without_steps_is_single_step() {
    let view = opened(theory_lesson(&[]));
    let t = view.reduce(LessonAction::Advance { input: String::new() });
    assert!(matches!(t.view, LessonView::Completed { .. }));
}

// =========================================================
// Practice
// =========================================================

#[test]
fn submit_emits_check_with_task_id() {
    let view = opened(practice_lesson(2));
    let t = view.reduce(LessonAction::Submit {
        code: "print(1)".into(),
    });
    assert!(matches!(t.view, LessonView::Practice { checking: true, .. }));
    assert_eq!(
        t.effects,
        vec![LessonEffect::CheckSolution(CheckLessonRequest {
            slug: "loops-practice".into(),
            code: "print(1)".into(),
            task_id: Some(100),
        })]
    );
}

#[test]
fn second_submit_while_checking_is_ignored() {
    let checking = opened(practice_lesson(1))
        .reduce(LessonAction::Submit { code: "a".into() })
        .view;
    let t = checking.reduce(LessonAction::Submit { code: "b".into() });
    assert_eq!(t.view, checking);
    assert!(t.effects.is_empty());
}

#[test]
fn failed_grade_increments_attempts_by_one() {
    let view = opened(practice_lesson(2));
    let t = submit_and_grade(&view, false);
    match &t.view {
        LessonView::Practice {
            task,
            attempts,
            checking,
            ..
        } => {
            assert_eq!(*task, 0);
            assert_eq!(*attempts, 1);
            assert!(!checking);
        }
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn passed_grade_moves_to_next_task() {
    let view = opened(practice_lesson(2));
    let failed = submit_and_grade(&view, false).view;
    let t = submit_and_grade(&failed, true);
    assert!(matches!(
        t.view,
        LessonView::Practice {
            task: 1,
            attempts: 0,
            result: None,
            solution_visible: false,
            ..
        }
    ));
    assert_eq!(t.view.current_task().map(|t| t.id), Some(101));
}

#[test]
fn next_task_starts_without_previous_feedback() {
    let mut view = opened(practice_lesson(2));
    for _ in 0..SOLUTION_UNLOCK_ATTEMPTS {
        view = submit_and_grade(&view, false).view;
    }
    view = view.reduce(LessonAction::RevealSolution).view;
    let t = submit_and_grade(&view, true);
    match &t.view {
        LessonView::Practice {
            task,
            result,
            solution_visible,
            ..
        } => {
            assert_eq!(*task, 1);
            assert_eq!(*result, None);
            assert!(!*solution_visible);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert!(!t.view.can_reveal_solution());
}

#[test]
fn passing_last_task_completes_lesson() {
    let view = opened(practice_lesson(1));
    let t = submit_and_grade(&view, true);
    assert!(matches!(t.view, LessonView::Completed { .. }));
    assert!(matches!(
        t.effects.as_slice(),
        [LessonEffect::CompleteLesson(_)]
    ));
}

#[test]
fn network_failure_keeps_state_and_attempts() {
    let view = opened(practice_lesson(1));
    let checking = view
        .reduce(LessonAction::Submit { code: "x".into() })
        .view;
    let t = checking.reduce(LessonAction::GradeFailed("offline".into()));
    match t.view {
        LessonView::Practice {
            attempts,
            checking,
            error,
            ..
        } => {
            assert_eq!(attempts, 0);
            assert!(!checking);
            assert_eq!(error.as_deref(), Some("offline"));
        }
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn grade_without_pending_check_is_ignored() {
    let view = opened(practice_lesson(1));
    let t = view.reduce(LessonAction::GradeReceived(graded(true)));
    assert_eq!(t.view, view);
}

#[test]
fn solution_unlocks_after_three_failures() {
    let mut view = opened(practice_lesson(1));
    for _ in 0..SOLUTION_UNLOCK_ATTEMPTS - 1 {
        view = submit_and_grade(&view, false).view;
    }
    assert!(!view.can_reveal_solution());
    let still_hidden = view.reduce(LessonAction::RevealSolution).view;
    assert!(matches!(
        still_hidden,
        LessonView::Practice {
            solution_visible: false,
            ..
        }
    ));

    view = submit_and_grade(&view, false).view;
    assert!(view.can_reveal_solution());
    let revealed = view.reduce(LessonAction::RevealSolution).view;
    assert!(matches!(
        revealed,
        LessonView::Practice {
            solution_visible: true,
            ..
        }
    ));
}

#[test]
fn practice_without_tasks_opens_as_reading() {
    let view = opened(practice_lesson(0));
    assert!(matches!(view, LessonView::Theory { .. }));
}

// =========================================================
// Close / completion
// =========================================================

#[test]
fn close_from_any_state_refetches_course() {
    let states = [
        LessonView::map(),
        opened(theory_lesson(&[None])),
        opened(practice_lesson(1)),
    ];
    for state in states {
        let t = state.reduce(LessonAction::Close);
        assert_eq!(t.view, LessonView::map());
        assert_eq!(t.effects, vec![LessonEffect::FetchCourse]);
    }
}

#[test]
fn completion_failure_is_reported_inline() {
    let done = submit_and_grade(&opened(practice_lesson(1)), true).view;
    let t = done.reduce(LessonAction::CompletionFailed("500".into()));
    assert!(matches!(
        t.view,
        LessonView::Completed { error: Some(ref e), .. } if e == "500"
    ));
}
