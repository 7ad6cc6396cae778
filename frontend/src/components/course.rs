//! 课程页
//!
//! 视图状态保存在一个 `LessonView` 信号里。所有交互都转成 `LessonAction`
//! 交给 `LessonView::reduce`，返回的副作用在这里用 `spawn_local` 执行，
//! 结果再作为动作回送。

use crate::auth::{Api, tr, use_api, use_auth};
use crate::components::course_map::CourseMap;
use crate::components::mentor_chat::MentorChatWidget;
use crate::components::nav_bar::NavBar;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::i18n::{t, translate};
use mentorai_shared::progression::{LessonAction, LessonEffect, LessonView, Transition};
use mentorai_shared::Course;

/// 页面当前显示的区域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Map,
    Theory,
    Practice,
    Completed,
}

impl Screen {
    fn of(view: &LessonView) -> Self {
        match view {
            LessonView::Map { .. } => Screen::Map,
            LessonView::Theory { .. } => Screen::Theory,
            LessonView::Practice { .. } => Screen::Practice,
            LessonView::Completed { .. } => Screen::Completed,
        }
    }
}

/// 归约一次并写回信号，返回需要执行的副作用。
/// 请求返回前页面已卸载时信号已被释放，此时返回 `None`。
fn step(view: RwSignal<LessonView>, action: LessonAction) -> Option<Vec<LessonEffect>> {
    view.try_update(|current| {
        let Transition { view: next, effects } = current.reduce(action);
        *current = next;
        effects
    })
}

/// 持有页面状态并执行副作用
#[derive(Clone, Copy)]
struct LessonDriver {
    course_slug: StoredValue<String>,
    api: StoredValue<Api>,
    view: RwSignal<LessonView>,
    course: RwSignal<Option<Course>>,
    course_error: RwSignal<bool>,
}

impl LessonDriver {
    fn new(course_slug: String, api: Api) -> Self {
        Self {
            course_slug: StoredValue::new(course_slug),
            api: StoredValue::new(api),
            view: RwSignal::new(LessonView::map()),
            course: RwSignal::new(None),
            course_error: RwSignal::new(false),
        }
    }

    fn dispatch(self, action: LessonAction) {
        let Some(effects) = step(self.view, action) else {
            mentorai::log_warn!("[Course] Page unmounted, dropping action");
            return;
        };
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: LessonEffect) {
        let Some(api) = self.api.try_get_value() else {
            return;
        };
        match effect {
            LessonEffect::FetchCourse => self.load_course(),
            LessonEffect::FetchLesson(slug) => spawn_local(async move {
                let action = match api.lesson(&slug).await {
                    Ok(lesson) => LessonAction::LessonLoaded(lesson),
                    Err(e) => {
                        mentorai::log_error!("[Course] Failed to load lesson {}: {}", slug, e);
                        LessonAction::LoadFailed("course.lesson_failed".into())
                    }
                };
                self.dispatch(action);
            }),
            LessonEffect::CheckSolution(req) => spawn_local(async move {
                let action = match api.check(&req).await {
                    Ok(result) => LessonAction::GradeReceived(result),
                    Err(e) => {
                        mentorai::log_error!("[Course] Check failed: {}", e);
                        LessonAction::GradeFailed("course.check_failed".into())
                    }
                };
                self.dispatch(action);
            }),
            LessonEffect::CompleteLesson(req) => spawn_local(async move {
                match api.complete(&req).await {
                    // 完成后刷新课程，地图上的解锁状态随之更新
                    Ok(()) => self.load_course(),
                    Err(e) => {
                        mentorai::log_error!("[Course] Completion failed: {}", e);
                        self.dispatch(LessonAction::CompletionFailed(
                            "course.complete_failed".into(),
                        ));
                    }
                }
            }),
        }
    }

    fn load_course(self) {
        let (Some(api), Some(slug)) = (self.api.try_get_value(), self.course_slug.try_get_value())
        else {
            return;
        };
        spawn_local(async move {
            match api.course(&slug).await {
                Ok(course) => {
                    self.course.set(Some(course));
                    self.course_error.set(false);
                }
                Err(e) => {
                    mentorai::log_error!("[Course] Failed to load course {}: {}", slug, e);
                    self.course_error.set(true);
                }
            }
        });
    }

    fn is_finished(self) -> bool {
        self.course.with(|c| c.as_ref().is_some_and(Course::is_finished))
    }
}

#[component]
pub fn CoursePage(slug: String) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let locale = use_auth().locale;

    let driver = LessonDriver::new(slug.clone(), api);
    let view = driver.view;
    driver.run(LessonEffect::FetchCourse);

    let screen = Memo::new(move |_| view.with(Screen::of));
    let lesson_slug = Memo::new(move |_| view.with(|v| v.lesson().map(|l| l.slug.clone())));

    // 编辑器内容与理论课输入；切换题目或步骤时重置
    let code = RwSignal::new(String::new());
    let repeat_input = RwSignal::new(String::new());
    let position = Memo::new(move |_| {
        view.with(|v| match v {
            LessonView::Theory { lesson, step, .. } => Some((lesson.slug.clone(), *step)),
            LessonView::Practice { lesson, task, .. } => Some((lesson.slug.clone(), *task)),
            _ => None,
        })
    });
    Effect::new(move |_| {
        if position.get().is_some() {
            let initial = view.with_untracked(|v| {
                v.current_task()
                    .map(|task| task.initial_code.clone())
                    .unwrap_or_default()
            });
            code.set(initial);
            repeat_input.set(String::new());
        }
    });

    let completion_path = format!("/courses/{}/completion", slug);
    let finish_link = move || {
        let path = completion_path.clone();
        driver.is_finished().then(|| {
            view! {
                <button class="btn btn-accent" on:click=move |_| router.navigate(&path)>
                    {move || t(locale.get(), "course.finish")}
                </button>
            }
        })
    };

    let lesson_title = move || {
        view.with(|v| {
            v.lesson()
                .map(|l| l.title.get(locale.get()).to_string())
                .unwrap_or_default()
        })
    };

    let close = move |_: leptos::ev::MouseEvent| driver.dispatch(LessonAction::Close);

    // --- 地图 ---
    let map_section = move || {
        let (loading, error) = view.with(|v| match v {
            LessonView::Map { loading, error } => (loading.is_some(), error.clone()),
            _ => (false, None),
        });
        let active = view.with(|v| v.active_slug().map(str::to_string));
        let on_select = Callback::new(move |summary| driver.dispatch(LessonAction::Select(summary)));
        view! {
            <div class="space-y-4">
                {error.map(|key| view! {
                    <div role="alert" class="alert alert-error">
                        <span>{move || translate(locale.get(), &key).to_string()}</span>
                    </div>
                })}
                {loading.then(|| view! {
                    <div class="flex justify-center"><span class="loading loading-dots loading-lg"></span></div>
                })}
                {move || driver.course.get().map(|course| {
                    // 没有正在加载的课时时，高亮下一个待学的课时
                    let active = active
                        .clone()
                        .or_else(|| course.next_lesson().map(|l| l.slug.clone()));
                    view! { <CourseMap course=course active=active on_select=on_select /> }
                })}
            </div>
        }
    };

    // --- 理论课 ---
    let theory_section = move || {
        view.with(|v| {
            let LessonView::Theory { lesson, step, mismatch } = v else {
                return None;
            };
            let lc = locale.get();
            let total = LessonView::step_count(lesson);
            let current = v.current_step();
            let text = current
                .map(|s| s.text.get(lc).to_string())
                .or_else(|| lesson.content.as_ref().map(|c| c.get(lc).to_string()))
                .unwrap_or_default();
            let required = current.and_then(|s| s.required_code()).map(str::to_string);
            let mismatch = *mismatch;
            Some(view! {
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body space-y-4">
                        <span class="badge badge-outline">
                            {t(lc, "course.step")} " " {step + 1} " / " {total}
                        </span>
                        <p class="whitespace-pre-line text-lg">{text}</p>
                        {required.map(|snippet| view! {
                            <div class="space-y-2">
                                <p class="font-semibold">{t(lc, "course.repeat_code")}</p>
                                <pre class="bg-base-300 p-4 rounded-box overflow-x-auto"><code>{snippet}</code></pre>
                                <textarea
                                    class="textarea textarea-bordered font-mono w-full h-32"
                                    on:input=move |ev| repeat_input.set(event_target_value(&ev))
                                    prop:value=repeat_input
                                ></textarea>
                            </div>
                        })}
                        {mismatch.then(|| view! {
                            <div role="alert" class="alert alert-warning">
                                <span>{t(lc, "course.repeat_mismatch")}</span>
                            </div>
                        })}
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-primary"
                                on:click=move |_| driver.dispatch(LessonAction::Advance {
                                    input: repeat_input.get_untracked(),
                                })
                            >
                                {t(lc, "course.next_step")}
                            </button>
                        </div>
                    </div>
                </div>
            })
        })
    };

    // --- 练习课 ---
    let practice_section = move || {
        view.with(|v| {
            let LessonView::Practice {
                lesson,
                task,
                attempts,
                checking,
                result,
                solution_visible,
                error,
            } = v
            else {
                return None;
            };
            let lc = locale.get();
            let current = v.current_task()?;
            let checking = *checking;
            let can_reveal = v.can_reveal_solution() && !*solution_visible;
            let solution = solution_visible.then(|| {
                result
                    .as_ref()
                    .and_then(|r| r.correct_solution.clone())
                    .unwrap_or_else(|| current.solution_code.clone())
            });
            let feedback = result.clone().map(|r| {
                let (class, key) = if r.passed {
                    ("alert alert-success", "course.passed")
                } else {
                    ("alert alert-warning", "course.not_passed")
                };
                view! {
                    <div role="alert" class=class>
                        <div>
                            <h3 class="font-bold">{t(lc, key)}</h3>
                            <p class="whitespace-pre-line">{r.feedback}</p>
                        </div>
                    </div>
                }
            });
            let error = error.clone().map(|key| view! {
                <div role="alert" class="alert alert-error">
                    <span>{translate(lc, &key).to_string()}</span>
                </div>
            });
            Some(view! {
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body space-y-2">
                            <span class="badge badge-outline">
                                {t(lc, "course.task")} " " {task + 1} " / " {lesson.practice_tasks.len()}
                            </span>
                            <h2 class="card-title">{current.title.get(lc).to_string()}</h2>
                            <p class="whitespace-pre-line">{current.description.get(lc).to_string()}</p>
                            <p class="text-sm text-base-content/60">
                                {t(lc, "course.attempts")} ": " {*attempts}
                            </p>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body space-y-4">
                            <textarea
                                class="textarea textarea-bordered font-mono w-full h-64"
                                spellcheck="false"
                                on:input=move |ev| code.set(event_target_value(&ev))
                                prop:value=code
                            ></textarea>
                            <div class="card-actions justify-end">
                                {can_reveal.then(|| view! {
                                    <button
                                        class="btn btn-ghost"
                                        on:click=move |_| driver.dispatch(LessonAction::RevealSolution)
                                    >
                                        {t(lc, "course.show_solution")}
                                    </button>
                                })}
                                <button
                                    class="btn btn-primary"
                                    disabled=checking
                                    on:click=move |_| driver.dispatch(LessonAction::Submit {
                                        code: code.get_untracked(),
                                    })
                                >
                                    {if checking { t(lc, "course.checking") } else { t(lc, "course.run_code") }}
                                </button>
                            </div>
                            {feedback}
                            {error}
                            {solution.map(|solution| view! {
                                <div class="space-y-2">
                                    <h3 class="font-semibold">{t(lc, "course.solution")}</h3>
                                    <pre class="bg-base-300 p-4 rounded-box overflow-x-auto"><code>{solution}</code></pre>
                                </div>
                            })}
                        </div>
                    </div>
                </div>
            })
        })
    };

    // --- 完成 ---
    let completed_section = move || {
        let error = view.with(|v| match v {
            LessonView::Completed { error, .. } => error.clone(),
            _ => None,
        });
        view! {
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body items-center text-center space-y-4">
                    <h2 class="card-title text-success text-3xl">{move || t(locale.get(), "course.completed")}</h2>
                    {error.map(|key| view! {
                        <div role="alert" class="alert alert-error">
                            <span>{move || translate(locale.get(), &key).to_string()}</span>
                        </div>
                    })}
                    <div class="card-actions">
                        <button class="btn btn-primary" on:click=close>
                            {move || t(locale.get(), "course.back_to_map")}
                        </button>
                    </div>
                </div>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <NavBar show_logout=true />

                <div class="flex flex-wrap items-center justify-between gap-4">
                    {move || if screen.get() == Screen::Map {
                        view! {
                            <h1 class="text-3xl font-bold">
                                {move || driver.course.with(|c| {
                                    c.as_ref().map(|c| c.title.get(locale.get()).to_string()).unwrap_or_default()
                                })}
                            </h1>
                        }
                        .into_any()
                    } else {
                        view! {
                            <div class="flex items-center gap-4">
                                <button class="btn btn-ghost btn-sm" on:click=close>
                                    "← " {move || t(locale.get(), "course.back_to_map")}
                                </button>
                                <h1 class="text-2xl font-bold">{lesson_title}</h1>
                            </div>
                        }
                        .into_any()
                    }}
                    {finish_link}
                </div>

                <Show when=move || driver.course_error.get()>
                    <div role="alert" class="alert alert-error">
                        <span>{tr("course.load_failed")}</span>
                    </div>
                </Show>

                {move || match screen.get() {
                    Screen::Map => map_section().into_any(),
                    Screen::Theory => theory_section.into_any(),
                    Screen::Practice => practice_section.into_any(),
                    Screen::Completed => completed_section().into_any(),
                }}

                {move || lesson_slug.get().map(|slug| view! {
                    <MentorChatWidget lesson_slug=Some(slug) code=Some(code.into()) />
                })}
            </div>
        </div>
    }
}
