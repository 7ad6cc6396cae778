use crate::auth::{Api, tr, use_api, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai::ApiResult;
use mentorai_shared::i18n::t;
use mentorai_shared::{Homework, HomeworkResult, HomeworkStatus};

/// 任务列表里摘要的最大字符数
const PREVIEW_CHARS: usize = 60;

fn status_badge(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Passed => "badge badge-success",
        HomeworkStatus::Failed => "badge badge-error",
        HomeworkStatus::Pending => "badge badge-ghost",
    }
}

/// 作业页的信号集合。请求返回时页面可能已经卸载，写入前都先检查信号是否仍然存活。
#[derive(Clone, Copy)]
struct HomeworkState {
    homework: RwSignal<Vec<Homework>>,
    selected: RwSignal<Option<u64>>,
    submission: RwSignal<String>,
    load_error: RwSignal<bool>,
    submitting: RwSignal<bool>,
    submit_error: RwSignal<bool>,
    result: RwSignal<Option<HomeworkResult>>,
}

impl HomeworkState {
    fn new() -> Self {
        Self {
            homework: RwSignal::new(Vec::new()),
            selected: RwSignal::new(None),
            submission: RwSignal::new(String::new()),
            load_error: RwSignal::new(false),
            submitting: RwSignal::new(false),
            submit_error: RwSignal::new(false),
            result: RwSignal::new(None),
        }
    }

    /// 写入作业列表；首次加载时默认选中第一项
    fn loaded(self, outcome: ApiResult<Vec<Homework>>) {
        let list = match outcome {
            Ok(list) => list,
            Err(e) => {
                mentorai::log_error!("[Homework] {}", e);
                self.load_error.try_set(true);
                return;
            }
        };
        let Some(selected) = self.selected.try_get_untracked() else {
            return;
        };
        self.load_error.set(false);
        if selected.is_none()
            && let Some(first) = list.first()
        {
            self.selected.set(Some(first.id));
            self.submission.set(first.submission.clone().unwrap_or_default());
        }
        self.homework.set(list);
    }

    /// 记录评审结果；返回是否需要刷新列表
    fn submitted(self, outcome: ApiResult<HomeworkResult>) -> bool {
        self.submitting.try_set(false);
        match outcome {
            Ok(res) => {
                self.submit_error.try_set(false);
                self.result.try_set(Some(res)).is_none()
            }
            Err(e) => {
                mentorai::log_error!("[Homework] Submit failed: {}", e);
                self.submit_error.try_set(true);
                false
            }
        }
    }

    fn select(self, id: u64, saved: String) {
        self.selected.set(Some(id));
        self.submission.set(saved);
        self.result.set(None);
        self.submit_error.set(false);
    }
}

fn fetch_homework(api: Api, language: String, state: HomeworkState) {
    spawn_local(async move {
        state.loaded(api.homework(&language).await);
    });
}

#[component]
pub fn HomeworkPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let locale = auth.locale;

    let language = router
        .nav_state()
        .language
        .or_else(|| {
            auth.user
                .with_untracked(|u| u.as_ref().map(|u| u.track.language().to_string()))
        })
        .unwrap_or_else(|| "python".to_string());

    let state = HomeworkState::new();
    let HomeworkState {
        homework,
        selected,
        submission,
        load_error,
        submitting,
        submit_error,
        result,
    } = state;

    fetch_homework(api.clone(), language.clone(), state);

    let current = move || {
        let id = selected.get()?;
        homework.with(|list| list.iter().find(|h| h.id == id).cloned())
    };

    let on_submit = {
        let api = api.clone();
        let language = language.clone();
        move |_: leptos::ev::MouseEvent| {
            let Some(id) = selected.get_untracked() else {
                return;
            };
            let text = submission.get_untracked();
            if text.trim().is_empty() || submitting.get_untracked() {
                return;
            }
            submitting.set(true);
            submit_error.set(false);
            let api = api.clone();
            let language = language.clone();
            spawn_local(async move {
                if state.submitted(api.submit_homework(id, &text).await) {
                    fetch_homework(api, language, state);
                }
            });
        }
    };

    let task_list = move || {
        homework
            .get()
            .into_iter()
            .map(|hw| {
                let id = hw.id;
                let preview = hw.preview(PREVIEW_CHARS);
                let saved = hw.submission.clone().unwrap_or_default();
                view! {
                    <button
                        class=move || {
                            if selected.get() == Some(id) {
                                "card w-full text-left bg-primary text-primary-content"
                            } else {
                                "card w-full text-left bg-base-100 hover:bg-base-300"
                            }
                        }
                        on:click=move |_| state.select(id, saved.clone())
                    >
                        <div class="card-body p-4 gap-2">
                            <span class=status_badge(hw.status)>{hw.category}</span>
                            <p class="font-semibold">{preview}</p>
                        </div>
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-6xl mx-auto space-y-8">
                <NavBar show_logout=true />
                <button class="btn btn-ghost btn-sm" on:click=move |_| router.navigate("/dashboard")>
                    "← " {tr("test.back")}
                </button>

                <Show when=move || load_error.get()>
                    <div role="alert" class="alert alert-error">
                        <span>{move || t(locale.get(), "homework.load_failed")}</span>
                    </div>
                </Show>

                <div class="grid grid-cols-1 lg:grid-cols-12 gap-8">
                    <div class="lg:col-span-4 space-y-3">
                        <h2 class="text-sm font-bold uppercase text-primary">{tr("homework.your_tasks")}</h2>
                        <Show
                            when=move || homework.with(|list| !list.is_empty())
                            fallback=move || view! { <p class="text-base-content/60">{tr("homework.empty")}</p> }
                        >
                            {task_list}
                        </Show>
                    </div>

                    <div class="lg:col-span-8 space-y-6">
                        {move || current().map(|hw| view! {
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">{t(locale.get(), "homework.mentor_task")}</h3>
                                    <p class="whitespace-pre-line border-l-4 border-primary pl-4">{hw.task}</p>
                                </div>
                            </div>
                        })}

                        <Show when=move || selected.get().is_some()>
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <span class="text-xs uppercase text-base-content/50">{language.clone()}</span>
                                    <textarea
                                        class="textarea textarea-bordered font-mono h-64"
                                        placeholder=tr("homework.placeholder")
                                        on:input=move |ev| submission.set(event_target_value(&ev))
                                        prop:value=submission
                                    ></textarea>
                                    <div class="card-actions justify-end">
                                        <button
                                            class="btn btn-primary"
                                            disabled=move || submitting.get() || submission.with(|s| s.trim().is_empty())
                                            on:click=on_submit.clone()
                                        >
                                            <Show when=move || submitting.get()>
                                                <span class="loading loading-spinner"></span>
                                            </Show>
                                            {tr("homework.submit")}
                                        </button>
                                    </div>
                                    <Show when=move || submit_error.get()>
                                        <div role="alert" class="alert alert-error text-sm py-2">
                                            <span>{move || t(locale.get(), "homework.submit_failed")}</span>
                                        </div>
                                    </Show>
                                </div>
                            </div>
                        </Show>

                        {move || result.get().map(|res| {
                            let (class, key) = if res.passed {
                                ("alert alert-success", "homework.passed")
                            } else {
                                ("alert alert-warning", "homework.failed")
                            };
                            view! {
                                <div class="space-y-4">
                                    <div role="alert" class=class>
                                        <div>
                                            <h3 class="font-bold">{t(locale.get(), key)}</h3>
                                            <p class="whitespace-pre-line">{res.feedback}</p>
                                        </div>
                                    </div>
                                    {res.correct_solution.map(|solution| view! {
                                        <div class="card bg-base-100 shadow-xl">
                                            <div class="card-body">
                                                <h3 class="card-title">{t(locale.get(), "homework.master_solution")}</h3>
                                                <pre class="bg-base-300 p-4 rounded-box overflow-x-auto"><code>{solution}</code></pre>
                                                <p class="text-sm text-base-content/60">{t(locale.get(), "homework.note")}</p>
                                            </div>
                                        </div>
                                    })}
                                </div>
                            }
                        })}
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorai::ApiError;

    fn assignment(id: u64, submission: Option<&str>) -> Homework {
        Homework {
            id,
            category: "loops".into(),
            task: "Write a loop".into(),
            status: HomeworkStatus::Pending,
            submission: submission.map(str::to_string),
            feedback: None,
            correct_solution: None,
        }
    }

    #[test]
    fn first_load_selects_first_assignment() {
        let owner = Owner::new();
        owner.with(|| {
            let state = HomeworkState::new();
            state.loaded(Ok(vec![assignment(3, Some("for i in x")), assignment(4, None)]));
            assert_eq!(state.selected.get_untracked(), Some(3));
            assert_eq!(state.submission.get_untracked(), "for i in x");
            assert_eq!(state.homework.with_untracked(Vec::len), 2);

            // 刷新列表不改变当前选择
            state.select(4, String::new());
            state.loaded(Ok(vec![assignment(3, None), assignment(4, None)]));
            assert_eq!(state.selected.get_untracked(), Some(4));
        });
    }

    #[test]
    fn load_failure_sets_flag() {
        let owner = Owner::new();
        owner.with(|| {
            let state = HomeworkState::new();
            state.loaded(Err(ApiError::network("offline")));
            assert!(state.load_error.get_untracked());
            assert!(state.homework.with_untracked(Vec::is_empty));
        });
    }

    #[test]
    fn submit_failure_is_shown_and_clears_spinner() {
        let owner = Owner::new();
        owner.with(|| {
            let state = HomeworkState::new();
            state.submitting.set(true);
            let refetch = state.submitted(Err(ApiError::network("offline")));
            assert!(!refetch);
            assert!(state.submit_error.get_untracked());
            assert!(!state.submitting.get_untracked());
            assert_eq!(state.result.get_untracked(), None);

            let refetch = state.submitted(Ok(HomeworkResult {
                passed: true,
                ..Default::default()
            }));
            assert!(refetch);
            assert!(!state.submit_error.get_untracked());
            assert!(state.result.with_untracked(|r| r.as_ref().is_some_and(|r| r.passed)));
        });
    }

    #[test]
    fn responses_after_unmount_are_dropped() {
        let owner = Owner::new();
        let state = owner.with(HomeworkState::new);
        owner.cleanup();

        state.loaded(Ok(vec![assignment(1, None)]));
        state.loaded(Err(ApiError::network("offline")));
        assert!(!state.submitted(Ok(HomeworkResult::default())));
        assert!(!state.submitted(Err(ApiError::network("offline"))));
    }
}
