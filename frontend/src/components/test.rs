use crate::auth::{tr, use_api, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::route::NavState;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::i18n::t;
use mentorai_shared::quiz::{QuizRunner, QuizStep};

/// 未指定语言时的默认测验语言
const DEFAULT_LANGUAGE: &str = "python";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Loading,
    Ready,
    Submitting,
    Failed(&'static str),
}

#[component]
pub fn TestPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let locale = auth.locale;

    let language = router
        .nav_state()
        .language
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let quiz = RwSignal::new(QuizRunner::new(language.clone(), Vec::new()));
    let (phase, set_phase) = signal(Phase::Loading);
    let is_empty = Memo::new(move |_| quiz.with(QuizRunner::is_empty));

    {
        let api = api.clone();
        spawn_local(async move {
            match api.questions(&language).await {
                Ok(questions) => {
                    quiz.set(QuizRunner::new(language, questions));
                    set_phase.set(Phase::Ready);
                }
                Err(e) => {
                    mentorai::log_error!("[Test] {}", e);
                    set_phase.set(Phase::Failed("test.load_failed"));
                }
            }
        });
    }

    let on_next = move |_: leptos::ev::MouseEvent| {
        if phase.get_untracked() != Phase::Ready {
            return;
        }
        let step = quiz.try_update(|q| q.next());
        match step {
            Some(Ok(QuizStep::Submit(req))) => {
                set_phase.set(Phase::Submitting);
                let api = api.clone();
                spawn_local(async move {
                    match api.submit_test(&req).await {
                        Ok(report) => {
                            router.navigate_with_state("/results", NavState::analysis(report))
                        }
                        Err(e) => {
                            mentorai::log_error!("[Test] {}", e);
                            set_phase.set(Phase::Failed("test.submit_failed"));
                        }
                    }
                });
            }
            Some(Ok(QuizStep::Advanced(_))) => {}
            Some(Err(e)) => mentorai::log_warn!("[Test] {}", e),
            None => {}
        }
    };

    let next_label = move || {
        let last = quiz.with(QuizRunner::is_last);
        let key = match (auth.is_child(), last) {
            (true, true) => "test.child_submit",
            (true, false) => "test.child_next",
            (false, true) => "test.submit",
            (false, false) => "test.next",
        };
        t(locale.get(), key)
    };

    let back = move |_: leptos::ev::MouseEvent| router.navigate("/dashboard");

    let question_view = move || {
        quiz.with(|q| {
            let question = q.current()?;
            let lc = locale.get();
            let selected = q.selected();
            let options = question
                .options(lc)
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    let class = if selected == Some(index) {
                        "btn btn-primary justify-start"
                    } else {
                        "btn btn-outline justify-start"
                    };
                    view! {
                        <button
                            class=class
                            on:click=move |_| {
                                quiz.update(|q| {
                                    if let Err(e) = q.select(index) {
                                        mentorai::log_warn!("[Test] {}", e);
                                    }
                                });
                            }
                        >
                            {label.clone()}
                        </button>
                    }
                })
                .collect_view();
            Some(view! {
                <div class="space-y-4">
                    <p class="text-sm text-base-content/60">
                        {t(lc, "test.question")} " " {q.current_index() + 1} " / " {q.len()}
                    </p>
                    <h2 class="text-xl font-semibold">{question.text(lc).to_string()}</h2>
                    <div class="flex flex-col gap-2">{options}</div>
                </div>
            })
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-8">
                <NavBar show_logout=true />
                {move || match phase.get() {
                    Phase::Loading => view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                    .into_any(),
                    Phase::Failed(key) => view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body items-center text-center">
                                <h2 class="card-title text-error">{tr("test.error")}</h2>
                                <p>{move || t(locale.get(), key)}</p>
                                <button class="btn btn-primary" on:click=back>{tr("test.back")}</button>
                            </div>
                        </div>
                    }
                    .into_any(),
                    Phase::Ready | Phase::Submitting if is_empty.get() => view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body items-center text-center">
                                <h2 class="card-title">{tr("test.no_questions_title")}</h2>
                                <p>{tr("test.no_questions")}</p>
                                <button class="btn btn-primary" on:click=back>{tr("test.back")}</button>
                            </div>
                        </div>
                    }
                    .into_any(),
                    Phase::Ready | Phase::Submitting => view! {
                        <div class="card bg-base-100 shadow-xl">
                            <div class="card-body space-y-6">
                                <div class="flex items-center justify-between">
                                    <h1 class="text-2xl font-bold">{tr("test.assessment")}</h1>
                                    <span class="badge badge-outline uppercase">
                                        {move || quiz.with(|q| q.language().to_string())}
                                    </span>
                                </div>
                                <div>
                                    <span class="text-sm">{tr("test.progress")}</span>
                                    <progress
                                        class="progress progress-primary w-full"
                                        value=move || quiz.with(QuizRunner::progress_percent).to_string()
                                        max="100"
                                    ></progress>
                                </div>
                                {question_view}
                                <div class="card-actions justify-end">
                                    <button
                                        class="btn btn-primary"
                                        disabled=move || {
                                            phase.get() == Phase::Submitting
                                                || quiz.with(|q| q.selected().is_none())
                                        }
                                        on:click=on_next.clone()
                                    >
                                        <Show when=move || phase.get() == Phase::Submitting>
                                            <span class="loading loading-spinner"></span>
                                        </Show>
                                        {next_label}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
