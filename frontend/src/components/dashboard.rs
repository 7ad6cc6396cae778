use crate::auth::{tr, use_api, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::route::NavState;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::i18n::t;
use mentorai_shared::protocol::UpdateProfileRequest;
use mentorai_shared::{Progress, Track};

/// 可切换的学习方向 (value, i18n key)
const TRACKS: [(Track, &str, &str); 2] = [
    (Track::Backend, "backend", "register.track_backend"),
    (Track::Frontend, "frontend", "register.track_frontend"),
];

/// 可选的测验语言 (value, label)
const LANGUAGES: [(&str, &str); 2] = [("python", "Python"), ("javascript", "JavaScript")];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();
    let locale = auth.locale;

    let (progress, set_progress) = signal(Option::<Progress>::None);
    let (language, set_language) = signal("python".to_string());
    let (code, set_code) = signal(String::new());
    let (analyzing, set_analyzing) = signal(false);
    let (analyze_error, set_analyze_error) = signal(false);
    let (track_error, set_track_error) = signal(false);

    // 初始加载：资料与进度并发请求
    {
        let api = api.clone();
        spawn_local(async move {
            match api.dashboard().await {
                Ok(data) => {
                    auth.user.set(Some(data.user));
                    set_progress.try_set(data.progress);
                }
                Err(e) => mentorai::log_warn!("[Dashboard] {}", e),
            }
        });
    }

    // 切换方向后服务器返回新的资料，课程卡片随之更新
    let on_track = {
        let api = api.clone();
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            let Some((track, _, _)) = TRACKS.into_iter().find(|(_, v, _)| *v == value) else {
                return;
            };
            set_track_error.set(false);
            let api = api.clone();
            spawn_local(async move {
                let req = UpdateProfileRequest {
                    track: Some(track),
                    ..Default::default()
                };
                match api.update_profile(&req).await {
                    Ok(user) => auth.user.set(Some(user)),
                    Err(e) => {
                        mentorai::log_warn!("[Dashboard] Track switch failed: {}", e);
                        set_track_error.try_set(true);
                    }
                }
            });
        }
    };

    let start_test = move |_: leptos::ev::MouseEvent| {
        router.navigate_with_state("/test", NavState::language(language.get_untracked()));
    };

    let on_analyze = move |_: leptos::ev::MouseEvent| {
        let text = code.get_untracked();
        if text.trim().is_empty() || analyzing.get_untracked() {
            return;
        }
        set_analyzing.set(true);
        set_analyze_error.set(false);
        let api = api.clone();
        spawn_local(async move {
            match api.analyze(&text).await {
                Ok(report) => router.navigate_with_state("/results", NavState::analysis(report)),
                Err(e) => {
                    mentorai::log_warn!("[Dashboard] Analysis failed: {}", e);
                    set_analyze_error.try_set(true);
                    set_analyzing.try_set(false);
                }
            }
        });
    };

    let current_track = move || auth.user.with(|u| u.as_ref().map(|u| u.track));

    let course_slug = move || {
        auth.user
            .with(|u| u.as_ref().map(|u| u.track.course_slug()))
            .unwrap_or("backend")
    };

    let completion = move || {
        let lang = auth.user.with(|u| u.as_ref().map(|u| u.track.language()))?;
        progress.with(|p| p.as_ref()?.language(lang).map(|l| l.completion))
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-8">
                <NavBar show_logout=true />

                <h1 class="text-3xl font-bold">
                    {tr("dashboard.welcome")} ", "
                    {move || auth.user.with(|u| u.as_ref().map(|u| u.username.clone()).unwrap_or_default())}
                </h1>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <div class="card bg-base-100 shadow-xl md:col-span-2">
                        <div class="card-body">
                            <h2 class="card-title">{tr("dashboard.my_course")}</h2>
                            <p class="text-base-content/70 capitalize">{course_slug}</p>
                            <label class="form-control w-full max-w-xs">
                                <span class="label-text">{tr("register.track")}</span>
                                <select class="select select-bordered select-sm" on:change=on_track>
                                    {TRACKS
                                        .into_iter()
                                        .map(|(track, value, key)| view! {
                                            <option value=value selected=move || current_track() == Some(track)>
                                                {move || t(locale.get(), key)}
                                            </option>
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                            <Show when=move || track_error.get()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || t(locale.get(), "dashboard.track_failed")}</span>
                                </div>
                            </Show>
                            <div class="card-actions justify-end">
                                <button
                                    class="btn btn-primary"
                                    on:click=move |_| router.navigate(&format!("/courses/{}", course_slug()))
                                >
                                    {tr("dashboard.continue")}
                                </button>
                            </div>
                        </div>
                    </div>

                    <div class="stats shadow bg-base-100">
                        <div class="stat">
                            <div class="stat-title">{tr("dashboard.progress")}</div>
                            <div class="stat-value text-primary">
                                {move || match completion() {
                                    Some(value) => format!("{:.0}%", value),
                                    None => "-".to_string(),
                                }}
                            </div>
                            <progress
                                class="progress progress-primary w-full"
                                value=move || completion().unwrap_or(0.0).to_string()
                                max="100"
                            ></progress>
                        </div>
                    </div>
                </div>

                <div class="flex gap-4">
                    <Link to="/homework" class="btn btn-outline">{tr("dashboard.homework")}</Link>
                    <Link to="/chat" class="btn btn-outline">{tr("dashboard.chat")}</Link>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{tr("dashboard.title")}</h2>
                        <p class="text-base-content/70">{tr("dashboard.subtitle")}</p>
                        <div class="flex flex-wrap gap-4 items-center">
                            <select
                                class="select select-bordered"
                                aria-label=tr("dashboard.select_lang")
                                on:change=move |ev| set_language.set(event_target_value(&ev))
                            >
                                {LANGUAGES
                                    .into_iter()
                                    .map(|(value, label)| view! {
                                        <option value=value selected=move || language.get() == value>
                                            {label}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
                            <button class="btn btn-primary" on:click=start_test>
                                {tr("dashboard.start_test")}
                            </button>
                        </div>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{tr("dashboard.code_analysis")}</h2>
                        <textarea
                            class="textarea textarea-bordered font-mono h-48"
                            placeholder=tr("dashboard.paste_code")
                            on:input=move |ev| set_code.set(event_target_value(&ev))
                            prop:value=code
                        ></textarea>
                        <Show when=move || analyze_error.get()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || t(locale.get(), "dashboard.analyze_failed")}</span>
                            </div>
                        </Show>
                        <div class="card-actions justify-end">
                            <button
                                class="btn btn-secondary"
                                disabled=move || analyzing.get() || code.with(|c| c.trim().is_empty())
                                on:click=on_analyze
                            >
                                <Show when=move || analyzing.get()>
                                    <span class="loading loading-spinner"></span>
                                </Show>
                                {tr("dashboard.analyze")}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
