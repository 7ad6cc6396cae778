use crate::auth::{tr, use_api, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai::error::ApiErrorKind;
use mentorai_shared::Track;
use mentorai_shared::i18n::t;
use mentorai_shared::protocol::RegisterRequest;

const GOALS: [(&str, &str); 3] = [
    ("job", "register.goal_job"),
    ("freelance", "register.goal_freelance"),
    ("startup", "register.goal_startup"),
];

/// 注册失败时展示的文本：服务端字段消息或本地化的通用提示
#[derive(Clone, PartialEq)]
enum RegisterError {
    Server(String),
    Generic,
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let locale = use_auth().locale;

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (age, set_age) = signal(String::new());
    let (track, set_track) = signal(Track::Backend);
    let (goal, set_goal) = signal("job".to_string());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error, set_error) = signal(Option::<RegisterError>::None);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error.set(None);

        let track = track.get_untracked();
        let req = RegisterRequest {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            age: age.get_untracked().trim().parse().ok(),
            track,
            primary_language: track.language().to_string(),
            goal: goal.get_untracked(),
        };

        let api = api.clone();
        spawn_local(async move {
            match api.register(&req).await {
                Ok(()) => router.navigate("/login"),
                Err(e) => {
                    let shown = match e.kind {
                        ApiErrorKind::Validation => e
                            .first_field_error("username")
                            .map(|msg| RegisterError::Server(msg.to_string())),
                        _ => None,
                    };
                    set_error.set(Some(shown.unwrap_or(RegisterError::Generic)));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-lg mx-auto space-y-8">
                <NavBar />
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h1 class="text-3xl font-bold text-center">{tr("register.title")}</h1>

                        {move || error.get().map(|err| {
                            let text = match err {
                                RegisterError::Server(msg) => msg,
                                RegisterError::Generic => t(locale.get(), "register.failed").to_string(),
                            };
                            view! {
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{text}</span>
                                </div>
                            }
                        })}

                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <label class="form-control">
                                <span class="label-text">{tr("register.username")}</span>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    on:input=move |ev| set_username.set(event_target_value(&ev))
                                    prop:value=username
                                    required
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text">{tr("register.email")}</span>
                                <input
                                    type="email"
                                    class="input input-bordered"
                                    on:input=move |ev| set_email.set(event_target_value(&ev))
                                    prop:value=email
                                    required
                                />
                            </label>
                        </div>

                        <label class="form-control">
                            <span class="label-text">{tr("register.password")}</span>
                            <input
                                type="password"
                                class="input input-bordered"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                required
                            />
                        </label>

                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <label class="form-control">
                                <span class="label-text">{tr("register.age")}</span>
                                <input
                                    type="number"
                                    min="5"
                                    max="120"
                                    class="input input-bordered"
                                    on:input=move |ev| set_age.set(event_target_value(&ev))
                                    prop:value=age
                                />
                            </label>
                            <label class="form-control">
                                <span class="label-text">{tr("register.track")}</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        set_track.set(if value == "frontend" { Track::Frontend } else { Track::Backend });
                                    }
                                >
                                    <option value="backend" selected=move || track.get() == Track::Backend>
                                        {tr("register.track_backend")}
                                    </option>
                                    <option value="frontend" selected=move || track.get() == Track::Frontend>
                                        {tr("register.track_frontend")}
                                    </option>
                                </select>
                            </label>
                            <label class="form-control">
                                <span class="label-text">{tr("register.goal")}</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| set_goal.set(event_target_value(&ev))
                                >
                                    {GOALS
                                        .into_iter()
                                        .map(|(value, key)| view! {
                                            <option value=value selected=move || goal.get() == value>
                                                {tr(key)}
                                            </option>
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                        </div>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    t(locale.get(), "register.submit").into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            {tr("register.have_account")} " "
                            <Link to="/login" class="link link-primary">{tr("login.submit")}</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
