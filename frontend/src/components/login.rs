use crate::auth::{login, tr, use_api, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::i18n::t;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<&'static str>::None);
    let locale = auth.locale;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let api = api.clone();
        spawn_local(async move {
            let result = login(
                &api,
                auth,
                &username.get_untracked(),
                &password.get_untracked(),
            )
            .await;
            match result {
                Ok(()) => router.navigate("/dashboard"),
                Err(e) => {
                    mentorai::log_warn!("[Login] {}", e);
                    set_error_msg.set(Some("login.invalid"));
                }
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-md mx-auto space-y-8">
                <NavBar />
                <div class="card w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <h1 class="text-3xl font-bold text-center">{tr("login.title")}</h1>

                        {move || error_msg.get().map(|key| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{t(locale.get(), key)}</span>
                            </div>
                        })}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">{tr("login.username")}</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">{tr("login.password")}</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    t(locale.get(), "login.submit").into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center">
                            {tr("login.no_account")} " "
                            <Link to="/register" class="link link-primary">{tr("login.register")}</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
