use crate::auth::{logout, tr, use_api, use_auth};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

/// 顶部导航栏：站点名、语言切换，登录后显示注销
#[component]
pub fn NavBar(#[prop(optional)] show_logout: bool) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let router = use_router();

    let toggle_locale = {
        let api = api.clone();
        move |_: leptos::ev::MouseEvent| {
            let next = auth.locale.get_untracked().toggled();
            auth.set_locale(next, api.config());
        }
    };

    let on_logout = move |_: leptos::ev::MouseEvent| {
        logout(&api, auth);
        router.navigate("/login");
    };

    view! {
        <div class="navbar bg-base-100 rounded-box shadow-xl">
            <div class="flex-1">
                <Link to="/dashboard" class="btn btn-ghost text-xl">
                    {tr("app.name")}
                </Link>
            </div>
            <div class="flex-none gap-2">
                <button class="btn btn-ghost btn-sm" title=tr("app.language") on:click=toggle_locale>
                    {move || auth.locale.get().toggled().code().to_uppercase()}
                </button>
                {show_logout.then(|| view! {
                    <button class="btn btn-outline btn-error btn-sm" on:click=on_logout>
                        {tr("dashboard.logout")}
                    </button>
                })}
            </div>
        </div>
    }
}
