use crate::auth::tr;
use crate::components::nav_bar::NavBar;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    let features = [
        "landing.features.analysis",
        "landing.features.roadmap",
        "landing.features.projects",
    ];

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-12">
                <NavBar />

                <div class="hero py-16">
                    <div class="hero-content text-center flex-col">
                        <h1 class="text-5xl font-bold">{tr("landing.title")}</h1>
                        <h2 class="text-3xl font-semibold text-primary">{tr("landing.subtitle")}</h2>
                        <p class="py-6 max-w-xl text-base-content/70">{tr("landing.description")}</p>
                        <div class="flex gap-4">
                            <Link to="/register" class="btn btn-primary">
                                {tr("landing.get_started")}
                            </Link>
                            <Link to="/login" class="btn btn-outline">
                                {tr("landing.login")}
                            </Link>
                        </div>
                    </div>
                </div>

                <div class="space-y-4">
                    <h3 class="text-2xl font-bold text-center">{tr("landing.how_it_works")}</h3>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        {features
                            .into_iter()
                            .map(|key| {
                                view! {
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body items-center text-center">
                                            <h4 class="card-title">{tr(key)}</h4>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </div>
    }
}
