use crate::auth::{tr, use_auth};
use crate::components::nav_bar::NavBar;
use crate::web::route::NavState;
use crate::web::router::use_router;
use leptos::prelude::*;
use mentorai_shared::AnalysisReport;
use mentorai_shared::i18n::t;

/// 成人与儿童主题使用不同的标题文案
fn heading(child: bool, adult: &'static str, kid: &'static str) -> &'static str {
    if child { kid } else { adult }
}

/// 结果页显示的内容；直接打开或刷新页面时导航状态里没有报告
#[derive(Debug, Clone, PartialEq)]
enum Content {
    NoData,
    Report(AnalysisReport),
}

impl Content {
    fn from_nav(state: NavState) -> Self {
        match state.analysis {
            Some(report) => Content::Report(report),
            None => Content::NoData,
        }
    }
}

#[component]
pub fn ResultsPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let locale = auth.locale;

    let Content::Report(report) = Content::from_nav(router.nav_state()) else {
        return view! {
            <div class="min-h-screen bg-base-200 p-4 md:p-8">
                <div class="max-w-3xl mx-auto space-y-8">
                    <NavBar show_logout=true />
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body items-center text-center">
                            <p>{tr("results.no_data")}</p>
                            <button class="btn btn-primary" on:click=move |_| router.navigate("/dashboard")>
                                {tr("results.go_dashboard")}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        }
        .into_any();
    };

    let AnalysisReport {
        level,
        feedback,
        roadmap,
        projects,
        score,
    } = report;

    let label = move |adult: &'static str, kid: &'static str| {
        move || t(locale.get(), heading(auth.is_child(), adult, kid))
    };

    let roadmap_view = roadmap
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            view! {
                <li class="step step-primary text-left">
                    <div class="p-2">
                        <p class="font-semibold">{index + 1} ". " {step.topic}</p>
                        <p class="text-sm text-base-content/70">{step.description}</p>
                    </div>
                </li>
            }
        })
        .collect_view();

    let projects_view = projects
        .into_iter()
        .map(|project| {
            let stack = project
                .tech_stack
                .into_iter()
                .map(|tech| view! { <span class="badge badge-outline">{tech}</span> })
                .collect_view();
            view! {
                <div class="card bg-base-200">
                    <div class="card-body">
                        <h3 class="card-title">{project.title}</h3>
                        <p class="text-sm">{project.description}</p>
                        <div class="flex flex-wrap gap-2">{stack}</div>
                    </div>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-4xl mx-auto space-y-8">
                <NavBar show_logout=true />
                <h1 class="text-3xl font-bold">{label("results.title", "results.super_results")}</h1>

                <div class="stats stats-vertical md:stats-horizontal shadow bg-base-100 w-full">
                    <div class="stat">
                        <div class="stat-title">{label("results.level", "results.hero")}</div>
                        <div class="stat-value text-primary capitalize">{level.label()}</div>
                    </div>
                    {score.map(|score| view! {
                        <div class="stat">
                            <div class="stat-title">{label("results.score", "results.magic_points")}</div>
                            <div class="stat-value">{format!("{:.0}", score)}</div>
                        </div>
                    })}
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <p class="whitespace-pre-line">{feedback}</p>
                    </div>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h2 class="card-title">{label("results.roadmap", "results.adventure_map")}</h2>
                        <ul class="steps steps-vertical">{roadmap_view}</ul>
                    </div>
                </div>

                <div class="space-y-4">
                    <h2 class="text-2xl font-bold">{label("results.projects", "results.my_game")}</h2>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">{projects_view}</div>
                </div>

                <div class="flex justify-end">
                    <button class="btn btn-primary" on:click=move |_| router.navigate("/dashboard")>
                        {label("results.new_analysis", "results.home")}
                    </button>
                </div>
            </div>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorai_shared::SkillLevel;

    fn report() -> AnalysisReport {
        AnalysisReport {
            level: SkillLevel::Junior,
            feedback: "Solid basics".into(),
            roadmap: Vec::new(),
            projects: Vec::new(),
            score: Some(72.0),
        }
    }

    #[test]
    fn missing_report_shows_fallback() {
        assert_eq!(Content::from_nav(NavState::default()), Content::NoData);
        // 测验语言不是报告
        assert_eq!(Content::from_nav(NavState::language("python")), Content::NoData);
    }

    #[test]
    fn report_from_navigation_is_rendered() {
        assert_eq!(
            Content::from_nav(NavState::analysis(report())),
            Content::Report(report())
        );
    }

    #[test]
    fn child_theme_uses_kid_headings() {
        let (adult, kid) = ("results.title", "results.super_results");
        assert_eq!(heading(true, adult, kid), kid);
        assert_eq!(heading(false, adult, kid), adult);
    }
}
