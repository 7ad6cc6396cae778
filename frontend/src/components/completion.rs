use crate::auth::{tr, use_api, use_auth};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::CourseReport;
use mentorai_shared::i18n::t;

/// 报告文本按行解析出的块
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    Title(String),
    Heading(String),
    Item(String),
    Paragraph(String),
}

/// 只识别 `# `、`## ` 和 `- ` 三种行首标记，其余按段落处理
fn parse_report(text: &str) -> Vec<Block> {
    text.lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix("# ") {
                Block::Title(rest.to_string())
            } else if let Some(rest) = line.strip_prefix("## ") {
                Block::Heading(rest.to_string())
            } else if let Some(rest) = line.trim_start().strip_prefix("- ") {
                Block::Item(rest.to_string())
            } else {
                Block::Paragraph(line.to_string())
            }
        })
        .collect()
}

fn render_block(block: Block) -> AnyView {
    match block {
        Block::Title(text) => view! { <h1 class="text-3xl font-black mt-8 mb-4">{text}</h1> }.into_any(),
        Block::Heading(text) => view! { <h2 class="text-2xl font-bold mt-6 mb-3">{text}</h2> }.into_any(),
        Block::Item(text) => view! { <li class="ml-4 list-disc mb-2">{text}</li> }.into_any(),
        Block::Paragraph(text) => view! { <p class="mb-4 leading-relaxed">{text}</p> }.into_any(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum ReportState {
    Loading,
    Ready(CourseReport),
    Failed,
}

#[component]
pub fn CourseCompletionPage(slug: String) -> impl IntoView {
    let api = use_api();
    let router = use_router();
    let locale = use_auth().locale;
    let (report, set_report) = signal(ReportState::Loading);

    spawn_local(async move {
        match api.generate_report(&slug).await {
            Ok(r) => set_report.set(ReportState::Ready(r)),
            Err(e) => {
                mentorai::log_error!("[Completion] Failed to generate report for {}: {}", slug, e);
                set_report.set(ReportState::Failed);
            }
        }
    });

    let body = move || {
        let lc = locale.get();
        report.with(|state| match state {
            ReportState::Loading => view! {
                <div class="flex flex-col items-center py-16 gap-4">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <p class="animate-pulse">{t(lc, "app.loading")}</p>
                </div>
            }
            .into_any(),
            ReportState::Ready(r) => parse_report(r.text(lc))
                .into_iter()
                .map(render_block)
                .collect_view()
                .into_any(),
            ReportState::Failed => parse_report(t(lc, "completion.fallback"))
                .into_iter()
                .map(render_block)
                .collect_view()
                .into_any(),
        })
    };

    view! {
        <div class="min-h-screen bg-base-200 py-12 px-4">
            <div class="max-w-3xl mx-auto space-y-12">
                <div class="text-center">
                    <div class="text-7xl mb-6">"🏆"</div>
                    <h1 class="text-5xl font-black">{tr("completion.title")}</h1>
                </div>
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">{body}</div>
                </div>
                <div class="text-center">
                    <button class="btn btn-primary" on:click=move |_| router.navigate("/courses")>
                        {tr("completion.back")}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markdown_lines() {
        let blocks = parse_report("# Done\n## Strengths\n  - loops\n- functions\nplain text");
        assert_eq!(
            blocks,
            vec![
                Block::Title("Done".into()),
                Block::Heading("Strengths".into()),
                Block::Item("loops".into()),
                Block::Item("functions".into()),
                Block::Paragraph("plain text".into()),
            ]
        );
    }

    #[test]
    fn hash_without_space_is_a_paragraph() {
        assert_eq!(
            parse_report("#hashtag"),
            vec![Block::Paragraph("#hashtag".into())]
        );
    }
}
