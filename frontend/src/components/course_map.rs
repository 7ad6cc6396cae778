//! 课程地图组件
//!
//! 布局由 `mentorai_shared::course_map::layout` 计算，这里只负责绘制 SVG。

use crate::auth::use_auth;
use crate::web::is_compact_viewport;
use leptos::prelude::*;
use mentorai_shared::course_map::{NodeStatus, layout};
use mentorai_shared::i18n::t;
use mentorai_shared::{Course, LessonKind, LessonSummary};

fn node_fill(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Locked => "fill-base-300 stroke-base-content/20",
        NodeStatus::Completed => "fill-success stroke-success",
        NodeStatus::Active => "fill-primary stroke-primary-content animate-pulse",
        NodeStatus::Default => "fill-secondary stroke-secondary-content",
    }
}

fn node_glyph(status: NodeStatus, kind: LessonKind) -> &'static str {
    match (status, kind) {
        (NodeStatus::Locked, _) => "🔒",
        (NodeStatus::Completed, _) => "★",
        (_, LessonKind::Practice) => "</>",
        (_, LessonKind::Theory) => "📖",
    }
}

#[component]
pub fn CourseMap(
    course: Course,
    /// 高亮的课时
    #[prop(default = None)]
    active: Option<String>,
    on_select: Callback<LessonSummary>,
) -> impl IntoView {
    let locale = use_auth().locale;
    let map = layout(&course, active.as_deref(), is_compact_viewport());
    let (width, height, radius) = (map.width, map.height, map.node_radius);
    let path = map.path_d();
    let view_box = format!("0 0 {:.0} {:.0}", width, height);
    // 高亮课时外圈的标记
    let marker = active
        .as_deref()
        .and_then(|slug| map.node(slug))
        .map(|node| node.position)
        .map(|at| {
            view! {
                <circle
                    cx=format!("{:.1}", at.x)
                    cy=format!("{:.1}", at.y)
                    r=format!("{:.1}", radius + 10.0)
                    fill="none"
                    stroke-width="3"
                    stroke-dasharray="6 6"
                    class="stroke-primary"
                ></circle>
            }
        });

    let banners = map
        .banners
        .into_iter()
        .map(|banner| {
            let class = if banner.highlighted {
                "fill-primary font-bold"
            } else {
                "fill-base-content/40 font-bold"
            };
            let title = banner.title;
            view! {
                <text
                    x=format!("{:.1}", width / 2.0)
                    y=format!("{:.1}", banner.y)
                    text-anchor="middle"
                    class=class
                >
                    {move || title.get(locale.get()).to_string()}
                </text>
            }
        })
        .collect_view();

    let nodes = map
        .nodes
        .into_iter()
        .map(|node| {
            let status = node.status;
            let summary = course.lesson(&node.slug).cloned();
            let title = node.title;
            let on_click = move |_: leptos::ev::MouseEvent| {
                if status.is_selectable()
                    && let Some(summary) = summary.clone()
                {
                    on_select.run(summary);
                }
            };
            let cursor = if status.is_selectable() {
                "cursor-pointer"
            } else {
                "cursor-not-allowed"
            };
            view! {
                <g class=format!("{} {}", status.css_class(), cursor) on:click=on_click>
                    <circle
                        cx=format!("{:.1}", node.position.x)
                        cy=format!("{:.1}", node.position.y)
                        r=format!("{:.1}", radius)
                        stroke-width="4"
                        class=node_fill(status)
                    ></circle>
                    <text
                        x=format!("{:.1}", node.position.x)
                        y=format!("{:.1}", node.position.y + 6.0)
                        text-anchor="middle"
                        class="fill-base-100 text-lg pointer-events-none"
                    >
                        {node_glyph(status, node.kind)}
                    </text>
                    <title>{move || title.get(locale.get()).to_string()}</title>
                </g>
            }
        })
        .collect_view();

    let empty = course.lessons().next().is_none();

    view! {
        <div class="flex flex-col items-center">
            {if empty {
                view! { <p class="py-16 text-base-content/60">{move || t(locale.get(), "course.empty")}</p> }.into_any()
            } else {
                view! {
                    <svg
                        viewBox=view_box
                        width=format!("{:.0}", width)
                        height=format!("{:.0}", height)
                        class="max-w-full"
                    >
                        <path d=path fill="none" stroke-width="8" stroke-dasharray="12 12" class="stroke-base-300"></path>
                        {banners}
                        {marker}
                        {nodes}
                    </svg>
                }
                .into_any()
            }}
            <p class="text-sm text-base-content/50 pb-8">{move || t(locale.get(), "course.more_levels")}</p>
        </div>
    }
}
