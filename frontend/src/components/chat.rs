use crate::auth::{tr, use_auth};
use crate::components::mentor_chat::ChatPanel;
use leptos::prelude::*;
use mentorai_shared::chat::MentorChat;
use mentorai_shared::i18n::t;

/// 不绑定课时的全屏导师对话
#[component]
pub fn ChatPage() -> impl IntoView {
    let auth = use_auth();
    let chat = RwSignal::new(MentorChat::new(None));
    // 全屏对话不拉取历史，直接进入打开状态
    chat.update(|c| {
        c.open();
    });

    let go_back = move |_: leptos::ev::MouseEvent| {
        if let Err(e) = window().history().and_then(|h| h.back()) {
            mentorai::log_warn!("[Chat] history.back failed: {:?}", e);
        }
    };

    let title = move || {
        if auth.is_child() { "chat.title_child" } else { "chat.title" }
    };

    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <header class="navbar bg-base-100 shadow px-6">
                <div class="flex-1">
                    <button class="btn btn-ghost btn-sm uppercase" on:click=go_back>
                        "← " {tr("chat.back")}
                    </button>
                </div>
                <div class="flex-none font-bold">
                    {move || t(auth.locale.get(), title())}
                </div>
            </header>
            <main class="flex-1 flex flex-col max-w-4xl w-full mx-auto min-h-0">
                <ChatPanel chat=chat />
            </main>
        </div>
    }
}
