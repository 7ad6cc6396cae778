//! AI 导师对话
//!
//! `ChatPanel` 负责消息列表与输入框，悬浮窗 `MentorChatWidget` 和 `/chat` 页面共用。

use crate::auth::{Api, use_api, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mentorai_shared::chat::{ChatWindow, MentorChat};
use mentorai_shared::i18n::{Locale, t};
use mentorai_shared::{ChatMessage, ChatRole};

/// 打开对话；从关闭状态打开时拉取历史
pub fn open_chat(api: Api, chat: RwSignal<MentorChat>) {
    let Some(req) = chat.try_update(MentorChat::open).flatten() else {
        return;
    };
    spawn_local(async move {
        match api.chat_history(&req).await {
            Ok(history) => chat.update(|c| c.history_loaded(history)),
            Err(e) => mentorai::log_warn!("[Chat] Failed to fetch history: {}", e),
        }
    });
}

fn send_message(
    api: Api,
    chat: RwSignal<MentorChat>,
    locale: Locale,
    input: String,
    code: Option<String>,
) {
    let Some(req) = chat.try_update(|c| c.begin_send(&input, code)).flatten() else {
        return;
    };
    spawn_local(async move {
        match api.send_chat(&req).await {
            Ok(reply) => chat.update(|c| c.receive(reply)),
            Err(e) => {
                mentorai::log_error!("[Chat] {}", e);
                chat.update(|c| c.fail(locale));
            }
        }
    });
}

fn bubble(message: &ChatMessage) -> impl IntoView + use<> {
    let (align, class) = match message.role {
        ChatRole::User => ("chat chat-end", "chat-bubble chat-bubble-primary whitespace-pre-wrap"),
        ChatRole::Mentor => ("chat chat-start", "chat-bubble whitespace-pre-wrap"),
    };
    view! {
        <div class=align>
            <div class=class>{message.content.clone()}</div>
        </div>
    }
}

/// 消息列表与输入框
#[component]
pub fn ChatPanel(
    chat: RwSignal<MentorChat>,
    /// 发送时附带的当前代码
    #[prop(default = None)]
    code: Option<Signal<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let locale = auth.locale;
    let (input, set_input) = signal(String::new());

    let label = move |adult: &'static str, kid: &'static str| {
        move || t(locale.get(), if auth.is_child() { kid } else { adult })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        set_input.set(String::new());
        let code = code.map(|c| c.get_untracked());
        send_message(api.clone(), chat, locale.get_untracked(), text, code);
    };

    view! {
        <div class="flex flex-col h-full min-h-0">
            <div class="flex-1 overflow-y-auto p-4 space-y-2">
                <Show when=move || chat.with(|c| c.messages().is_empty())>
                    <div class="chat chat-start">
                        <div class="chat-bubble">{label("chat.welcome", "chat.welcome_child")}</div>
                    </div>
                </Show>
                <For
                    each=move || chat.with(|c| c.messages().to_vec())
                    key=|message| message.local_id
                    children=|message| bubble(&message)
                />
                <Show when=move || chat.with(MentorChat::is_loading)>
                    <div class="chat chat-start">
                        <div class="chat-bubble opacity-70">
                            <span class="loading loading-dots loading-sm"></span>
                            " " {move || t(locale.get(), "chat.thinking")}
                        </div>
                    </div>
                </Show>
            </div>
            <form class="flex gap-2 p-3 border-t border-base-300" on:submit=on_submit>
                <input
                    type="text"
                    class="input input-bordered flex-1"
                    placeholder=label("chat.placeholder", "chat.placeholder_child")
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    prop:value=input
                />
                <button
                    class="btn btn-primary"
                    disabled=move || chat.with(MentorChat::is_loading) || input.with(|i| i.trim().is_empty())
                >
                    "➤"
                </button>
            </form>
        </div>
    }
}

/// 课时页右下角的悬浮导师窗口
#[component]
pub fn MentorChatWidget(
    lesson_slug: Option<String>,
    #[prop(default = None)] code: Option<Signal<String>>,
) -> impl IntoView {
    let auth = use_auth();
    let api = use_api();
    let locale = auth.locale;
    let chat = RwSignal::new(MentorChat::new(lesson_slug));
    // 只在窗口状态变化时重建，新消息不会重置输入框
    let window = Memo::new(move |_| chat.with(MentorChat::window));

    let title = move || {
        let key = if auth.is_child() { "chat.title_child" } else { "chat.title" };
        t(locale.get(), key)
    };

    let launcher_class = move || {
        if auth.is_child() {
            "btn btn-circle btn-lg btn-warning border-4 border-black fixed bottom-6 right-6 z-50 shadow-2xl"
        } else {
            "btn btn-circle btn-lg btn-primary fixed bottom-6 right-6 z-50 shadow-2xl"
        }
    };

    let window_class = move || {
        let size = match window.get() {
            ChatWindow::Minimized => "h-14 w-72",
            _ => "h-[500px] w-[350px] md:w-[400px]",
        };
        format!(
            "card bg-base-100 shadow-2xl fixed bottom-6 right-6 z-50 flex flex-col overflow-hidden {}",
            size
        )
    };

    view! {
        {move || match window.get() {
            ChatWindow::Closed => {
                let api = api.clone();
                view! {
                    <button class=launcher_class on:click=move |_| open_chat(api.clone(), chat)>
                        <span class="badge badge-error badge-sm absolute -top-2 -right-2">"AI"</span>
                        "💬"
                    </button>
                }
                .into_any()
            }
            state => view! {
                <div class=window_class>
                    <div class="flex items-center justify-between px-4 h-14 bg-primary text-primary-content shrink-0">
                        <span class="font-bold">{title}</span>
                        <div class="flex gap-1">
                            <button
                                class="btn btn-ghost btn-xs"
                                on:click=move |_| chat.update(MentorChat::toggle_minimized)
                            >
                                {if state == ChatWindow::Minimized { "▢" } else { "_" }}
                            </button>
                            <button class="btn btn-ghost btn-xs" on:click=move |_| chat.update(MentorChat::close)>
                                "✕"
                            </button>
                        </div>
                    </div>
                    {(state == ChatWindow::Open).then(|| view! { <ChatPanel chat=chat code=code /> })}
                </div>
            }
            .into_any(),
        }}
    }
}
