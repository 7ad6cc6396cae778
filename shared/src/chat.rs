//! AI 导师对话状态
//!
//! 悬浮窗组件和 `/chat` 页面共用这份状态：
//! 打开时拉取历史，发送时先乐观追加用户消息，再追加导师回复或致歉消息。

use crate::i18n::{Locale, t};
use crate::protocol::{ChatHistoryRequest, ChatReply, SendChatRequest};
use crate::{ChatMessage, ChatRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatWindow {
    #[default]
    Closed,
    Open,
    Minimized,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MentorChat {
    lesson_slug: Option<String>,
    window: ChatWindow,
    messages: Vec<ChatMessage>,
    /// 有请求在途
    loading: bool,
}

impl MentorChat {
    pub fn new(lesson_slug: Option<String>) -> Self {
        Self {
            lesson_slug,
            ..Default::default()
        }
    }

    pub fn lesson_slug(&self) -> Option<&str> {
        self.lesson_slug.as_deref()
    }

    pub fn window(&self) -> ChatWindow {
        self.window
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 打开窗口；从关闭状态打开时返回历史请求
    pub fn open(&mut self) -> Option<ChatHistoryRequest> {
        let was_closed = self.window == ChatWindow::Closed;
        self.window = ChatWindow::Open;
        was_closed.then(|| ChatHistoryRequest {
            lesson_slug: self.lesson_slug.clone(),
        })
    }

    pub fn close(&mut self) {
        self.window = ChatWindow::Closed;
    }

    pub fn toggle_minimized(&mut self) {
        self.window = match self.window {
            ChatWindow::Open => ChatWindow::Minimized,
            ChatWindow::Minimized => ChatWindow::Open,
            ChatWindow::Closed => ChatWindow::Closed,
        };
    }

    /// 用服务端历史替换当前消息
    pub fn history_loaded(&mut self, history: Vec<ChatMessage>) {
        self.messages = history;
    }

    /// 乐观追加用户消息并返回待发送的请求
    ///
    /// 输入为空白或已有请求在途时返回 `None`。
    pub fn begin_send(&mut self, input: &str, code: Option<String>) -> Option<SendChatRequest> {
        let message = input.trim();
        if message.is_empty() || self.loading {
            return None;
        }
        self.messages.push(ChatMessage::new(ChatRole::User, message));
        self.loading = true;
        Some(SendChatRequest {
            lesson_slug: self.lesson_slug.clone(),
            message: message.to_string(),
            code,
        })
    }

    pub fn receive(&mut self, reply: ChatReply) {
        self.messages
            .push(ChatMessage::new(ChatRole::Mentor, reply.response));
        self.loading = false;
    }

    /// 请求失败时追加一条致歉消息
    pub fn fail(&mut self, locale: Locale) {
        self.messages
            .push(ChatMessage::new(ChatRole::Mentor, t(locale, "chat.unavailable")));
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_from_closed_fetches_history() {
        let mut chat = MentorChat::new(Some("loops".into()));
        let req = chat.open().unwrap();
        assert_eq!(req.lesson_slug.as_deref(), Some("loops"));
        assert_eq!(chat.window(), ChatWindow::Open);

        chat.toggle_minimized();
        assert_eq!(chat.window(), ChatWindow::Minimized);
        assert!(chat.open().is_none());

        chat.close();
        assert!(chat.open().is_some());
    }

    #[test]
    fn send_appends_user_message_optimistically() {
        let mut chat = MentorChat::new(None);
        let req = chat.begin_send("  why?  ", Some("x = 1".into())).unwrap();
        assert_eq!(req.message, "why?");
        assert_eq!(req.code.as_deref(), Some("x = 1"));
        assert!(chat.is_loading());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, ChatRole::User);
    }

    #[test]
    fn blank_input_and_in_flight_sends_are_ignored() {
        let mut chat = MentorChat::new(None);
        assert!(chat.begin_send("   ", None).is_none());
        assert!(chat.begin_send("first", None).is_some());
        assert!(chat.begin_send("second", None).is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn reply_and_failure_append_mentor_messages() {
        let mut chat = MentorChat::new(None);
        chat.begin_send("hi", None);
        chat.receive(ChatReply {
            response: "hello".into(),
        });
        assert!(!chat.is_loading());
        assert_eq!(chat.messages()[1].content, "hello");

        chat.begin_send("again", None);
        chat.fail(Locale::En);
        let last = chat.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Mentor);
        assert_eq!(last.content, t(Locale::En, "chat.unavailable"));
        assert!(!chat.is_loading());
    }

    #[test]
    fn history_replaces_messages() {
        let mut chat = MentorChat::new(None);
        chat.begin_send("local", None);
        chat.history_loaded(vec![ChatMessage::new(ChatRole::Mentor, "old")]);
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].content, "old");
    }
}
