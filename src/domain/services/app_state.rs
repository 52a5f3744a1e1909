#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::infrastructure::backends::BackendManager;

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub scroll: Scroll,
    pub waiting_for_backend: bool,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        let mut app_state = AppState {
            bubble_list: BubbleList::new(),
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![],
            scroll: Scroll::default(),
            waiting_for_backend: false,
        };

        app_state
            .messages
            .push(Message::new(Author::Caddie, "Ask me anything about golf..."));

        if let Err(err) = BackendManager::get().health_check().await {
            let url = Config::get(ConfigKey::CaddieURL);
            app_state.messages.push(Message::new_with_type(
                Author::Caddie,
                MessageType::Error,
                &format!("It looks like the caddie service at {url} isn't reachable. You should double check that before asking anything, otherwise all you'll get back is error messages.\n\nError: {err}"),
            ));
        }

        return Ok(app_state);
    }

    /// Hands the question off to the backend worker. Whitespace-only input is
    /// ignored entirely. Returns whether a request was actually dispatched.
    pub fn submit_prompt(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }

        self.add_message(Message::new(Author::User, text));
        self.waiting_for_backend = true;
        tx.send(Action::BackendRequest(BackendPrompt::new(text.to_string())))?;

        return Ok(true);
    }

    /// Grows the answer in place as fragments arrive. A fragment following a
    /// user message opens a new caddie message; anything after that appends to
    /// it until the terminal response closes the exchange.
    pub fn handle_backend_response(&mut self, res: BackendResponse) {
        if !res.text.is_empty() {
            match self.messages.last_mut() {
                Some(last_message) if last_message.author != Author::User => {
                    last_message.append(&res.text);
                }
                _ => {
                    self.messages.push(Message::new(res.author, &res.text));
                }
            }
        }

        self.sync_dependants();

        if res.done {
            self.waiting_for_backend = false;
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);

        if self.waiting_for_backend {
            self.scroll.last();
        }
    }
}
