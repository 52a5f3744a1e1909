#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::infrastructure::backends::BackendManager;

fn worker_error(err: anyhow::Error, tx: &mpsc::UnboundedSender<Event>) -> Result<()> {
    tx.send(Event::BackendMessage(Message::new_with_type(
        Author::Caddie,
        MessageType::Error,
        &format!("Error: {err}"),
    )))?;

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            match action.unwrap() {
                Action::BackendRequest(prompt) => {
                    // Requests are never retried or cancelled once issued. Any
                    // failure is turned into a chat message instead.
                    tokio::spawn(async move {
                        let res = BackendManager::get()
                            .get_completion(prompt, &worker_tx)
                            .await;

                        if let Err(err) = res {
                            worker_error(err, &worker_tx)?;
                        }

                        return Ok::<(), anyhow::Error>(());
                    });
                }
            }
        }
    }
}
