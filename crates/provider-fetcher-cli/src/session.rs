use std::path::PathBuf;

use anyhow::Result;

use crate::prompt::{InputType, Prompt};
use crate::session::session_file::{persist_messages, save_attachment};
use provider_fetcher::agent::{Agent, Reply};
use provider_fetcher::models::message::Message;

pub mod session_file;

pub struct Session<'a> {
    agent: Box<Agent>,
    prompt: Box<dyn Prompt + 'a>,
    session_file: PathBuf,
    downloads_dir: PathBuf,
    messages: Vec<Message>,
}

impl<'a> Session<'a> {
    pub fn new(
        agent: Box<Agent>,
        prompt: Box<impl Prompt + 'a>,
        session_file: PathBuf,
        downloads_dir: PathBuf,
    ) -> Self {
        Session {
            agent,
            prompt,
            session_file,
            downloads_dir,
            messages: Vec::new(),
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.setup_session();

        loop {
            let input = self.prompt.get_input()?;
            let content = match input.input_type {
                InputType::Message => match input.content {
                    Some(content) => content,
                    None => continue,
                },
                InputType::Exit => break,
                InputType::AskAgain => continue,
            };

            self.messages.push(Message::user().with_text(&content));
            persist_messages(&self.session_file, &self.messages)?;

            self.prompt.show_busy();
            self.process_turn(&content).await?;
            self.prompt.hide_busy();
        }

        self.close_session();
        Ok(())
    }

    /// Send one message to the assistant and render whatever comes back.
    /// Ctrl+C abandons the turn and resets the transcript to before it.
    async fn process_turn(&mut self, content: &str) -> Result<()> {
        tokio::select! {
            reply = self.agent.reply(content) => {
                match reply {
                    Ok(reply) => {
                        let message = self.assistant_message(reply)?;
                        self.messages.push(message.clone());
                        persist_messages(&self.session_file, &self.messages)?;
                        self.prompt.render(Box::new(message));
                    }
                    Err(e) => {
                        // The session stays usable after a failed turn.
                        let message = Message::assistant().with_text(format!("Error: {e}"));
                        self.messages.push(message.clone());
                        persist_messages(&self.session_file, &self.messages)?;
                        self.prompt.render(Box::new(message));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                self.messages.pop();
                persist_messages(&self.session_file, &self.messages)?;
                self.prompt.render(Box::new(Message::assistant().with_text(
                    " Interrupt: Resetting conversation to before the last sent message...\n",
                )));
            }
        }
        Ok(())
    }

    fn assistant_message(&self, reply: Reply) -> Result<Message> {
        let mut message = Message::assistant().with_text(&reply.text);
        for file in &reply.files {
            let saved = save_attachment(&self.downloads_dir, &file.file_name, &file.bytes)?;
            message = message.with_file(&file.file_name, Some(saved.display().to_string()));
        }
        for image in &reply.images {
            let saved = save_attachment(&self.downloads_dir, &image.file_name, &image.bytes)?;
            message = message.with_image(&image.file_name, Some(saved.display().to_string()));
        }
        Ok(message)
    }

    fn setup_session(&mut self) {
        self.prompt.render(Box::new(Message::assistant().with_text(format!(
            "Starting session. Recording to {}\n",
            self.session_file.display()
        ))));
        self.prompt.ready();
    }

    fn close_session(&mut self) {
        self.prompt.render(Box::new(
            Message::assistant().with_text("Closing session.\n"),
        ));
        self.prompt.close();
    }
}
