use std::io::{self, Write};

use anyhow::Result;
use bat::WrappingMode;
use cliclack::{input, spinner};
use console::style;
use provider_fetcher::models::message::{Message, MessageContent};

use super::{Input, InputType, Prompt, Theme};

pub struct CliclackPrompt {
    spinner: cliclack::ProgressBar,
    input_mode: InputMode,
    theme: Theme,
}

enum InputMode {
    Singleline,
    Multiline,
}

impl CliclackPrompt {
    pub fn new() -> Self {
        CliclackPrompt {
            spinner: spinner(),
            input_mode: InputMode::Multiline,
            theme: Theme::Dark,
        }
    }
}

impl Default for CliclackPrompt {
    fn default() -> Self {
        Self::new()
    }
}

fn print(content: &str, theme: &str) {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .unwrap();
}

fn print_newline() {
    println!();
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, message: Box<Message>) {
        let theme = match self.theme {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        };

        for message_content in &message.content {
            match message_content {
                MessageContent::Text(text) => print(&text.text, theme),
                MessageContent::File(file) => match &file.saved_to {
                    Some(path) => println!(
                        "{} {} {}",
                        style("Saved file").green(),
                        style(&file.file_name).bold(),
                        style(format!("to {path}")).dim()
                    ),
                    None => println!("{} {}", style("File").green(), style(&file.file_name).bold()),
                },
                MessageContent::Image(image) => match &image.saved_to {
                    Some(path) => println!(
                        "{} {} {}",
                        style("Saved image").green(),
                        style(&image.file_name).bold(),
                        style(format!("to {path}")).dim()
                    ),
                    None => println!(
                        "{} {}",
                        style("Image").green(),
                        style(&image.file_name).bold()
                    ),
                },
            }
        }

        print_newline();
        io::stdout().flush().expect("Failed to flush stdout");
    }

    fn show_busy(&mut self) {
        self.spinner = spinner();
        self.spinner.start("awaiting reply");
    }

    fn hide_busy(&self) {
        self.spinner.stop("");
    }

    fn get_input(&mut self) -> Result<Input> {
        let mut input = input("Provider Fetcher: ( O)>    [Help: /?]").placeholder("");
        match self.input_mode {
            InputMode::Multiline => input = input.multiline(),
            InputMode::Singleline => (),
        }
        let mut message_text: String = input.interact()?;
        message_text = message_text.trim().to_string();

        if message_text.eq_ignore_ascii_case("/exit") || message_text.eq_ignore_ascii_case("/quit")
        {
            Ok(Input {
                input_type: InputType::Exit,
                content: None,
            })
        } else if message_text.eq_ignore_ascii_case("/m") {
            self.input_mode = InputMode::Multiline;
            self.get_input()
        } else if message_text.eq_ignore_ascii_case("/s") {
            self.input_mode = InputMode::Singleline;
            self.get_input()
        } else if message_text.eq_ignore_ascii_case("/t") {
            self.theme = match self.theme {
                Theme::Light => {
                    println!("Switching to Dark theme");
                    Theme::Dark
                }
                Theme::Dark => {
                    println!("Switching to Light theme");
                    Theme::Light
                }
            };
            self.get_input()
        } else if message_text.eq_ignore_ascii_case("/?") {
            println!("Commands:");
            println!("/exit - Exit the session");
            println!("/m - Switch to multiline input mode");
            println!("/s - Switch to singleline input mode");
            println!("/t - Toggle Light/Dark theme");
            println!("/? - Display this help message");
            println!("Ctrl+C - Interrupt the current request");
            self.get_input()
        } else {
            Ok(Input {
                input_type: InputType::Message,
                content: Some(message_text),
            })
        }
    }

    fn close(&self) {
        // No cleanup required
    }
}
