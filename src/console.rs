//! Terminal input and output surfaces for a chat session.

use log::{ info, warn };
use std::io::{ self, BufRead, Write };
use std::path::PathBuf;

use crate::error::{ InputError, InteractionError };
use crate::image::load_image;
use crate::models::chat::{ ContentPart, Role, Turn, UserInput };
use crate::session::{ Renderer, Session, SessionState };

pub const TITLE: &str = "Picture description Chatbox";
pub const GREETING: &str = "hello, please upload the picture that you want me to describe";

const HELP: &str =
    "Commands:\n  /image <path>  attach a JPEG or PNG to your next message\n  /send          send the attached image without text\n  /history       show the conversation so far\n  /help          show this help\n  /quit          leave the chat";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Text(String),
    AttachImage(PathBuf),
    SendImage,
    History,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if !line.starts_with('/') {
        return Command::Text(line.to_string());
    }

    let (cmd, rest) = match line.split_once(char::is_whitespace) {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    };
    match cmd {
        "/image" if !rest.is_empty() => Command::AttachImage(PathBuf::from(rest)),
        "/send" => Command::SendImage,
        "/history" => Command::History,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        _ => Command::Unknown(cmd.to_string()),
    }
}

pub struct ConsoleRenderer<W: Write> {
    out: W,
    replies_only: bool,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, replies_only: false }
    }

    /// Prints nothing but assistant text, for piping one-shot output.
    pub fn replies_only(out: W) -> Self {
        Self { out, replies_only: true }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self) {
        self.line(&format!("{}\n", TITLE));
        self.line(&format!("assistant: {}", GREETING));
        self.line("");
    }

    pub fn notice(&mut self, message: &str) {
        self.line(message);
    }

    pub fn prompt(&mut self) {
        if let Err(e) = write!(self.out, "> ").and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "assistant",
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render_turn(&mut self, turn: &Turn) {
        if self.replies_only {
            if turn.role == Role::Assistant {
                self.line(turn.text().unwrap_or_default());
            }
            return;
        }
        for part in &turn.parts {
            let body = match part {
                ContentPart::Text { value } => value.clone(),
                ContentPart::Image { mime_type, bytes } =>
                    format!("[image: {}, {} bytes]", mime_type, bytes.len()),
            };
            self.line(&format!("{}: {}", speaker(turn.role), body));
        }
    }

    fn state_changed(&mut self, state: SessionState) {
        if state == SessionState::Processing && !self.replies_only {
            self.line("Thinking...");
        }
    }

    fn error(&mut self, err: &InteractionError) {
        self.line(&format!("error: {}", err));
    }
}

/// Reads commands until `/quit` or end of input, one interaction at a time.
pub async fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    renderer: &mut ConsoleRenderer<W>
) -> io::Result<()> {
    renderer.banner();
    if let Some(e) = session.configuration_error() {
        renderer.error(&InteractionError::Configuration(e.clone()));
    }
    renderer.notice("Type /help for commands.");

    let mut staged: Option<ContentPart> = None;
    loop {
        renderer.prompt();
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let user_input = match parse_line(&line) {
            Command::Empty => {
                continue;
            }
            Command::Quit => {
                break;
            }
            Command::Help => {
                renderer.notice(HELP);
                continue;
            }
            Command::History => {
                session.render_history(renderer);
                continue;
            }
            Command::Unknown(cmd) => {
                renderer.notice(&format!("Unknown command '{}'. Type /help for commands.", cmd));
                continue;
            }
            Command::AttachImage(path) => {
                match load_image(&path) {
                    Ok(part) => {
                        info!("Staged image {}", path.display());
                        renderer.notice(&format!("Attached {}", path.display()));
                        staged = Some(part);
                    }
                    Err(e) => renderer.error(&InteractionError::Input(e)),
                }
                continue;
            }
            Command::SendImage => {
                UserInput {
                    text: None,
                    image: staged.clone(),
                }
            }
            Command::Text(text) => {
                UserInput {
                    text: Some(text),
                    image: staged.clone(),
                }
            }
        };

        if user_input.is_empty() {
            renderer.error(&InteractionError::Input(InputError::NothingSubmitted));
            continue;
        }

        let before = session.log().len();
        if let Err(e) = session.submit(user_input, renderer).await {
            renderer.error(&e);
        }
        // The upload belongs to the turn that consumed it, even if the reply failed.
        if session.log().len() > before {
            staged = None;
        }
    }

    renderer.notice("Goodbye!");
    Ok(())
}

/// Runs exactly one interaction from command-line input. Replies go to
/// `renderer`; a failure is rendered on `errors` before it is returned.
pub async fn run_once<W: Write, E: Write>(
    session: &mut Session,
    prompt: Option<String>,
    image: Option<PathBuf>,
    renderer: &mut ConsoleRenderer<W>,
    errors: &mut ConsoleRenderer<E>
) -> Result<(), InteractionError> {
    let result = submit_once(session, prompt, image, renderer).await;
    if let Err(e) = &result {
        errors.error(e);
    }
    result
}

async fn submit_once<W: Write>(
    session: &mut Session,
    prompt: Option<String>,
    image: Option<PathBuf>,
    renderer: &mut ConsoleRenderer<W>
) -> Result<(), InteractionError> {
    let image = match image {
        Some(path) => Some(load_image(path)?),
        None => None,
    };
    session.submit(UserInput { text: prompt, image }, renderer).await?;
    Ok(())
}
