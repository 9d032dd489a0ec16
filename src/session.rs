//! The interaction driver: one session, one log, one blocking call per turn.

use log::{ error, info };
use std::sync::Arc;

use crate::error::{ ConfigurationError, InputError, InteractionError };
use crate::history::ConversationLog;
use crate::llm::chat::ChatClient;
use crate::llm::projection::project;
use crate::models::chat::{ Turn, UserInput };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Processing,
}

/// Output surface. Renders turns in log order and surfaces progress and errors.
pub trait Renderer {
    fn render_turn(&mut self, turn: &Turn);
    /// Called on every driver transition, so `Processing` is visible while the
    /// gateway call is in flight.
    fn state_changed(&mut self, state: SessionState);
    fn error(&mut self, err: &InteractionError);
}

pub struct Session {
    gateway: Result<Arc<dyn ChatClient>, ConfigurationError>,
    log: ConversationLog,
    state: SessionState,
}

impl Session {
    /// A configuration error is kept rather than raised; the session stays
    /// viewable but every submission reports it.
    pub fn new(gateway: Result<Arc<dyn ChatClient>, ConfigurationError>) -> Self {
        if let Err(e) = &gateway {
            error!("Session started without a usable gateway: {}", e);
        }
        Self {
            gateway,
            log: ConversationLog::new(),
            state: SessionState::AwaitingInput,
        }
    }

    /// Between calls this is always `AwaitingInput`; `submit` holds `&mut self`
    /// for the whole call, so `Processing` is only observable via the renderer.
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn configuration_error(&self) -> Option<&ConfigurationError> {
        self.gateway.as_ref().err()
    }

    pub fn render_history(&self, renderer: &mut dyn Renderer) {
        for turn in self.log.all() {
            renderer.render_turn(turn);
        }
    }

    /// Runs one interaction. On success the assistant turn is appended and
    /// returned; on a gateway failure the user turn stays without a reply.
    pub async fn submit(
        &mut self,
        input: UserInput,
        renderer: &mut dyn Renderer
    ) -> Result<&Turn, InteractionError> {
        let user_turn = Turn::user(input.text, input.image).ok_or(InputError::NothingSubmitted)?;
        let gateway = match &self.gateway {
            Ok(gateway) => Arc::clone(gateway),
            Err(e) => {
                return Err(e.clone().into());
            }
        };

        renderer.render_turn(self.log.append(user_turn));

        self.state = SessionState::Processing;
        renderer.state_changed(self.state);
        let messages = project(self.log.all());
        let result = gateway.infer(&messages).await;
        self.state = SessionState::AwaitingInput;
        renderer.state_changed(self.state);

        match result {
            Ok(reply) => {
                info!("Received reply ({} chars), log length {}", reply.len(), self.log.len() + 1);
                let turn = self.log.append(Turn::assistant(reply));
                renderer.render_turn(turn);
                Ok(turn)
            }
            Err(e) => {
                error!("Inference failed: {}", e);
                Err(e.into())
            }
        }
    }
}
