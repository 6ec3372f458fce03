//! HTTP client for the chamber controller.
//!
//! The controller accepts raw G-code-style commands POSTed to `/gcode` and
//! answers 200 on acceptance. Delivery is strictly best-effort: one attempt
//! per command, a 2 second cap on each call, no retry. A failed send is
//! logged and forgotten; the annotated file is written either way, so the
//! file and the live controller state can diverge.

use std::fmt;
use std::time::Duration;

use crate::annotate::Effect;
use crate::config::Config;

/// Cap on each HTTP call, connect and read included.
const SEND_TIMEOUT: Duration = Duration::from_secs(2);

/// Commands understood by the chamber controller, in M-code clothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChamberCommand {
    /// `M141 S<t>` - set chamber target temperature (S0 turns the heater off).
    ChamberTemp(u16),
    /// `M150 S<v>` - set chamber LED brightness, 0-255.
    Leds(u8),
    /// `M106 S<v>` - set exhaust fan speed, 0-255.
    ExhaustFan(u8),
}

impl fmt::Display for ChamberCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChamberCommand::ChamberTemp(t) => write!(f, "M141 S{}", t),
            ChamberCommand::Leds(v) => write!(f, "M150 S{}", v),
            ChamberCommand::ExhaustFan(v) => write!(f, "M106 S{}", v),
        }
    }
}

/// Blocking client for one controller endpoint.
pub struct ChamberClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl ChamberClient {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(SEND_TIMEOUT)
            .timeout(SEND_TIMEOUT)
            .build();
        Self {
            endpoint: config.gcode_endpoint(),
            agent,
        }
    }

    /// POST one command as a plain-text body. Returns true iff the controller
    /// answered 200. Transport errors are downgraded to a warning.
    pub fn send(&self, command: &ChamberCommand) -> bool {
        let body = command.to_string();
        log::debug!("sending {} to {}", body, self.endpoint);

        match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "text/plain")
            .send_string(&body)
        {
            Ok(response) => response.status() == 200,
            Err(e) => {
                log::warn!("could not reach chamber controller: {}", e);
                false
            }
        }
    }

    /// Send every effect in insertion order. Returns how many were delivered.
    pub fn dispatch(&self, effects: &[Effect]) -> usize {
        effects
            .iter()
            .filter(|effect| self.send(&effect.command))
            .count()
    }
}
