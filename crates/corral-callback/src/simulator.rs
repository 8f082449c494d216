use serde_json::{Value, json};
use std::convert::Infallible;
use tracing::debug;

/// Result of executing one command in the simulator.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome<O, I> {
    pub obs: O,
    pub reward: f64,
    pub done: bool,
    pub info: I,
}

/// The parts of a Minecraft simulator a reset callback may drive.
pub trait Simulator {
    type Obs;
    type Info;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs a single world-edit command such as `/fill ...`.
    fn execute_cmd(
        &mut self,
        command: &str,
    ) -> Result<StepOutcome<Self::Obs, Self::Info>, Self::Error>;

    /// Normalizes an observation/info pair after the world was edited.
    fn wrap_obs_info(
        &mut self,
        obs: Self::Obs,
        info: Self::Info,
    ) -> Result<(Self::Obs, Self::Info), Self::Error>;
}

/// Simulator stand-in that records commands instead of running them.
///
/// The observation is the number of commands executed so far; the info
/// mapping carries the last command under `last_command`.
#[derive(Debug, Default)]
pub struct DryRunSimulator {
    commands: Vec<String>,
}

impl DryRunSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Simulator for DryRunSimulator {
    type Obs = usize;
    type Info = Value;
    type Error = Infallible;

    fn execute_cmd(&mut self, command: &str) -> Result<StepOutcome<usize, Value>, Infallible> {
        debug!(command, "dry-run");
        self.commands.push(command.to_string());
        Ok(StepOutcome {
            obs: self.commands.len(),
            reward: 0.0,
            done: false,
            info: json!({ "last_command": command }),
        })
    }

    fn wrap_obs_info(&mut self, obs: usize, mut info: Value) -> Result<(usize, Value), Infallible> {
        if let Value::Object(map) = &mut info {
            map.insert("wrapped".to_string(), Value::Bool(true));
        }
        Ok((obs, info))
    }
}
