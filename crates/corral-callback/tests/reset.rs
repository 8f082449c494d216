use anyhow::Result;
use corral_base::{BlockType, Error};
use corral_callback::{
    BarrierBoxCallback, BoxConfig, CallbackRegistry, ConfigSource, DryRunSimulator, Simulator,
    SimulatorCallback, StepOutcome, run_after_reset, run_before_reset,
};
use serde_json::json;

#[derive(Debug)]
struct CommandError(String);

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "command rejected: {}", self.0)
    }
}

impl std::error::Error for CommandError {}

#[derive(Default)]
struct RecordingSim {
    executed: Vec<String>,
    fail_at: Option<usize>,
    wrap_calls: usize,
}

impl Simulator for RecordingSim {
    type Obs = usize;
    type Info = Vec<String>;
    type Error = CommandError;

    fn execute_cmd(&mut self, command: &str) -> Result<StepOutcome<usize, Vec<String>>, CommandError> {
        if self.fail_at == Some(self.executed.len()) {
            return Err(CommandError(command.to_string()));
        }
        self.executed.push(command.to_string());
        Ok(StepOutcome {
            obs: self.executed.len(),
            reward: 1.0,
            done: false,
            info: self.executed.clone(),
        })
    }

    fn wrap_obs_info(
        &mut self,
        obs: usize,
        info: Vec<String>,
    ) -> Result<(usize, Vec<String>), CommandError> {
        self.wrap_calls += 1;
        Ok((obs + 100, info))
    }
}

fn callback(floor: bool, ceiling: bool) -> Result<BarrierBoxCallback> {
    Ok(BarrierBoxCallback::new(BoxConfig::new(25, 10, "barrier", floor, ceiling)?))
}

#[test]
fn reset_builds_four_walls_at_origin() -> Result<()> {
    let mut sim = RecordingSim::default();
    let mut callback = callback(false, false)?;

    let (obs, info) = callback.after_reset(&mut sim, 0, Vec::new())?;

    assert_eq!(
        sim.executed,
        vec![
            "/fill -12 0 -12 12 10 -12 minecraft:barrier",
            "/fill -12 0 12 12 10 12 minecraft:barrier",
            "/fill -12 0 -12 -12 10 12 minecraft:barrier",
            "/fill 12 0 -12 12 10 12 minecraft:barrier",
        ]
    );
    assert_eq!(sim.wrap_calls, 1);
    assert_eq!(obs, 104);
    assert_eq!(info, sim.executed);
    Ok(())
}

#[test]
fn reset_appends_floor_then_ceiling() -> Result<()> {
    let mut sim = RecordingSim::default();
    let mut callback = callback(true, true)?;

    callback.after_reset(&mut sim, 0, Vec::new())?;

    assert_eq!(sim.executed.len(), 6);
    assert_eq!(sim.executed[4], "/fill -12 0 -12 12 0 12 minecraft:barrier");
    assert_eq!(sim.executed[5], "/fill -12 10 -12 12 10 12 minecraft:barrier");
    Ok(())
}

#[test]
fn reset_matches_generated_commands() -> Result<()> {
    let mut sim = RecordingSim::default();
    let mut callback = callback(false, true)?;

    callback.after_reset(&mut sim, 0, Vec::new())?;

    assert_eq!(sim.executed, callback.generate_box_commands(0, 0, 0)?);
    Ok(())
}

#[test]
fn failing_command_stops_the_sequence() -> Result<()> {
    let mut sim = RecordingSim {
        fail_at: Some(2),
        ..RecordingSim::default()
    };
    let mut callback = callback(true, false)?;

    let err = callback.after_reset(&mut sim, 0, Vec::new()).unwrap_err();

    match &err {
        Error::CommandFailed { command, .. } => {
            assert_eq!(command, "/fill -12 0 -12 -12 10 12 minecraft:barrier");
        }
        other => panic!("unexpected error: {other}"),
    }
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(
        source.as_deref(),
        Some("command rejected: /fill -12 0 -12 -12 10 12 minecraft:barrier")
    );
    assert_eq!(sim.executed.len(), 2);
    assert_eq!(sim.wrap_calls, 0);
    Ok(())
}

#[test]
fn generator_is_repeatable() -> Result<()> {
    let callback = callback(true, true)?;
    let first = callback.generate_box_commands(3, -8, 70)?;
    let second = callback.generate_box_commands(3, -8, 70)?;
    assert_eq!(first, second);
    assert_eq!(first[0], "/fill -9 70 -20 15 80 -20 minecraft:barrier");
    Ok(())
}

#[test]
fn every_valid_block_is_stored() -> Result<()> {
    for block in BlockType::ALL {
        let config = BoxConfig::new(25, 10, block.as_str(), false, false)?;
        assert_eq!(config.block_type(), block);
        let commands = config.generate_box_commands(0, 0, 0)?;
        assert!(commands.iter().all(|c| c.ends_with(block.resource_id())));
    }
    Ok(())
}

#[test]
fn unknown_block_is_invalid_configuration() {
    for bad in ["stone", "", "BARRIER", "minecraft:barrier"] {
        let err = BoxConfig::new(25, 10, bad, false, false).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }), "{bad}");
        assert!(err.to_string().contains("barrier, bedrock, glass"));
    }
}

#[test]
fn registry_chain_runs_against_dry_run() -> Result<()> {
    let registry = CallbackRegistry::<DryRunSimulator>::with_builtin();
    let source = ConfigSource::from(json!({
        "barrier_box": { "size": 6, "height": 2, "block_type": "glass", "include_floor": true }
    }));
    let mut callbacks = registry.create_all(source)?;
    assert_eq!(callbacks.len(), 1);
    assert_eq!(callbacks[0].name(), "barrier_box");

    let mut sim = DryRunSimulator::new();
    run_before_reset(&mut callbacks, &mut sim)?;
    let (obs, info) = run_after_reset(&mut callbacks, &mut sim, 0, json!({}))?;

    assert_eq!(obs, 5);
    assert_eq!(info["wrapped"], true);
    assert_eq!(info["last_command"], "/fill -3 0 -3 3 0 3 minecraft:glass");
    assert_eq!(sim.commands().len(), 5);
    Ok(())
}

#[test]
fn empty_chain_passes_obs_through() -> Result<()> {
    let registry = CallbackRegistry::<DryRunSimulator>::with_builtin();
    let mut callbacks = registry.create_all(json!({ "other_callback": {} }))?;
    assert!(callbacks.is_empty());

    let mut sim = DryRunSimulator::new();
    let (obs, info) = run_after_reset(&mut callbacks, &mut sim, 7, json!({ "seed": 1 }))?;
    assert_eq!(obs, 7);
    assert_eq!(info, json!({ "seed": 1 }));
    assert!(sim.commands().is_empty());
    Ok(())
}
