use corral_base::{Error, Result};
use tracing::{debug, info};

use crate::callback::SimulatorCallback;
use crate::config::{BoxConfig, ConfigData, ConfigSource};
use crate::simulator::Simulator;

// The enclosure is always anchored at the world origin; the agent's spawn
// position is not read from the observation.
const RESET_CENTER_X: i64 = 0;
const RESET_CENTER_Z: i64 = 0;
const RESET_BASE_Y: i64 = 0;

/// Walls the agent in with barrier, bedrock or glass right after reset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BarrierBoxCallback {
    config: BoxConfig,
}

impl BarrierBoxCallback {
    pub const NAME: &'static str = "barrier_box";

    pub fn new(config: BoxConfig) -> Self {
        Self { config }
    }

    /// Returns `Ok(None)` when the source has no `barrier_box` key.
    pub fn create_from_conf(source: impl Into<ConfigSource>) -> Result<Option<Self>> {
        let data = source.into().load()?;
        Self::from_data(&data)
    }

    pub fn from_data(data: &ConfigData) -> Result<Option<Self>> {
        data.get(Self::NAME)
            .map(|section| BoxConfig::from_section(section).map(Self::new))
            .transpose()
    }

    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    pub fn generate_box_commands(
        &self,
        center_x: i64,
        center_z: i64,
        base_y: i64,
    ) -> Result<Vec<String>> {
        self.config.generate_box_commands(center_x, center_z, base_y)
    }

    /// Fills every face in order, keeping the obs/info of the latest command,
    /// then lets the simulator wrap the final pair. Stops at the first failing
    /// command; faces already filled stay in the world.
    pub fn build_enclosure<S: Simulator>(
        &self,
        sim: &mut S,
        mut obs: S::Obs,
        mut info: S::Info,
    ) -> Result<(S::Obs, S::Info)> {
        let regions = self
            .config
            .generate_regions(RESET_CENTER_X, RESET_CENTER_Z, RESET_BASE_Y)?;

        for region in &regions {
            let command = region.command();
            debug!(face = %region.face, %command, "filling enclosure face");
            let outcome = sim
                .execute_cmd(&command)
                .map_err(|source| Error::CommandFailed {
                    command: command.clone(),
                    source: Box::new(source),
                })?;
            obs = outcome.obs;
            info = outcome.info;
        }

        info!(
            faces = regions.len(),
            block = %self.config.block_type(),
            size = self.config.size(),
            height = self.config.height(),
            "enclosure built"
        );

        sim.wrap_obs_info(obs, info)
            .map_err(|source| Error::Simulator(Box::new(source)))
    }
}

impl<S: Simulator> SimulatorCallback<S> for BarrierBoxCallback {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn after_reset(&mut self, sim: &mut S, obs: S::Obs, info: S::Info) -> Result<(S::Obs, S::Info)> {
        self.build_enclosure(sim, obs, info)
    }
}

impl std::fmt::Display for BarrierBoxCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BarrierBoxCallback(size={}, height={}, block_type='{}', include_floor={}, include_ceiling={})",
            self.config.size(),
            self.config.height(),
            self.config.block_type(),
            self.config.include_floor(),
            self.config.include_ceiling()
        )
    }
}
