use corral_base::Result;

use crate::simulator::Simulator;

/// Hooks a simulator invokes around environment reset. Defaults pass the
/// observation and info through untouched.
pub trait SimulatorCallback<S: Simulator> {
    fn name(&self) -> &str;

    fn before_reset(&mut self, _sim: &mut S) -> Result<()> {
        Ok(())
    }

    fn after_reset(
        &mut self,
        _sim: &mut S,
        obs: S::Obs,
        info: S::Info,
    ) -> Result<(S::Obs, S::Info)> {
        Ok((obs, info))
    }
}

pub fn run_before_reset<S: Simulator>(
    callbacks: &mut [Box<dyn SimulatorCallback<S>>],
    sim: &mut S,
) -> Result<()> {
    for callback in callbacks.iter_mut() {
        callback.before_reset(sim)?;
    }
    Ok(())
}

/// Threads `obs`/`info` through every callback in order; the first error stops
/// the chain.
pub fn run_after_reset<S: Simulator>(
    callbacks: &mut [Box<dyn SimulatorCallback<S>>],
    sim: &mut S,
    obs: S::Obs,
    info: S::Info,
) -> Result<(S::Obs, S::Info)> {
    callbacks
        .iter_mut()
        .try_fold((obs, info), |(obs, info), callback| {
            callback.after_reset(sim, obs, info)
        })
}
