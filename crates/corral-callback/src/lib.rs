pub mod barrier_box;
pub mod callback;
pub mod config;
pub mod registry;
pub mod simulator;

pub use barrier_box::BarrierBoxCallback;
pub use callback::{SimulatorCallback, run_after_reset, run_before_reset};
pub use config::{BoxConfig, ConfigData, ConfigSource};
pub use registry::{BoxedCallback, CallbackFactory, CallbackRegistry};
pub use simulator::{DryRunSimulator, Simulator, StepOutcome};
