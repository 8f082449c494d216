use corral_base::{Error, Result};
use tracing::debug;

use crate::barrier_box::BarrierBoxCallback;
use crate::callback::SimulatorCallback;
use crate::config::{ConfigData, ConfigSource};
use crate::simulator::Simulator;

pub type BoxedCallback<S> = Box<dyn SimulatorCallback<S>>;

/// Builds a callback from the loaded config, or `None` when its section is
/// absent.
pub type CallbackFactory<S> = fn(&ConfigData) -> Result<Option<BoxedCallback<S>>>;

/// Named callback factories, kept in registration order.
pub struct CallbackRegistry<S: Simulator> {
    factories: Vec<(String, CallbackFactory<S>)>,
}

impl<S: Simulator> Default for CallbackRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Simulator> CallbackRegistry<S> {
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registry with every callback shipped in this crate.
    pub fn with_builtin() -> Self {
        let barrier_box: CallbackFactory<S> = barrier_box_factory::<S>;
        Self {
            factories: vec![(BarrierBoxCallback::NAME.to_string(), barrier_box)],
        }
    }

    pub fn register(&mut self, name: impl Into<String>, factory: CallbackFactory<S>) -> Result<()> {
        let name = name.into();
        if self.factories.iter().any(|(existing, _)| *existing == name) {
            return Err(Error::InvalidParameter(format!(
                "callback '{name}' is already registered"
            )));
        }
        self.factories.push((name, factory));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.iter().map(|(name, _)| name.as_str())
    }

    pub fn create(&self, name: &str, data: &ConfigData) -> Result<Option<BoxedCallback<S>>> {
        let (_, factory) = self
            .factories
            .iter()
            .find(|(existing, _)| existing == name)
            .ok_or_else(|| Error::InvalidParameter(format!("unknown callback '{name}'")))?;
        factory(data)
    }

    /// Loads `source` once and instantiates every configured callback.
    pub fn create_all(&self, source: impl Into<ConfigSource>) -> Result<Vec<BoxedCallback<S>>> {
        let data = source.into().load()?;
        let mut callbacks = Vec::new();
        for (name, factory) in &self.factories {
            if let Some(callback) = factory(&data)? {
                debug!(callback = %name, "callback configured");
                callbacks.push(callback);
            }
        }
        Ok(callbacks)
    }
}

fn barrier_box_factory<S: Simulator>(data: &ConfigData) -> Result<Option<BoxedCallback<S>>> {
    Ok(BarrierBoxCallback::from_data(data)?.map(|callback| Box::new(callback) as BoxedCallback<S>))
}
