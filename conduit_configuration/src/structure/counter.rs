use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::traits::ResolvableConfiguration;

/// Settings of the counter demo application.
#[derive(Clone, Debug)]
pub struct CounterConfiguration {
    pub initial_value: i64,
    pub default_step: i64,
}

#[derive(Deserialize, Clone)]
pub(crate) struct UnresolvedCounterConfiguration {
    initial_value: i64,
    default_step: i64,
}

impl ResolvableConfiguration for UnresolvedCounterConfiguration {
    type Resolved = CounterConfiguration;

    fn resolve(self) -> miette::Result<Self::Resolved> {
        if self.default_step == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "counter.default_step",
                reason: "a step of zero would never change the counter".to_string(),
            }
            .into());
        }

        Ok(CounterConfiguration {
            initial_value: self.initial_value,
            default_step: self.default_step,
        })
    }
}
