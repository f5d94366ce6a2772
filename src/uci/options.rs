use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Name of the option switching the engine into analysis mode.
pub const ANALYSE_MODE: &str = "UCI_AnalyseMode";

/// Name of the option controlling contempt while analysing.
pub const ANALYSIS_CONTEMPT: &str = "Analysis Contempt";

/// A `setoption` pair sent to the engine after `uciok`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineOption {
    pub name: String,
    pub value: String,
}

impl EngineOption {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        EngineOption {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EngineOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "setoption name {} value {}", self.name, self.value)
    }
}

/// Options applied during the handshake: analysis mode on, contempt off.
#[must_use]
pub fn analysis_options() -> Vec<EngineOption> {
    vec![
        EngineOption::new(ANALYSE_MODE, "true"),
        EngineOption::new(ANALYSIS_CONTEMPT, "Off"),
    ]
}
