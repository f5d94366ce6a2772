//! Choosing between the accelerated and portable engine builds.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Cached result of the host capability probe.
static ACCELERATION: Lazy<bool> = Lazy::new(detect_acceleration);

#[cfg(target_arch = "x86_64")]
fn detect_acceleration() -> bool {
    is_x86_feature_detected!("avx2")
}

#[cfg(target_arch = "aarch64")]
fn detect_acceleration() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn detect_acceleration() -> bool {
    false
}

/// Whether this host can run the SIMD-accelerated engine build.
#[must_use]
pub fn host_supports_acceleration() -> bool {
    *ACCELERATION
}

/// Two functionally identical engine builds that differ only in how they run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineBundle {
    /// Build using SIMD instructions
    pub accelerated: PathBuf,
    /// Build that runs on any host
    pub portable: PathBuf,
}

impl EngineBundle {
    #[must_use]
    pub fn new(accelerated: impl Into<PathBuf>, portable: impl Into<PathBuf>) -> Self {
        EngineBundle {
            accelerated: accelerated.into(),
            portable: portable.into(),
        }
    }

    /// Use the same program regardless of host capabilities.
    #[must_use]
    pub fn single(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        EngineBundle {
            accelerated: program.clone(),
            portable: program,
        }
    }

    /// The program to start on this host.
    #[must_use]
    pub fn select(&self) -> &Path {
        self.select_for(host_supports_acceleration())
    }

    #[must_use]
    pub fn select_for(&self, accelerated: bool) -> &Path {
        if accelerated {
            &self.accelerated
        } else {
            &self.portable
        }
    }
}

impl Default for EngineBundle {
    fn default() -> Self {
        EngineBundle::new("stockfish-simd", "stockfish")
    }
}
