//! Setup errors. Nothing here is raised once a controller is running.

use thiserror::Error;

/// A controller could not be assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no spatial probe was provided")]
    MissingProbe,
    #[error("no camera pivot was provided")]
    MissingCameraPivot,
    #[error("no projectile spawn point was provided")]
    MissingSpawnPoint,
    #[error("no projectile spawner was provided")]
    MissingProjectileSpawner,
    #[error("invalid stat `{field}`: {reason}")]
    InvalidStats {
        field: &'static str,
        reason: &'static str,
    },
}
