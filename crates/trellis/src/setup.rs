//! Error type for application setup.

use thiserror::Error;
use trellis_controllers::{ConfigError, ControllerError};
use trellis_theme::ThemeError;

/// Any error raised while wiring an application together.
///
/// Setup code usually loads a manager configuration, a color source and then
/// builds the controller manager; this type lets all three propagate with `?`.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
