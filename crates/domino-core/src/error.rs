use thiserror::Error;

/// Top-level error type for the domino simulation.
#[derive(Debug, Error)]
pub enum DominoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid physics_dt: {0} (must be > 0)")]
    InvalidPhysicsDt(f64),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Simulation runtime errors.
///
/// Copy + static messages; these only surface from the fallible lookups
/// (`try_*`) on the tile world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("Tile index {index} out of range (tile count {count})")]
    TileOutOfRange { index: usize, count: usize },

    #[error("Physics world already released")]
    WorldReleased,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domino_error_from_config_error() {
        let err = ConfigError::InvalidPhysicsDt(-1.0);
        let domino_err: DominoError = err.into();
        assert!(matches!(domino_err, DominoError::Config(_)));
        assert!(domino_err.to_string().contains("-1"));
    }

    #[test]
    fn domino_error_from_sim_error() {
        let err = SimError::WorldReleased;
        let domino_err: DominoError = err.into();
        assert!(matches!(domino_err, DominoError::Simulation(_)));
        assert!(domino_err.to_string().contains("released"));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }

    #[test]
    fn sim_error_is_copy() {
        let err = SimError::TileOutOfRange { index: 61, count: 60 };
        let err2 = err;
        assert_eq!(err, err2);
    }

    #[test]
    fn config_error_display_messages() {
        assert_eq!(
            ConfigError::InvalidPhysicsDt(0.0).to_string(),
            "Invalid physics_dt: 0 (must be > 0)"
        );
        assert_eq!(
            ConfigError::invalid("tiles.spacing", "must be > 0").to_string(),
            "Invalid value for tiles.spacing: must be > 0"
        );
    }

    #[test]
    fn sim_error_display_messages() {
        assert_eq!(
            SimError::TileOutOfRange { index: 70, count: 60 }.to_string(),
            "Tile index 70 out of range (tile count 60)"
        );
        assert_eq!(
            SimError::WorldReleased.to_string(),
            "Physics world already released"
        );
    }
}
