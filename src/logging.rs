//! Logger setup.
//!
//! The terminal interface owns stdout and stderr while it runs, so log records are only ever
//! written to a file. Without a file the logger is never installed and the `log` macros are no-ops.

use std::{fs::File, path::Path};

use color_eyre::eyre::{Result, WrapErr as _};
use env_logger::{Builder, Env, Target};

/// Installs a global logger writing to `path`, filtered by `RUST_LOG` (defaulting to `info`).
///
/// Passing `None` leaves logging disabled.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global logger has already been installed
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to install logger")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_init_with_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("mazetui-missing-directory")
            .join("nested")
            .join("mazetui.log");

        let result = init(Some(&path));

        assert!(result.is_err(), "creating a log file in a missing directory should fail");
    }
}
