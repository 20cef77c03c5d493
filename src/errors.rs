use thiserror::Error;

/// The central error type for parlo.
///
/// Speech capture problems are the only recoverable runtime errors the
/// tutor produces; everything else is configuration or plumbing.
#[derive(Error, Debug)]
pub enum ParloError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors raised by the speech capture collaborator.
///
/// Both variants are non-fatal: `Unavailable` disables the voice control
/// for the session, `Failed` resets the listening state and the user
/// retries or types instead.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("speech capture is not available on this platform")]
    Unavailable,

    #[error("speech capture failed: {reason}")]
    Failed { reason: String },
}

pub type Result<T> = std::result::Result<T, ParloError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(parlo_err) = e.downcast_ref::<ParloError>() {
        return match parlo_err {
            ParloError::Config(_) => EXIT_CONFIG_ERROR,
            _ => EXIT_ERROR,
        };
    }

    // Fallback string matching when the typed error was flattened away
    if e.to_string().to_lowercase().contains("config") {
        return EXIT_CONFIG_ERROR;
    }

    EXIT_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_wraps_into_parlo_error() {
        let err: ParloError = CaptureError::Unavailable.into();
        assert!(
            matches!(err, ParloError::Capture(CaptureError::Unavailable)),
            "CaptureError should wrap via #[from]"
        );
    }

    #[test]
    fn test_capture_failed_display_includes_reason() {
        let err = CaptureError::Failed {
            reason: "no audio device".to_string(),
        };
        assert_eq!(err.to_string(), "speech capture failed: no audio device");
    }

    #[test]
    fn test_exit_code_config_error() {
        let err: anyhow::Error = ParloError::Config("missing delay".to_string()).into();
        assert_eq!(
            get_exit_code(&err),
            EXIT_CONFIG_ERROR,
            "Config error should yield exit code 2"
        );
    }

    #[test]
    fn test_exit_code_capture_error() {
        let err: anyhow::Error = ParloError::Capture(CaptureError::Unavailable).into();
        assert_eq!(
            get_exit_code(&err),
            EXIT_ERROR,
            "Capture error should yield the generic exit code 1"
        );
    }

    #[test]
    fn test_exit_code_string_fallback_config() {
        let err = anyhow::anyhow!("config file not found");
        assert_eq!(get_exit_code(&err), EXIT_CONFIG_ERROR);
    }

    #[test]
    fn test_exit_code_plain_anyhow_default() {
        let err = anyhow::anyhow!("something completely unexpected happened");
        assert_eq!(get_exit_code(&err), EXIT_ERROR);
    }
}
