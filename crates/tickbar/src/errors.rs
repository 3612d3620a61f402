//! Error handling and exit codes.

use tickbar_core::constants::exit_codes;
use tickbar_core::BarError;

/// Map a bar error to the process exit code.
pub fn handle_error(err: &BarError) -> i32 {
    match err {
        BarError::ZeroCapacity => exit_codes::ERROR_GENERIC,
        BarError::InvalidGlyph(_) | BarError::Config(_) => exit_codes::ERROR_CONFIG,
        BarError::Cancelled => exit_codes::ERROR_CANCELED,
    }
}

/// Exit code for any application error; non-bar errors are generic.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BarError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&BarError::Cancelled), 130);
        assert_eq!(handle_error(&BarError::Config("bad".into())), 4);
        assert_eq!(handle_error(&BarError::InvalidGlyph("ab".into())), 4);
        assert_eq!(handle_error(&BarError::ZeroCapacity), 1);
    }

    #[test]
    fn anyhow_errors_are_unwrapped() {
        let err = anyhow::Error::from(BarError::Cancelled);
        assert_eq!(exit_code(&err), 130);

        let err = anyhow::Error::from(BarError::Config("bad".into())).context("while starting");
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::anyhow!("disk full");
        assert_eq!(exit_code(&err), exit_codes::ERROR_GENERIC);
    }
}
