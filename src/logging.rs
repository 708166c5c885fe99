use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Installs the crate's `env_logger` backend.
///
/// `RUST_LOG` is parsed after the `Info` default and overrides it, so
/// `RUST_LOG=drivesim=debug` shows gate passages and crashes from the cores.
/// Returns an error if a logger was already installed.
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| {
            writeln!(
                buf,
                "[DRIVESIM | {}] {}",
                record.level(),
                record.args()
            )
        })
        .write_style(WriteStyle::Always)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}

#[cfg(test)]
mod tests {
    #[test]
    fn second_init_is_rejected() {
        let _ = super::try_init();
        assert!(super::try_init().is_err());
    }
}
