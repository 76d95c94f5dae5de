use clap::ValueEnum;
use sweep_core::{Dialect, RemovalConfig};

/// Statement kind named by `--keep` / `--remove`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum KindFlag {
    Log,
    Warn,
    Error,
    Info,
    Debug,
    Trace,
    Debugger,
    Print,
    SystemOut,
}

impl KindFlag {
    /// Turn this kind's removal switch on or off
    pub(crate) fn apply(self, config: &mut RemovalConfig, remove: bool) {
        let switch = match self {
            KindFlag::Log => &mut config.remove_console_log,
            KindFlag::Warn => &mut config.remove_console_warn,
            KindFlag::Error => &mut config.remove_console_error,
            KindFlag::Info => &mut config.remove_console_info,
            KindFlag::Debug => &mut config.remove_console_debug,
            KindFlag::Trace => &mut config.remove_console_trace,
            KindFlag::Debugger => &mut config.remove_debugger,
            KindFlag::Print => &mut config.remove_print,
            KindFlag::SystemOut => &mut config.remove_system_out,
        };
        *switch = remove;
    }
}

/// `--dialect` accepts dialect names, editor language ids and extensions
pub(crate) fn parse_dialect(raw: &str) -> Result<Dialect, String> {
    Dialect::parse_hint(raw).map_err(|e| e.to_string())
}
