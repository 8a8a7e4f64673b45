use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "legion.log";

/// Nível padrão conforme a quantidade de `-v`
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Escritor não bloqueante para `<dir>/legion.log`, sem rotação
fn file_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    non_blocking(rolling::never(dir, LOG_FILE_NAME))
}

/// Destino dos logs; o guard precisa viver até o fim do processo
pub struct LogOutput {
    pub file: Option<PathBuf>,
    _guard: Option<WorkerGuard>,
}

/// Inicializa o subscriber global. `RUST_LOG` tem precedência sobre `-v`.
pub fn init(verbosity: u8, to_stderr: bool) -> Result<LogOutput> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e))?;
        return Ok(LogOutput {
            file: None,
            _guard: None,
        });
    }

    let (writer, guard) = file_writer(&std::env::temp_dir());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow!(e))?;
    Ok(LogOutput {
        file: Some(log_file_path()),
        _guard: Some(guard),
    })
}
