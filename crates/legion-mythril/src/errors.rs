use thiserror::Error;

/// Erros que podem ocorrer ao executar o Mythril
#[derive(Debug, Error)]
pub enum MythrilError {
    /// Executável do Mythril não encontrado
    #[error("executável '{0}' não encontrado; instale com `pip install mythril`")]
    NotInstalled(String),

    /// Falha ao iniciar o processo
    #[error("falha ao iniciar mythril: {0}")]
    Spawn(String),

    /// Endpoint sem suporte para análise
    #[error("endpoint não suportado pelo mythril: {0}")]
    Unsupported(String),

    /// Análise excedeu o tempo limite do processo
    #[error("mythril não terminou em {0} segundos")]
    Timeout(u64),

    /// Processo terminou com erro e sem relatório
    #[error("mythril terminou com código {code:?}: {stderr}")]
    ProcessFailed { code: Option<i32>, stderr: String },

    /// Saída não é um relatório JSON válido
    #[error("saída inválida do mythril: {0}")]
    InvalidOutput(String),

    /// O próprio Mythril reportou falha na análise
    #[error("análise falhou: {0}")]
    Analysis(String),
}

impl From<MythrilError> for legion_core::Error {
    fn from(err: MythrilError) -> Self {
        match err {
            MythrilError::Unsupported(msg) => legion_core::Error::Unsupported(msg),
            MythrilError::Timeout(_) => legion_core::Error::TimeoutError(err.to_string()),
            MythrilError::InvalidOutput(_) => legion_core::Error::DecodeError(err.to_string()),
            other => legion_core::Error::Other(other.to_string()),
        }
    }
}

/// Resultado padrão da crate
pub type Result<T> = std::result::Result<T, MythrilError>;
