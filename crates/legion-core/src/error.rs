use thiserror::Error;

/// Erros comuns da biblioteca Legion
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Argumento obrigatório ausente
    #[error("Argumento ausente: '{0}'")]
    MissingArgument(String),

    /// Endpoint do node inválido
    #[error("Endpoint inválido: {0}")]
    InvalidEndpoint(String),

    /// Operação não suportada pelo cliente conectado
    #[error("Não suportado: {0}")]
    Unsupported(String),

    /// Falha de comunicação com o node ou serviço remoto
    #[error("Falha na chamada remota: {0}")]
    RemoteCallFailure(String),

    /// O node respondeu com um erro JSON-RPC
    #[error("Node recusou a chamada ({code}): {message}")]
    RpcRejected { code: i64, message: String },

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Erro de validação
    #[error("Erro de validação: {0}")]
    ValidationError(String),

    /// Erro de timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Nenhuma conexão ativa
    #[error("Nenhum node conectado. Execute sethost primeiro")]
    NotConnected,

    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),

    /// Erro genérico
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Rótulo curto da categoria do erro, usado na saída da CLI
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingArgument(_) => "MissingArgument",
            Error::InvalidEndpoint(_) => "InvalidEndpoint",
            Error::Unsupported(_) => "Unsupported",
            Error::RemoteCallFailure(_) | Error::RpcRejected { .. } | Error::TimeoutError(_) => {
                "RemoteCallFailure"
            }
            Error::DecodeError(_) => "DecodeError",
            Error::ValidationError(_) => "ValidationError",
            Error::NotConnected => "NotConnected",
            Error::NotFound(_) => "NotFound",
            Error::Other(_) => "Other",
        }
    }

    /// Indica se o erro deve ser apresentado como aviso e não como falha
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Error::Unsupported(_)
                | Error::RemoteCallFailure(_)
                | Error::RpcRejected { .. }
                | Error::TimeoutError(_)
                | Error::NotFound(_)
        )
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
