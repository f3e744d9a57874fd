use thiserror::Error;

/// Erros do codec de logs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Entrada com aridade, tipo ou tamanho inesperado
    ///
    /// Mensagens da forma compacta, por posição:
    ///
    /// - `entradas ausentes`: missing entries, menos de três elementos
    /// - `binário esperado em [0]`: binary expected in [0], endereço inválido
    /// - `array esperado em [1]`: array expected in [1], tópicos fora de um array
    /// - `binário esperado em [1][i]`: tópico `i` não é um hash de 32 bytes
    /// - `binário ou null esperado em [2]`: binary or null expected in [2]
    #[error("Entrada malformada: {0}")]
    MalformedInput(String),

    /// Campo obrigatório ausente na forma objeto
    #[error("Campo não encontrado: {0}")]
    MissingField(String),

    /// Falha ao escrever a saída codificada
    #[error("Erro de codificação: {0}")]
    EncodeError(String),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput(message.into())
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Error::MissingField(field.into())
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
