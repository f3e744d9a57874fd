use eventlog_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuração do codificador de respostas em lote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchEncoderConfig {
    /// Bytes reservados por log ao pré-alocar a resposta
    pub bytes_per_log_hint: usize,
}

impl Default for BatchEncoderConfig {
    fn default() -> Self {
        Self {
            // endereço, dois hashes, três tópicos e metadados
            bytes_per_log_hint: 640,
        }
    }
}

impl BatchEncoderConfig {
    /// Carrega a configuração de um documento JSON; campos ausentes usam o padrão
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::malformed(format!("Configuração inválida: {}", e)))
    }
}
