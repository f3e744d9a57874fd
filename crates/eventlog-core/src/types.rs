/*!
 * Eventlog Types
 *
 * Registro de log emitido por um contrato
 */

use bytes::Bytes;
use ethereum_types::{Address, H256};

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Log de evento como entregue pela camada de armazenamento
///
/// Os codificadores nunca alteram o registro; os decodificadores sempre
/// constroem um novo a partir de `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Log {
    /// Contrato emissor
    pub address: Address,
    /// Parâmetros indexados do evento, na ordem de emissão
    pub topics: Vec<H256>,
    /// Payload não indexado
    pub data: Bytes,
    pub block_number: u64,
    pub block_hash: H256,
    pub tx_hash: TransactionHash,
    /// Posição da transação no bloco
    pub tx_index: u64,
    /// Posição do log no bloco
    pub index: u64,
    /// Verdadeiro quando o bloco foi descartado por uma reorganização
    pub removed: bool,
    /// Timestamp do bloco, quando conhecido
    pub timestamp: Option<u64>,
}

/// Coleção ordenada de logs
pub type Logs = Vec<Log>;

impl Log {
    /// Cria um log apenas com os campos presentes na forma compacta
    pub fn new(address: Address, topics: Vec<H256>, data: impl Into<Bytes>) -> Self {
        Self {
            address,
            topics,
            data: data.into(),
            ..Default::default()
        }
    }
}
