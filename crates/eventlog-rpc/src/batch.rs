/*!
 * Eventlog RPC - Batch
 *
 * Caminho rápido para respostas com muitos logs. Cada log é projetado em
 * buffers de largura fixa na pilha e serializado direto no destino, sem
 * montar um `serde_json::Value` intermediário.
 */

use ethereum_types::H256;
use eventlog_core::{
    Error, HexBuf, HexDisplay, Log, Result, ADDRESS_HEX_WIDTH, HASH_HEX_WIDTH, QUANTITY_HEX_WIDTH,
};
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::io;
use tracing::trace;

use crate::config::BatchEncoderConfig;

const JSONRPC_VERSION: &str = "2.0";

/// `{"jsonrpc":"2.0","id":4294967295,"result":[]}`
const ENVELOPE_SIZE: usize = 45;

#[derive(Serialize)]
struct LogsResponse<'a> {
    jsonrpc: &'static str,
    id: u32,
    result: LogItems<'a>,
}

struct LogItems<'a>(&'a [Log]);

impl Serialize for LogItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for log in self.0 {
            seq.serialize_element(&JsonLogItem::from(log))?;
        }
        seq.end()
    }
}

struct TopicList<'a>(&'a [H256]);

impl Serialize for TopicList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for topic in self.0 {
            seq.serialize_element(&HexBuf::<HASH_HEX_WIDTH>::hex(topic.as_bytes()))?;
        }
        seq.end()
    }
}

/// Log projetado para serialização
///
/// Os campos seguem a ordem em que `codec::to_json` insere as chaves, para
/// que a saída coincida byte a byte com ele.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonLogItem<'a> {
    address: HexBuf<ADDRESS_HEX_WIDTH>,
    block_hash: HexBuf<HASH_HEX_WIDTH>,
    block_number: HexBuf<QUANTITY_HEX_WIDTH>,
    data: HexDisplay<'a>,
    #[serde(rename = "logIndex")]
    index: HexBuf<QUANTITY_HEX_WIDTH>,
    removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<HexBuf<QUANTITY_HEX_WIDTH>>,
    topics: TopicList<'a>,
    #[serde(rename = "transactionHash")]
    tx_hash: HexBuf<HASH_HEX_WIDTH>,
    #[serde(rename = "transactionIndex")]
    tx_index: HexBuf<QUANTITY_HEX_WIDTH>,
}

impl<'a> From<&'a Log> for JsonLogItem<'a> {
    fn from(log: &'a Log) -> Self {
        Self {
            address: HexBuf::hex(log.address.as_bytes()),
            block_hash: HexBuf::hex(log.block_hash.as_bytes()),
            block_number: HexBuf::quantity(log.block_number),
            data: HexDisplay(&log.data),
            index: HexBuf::quantity(log.index),
            removed: log.removed,
            timestamp: log.timestamp.map(HexBuf::quantity),
            topics: TopicList(&log.topics),
            tx_hash: HexBuf::hex(log.tx_hash.as_bytes()),
            tx_index: HexBuf::quantity(log.tx_index),
        }
    }
}

/// Codificador de respostas JSON-RPC com listas de logs
#[derive(Debug, Clone, Default)]
pub struct BatchEncoder {
    config: BatchEncoderConfig,
}

impl BatchEncoder {
    pub fn new(config: BatchEncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchEncoderConfig {
        &self.config
    }

    /// Gera a resposta completa `{"jsonrpc":"2.0","id":..,"result":[..]}`
    pub fn encode(&self, id: u32, logs: &[Log]) -> Result<String> {
        let mut reply = Vec::with_capacity(self.capacity_hint(logs.len()));
        self.write(&mut reply, id, logs)?;
        String::from_utf8(reply)
            .map_err(|e| Error::EncodeError(format!("Resposta não é UTF-8: {}", e)))
    }

    /// Escreve a resposta em `writer`, na ordem de `logs`
    pub fn write<W: io::Write>(&self, writer: W, id: u32, logs: &[Log]) -> Result<()> {
        let response = LogsResponse {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: LogItems(logs),
        };
        serde_json::to_writer(writer, &response).map_err(|e| {
            Error::EncodeError(format!("Falha ao serializar resposta de logs: {}", e))
        })?;
        trace!(id, logs = logs.len(), "resposta de logs serializada");
        Ok(())
    }

    fn capacity_hint(&self, count: usize) -> usize {
        count
            .saturating_mul(self.config.bytes_per_log_hint)
            .saturating_add(ENVELOPE_SIZE)
    }
}

/// Atalho com a configuração padrão
pub fn make_json_content(id: u32, logs: &[Log]) -> Result<String> {
    BatchEncoder::default().encode(id, logs)
}
