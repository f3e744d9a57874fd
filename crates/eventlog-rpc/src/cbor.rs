/*!
 * Eventlog RPC - CBOR
 *
 * Forma compacta `[address, topics, data]` em bytes CBOR, isolada ou em
 * listas (como os recibos carregam seus logs).
 */

use ciborium::Value as CborValue;
use eventlog_core::{Error, Log, Logs, Result};

use crate::codec::LogCodec;

/// Forma compacta de um log; metadados de bloco não fazem parte dela
pub fn to_compact(log: &Log) -> CborValue {
    CborValue::Array(vec![
        CborValue::Bytes(log.address.as_bytes().to_vec()),
        CborValue::Array(
            log.topics
                .iter()
                .map(|topic| CborValue::Bytes(topic.as_bytes().to_vec()))
                .collect(),
        ),
        CborValue::Bytes(log.data.to_vec()),
    ])
}

pub fn encode_cbor(log: &Log) -> Result<Vec<u8>> {
    write_cbor(&to_compact(log))
}

/// Lista de logs como array CBOR de formas compactas
pub fn encode_cbor_logs(logs: &[Log]) -> Result<Vec<u8>> {
    write_cbor(&CborValue::Array(logs.iter().map(to_compact).collect()))
}

pub fn decode_cbor(bytes: &[u8]) -> Result<Log> {
    Log::from_cbor_value(read_cbor(bytes)?)
}

pub fn decode_cbor_logs(bytes: &[u8]) -> Result<Logs> {
    match read_cbor(bytes)? {
        CborValue::Array(items) => items.into_iter().map(Log::from_cbor_value).collect(),
        _ => Err(Error::malformed("Logs CBOR: array esperado")),
    }
}

fn write_cbor(value: &CborValue) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)
        .map_err(|e| Error::EncodeError(format!("Falha ao serializar CBOR: {}", e)))?;
    Ok(bytes)
}

fn read_cbor(bytes: &[u8]) -> Result<CborValue> {
    ciborium::de::from_reader(bytes)
        .map_err(|e| Error::malformed(format!("CBOR inválido: {}", e)))
}
