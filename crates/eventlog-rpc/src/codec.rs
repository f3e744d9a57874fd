/*!
 * Eventlog RPC - Codec
 *
 * Conversão entre `Log` e árvores de valores genéricas (`serde_json::Value`
 * para a forma objeto, `ciborium::Value` para a forma compacta).
 */

use bytes::Bytes;
use ciborium::Value as CborValue;
use ethereum_types::{Address, H256};
use eventlog_core::{decode_hex, to_hex, to_quantity, Error, Log, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Codifica um log na forma objeto do JSON-RPC
///
/// `timestamp` só aparece quando conhecido; nunca é emitido como `null`.
pub fn to_json(log: &Log) -> Value {
    // mesma ordem de `batch::JsonLogItem`, com ou sem `preserve_order`
    let mut fields = Map::new();
    fields.insert("address".to_string(), json!(log.address));
    fields.insert("blockHash".to_string(), json!(log.block_hash));
    fields.insert("blockNumber".to_string(), Value::String(to_quantity(log.block_number)));
    fields.insert("data".to_string(), Value::String(to_hex(&log.data)));
    fields.insert("logIndex".to_string(), Value::String(to_quantity(log.index)));
    fields.insert("removed".to_string(), Value::Bool(log.removed));
    if let Some(timestamp) = log.timestamp {
        fields.insert("timestamp".to_string(), Value::String(to_quantity(timestamp)));
    }
    fields.insert("topics".to_string(), json!(log.topics));
    fields.insert("transactionHash".to_string(), json!(log.tx_hash));
    fields.insert("transactionIndex".to_string(), Value::String(to_quantity(log.tx_index)));
    Value::Object(fields)
}

/// Codifica uma coleção de logs como array JSON, preservando a ordem
pub fn logs_to_json(logs: &[Log]) -> Value {
    Value::Array(logs.iter().map(to_json).collect())
}

/// Formas de entrada aceitas na decodificação de um log
///
/// A variante é escolhida pelo tipo do valor raiz: array vira `Compact`,
/// objeto/mapa vira `Object`.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRepr {
    /// `[address, topics, data]` com membros binários
    Compact(Vec<CborValue>),
    /// Campos nomeados com texto hexadecimal
    Object(Map<String, Value>),
}

impl TryFrom<CborValue> for LogRepr {
    type Error = Error;

    fn try_from(value: CborValue) -> Result<Self> {
        match value {
            CborValue::Array(items) => Ok(LogRepr::Compact(items)),
            map @ CborValue::Map(_) => match map.deserialized::<Value>() {
                Ok(Value::Object(fields)) => Ok(LogRepr::Object(fields)),
                Ok(_) => Err(Error::malformed("Log CBOR: objeto esperado")),
                Err(e) => Err(Error::malformed(format!(
                    "Log CBOR: mapa sem representação JSON: {}",
                    e
                ))),
            },
            _ => Err(Error::malformed("Log CBOR: array ou mapa esperado")),
        }
    }
}

impl TryFrom<Value> for LogRepr {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(LogRepr::Object(fields)),
            // JSON não tem tipo binário: os elementos seguem para a validação posicional
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    CborValue::serialized(item).map_err(|e| {
                        Error::malformed(format!("Log JSON: elemento inválido: {}", e))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(LogRepr::Compact),
            _ => Err(Error::malformed("Log JSON: array ou objeto esperado")),
        }
    }
}

impl LogRepr {
    /// Constrói um novo `Log` a partir da forma recebida
    pub fn into_log(self) -> Result<Log> {
        let shape = match &self {
            LogRepr::Compact(_) => "compacta",
            LogRepr::Object(_) => "objeto",
        };
        let decoded = match self {
            LogRepr::Compact(items) => decode_compact(items),
            LogRepr::Object(fields) => decode_object(&fields),
        };
        decoded.map_err(|err| {
            debug!(shape, error = %err, "log rejeitado na decodificação");
            err
        })
    }
}

/// Forma compacta: apenas `address`, `topics` e `data` são preenchidos.
/// Os metadados de bloco ficam no valor padrão.
fn decode_compact(items: Vec<CborValue>) -> Result<Log> {
    let mut items = items.into_iter();
    let (Some(address), Some(topics), Some(data)) = (items.next(), items.next(), items.next())
    else {
        return Err(Error::malformed("Log CBOR: entradas ausentes"));
    };

    let address = take_bytes(address, Address::len_bytes())
        .map(|bytes| Address::from_slice(&bytes))
        .ok_or_else(|| Error::malformed("Log CBOR: binário esperado em [0]"))?;

    let topics = match topics {
        CborValue::Array(members) => members
            .into_iter()
            .enumerate()
            .map(|(i, member)| {
                take_bytes(member, H256::len_bytes())
                    .map(|bytes| H256::from_slice(&bytes))
                    .ok_or_else(|| {
                        Error::malformed(format!("Log CBOR: binário esperado em [1][{}]", i))
                    })
            })
            .collect::<Result<Vec<_>>>()?,
        _ => return Err(Error::malformed("Log CBOR: array esperado em [1]")),
    };

    let data = match data {
        CborValue::Bytes(bytes) => Bytes::from(bytes),
        CborValue::Null => Bytes::new(),
        _ => return Err(Error::malformed("Log CBOR: binário ou null esperado em [2]")),
    };

    Ok(Log::new(address, topics, data))
}

fn take_bytes(value: CborValue, len: usize) -> Option<Vec<u8>> {
    match value {
        CborValue::Bytes(bytes) if bytes.len() == len => Some(bytes),
        _ => None,
    }
}

/// Forma objeto: lê os campos necessários para reenvio; os demais são ignorados
fn decode_object(fields: &Map<String, Value>) -> Result<Log> {
    let address: Address = required(fields, "address")?;
    let topics: Vec<H256> = required(fields, "topics")?;
    let data = field(fields, "data")?
        .as_str()
        .and_then(decode_hex)
        .ok_or_else(|| Error::malformed("Log JSON: campo `data` deve ser hexadecimal"))?;

    Ok(Log::new(address, topics, data))
}

fn field<'a>(fields: &'a Map<String, Value>, key: &str) -> Result<&'a Value> {
    fields.get(key).ok_or_else(|| Error::missing(key))
}

fn required<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Result<T> {
    <T as Deserialize>::deserialize(field(fields, key)?)
        .map_err(|e| Error::malformed(format!("Log JSON: campo `{}` inválido: {}", key, e)))
}

/// Operações de codec sobre `Log`
pub trait LogCodec: Sized {
    /// Forma objeto do JSON-RPC
    fn to_json(&self) -> Value;

    fn from_json(value: Value) -> Result<Self>;

    fn from_json_str(text: &str) -> Result<Self>;

    fn from_cbor_value(value: CborValue) -> Result<Self>;
}

impl LogCodec for Log {
    fn to_json(&self) -> Value {
        to_json(self)
    }

    fn from_json(value: Value) -> Result<Self> {
        LogRepr::try_from(value)?.into_log()
    }

    fn from_json_str(text: &str) -> Result<Self> {
        let value = serde_json::from_str(text)
            .map_err(|e| Error::malformed(format!("Log JSON: texto inválido: {}", e)))?;
        Self::from_json(value)
    }

    fn from_cbor_value(value: CborValue) -> Result<Self> {
        LogRepr::try_from(value)?.into_log()
    }
}
