/*!
 * Eventlog RPC
 *
 * Codificação de logs de eventos para respostas JSON-RPC (`eth_getLogs`,
 * `eth_getFilterLogs`) e decodificação da forma compacta usada em CBOR.
 */

pub mod batch;
pub mod cbor;
pub mod codec;
pub mod config;

// Re-exportações públicas
pub use batch::{make_json_content, BatchEncoder};
pub use cbor::{decode_cbor, decode_cbor_logs, encode_cbor, encode_cbor_logs, to_compact};
pub use codec::{logs_to_json, to_json, LogCodec, LogRepr};
pub use config::BatchEncoderConfig;
pub use eventlog_core::{Error, Log, Logs, Result};
