/*!
 * Eventlog Core
 *
 * Tipos e utilitários compartilhados pelo codec de logs de eventos
 */

pub mod types;
pub mod utils;
pub mod error;

// Re-exportações públicas
pub use error::{Error, Result};
pub use types::*;
pub use utils::{
    append_hex, decode_hex, to_hex, to_quantity, write_hex, write_quantity, HexBuf, HexDisplay,
    ADDRESS_HEX_WIDTH, HASH_HEX_WIDTH, QUANTITY_HEX_WIDTH,
};
