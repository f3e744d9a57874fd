/*!
 * Eventlog Utils
 *
 * Formatação hexadecimal canônica usada pelos dois caminhos de codificação.
 * Todo texto hexadecimal emitido (minúsculas, prefixo `0x`, supressão de
 * zeros à esquerda das quantidades) é decidido aqui.
 */

use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};

/// `0x` + 40 dígitos de um endereço de 20 bytes
pub const ADDRESS_HEX_WIDTH: usize = 2 + 2 * 20;

/// `0x` + 64 dígitos de um hash de 32 bytes
pub const HASH_HEX_WIDTH: usize = 2 + 2 * 32;

/// `0x` + até 16 dígitos de uma quantidade de 64 bits
pub const QUANTITY_HEX_WIDTH: usize = 2 + 2 * 8;

/// Buffer de texto de largura fixa, alocado na pilha
///
/// `N` é a largura máxima do campo; `len` marca quantos bytes foram escritos.
#[derive(Clone, Copy)]
pub struct HexBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> HexBuf<N> {
    pub const fn new() -> Self {
        Self { buf: [0u8; N], len: 0 }
    }

    /// Buffer preenchido com a quantidade `value`
    pub fn quantity(value: u64) -> Self {
        let mut out = Self::new();
        write_quantity(&mut out, value);
        out
    }

    /// Buffer preenchido com `bytes` em hexadecimal
    pub fn hex(bytes: &[u8]) -> Self {
        let mut out = Self::new();
        write_hex(&mut out, bytes);
        out
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).expect("HexBuf contém apenas dígitos ASCII")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> PartialEq for HexBuf<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for HexBuf<N> {}

impl<const N: usize> Default for HexBuf<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Acrescenta texto ao buffer; falha sem escrever nada se passar de `N`
impl<const N: usize> fmt::Write for HexBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl<const N: usize> fmt::Display for HexBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> fmt::Debug for HexBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HexBuf").field(&self.as_str()).finish()
    }
}

impl<const N: usize> Serialize for HexBuf<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Escreve `value` como quantidade JSON-RPC em um buffer fixo
///
/// Entra em pânico se os dígitos não couberem em `N`: a largura do buffer é
/// escolhida pelo chamador para cobrir todo o domínio do campo.
pub fn write_quantity<const N: usize>(out: &mut HexBuf<N>, value: u64) {
    out.len = 0;
    if write!(out, "{:#x}", value).is_err() {
        panic!(
            "quantidade {:#x} não cabe em buffer de {} caracteres",
            value, N
        );
    }
}

/// Escreve `0x` + `bytes` em hexadecimal em um buffer de largura exata
///
/// Entra em pânico se `N != 2 + 2 * bytes.len()`.
pub fn write_hex<const N: usize>(out: &mut HexBuf<N>, bytes: &[u8]) {
    out.len = 0;
    out.buf[..2].copy_from_slice(b"0x");
    if hex::encode_to_slice(bytes, &mut out.buf[2..]).is_err() {
        panic!(
            "buffer de {} caracteres incompatível com {} bytes",
            N,
            bytes.len()
        );
    }
    out.len = N;
}

/// Quantidade JSON-RPC: `0x` + dígitos mínimos, zero vira `0x0`
pub fn to_quantity(value: u64) -> String {
    HexBuf::<QUANTITY_HEX_WIDTH>::quantity(value).as_str().to_owned()
}

/// `0x` + `bytes` em hexadecimal, sem limite de tamanho
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + 2 * bytes.len());
    append_hex(&mut out, bytes);
    out
}

/// Acrescenta `0x` + `bytes` em hexadecimal ao final de `out`
pub fn append_hex(out: &mut String, bytes: &[u8]) {
    out.reserve(2 + 2 * bytes.len());
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
}

/// Converte uma string hexadecimal (com ou sem `0x`) para bytes
pub fn decode_hex(text: &str) -> Option<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).ok()
}

/// Exibe `0x` + `bytes` em hexadecimal sem alocar
///
/// Usado para escrever payloads de tamanho variável direto no destino.
#[derive(Clone, Copy)]
pub struct HexDisplay<'a>(pub &'a [u8]);

impl fmt::Display for HexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chunk = [0u8; 128];
        f.write_str("0x")?;
        for bytes in self.0.chunks(chunk.len() / 2) {
            let text = &mut chunk[..2 * bytes.len()];
            hex::encode_to_slice(bytes, text).map_err(|_| fmt::Error)?;
            f.write_str(std::str::from_utf8(text).map_err(|_| fmt::Error)?)?;
        }
        Ok(())
    }
}

impl Serialize for HexDisplay<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
