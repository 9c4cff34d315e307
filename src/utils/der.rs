//! DER <-> JOSE conversion for ECDSA signatures
//!
//! The ECDSA primitive produces and consumes ASN.1 DER `SEQUENCE { r INTEGER,
//! s INTEGER }` signatures, while the JOSE wire format (RFC 7518 §3.4) is the
//! fixed-length, left-zero-padded concatenation `R || S` (2x the curve
//! coordinate size). Both directions are pure byte-level functions so they
//! can be tested in isolation from any signing or verification call path.

use crate::error::{Error, Result};

fn der_len(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else {
        let mut tmp = Vec::new();
        let mut n = len;
        while n > 0 {
            tmp.push((n & 0xFF) as u8);
            n >>= 8;
        }
        tmp.reverse();
        let mut v = Vec::with_capacity(1 + tmp.len());
        v.push(0x80 | (tmp.len() as u8));
        v.extend_from_slice(&tmp);
        v
    }
}

fn der_integer(bytes: &[u8]) -> Vec<u8> {
    // Strip redundant leading zeros, keeping one byte for the value zero
    let mut start = 0;
    while start + 1 < bytes.len() && bytes[start] == 0 {
        start += 1;
    }
    let mut value = &bytes[start..];
    if value.is_empty() {
        value = &[0x00];
    }

    let mut out = Vec::with_capacity(3 + value.len());
    out.push(0x02);
    // Positive INTEGER: if MSB set, prepend 0x00
    if value[0] & 0x80 != 0 {
        out.extend_from_slice(&der_len(value.len() + 1));
        out.push(0x00);
    } else {
        out.extend_from_slice(&der_len(value.len()));
    }
    out.extend_from_slice(value);
    out
}

/// Read a DER length field, returning (length, bytes consumed)
fn read_len(bytes: &[u8]) -> Result<(usize, usize)> {
    let first = *bytes
        .first()
        .ok_or_else(|| Error::SignatureEncoding("truncated length".into()))?;
    if first < 0x80 {
        return Ok((first as usize, 1));
    }
    let count = (first & 0x7F) as usize;
    if count == 0 || count > 2 || bytes.len() < 1 + count {
        return Err(Error::SignatureEncoding("unsupported length form".into()));
    }
    let mut len = 0usize;
    for &b in &bytes[1..1 + count] {
        len = (len << 8) | b as usize;
    }
    Ok((len, 1 + count))
}

/// Read a DER INTEGER, returning (value bytes, bytes consumed)
fn read_integer(bytes: &[u8]) -> Result<(&[u8], usize)> {
    if bytes.first() != Some(&0x02) {
        return Err(Error::SignatureEncoding("expected INTEGER".into()));
    }
    let (len, consumed) = read_len(&bytes[1..])?;
    let start = 1 + consumed;
    if len == 0 || bytes.len() < start + len {
        return Err(Error::SignatureEncoding("truncated INTEGER".into()));
    }
    Ok((&bytes[start..start + len], start + len))
}

/// Copy an unsigned big-endian integer into a fixed-width field, left-padded
fn write_fixed(dest: &mut [u8], value: &[u8]) -> Result<()> {
    let mut start = 0;
    while start < value.len() && value[start] == 0 {
        start += 1;
    }
    let value = &value[start..];
    if value.len() > dest.len() {
        return Err(Error::SignatureEncoding(format!(
            "integer too large for curve: {} bytes (max {})",
            value.len(),
            dest.len()
        )));
    }
    let offset = dest.len() - value.len();
    dest[offset..].copy_from_slice(value);
    Ok(())
}

/// Convert an ASN.1 DER ECDSA signature to the JOSE `R || S` encoding
///
/// The result is always exactly `2 * coordinate_len` bytes, each half
/// left-padded with zeros to the coordinate size of the curve.
pub fn der_to_jose(der: &[u8], coordinate_len: usize) -> Result<Vec<u8>> {
    if der.first() != Some(&0x30) {
        return Err(Error::SignatureEncoding("expected SEQUENCE".into()));
    }
    let (seq_len, consumed) = read_len(&der[1..])?;
    let body_start = 1 + consumed;
    if der.len() != body_start + seq_len {
        return Err(Error::SignatureEncoding("SEQUENCE length mismatch".into()));
    }

    let body = &der[body_start..];
    let (r, r_consumed) = read_integer(body)?;
    let (s, s_consumed) = read_integer(&body[r_consumed..])?;
    if r_consumed + s_consumed != body.len() {
        return Err(Error::SignatureEncoding("trailing bytes in SEQUENCE".into()));
    }

    let mut jose = vec![0u8; 2 * coordinate_len];
    write_fixed(&mut jose[..coordinate_len], r)?;
    write_fixed(&mut jose[coordinate_len..], s)?;
    Ok(jose)
}

/// Convert a JOSE `R || S` signature to ASN.1 DER
///
/// Inputs whose length is not exactly `2 * coordinate_len` are rejected.
pub fn jose_to_der(jose: &[u8], coordinate_len: usize) -> Result<Vec<u8>> {
    if jose.len() != 2 * coordinate_len {
        return Err(Error::SignatureEncoding(format!(
            "signature length {} does not match curve (expected {})",
            jose.len(),
            2 * coordinate_len
        )));
    }

    let r = der_integer(&jose[..coordinate_len]);
    let s = der_integer(&jose[coordinate_len..]);

    let mut der = Vec::with_capacity(4 + r.len() + s.len());
    der.push(0x30);
    der.extend_from_slice(&der_len(r.len() + s.len()));
    der.extend_from_slice(&r);
    der.extend_from_slice(&s);
    Ok(der)
}
