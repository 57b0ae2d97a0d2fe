//! # Negociación de Compresión
//! src/http/encoding.rs
//!
//! Implementa la negociación de `Accept-Encoding`: si el cliente lista
//! `gzip`, el body de la respuesta se comprime y se marca con
//! `Content-Encoding: gzip`. El único encoding soportado es gzip.

use super::{Request, Response};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Aplica compresión gzip a la respuesta si el cliente la aceptó
///
/// El header `Accept-Encoding` se separa por `,` y cada token se trimea.
/// Solo si el conjunto contiene `gzip` se comprime el body, se agrega
/// `Content-Encoding: gzip` y se recalcula `Content-Length`. En cualquier
/// otro caso la respuesta pasa sin cambios.
pub fn apply_compression(request: &Request, mut response: Response) -> Response {
    let accepts_gzip = match request.header("Accept-Encoding") {
        Some(value) => value.split(',').map(str::trim).any(|enc| enc == "gzip"),
        None => false,
    };
    if !accepts_gzip {
        return response;
    }

    match gzip(response.body()) {
        Ok(compressed) => {
            response.replace_body(compressed);
            response.add_header("Content-Encoding", "gzip");
            response
        }
        Err(e) => {
            // No debería pasar escribiendo a memoria; enviamos sin comprimir
            eprintln!("   ❌ gzip error: {}", e);
            response
        }
    }
}

/// Comprime un bloque de bytes con gzip
fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
