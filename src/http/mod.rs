//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests HTTP/1.1 desde el stream del socket
//! - Construcción y serialización de responses HTTP
//! - Manejo de status codes
//! - Negociación de compresión gzip (Accept-Encoding)
//!
//! ## Alcance del protocolo
//!
//! Soportamos el subconjunto de HTTP/1.1 necesario para conexiones
//! persistentes con bodies delimitados por `Content-Length`:
//!
//! - Sin chunked transfer encoding
//! - Sin pipelining: se lee un request completo solo después de escribir
//!   la respuesta anterior
//! - `Connection: close` termina la conexión tras el exchange
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/hola HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 4\r\n
//! \r\n
//! hola
//! ```

pub mod encoding; // Negociación de compresión gzip
pub mod request; // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status; // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
