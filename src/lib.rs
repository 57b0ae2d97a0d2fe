//! # HTTP/1.1 Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente implementado desde cero: parsing del
//! protocolo, routing por regex, conexiones persistentes y compresión
//! gzip negociada, sobre TCP plano con un thread por conexión.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: parsing de requests, construcción de responses, status
//!   codes y negociación de compresión
//! - `router`: tabla ordenada (método, patrón, handler), primer match gana
//! - `handlers`: funciones puras Request → Response (saludo, echo,
//!   user-agent, lectura y escritura de archivos)
//! - `server`: accept loop TCP y loop de exchanges por conexión
//! - `config`: argumentos CLI y variables de entorno
//!
//! ## Flujo de un exchange
//!
//! ```text
//! Listener → ConnectionHandler → parse → route → compress → policy → write
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use http11_server::config::Config;
//! use http11_server::server::Server;
//!
//! let config = Config::new();
//! let mut server = Server::new(config).expect("rutas inválidas");
//! server.run().expect("error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
