//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa la capa TCP del servidor:
//! 1. `tcp`: bind y accept loop, con spawner enchufable por conexión
//! 2. `conn`: el loop de exchanges de una conexión aceptada
//!
//! El modelo de concurrencia es un accept loop más una unidad de
//! ejecución independiente por conexión activa. El único estado que
//! cruza conexiones es la tabla de rutas y el contexto de handlers,
//! ambos inmutables después del arranque.

pub mod conn;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use conn::ConnectionHandler;
pub use tcp::{ConnectionSpawner, Server, ThreadPerConnection};
