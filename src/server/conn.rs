//! # Manejo de una Conexión
//! src/server/conn.rs
//!
//! Cada conexión aceptada vive en su propia unidad de ejecución y corre
//! el loop de exchanges:
//!
//! ```text
//! parse → dispatch → compress → connection-policy → compose → write
//! ```
//!
//! El loop termina con EOF limpio del cliente, con `Connection: close`,
//! o con un error de parseo. Un request que no se pudo parsear cierra la
//! conexión sin enviar respuesta: el exchange se abandona.
//!
//! Dentro de una conexión todo es estrictamente secuencial: el siguiente
//! request se lee solo después de escribir la respuesta anterior (sin
//! pipelining ni read-ahead). Las lecturas y escrituras pueden bloquear
//! indefinidamente; no hay timeouts.

use crate::handlers::HandlerContext;
use crate::http::{encoding, Request, Response};
use crate::router::Router;
use std::io::{BufReader, Write};
use std::net::TcpStream;
use std::sync::Arc;

/// Maneja el ciclo de vida completo de una conexión aceptada
pub struct ConnectionHandler {
    stream: TcpStream,
    router: Arc<Router>,
    ctx: Arc<HandlerContext>,
    peer: String,
}

impl ConnectionHandler {
    pub fn new(stream: TcpStream, router: Arc<Router>, ctx: Arc<HandlerContext>) -> Self {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        Self {
            stream,
            router,
            ctx,
            peer,
        }
    }

    /// Corre el loop de exchanges hasta que la conexión termina
    ///
    /// El `BufReader` vive para toda la conexión: así los bytes leídos de
    /// más por el buffer quedan disponibles para el siguiente request.
    pub fn run(mut self) -> std::io::Result<()> {
        let mut reader = BufReader::new(self.stream.try_clone()?);

        loop {
            let request = match Request::read_from(&mut reader) {
                Ok(Some(request)) => request,
                Ok(None) => {
                    println!("   ✅ {} disconnected", self.peer);
                    break;
                }
                Err(e) => {
                    // Request malformado: se cierra sin responder
                    eprintln!("   ❌ {} parse error: {}", self.peer, e);
                    break;
                }
            };
            println!(
                "   ✅ {} {} {} {}",
                self.peer,
                request.method(),
                request.path(),
                request.protocol()
            );

            let response = self.router.dispatch(&request, &self.ctx);
            let response = encoding::apply_compression(&request, response);
            let (response, close) = apply_connection_policy(&request, response);

            self.stream.write_all(&response.to_bytes())?;
            self.stream.flush()?;
            println!("   ✅ {} {}", self.peer, response.status());

            if close {
                println!("   ✅ {} requested connection close", self.peer);
                break;
            }
        }

        Ok(())
    }
}

/// Decide si la conexión cierra tras este exchange y anota la respuesta
///
/// Solo el header `Connection: close` exacto activa el cierre; la
/// respuesta correspondiente lleva el mismo header de vuelta.
pub fn apply_connection_policy(request: &Request, mut response: Response) -> (Response, bool) {
    let close = request.close_requested();
    if close {
        response.add_header("Connection", "close");
    }
    (response, close)
}
