//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del accept loop: una conexión aceptada se entrega a un
//! `ConnectionSpawner` y el loop sigue aceptando sin bloquearse. El
//! spawner por defecto dedica un thread por conexión, sin límite de
//! conexiones; un pool acotado puede enchufarse sin tocar la lógica de
//! protocolo.
//!
//! Una falla dentro de una conexión se loggea y queda aislada: nunca
//! termina el listener ni afecta a otras conexiones.

use super::conn::ConnectionHandler;
use crate::config::Config;
use crate::handlers::HandlerContext;
use crate::router::Router;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use std::thread;

/// Abstracción para ejecutar el manejo de una conexión
///
/// El contrato es no bloquear el accept loop. La implementación por
/// defecto es un thread por conexión; un worker pool acotado encaja con
/// el mismo trait.
pub trait ConnectionSpawner: Send + Sync {
    fn spawn(&self, handler: ConnectionHandler);
}

/// Spawner por defecto: un thread dedicado por conexión
pub struct ThreadPerConnection;

impl ConnectionSpawner for ThreadPerConnection {
    fn spawn(&self, handler: ConnectionHandler) {
        thread::spawn(move || {
            if let Err(e) = handler.run() {
                eprintln!("   ❌ Error en thread de conexión: {}", e);
            }
        });
    }
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    ctx: Arc<HandlerContext>,
    spawner: Box<dyn ConnectionSpawner>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con la tabla de rutas por defecto
    ///
    /// La tabla y el contexto se construyen una sola vez y después son
    /// inmutables: se comparten entre threads sin locks.
    pub fn new(config: Config) -> Result<Self, regex::Error> {
        let router = Router::with_default_routes()?;
        let ctx = HandlerContext::from_config(&config);

        Ok(Self {
            config,
            router: Arc::new(router),
            ctx: Arc::new(ctx),
            spawner: Box::new(ThreadPerConnection),
            listener: None,
        })
    }

    /// Reemplaza el spawner de conexiones (ej: un pool acotado)
    pub fn with_spawner(mut self, spawner: Box<dyn ConnectionSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Hace bind del listener y retorna la dirección local
    ///
    /// Con puerto 0 el sistema asigna un puerto efímero; la dirección
    /// retornada dice cuál. Útil para tests y embedders.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Acepta conexiones indefinidamente
    ///
    /// Cada conexión aceptada pasa al spawner; los errores de accept se
    /// loggean y el loop continúa. Solo retorna si el listener falla de
    /// forma irrecuperable.
    pub fn run(&mut self) -> io::Result<()> {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => {
                let address = self.config.address();
                println!("[*] Iniciando servidor en {}", address);
                TcpListener::bind(&address)?
            }
        };
        println!("[+] Servidor escuchando en {}", listener.local_addr()?);
        println!("[*] Modo concurrente: un thread por conexión\n");

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    println!(" ✅ Nueva conexión desde: {}", peer);

                    let handler = ConnectionHandler::new(
                        stream,
                        Arc::clone(&self.router),
                        Arc::clone(&self.ctx),
                    );
                    self.spawner.spawn(handler);
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }
}
