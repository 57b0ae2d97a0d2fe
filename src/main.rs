//! # HTTP/1.1 Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. Parsea la configuración del CLI,
//! la valida y arranca el accept loop. El proceso corre hasta que lo
//! terminan desde afuera.

use http11_server::config::Config;
use http11_server::server::Server;

fn main() {
    println!("=================================");
    println!("  HTTP/1.1 Server");
    println!("=================================\n");

    let config = Config::new();
    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }
    config.print_summary();

    let mut server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error compilando la tabla de rutas: {}", e);
            std::process::exit(1);
        }
    };

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
