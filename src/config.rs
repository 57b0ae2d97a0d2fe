//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http11_server --port 4221 --directory /tmp/files
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 FILES_DIR=/tmp/files ./http11_server
//! ```

use clap::Parser;
use std::path::Path;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "http11_server")]
#[command(about = "Servidor HTTP/1.1 concurrente con conexiones persistentes")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio base para las rutas /files/*
    ///
    /// Sin este flag, un request a /files/* responde 500: nunca se usa
    /// una ubicación por defecto implícita.
    #[arg(long, env = "FILES_DIR")]
    pub directory: Option<String>,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// # Ejemplo
    /// ```ignore
    /// use http11_server::config::Config;
    ///
    /// let config = Config::new();
    /// println!("Server listening on {}", config.address());
    /// ```
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna error si el directorio configurado no existe o no es un
    /// directorio.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(directory) = &self.directory {
            if !Path::new(directory).is_dir() {
                return Err(format!("Files directory does not exist: {}", directory));
            }
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Puerto: {}", self.port);
        println!("   Host: {}", self.host);
        match &self.directory {
            Some(directory) => println!("   Files Dir: {}", directory),
            None => println!("   Files Dir: (no configurado, /files/* deshabilitado)"),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(port: u16, host: &str, directory: Option<&str>) -> Config {
        Config {
            port,
            host: host.to_string(),
            directory: directory.map(str::to_string),
        }
    }

    #[test]
    fn test_address() {
        let config = config(4221, "0.0.0.0", None);
        assert_eq!(config.address(), "0.0.0.0:4221");
    }

    #[test]
    fn test_validate_without_directory() {
        assert!(config(4221, "127.0.0.1", None).validate().is_ok());
    }

    #[test]
    fn test_validate_existing_directory() {
        let dir = std::env::temp_dir();
        let config = config(4221, "127.0.0.1", dir.to_str());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_directory() {
        let config = config(4221, "127.0.0.1", Some("/definitely/not/a/real/dir"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let config = Config::try_parse_from([
            "http11_server",
            "--port",
            "8099",
            "--directory",
            "/tmp",
        ])
        .unwrap();

        assert_eq!(config.port, 8099);
        assert_eq!(config.directory.as_deref(), Some("/tmp"));
    }

    #[test]
    fn test_cli_defaults() {
        let config = Config::try_parse_from(["http11_server"]).unwrap();

        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.directory.is_none());
    }
}
