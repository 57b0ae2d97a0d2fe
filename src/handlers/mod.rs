//! # Handlers de Rutas
//! src/handlers/mod.rs
//!
//! Este módulo implementa los handlers del servidor. Un handler es una
//! función pura que recibe el request más el contexto compartido y
//! produce una respuesta:
//!
//! ```text
//! Request + HandlerContext → Response
//! ```
//!
//! El contexto es inmutable después del arranque: solo carga el
//! directorio opcional de archivos, así los handlers no capturan estado
//! mutable y la tabla de rutas puede compartirse entre threads sin locks.

pub mod basic;
pub mod files;

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Estado compartido de solo lectura disponible para los handlers
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// Directorio base para las rutas /files/*; None si no se configuró
    directory: Option<PathBuf>,
}

impl HandlerContext {
    /// Crea un contexto con un directorio de archivos opcional
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }

    /// Construye el contexto desde la configuración del CLI
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.directory.as_ref().map(PathBuf::from))
    }

    /// Directorio configurado para servir/escribir archivos
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}
