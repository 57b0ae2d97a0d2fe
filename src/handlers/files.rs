//! # Handlers de Archivos
//! src/handlers/files.rs
//!
//! Lectura y escritura de archivos bajo el directorio configurado con
//! `--directory`. Los nombres se validan antes de tocar el filesystem:
//! un nombre con separadores de path o caracteres reservados nunca llega
//! a resolverse, así `/files/../x` no puede escapar del directorio.
//!
//! Escrituras concurrentes al mismo nombre desde dos conexiones no se
//! serializan: el resultado es el del filesystem subyacente.

use super::HandlerContext;
use crate::http::{Request, Response, StatusCode};
use std::fs;
use std::io;

/// Caracteres que invalidan un nombre de archivo
///
/// El conjunto reservado de Windows más los separadores de path; en
/// Unix solo `/` y NUL son inválidos, pero rechazamos el conjunto
/// completo en todas las plataformas.
const INVALID_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Handler para GET /files/.*
///
/// Responde 200 `application/octet-stream` con el contenido del archivo.
/// Nombre inválido o archivo inexistente → 404; error de I/O → 500.
pub fn get_file(request: &Request, ctx: &HandlerContext) -> Response {
    let filename = filename_from(request.path());
    if !is_valid_filename(filename) {
        println!("   ❌ Invalid filename: {:?}", filename);
        return Response::not_found();
    }
    let directory = match ctx.directory() {
        Some(dir) => dir,
        None => return no_directory_configured(),
    };

    match fs::read(directory.join(filename)) {
        Ok(contents) => Response::octet_stream(contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Response::not_found(),
        Err(e) => read_write_failure("read", filename, &e),
    }
}

/// Handler para POST /files.*
///
/// Escribe (o sobrescribe) el body del request en el archivo destino y
/// responde 201. Nombre inválido → 404; error de I/O → 500.
pub fn write_file(request: &Request, ctx: &HandlerContext) -> Response {
    let filename = filename_from(request.path());
    if !is_valid_filename(filename) {
        println!("   ❌ Invalid filename: {:?}", filename);
        return Response::not_found();
    }
    let directory = match ctx.directory() {
        Some(dir) => dir,
        None => return no_directory_configured(),
    };

    match fs::write(directory.join(filename), request.body()) {
        Ok(()) => Response::created(),
        Err(e) => read_write_failure("write", filename, &e),
    }
}

/// Extrae el nombre de archivo quitando el prefijo de 7 caracteres
/// (`/files/`) del path
fn filename_from(path: &str) -> &str {
    path.get(7..).unwrap_or("")
}

/// Valida que el nombre no esté vacío ni contenga caracteres reservados
/// o de control
fn is_valid_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename
            .chars()
            .any(|c| INVALID_FILENAME_CHARS.contains(&c) || c.is_control())
}

/// Respuesta 500 cuando una ruta /files/* corre sin --directory
///
/// Nunca se usa una ubicación por defecto implícita.
fn no_directory_configured() -> Response {
    eprintln!("   ❌ /files route hit but no --directory was configured");
    Response::error(
        StatusCode::InternalServerError,
        "No files directory configured (start the server with --directory)",
    )
}

/// Respuesta 500 para errores de I/O en lectura/escritura
fn read_write_failure(operation: &str, filename: &str, error: &io::Error) -> Response {
    eprintln!("   ❌ File {} failed for {:?}: {}", operation, filename, error);
    Response::error(
        StatusCode::InternalServerError,
        &format!("File {} failed", operation),
    )
}
