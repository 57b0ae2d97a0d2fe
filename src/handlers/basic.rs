//! # Handlers Básicos
//! src/handlers/basic.rs
//!
//! Handlers de texto plano: saludo estático, echo del path y reflejo
//! del header User-Agent.

use super::HandlerContext;
use crate::http::{Request, Response, StatusCode};

/// Handler para GET /
///
/// Responde 200 con el saludo estático.
pub fn hello(_request: &Request, _ctx: &HandlerContext) -> Response {
    Response::text("Hello, World!")
}

/// Handler para GET /echo/.*
///
/// Responde 200 con el path sin el prefijo `/echo/`.
///
/// # Ejemplo
/// ```text
/// GET /echo/hola  →  200, body "hola"
/// ```
pub fn echo(request: &Request, _ctx: &HandlerContext) -> Response {
    let echoed = request.path().strip_prefix("/echo/").unwrap_or_default();
    Response::text(echoed)
}

/// Handler para GET /user-agent
///
/// Responde 200 con el valor del header `User-Agent`. Sin el header la
/// respuesta es 400: un header requerido ausente es una falla del
/// request, no motivo para tumbar la conexión.
pub fn user_agent(request: &Request, _ctx: &HandlerContext) -> Response {
    match request.header("User-Agent") {
        Some(value) => Response::text(value),
        None => Response::error(
            StatusCode::BadRequest,
            "Missing required header: User-Agent",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn request_with(raw: &[u8]) -> Request {
        let mut reader = BufReader::new(raw);
        Request::read_from(&mut reader).unwrap().unwrap()
    }

    fn ctx() -> HandlerContext {
        HandlerContext::new(None)
    }

    #[test]
    fn test_hello() {
        let request = request_with(b"GET / HTTP/1.1\r\n\r\n");
        let response = hello(&request, &ctx());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.body(), b"Hello, World!");
    }

    #[test]
    fn test_echo_strips_prefix() {
        let request = request_with(b"GET /echo/foo HTTP/1.1\r\n\r\n");
        let response = echo(&request, &ctx());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"foo");
        assert_eq!(response.header("Content-Length"), Some("3"));
    }

    #[test]
    fn test_echo_empty_suffix() {
        let request = request_with(b"GET /echo/ HTTP/1.1\r\n\r\n");
        let response = echo(&request, &ctx());

        assert_eq!(response.body(), b"");
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_echo_with_nested_path() {
        let request = request_with(b"GET /echo/a/b/c HTTP/1.1\r\n\r\n");
        let response = echo(&request, &ctx());

        assert_eq!(response.body(), b"a/b/c");
    }

    #[test]
    fn test_user_agent_reflected() {
        let request =
            request_with(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client\r\n\r\n");
        let response = user_agent(&request, &ctx());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"test-client");
    }

    #[test]
    fn test_user_agent_missing_is_bad_request() {
        let request = request_with(b"GET /user-agent HTTP/1.1\r\n\r\n");
        let response = user_agent(&request, &ctx());

        assert_eq!(response.status(), StatusCode::BadRequest);
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(body.contains("User-Agent"));
    }
}
