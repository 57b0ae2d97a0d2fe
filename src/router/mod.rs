//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, patrón de path)
//! a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La tabla es una secuencia ordenada e inmutable de triples
//! `(método, patrón compilado, handler)` construida una sola vez al
//! arranque. El router recorre la tabla en orden de registro y el primer
//! patrón que matchea gana; cada patrón se ancla como `^patrón$` y se
//! prueba solo contra el path del request. Un método sin rutas
//! registradas o un path sin match producen la 404 compartida.

use crate::handlers::{basic, files, HandlerContext};
use crate::http::{Request, Response};
use regex::Regex;

/// Tipo de función handler
///
/// Un handler recibe el Request más el contexto compartido y retorna
/// una Response
pub type Handler = fn(&Request, &HandlerContext) -> Response;

/// Router con la tabla ordenada de rutas
pub struct Router {
    /// Triples (método, patrón anclado, handler) en orden de registro
    routes: Vec<(String, Regex, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Construye el router con la tabla de rutas del servidor
    pub fn with_default_routes() -> Result<Self, regex::Error> {
        let mut router = Self::new();
        router.register("GET", "/", basic::hello)?;
        router.register("GET", "/echo/.*", basic::echo)?;
        router.register("GET", "/user-agent", basic::user_agent)?;
        router.register("GET", "/files/.*", files::get_file)?;
        router.register("POST", "/files.*", files::write_file)?;
        Ok(router)
    }

    /// Registra una ruta con su handler
    ///
    /// El patrón se compila anclado en ambos extremos (`^patrón$`), así
    /// `/echo/.*` no matchea `/x/echo/y`.
    pub fn register(
        &mut self,
        method: &str,
        pattern: &str,
        handler: Handler,
    ) -> Result<(), regex::Error> {
        let anchored = Regex::new(&format!("^{}$", pattern))?;
        self.routes.push((method.to_string(), anchored, handler));
        Ok(())
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Recorre las rutas del método en orden de registro; el primer
    /// patrón que matchea el path ejecuta su handler y el resultado se
    /// retorna de inmediato. Sin match, retorna 404 Not Found.
    pub fn dispatch(&self, request: &Request, ctx: &HandlerContext) -> Response {
        for (method, pattern, handler) in &self.routes {
            if method.as_str() != request.method() {
                continue;
            }
            if pattern.is_match(request.path()) {
                return handler(request, ctx);
            }
        }
        Response::not_found()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use std::io::BufReader;

    fn request_with(raw: &[u8]) -> Request {
        let mut reader = BufReader::new(raw);
        Request::read_from(&mut reader).unwrap().unwrap()
    }

    fn ctx() -> HandlerContext {
        HandlerContext::new(None)
    }

    fn first_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
        Response::text("first")
    }

    fn second_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
        Response::text("second")
    }

    #[test]
    fn test_router_starts_empty() {
        let router = Router::new();
        let request = request_with(b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = Router::new();
        router.register("GET", "/overlap/.*", first_handler).unwrap();
        router.register("GET", "/overlap/x", second_handler).unwrap();

        let request = request_with(b"GET /overlap/x HTTP/1.1\r\n\r\n");
        assert_eq!(router.dispatch(&request, &ctx()).body(), b"first");
    }

    #[test]
    fn test_patterns_are_anchored() {
        let mut router = Router::new();
        router.register("GET", "/echo/.*", first_handler).unwrap();

        let request = request_with(b"GET /prefix/echo/abc HTTP/1.1\r\n\r\n");
        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );

        let request = request_with(b"GET / HTTP/1.1\r\n\r\n");
        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_unregistered_method_is_404() {
        let mut router = Router::new();
        router.register("GET", "/", first_handler).unwrap();

        let request = request_with(b"DELETE / HTTP/1.1\r\n\r\n");
        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let mut router = Router::new();
        router.register("GET", "/", first_handler).unwrap();

        let request = request_with(b"get / HTTP/1.1\r\n\r\n");
        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut router = Router::new();
        assert!(router.register("GET", "/broken[", first_handler).is_err());
    }

    #[test]
    fn test_default_routes_hello() {
        let router = Router::with_default_routes().unwrap();
        let request = request_with(b"GET / HTTP/1.1\r\n\r\n");
        let response = router.dispatch(&request, &ctx());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"Hello, World!");
    }

    #[test]
    fn test_default_routes_echo() {
        let router = Router::with_default_routes().unwrap();
        let request = request_with(b"GET /echo/foo HTTP/1.1\r\n\r\n");
        let response = router.dispatch(&request, &ctx());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"foo");
    }

    #[test]
    fn test_default_routes_unknown_path_is_404() {
        let router = Router::with_default_routes().unwrap();
        let request = request_with(b"GET /does-not-exist HTTP/1.1\r\n\r\n");
        let response = router.dispatch(&request, &ctx());

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.body(), b"Not Found");
    }

    #[test]
    fn test_default_routes_post_only_on_files() {
        let router = Router::with_default_routes().unwrap();
        let request = request_with(b"POST /echo/foo HTTP/1.1\r\n\r\n");

        assert_eq!(
            router.dispatch(&request, &ctx()).status(),
            StatusCode::NotFound
        );
    }
}
