//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, orientado a
//! streams: lee exactamente un request del socket y deja los bytes del
//! siguiente request intactos en el buffer (necesario para conexiones
//! persistentes).
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/foo.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path PROTOCOL`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: exactamente `Content-Length` bytes crudos (sin header, vacío)
//!
//! El body se lee byte a byte desde el stream con `read_exact`, nunca a
//! través de una capa de decodificación de texto. Un decode intermedio
//! corrompe bodies binarios con encodings multi-byte.

use std::collections::HashMap;
use std::io::{self, BufRead};

/// Representa un request HTTP/1.1 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como vino en el wire (case-sensitive, ej: "GET")
    method: String,

    /// Path de la petición (ej: "/echo/hola")
    path: String,

    /// Protocolo declarado por el cliente (ej: "HTTP/1.1")
    protocol: String,

    /// Headers HTTP; las claves y valores vienen con trim aplicado y un
    /// header repetido conserva la última ocurrencia
    headers: HashMap<String, String>,

    /// Body del request, exactamente `Content-Length` bytes
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos terminan únicamente la conexión afectada; el servidor no envía
/// respuesta para un request que no se pudo parsear.
#[derive(Debug)]
pub enum ParseError {
    /// La request line no tiene exactamente 3 tokens separados por espacio
    MalformedRequestLine(String),

    /// Línea de header sin `:`, o el stream terminó en medio de los headers
    MalformedHeader(String),

    /// El header Content-Length no es un entero no-negativo
    InvalidContentLength(String),

    /// El stream terminó antes de entregar los bytes declarados del body
    TruncatedBody { expected: usize },

    /// Error de I/O leyendo del socket
    Io(io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedRequestLine(line) => {
                write!(f, "Malformed request line: {:?}", line)
            }
            ParseError::MalformedHeader(line) => write!(f, "Malformed header: {:?}", line),
            ParseError::InvalidContentLength(value) => {
                write!(f, "Invalid Content-Length header: {:?}", value)
            }
            ParseError::TruncatedBody { expected } => {
                write!(f, "Stream ended before reading {} body bytes", expected)
            }
            ParseError::Io(e) => write!(f, "I/O error reading request: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

impl Request {
    /// Lee y parsea un request HTTP/1.1 desde un stream bufferizado
    ///
    /// # Retorna
    ///
    /// * `Ok(Some(request))` - Request parseado exitosamente
    /// * `Ok(None)` - El stream terminó limpiamente antes de cualquier byte
    ///   (el cliente cerró la conexión; no es un error)
    /// * `Err(ParseError)` - Request malformado o stream truncado
    ///
    /// Solo consume los bytes que pertenecen a este request: con varios
    /// requests encolados en el mismo stream, cada llamada entrega el
    /// siguiente.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http11_server::http::Request;
    ///
    /// let mut raw: &[u8] = b"GET /echo/hola HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::read_from(&mut raw).unwrap().unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/echo/hola");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Option<Self>, ParseError> {
        // 1. Request line; EOF limpio aquí significa "no hay más requests"
        let request_line = match read_line(reader)? {
            Some(line) => line,
            None => return Ok(None),
        };
        let (method, path, protocol) = Self::parse_request_line(&request_line)?;

        // 2. Headers hasta la línea vacía
        let headers = Self::read_headers(reader)?;

        // 3. Body: exactamente Content-Length bytes crudos del stream
        let body = Self::read_body(reader, &headers)?;

        Ok(Some(Request {
            method,
            path,
            protocol,
            headers,
            body,
        }))
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1` - exactamente 3 tokens separados por
    /// un espacio simple.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();
        match parts.as_slice() {
            [method, path, protocol] => {
                Ok((method.to_string(), path.to_string(), protocol.to_string()))
            }
            _ => Err(ParseError::MalformedRequestLine(line.to_string())),
        }
    }

    /// Lee líneas de header hasta encontrar la línea vacía
    ///
    /// Cada header tiene formato `Name: Value`; se separa en el primer `:`
    /// y ambos lados se trimean. Un header repetido se queda con la última
    /// ocurrencia.
    fn read_headers<R: BufRead>(
        reader: &mut R,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        loop {
            let line = match read_line(reader)? {
                Some(line) => line,
                // EOF en medio de los headers: request incompleto
                None => {
                    return Err(ParseError::MalformedHeader(
                        "unexpected end of stream".to_string(),
                    ))
                }
            };

            // La línea vacía marca el fin de los headers
            if line.is_empty() {
                break;
            }

            match line.find(':') {
                Some(colon_pos) => {
                    let name = line[..colon_pos].trim().to_string();
                    let value = line[colon_pos + 1..].trim().to_string();
                    headers.insert(name, value);
                }
                None => return Err(ParseError::MalformedHeader(line)),
            }
        }

        Ok(headers)
    }

    /// Lee el body del request según el header Content-Length
    ///
    /// Sin el header no se intenta leer nada: body vacío. Con el header,
    /// se leen exactamente esos bytes con `read_exact`; si el stream
    /// termina antes es `TruncatedBody`.
    fn read_body<R: BufRead>(
        reader: &mut R,
        headers: &HashMap<String, String>,
    ) -> Result<Vec<u8>, ParseError> {
        let content_length = match headers.get("Content-Length") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength(value.clone()))?,
            None => return Ok(Vec::new()),
        };

        let mut body = vec![0u8; content_length];
        match reader.read_exact(&mut body) {
            Ok(()) => Ok(body),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(ParseError::TruncatedBody {
                expected: content_length,
            }),
            Err(e) => Err(ParseError::Io(e)),
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request (ej: "GET")
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el protocolo declarado (ej: "HTTP/1.1")
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Indica si el cliente pidió cerrar la conexión tras este exchange
    ///
    /// Solo el valor exacto `close` cuenta.
    pub fn close_requested(&self) -> bool {
        self.header("Connection") == Some("close")
    }
}

/// Lee una línea terminada en CRLF (se tolera un LF solo)
///
/// Retorna `Ok(None)` si el stream terminó sin entregar ningún byte.
/// La línea retornada no incluye el terminador.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, ParseError> {
    let mut raw = Vec::new();
    let n = reader.read_until(b'\n', &mut raw)?;
    if n == 0 {
        return Ok(None);
    }
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&raw).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn parse(raw: &[u8]) -> Result<Option<Request>, ParseError> {
        let mut reader = BufReader::new(raw);
        Request::read_from(&mut reader)
    }

    #[test]
    fn test_parse_simple_get() {
        let request = parse(b"GET / HTTP/1.1\r\n\r\n").unwrap().unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.path(), "/");
        assert_eq!(request.protocol(), "HTTP/1.1");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: test\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.header("Host"), Some("localhost:4221"));
        assert_eq!(request.header("User-Agent"), Some("test"));
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        let raw = b"GET / HTTP/1.1\r\n  User-Agent  :   curl/8.0  \r\n\r\n";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.header("User-Agent"), Some("curl/8.0"));
    }

    #[test]
    fn test_duplicate_header_last_wins() {
        let raw = b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.header("X-Tag"), Some("second"));
    }

    #[test]
    fn test_header_value_may_contain_colons() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.header("Host"), Some("localhost:4221"));
    }

    #[test]
    fn test_lone_lf_line_endings() {
        let raw = b"GET /echo/abc HTTP/1.1\nHost: localhost\n\n";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.path(), "/echo/abc");
        assert_eq!(request.header("Host"), Some("localhost"));
    }

    #[test]
    fn test_body_read_exactly() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = parse(raw).unwrap().unwrap();

        assert_eq!(request.body(), b"hello");
    }

    #[test]
    fn test_body_preserves_raw_bytes() {
        // Bytes no-UTF8: no deben pasar por ninguna capa de texto
        let mut raw = b"POST /files/bin HTTP/1.1\r\nContent-Length: 4\r\n\r\n".to_vec();
        raw.extend_from_slice(&[0x00, 0xFF, 0x10, 0xFE]);
        let request = parse(&raw).unwrap().unwrap();

        assert_eq!(request.body(), &[0x00, 0xFF, 0x10, 0xFE]);
    }

    #[test]
    fn test_missing_content_length_means_empty_body() {
        // Sin Content-Length no se intenta leer body, aunque haya más bytes
        let raw = b"GET / HTTP/1.1\r\n\r\nGET /next HTTP/1.1\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();

        assert!(request.body().is_empty());
    }

    #[test]
    fn test_does_not_consume_next_request() {
        let raw: &[u8] = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcGET /second HTTP/1.1\r\n\r\n";
        let mut reader = BufReader::new(raw);

        let first = Request::read_from(&mut reader).unwrap().unwrap();
        assert_eq!(first.body(), b"abc");

        let second = Request::read_from(&mut reader).unwrap().unwrap();
        assert_eq!(second.method(), "GET");
        assert_eq!(second.path(), "/second");

        assert!(Request::read_from(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_clean_eof_returns_none() {
        assert!(parse(b"").unwrap().is_none());
    }

    #[test]
    fn test_malformed_request_line() {
        let result = parse(b"GET /\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_request_line_with_extra_token() {
        let result = parse(b"GET / HTTP/1.1 extra\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_header_without_colon() {
        let result = parse(b"GET / HTTP/1.1\r\nNoColonHere\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
    }

    #[test]
    fn test_eof_during_headers() {
        let result = parse(b"GET / HTTP/1.1\r\nHost: localhost\r\n");
        assert!(matches!(result, Err(ParseError::MalformedHeader(_))));
    }

    #[test]
    fn test_invalid_content_length() {
        let result = parse(b"POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidContentLength(_))));
    }

    #[test]
    fn test_negative_content_length() {
        let result = parse(b"POST / HTTP/1.1\r\nContent-Length: -1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidContentLength(_))));
    }

    #[test]
    fn test_truncated_body() {
        let result = parse(b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nshort");
        assert!(matches!(
            result,
            Err(ParseError::TruncatedBody { expected: 10 })
        ));
    }

    #[test]
    fn test_close_requested() {
        let raw = b"GET / HTTP/1.1\r\nConnection: close\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();
        assert!(request.close_requested());

        let raw = b"GET / HTTP/1.1\r\nConnection: keep-alive\r\n\r\n";
        let request = parse(raw).unwrap().unwrap();
        assert!(!request.close_requested());

        let request = parse(b"GET / HTTP/1.1\r\n\r\n").unwrap().unwrap();
        assert!(!request.close_requested());
    }
}
