use std::future::Future;
use std::time::Duration;

use common::EvalResponse;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::error::TaskError;

/// Timeout de conexión (incluye el handshake TLS) y de la request completa.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Capacidad de evaluar una expresión contra algún backend.
///
/// Cada tarea recibe su propio clon, ligado al mismo endpoint: entre workers
/// no se comparte ningún estado mutable del cliente.
pub trait Evaluator: Clone + Send + Sync + 'static {
    fn evaluate(&self, expression: &str) -> impl Future<Output = Result<i64, TaskError>> + Send;
}

/// Evaluador remoto: `GET <endpoint>?expr=<expresión>` y respuesta
/// `{"Result": n, "Error": "..."}`.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    endpoint: Url,
    timeout: Duration,
}

impl HttpEvaluator {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL de la request; reemplaza cualquier query que traiga el endpoint.
    fn request_url(&self, expression: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().clear().append_pair("expr", expression);
        url
    }

    fn client(&self) -> Result<Client, TaskError> {
        let client = Client::builder()
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}

impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, expression: &str) -> Result<i64, TaskError> {
        let client = self.client()?;
        let url = self.request_url(expression);
        debug!("GET {}", url);

        let resp = client.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        decode_response(status, &body)
    }
}

/// Interpreta status + cuerpo. Manda siempre el cuerpo:
/// - no es JSON -> `Decode`, sea cual sea el status
/// - JSON con `Error` no vacío -> `Remote` (con el resultado parcial)
/// - JSON sin error pero status no 2xx -> `Status`, con `Result` como parcial
fn decode_response(status: StatusCode, body: &[u8]) -> Result<i64, TaskError> {
    let resp: EvalResponse = serde_json::from_slice(body)?;

    if resp.is_error() {
        return Err(TaskError::Remote {
            result: resp.result,
            message: resp.error,
        });
    }
    if !status.is_success() {
        return Err(TaskError::Status {
            status: status.as_u16(),
            result: resp.result,
        });
    }

    Ok(resp.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode as AxumStatus, routing::get, Router};
    use tokio::net::TcpListener;

    /// Levanta un router en 127.0.0.1:<puerto libre> y devuelve su URL base.
    async fn serve(app: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    #[test]
    fn request_url_codifica_la_expresion() {
        let ev = HttpEvaluator::new(Url::parse("http://127.0.0.1:8080/").unwrap());
        let url = ev.request_url("1+2*3");
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/?expr=1%2B2*3");
    }

    #[test]
    fn request_url_reemplaza_query_existente() {
        let ev = HttpEvaluator::new(Url::parse("http://calc/eval?expr=old&x=1").unwrap());
        let url = ev.request_url("4/2");
        assert_eq!(url.query(), Some("expr=4%2F2"));
        assert_eq!(url.path(), "/eval");
    }

    #[test]
    fn decode_ok() {
        let r = decode_response(StatusCode::OK, br#"{"Result":7,"Error":""}"#);
        assert_eq!(r.unwrap(), 7);
    }

    #[test]
    fn decode_error_de_aplicacion_con_parcial() {
        let err = decode_response(StatusCode::OK, br#"{"Result":2,"Error":"division by zero"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
        assert_eq!(err.partial_result(), 2);
    }

    #[test]
    fn decode_json_invalido() {
        let err = decode_response(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, TaskError::Decode(_)));
        assert!(err.to_string().starts_with("unmarshal failed"));
    }

    #[test]
    fn decode_no_json_con_status_no_2xx_es_decode_error() {
        let err = decode_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, TaskError::Decode(_)));
        assert!(err.to_string().starts_with("unmarshal failed"));
    }

    #[test]
    fn decode_status_no_2xx_conserva_result() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"Result":4,"Error":""}"#)
            .unwrap_err();
        assert!(matches!(err, TaskError::Status { status: 500, result: 4 }));
        assert_eq!(err.partial_result(), 4);

        // si el cuerpo trae Error, manda el texto del servicio
        let err = decode_response(StatusCode::BAD_REQUEST, br#"{"Error":"missing expr"}"#).unwrap_err();
        assert_eq!(err.to_string(), "missing expr");
    }

    #[tokio::test]
    async fn evalua_contra_calc() {
        let base = serve(calc::build_router()).await;
        let ev = HttpEvaluator::new(base);

        assert_eq!(ev.evaluate("1+2*3").await.unwrap(), 7);
        assert_eq!(ev.evaluate("9-4/2").await.unwrap(), 7);

        let err = ev.evaluate("5/0").await.unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[tokio::test]
    async fn cuerpo_no_json_es_decode_error() {
        let app = Router::new().route("/", get(|| async { "not json" }));
        let ev = HttpEvaluator::new(serve(app).await);

        let err = ev.evaluate("1+1").await.unwrap_err();
        assert!(matches!(err, TaskError::Decode(_)));
    }

    #[tokio::test]
    async fn status_500_sin_json_es_decode_error() {
        let app = Router::new().route(
            "/",
            get(|| async { (AxumStatus::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let ev = HttpEvaluator::new(serve(app).await);

        let err = ev.evaluate("1+1").await.unwrap_err();
        assert!(matches!(err, TaskError::Decode(_)));
    }

    #[tokio::test]
    async fn conexion_rechazada_es_transport_error() {
        // bind y drop: el puerto queda libre y nadie escucha
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let ev = HttpEvaluator::new(Url::parse(&format!("http://{}/", addr)).unwrap())
            .with_timeout(Duration::from_millis(500));

        let err = ev.evaluate("1+1").await.unwrap_err();
        assert!(matches!(err, TaskError::Transport(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn timeout_del_servidor_lento() {
        let app = Router::new().route(
            "/",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let ev = HttpEvaluator::new(serve(app).await).with_timeout(Duration::from_millis(100));

        let err = ev.evaluate("1+1").await.unwrap_err();
        match err {
            TaskError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("esperaba timeout, vino {other:?}"),
        }
    }
}
