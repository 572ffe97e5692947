//! Handshake and request-shaping tests against an in-memory transport

use inmostore_client::{
    async_trait, Client, ClientConfig, ClientState, Error, HttpResponse, Modo, Transport,
    TransportError, TransportErrorKind, Url,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Records every requested URL and answers with a fixed response
#[derive(Debug)]
struct SpyTransport {
    calls: Mutex<Vec<String>>,
    response: Result<HttpResponse, TransportError>,
    delay: Option<Duration>,
}

impl SpyTransport {
    fn responding(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(HttpResponse::new(status, body)),
            delay: None,
        })
    }

    fn failing(kind: TransportErrorKind, message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Err(TransportError::new(kind, message)),
            delay: None,
        })
    }

    fn slow(status: u16, body: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(HttpResponse::new(status, body)),
            delay: Some(delay),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for SpyTransport {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

fn client_with(api_key: &str, spy: &Arc<SpyTransport>) -> Client {
    Client::with_transport(ClientConfig::new("id1", api_key), spy.clone()).unwrap()
}

#[tokio::test]
async fn test_empty_key_fails_without_request() {
    for key in ["", "   "] {
        let spy = SpyTransport::responding(200, r#"{"Resultado":"3.2.1"}"#);
        let client = client_with(key, &spy);

        let err = client.init().await.unwrap_err();

        assert!(matches!(err, Error::MissingConfig(ref field) if field == "api_key"));
        assert!(err.is_configuration());
        assert!(!err.is_connectivity());
        assert_eq!(client.state(), ClientState::Failed);
        assert_eq!(client.current_version(), None);
        assert!(spy.calls().is_empty());
    }
}

#[tokio::test]
async fn test_version_handshake() {
    let spy = SpyTransport::responding(200, r#"{"Resultado":"3.2.1"}"#);
    let client = client_with("key1", &spy);

    assert_eq!(client.current_version(), None);
    assert_eq!(client.init().await.unwrap(), "3.2.1");

    assert_eq!(client.state(), ClientState::Ready);
    assert_eq!(client.current_version(), Some("3.2.1"));
    assert_eq!(client.api_id(), "id1");
    assert_eq!(
        spy.calls(),
        vec!["https://inmostore-api.psweb.me/sys/version/key1".to_string()]
    );
}

#[tokio::test]
async fn test_version_is_returned_verbatim() {
    for version in ["1.0", "3.2.1-beta+build.7", "2024.10 (LTS)"] {
        let body = serde_json::json!({ "Resultado": version }).to_string();
        let spy = SpyTransport::responding(200, &body);
        let client = client_with("key1", &spy);

        assert_eq!(client.init().await.unwrap(), version);
        assert_eq!(client.current_version(), Some(version));
    }
}

#[tokio::test]
async fn test_non_success_status_fails_handshake() {
    for status in [301, 401, 404, 500, 503] {
        let spy = SpyTransport::responding(status, r#"{"Resultado":"3.2.1"}"#);
        let client = client_with("key1", &spy);

        match client.init().await {
            Err(Error::Connectivity { status: got, .. }) => assert_eq!(got, Some(status)),
            other => panic!("expected Connectivity for {status}, got {other:?}"),
        }
        assert_eq!(client.state(), ClientState::Failed);
        assert_eq!(client.current_version(), None);
    }
}

#[tokio::test]
async fn test_transport_failure_fails_handshake() {
    let spy = SpyTransport::failing(TransportErrorKind::Timeout, "deadline elapsed");
    let client = client_with("key1", &spy);

    match client.init().await {
        Err(Error::Connectivity {
            status,
            cause,
            source,
        }) => {
            assert_eq!(status, None);
            assert!(cause.contains("deadline elapsed"), "{cause}");
            assert_eq!(source.map(|e| e.kind), Some(TransportErrorKind::Timeout));
        }
        other => panic!("expected Connectivity, got {other:?}"),
    }
    assert_eq!(client.state(), ClientState::Failed);
}

#[tokio::test]
async fn test_failed_state_is_terminal() {
    let spy = SpyTransport::responding(500, "");
    let client = client_with("key1", &spy);

    assert!(client.init().await.is_err());
    let second = client.init().await;

    assert!(matches!(second, Err(Error::Connectivity { .. })));
    assert_eq!(client.state(), ClientState::Failed);
    assert_eq!(spy.calls().len(), 1);
}

#[tokio::test]
async fn test_concurrent_init_probes_once() {
    let spy = SpyTransport::slow(200, r#"{"Resultado":"3.2.1"}"#, Duration::from_millis(50));
    let client = client_with("key1", &spy);

    let (a, b, c) = tokio::join!(client.init(), client.init(), client.init());

    assert_eq!(a.unwrap(), "3.2.1");
    assert_eq!(b.unwrap(), "3.2.1");
    assert_eq!(c.unwrap(), "3.2.1");
    assert_eq!(spy.calls().len(), 1);
}

#[tokio::test]
async fn test_embedded_image_url_performs_no_io() {
    let spy = SpyTransport::responding(500, "");
    let client = client_with("key1", &spy);
    let image_id = Uuid::new_v4();

    let url = client.get_embedded_image_url(image_id);

    assert_eq!(
        url,
        format!("https://inmostore-api.psweb.me/images/embed/{image_id}/key1")
    );
    assert!(spy.calls().is_empty());

    // Also available once the handshake has failed
    assert!(client.init().await.is_err());
    assert_eq!(client.get_embedded_image_url(image_id), url);
    assert_eq!(spy.calls().len(), 1);
}

#[tokio::test]
async fn test_list_imagenes_path_shape() {
    let body = r#"{"Operacion":{"codigo":0,"affectedRows":0},"items":[]}"#;
    let cases = [
        (0, Uuid::nil()),
        (1, Uuid::from_u128(1)),
        (7, Uuid::new_v4()),
        (-1, Uuid::new_v4()),
    ];

    for (modo, object_id) in cases {
        let spy = SpyTransport::responding(200, body);
        let client = client_with("key1", &spy);

        client.list_imagenes(modo, object_id).await.unwrap();

        assert_eq!(
            spy.calls(),
            vec![format!(
                "https://inmostore-api.psweb.me/imagenes/list/{modo}/{object_id}/key1"
            )]
        );
    }
}

#[tokio::test]
async fn test_modo_codes_on_the_wire() {
    let body = r#"{"Operacion":{"codigo":0,"affectedRows":0},"items":[]}"#;
    let spy = SpyTransport::responding(200, body);
    let client = client_with("key1", &spy);
    let empresa_id = Uuid::from_u128(10);
    let object_id = Uuid::from_u128(20);

    client
        .list_escenas(empresa_id, Modo::Inmueble, object_id)
        .await
        .unwrap();
    client
        .list_escenas(empresa_id, Modo::Proyecto, object_id)
        .await
        .unwrap();

    assert_eq!(
        spy.calls(),
        vec![
            format!(
                "https://inmostore-api.psweb.me/escenas/active/{empresa_id}/0/{object_id}/key1"
            ),
            format!(
                "https://inmostore-api.psweb.me/escenas/active/{empresa_id}/1/{object_id}/key1"
            ),
        ]
    );
}

#[tokio::test]
async fn test_query_transport_error_is_tagged() {
    let spy = SpyTransport::failing(TransportErrorKind::Connect, "connection refused");
    let client = client_with("key1", &spy);
    let proyecto_id = Uuid::new_v4();

    let err = client.list_proyecto_modelos(proyecto_id).await.unwrap_err();

    match &err {
        Error::RequestError {
            operation,
            endpoint,
            source,
        } => {
            assert_eq!(*operation, "listProyectoModelos");
            assert_eq!(endpoint, &format!("modelos/active/{proyecto_id}/***"));
            assert_eq!(source.kind, TransportErrorKind::Connect);
        }
        other => panic!("expected RequestError, got {other:?}"),
    }
    assert!(!err.to_string().contains("key1"));
    assert_eq!(client.state(), ClientState::Uninitialized);
}

#[tokio::test]
async fn test_string_segments_are_encoded() {
    let body = r#"{"Operacion":{"codigo":0,"affectedRows":0},"resultado":"x"}"#;
    let spy = SpyTransport::responding(200, body);
    let client = client_with("key1", &spy);
    let empresa_id = Uuid::from_u128(3);

    client.get_setting(empresa_id, "ruta/base").await.unwrap();

    assert_eq!(
        spy.calls(),
        vec![format!(
            "https://inmostore-api.psweb.me/settings/get/{empresa_id}/ruta%2Fbase/key1"
        )]
    );
}
