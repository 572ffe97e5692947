//! InmoStore client implementation

use crate::endpoint::{Endpoint, REDACTED_KEY};
use crate::error::{Error, Result};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::*;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Root of the public InmoStore API
pub const DEFAULT_API_ROOT: &str = "https://inmostore-api.psweb.me/";

/// Per-request timeout used by the default transport
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// When an empty API key is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Accept the key at construction; `init()` fails with a configuration error
    #[default]
    Deferred,
    /// Reject the key in [`Client::new`]
    FailFast,
}

/// Configuration for the InmoStore client
#[derive(Clone)]
pub struct ClientConfig {
    /// API root (e.g., "https://inmostore-api.psweb.me/")
    pub api_root: String,
    /// API id; carried for the caller, never sent to the server
    pub api_id: String,
    /// API key, sent as the last path segment of every request
    pub api_key: String,
    /// When an empty API key is reported
    pub key_policy: KeyPolicy,
    /// Request timeout for the default transport
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration against the public API root with default settings
    pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.to_string(),
            api_id: api_id.into(),
            api_key: api_key.into(),
            key_policy: KeyPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a new configuration from environment variables
    ///
    /// Required environment variables:
    /// - `INMOSTORE_API_ID`
    /// - `INMOSTORE_API_KEY`
    ///
    /// Optional:
    /// - `INMOSTORE_API_ROOT` (defaults to [`DEFAULT_API_ROOT`])
    /// - `INMOSTORE_TIMEOUT_SECS` (defaults to 10)
    pub fn from_env() -> Result<Self> {
        let api_id = env::var("INMOSTORE_API_ID")
            .map_err(|_| Error::EnvError("INMOSTORE_API_ID not set".to_string()))?;
        let api_key = env::var("INMOSTORE_API_KEY")
            .map_err(|_| Error::EnvError("INMOSTORE_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_id, api_key);

        if let Ok(api_root) = env::var("INMOSTORE_API_ROOT") {
            config.api_root = api_root;
        }
        if let Ok(raw) = env::var("INMOSTORE_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                Error::EnvError(format!("INMOSTORE_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.has_api_key() { REDACTED_KEY } else { "" };
        f.debug_struct("ClientConfig")
            .field("api_root", &self.api_root)
            .field("api_id", &self.api_id)
            .field("api_key", &api_key)
            .field("key_policy", &self.key_policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Lifecycle of a [`Client`] with respect to the version handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// `init()` has not completed yet
    Uninitialized,
    /// The handshake succeeded and the server version is known
    Ready,
    /// The handshake failed; it is not retried
    Failed,
}

/// InmoStore website API client
///
/// Clones share the transport and the handshake outcome.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    root: Url,
    transport: Arc<dyn Transport>,
    handshake: Arc<OnceCell<Result<String>>>,
}

impl Client {
    /// Create a new InmoStore client using the default `reqwest` transport
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)
            .map_err(|e| Error::InvalidConfig(format!("could not build HTTP client: {e}")))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a new InmoStore client issuing requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        if config.api_root.trim().is_empty() {
            return Err(Error::MissingConfig("api_root".to_string()));
        }
        if config.key_policy == KeyPolicy::FailFast && !config.has_api_key() {
            return Err(Error::MissingConfig("api_key".to_string()));
        }

        let root = parse_root(&config.api_root)?;

        Ok(Self {
            config,
            root,
            transport,
            handshake: Arc::new(OnceCell::new()),
        })
    }

    /// Create a new InmoStore client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::new(config)
    }

    /// API id from the configuration
    pub fn api_id(&self) -> &str {
        &self.config.api_id
    }

    /// Current handshake state
    pub fn state(&self) -> ClientState {
        match self.handshake.get() {
            None => ClientState::Uninitialized,
            Some(Ok(_)) => ClientState::Ready,
            Some(Err(_)) => ClientState::Failed,
        }
    }

    /// Server version obtained by [`init`](Self::init); `None` unless Ready
    pub fn current_version(&self) -> Option<&str> {
        match self.handshake.get() {
            Some(Ok(version)) => Some(version.as_str()),
            _ => None,
        }
    }

    /// Value for an HTML `generator` meta tag, once Ready
    pub fn generator_tag(&self) -> Option<String> {
        self.current_version()
            .map(|version| format!("InmoStore by Portal Services v.{version}"))
    }

    /// Full request URL for `endpoint`, with the API key as the last segment
    ///
    /// Segments are percent-encoded, so `/`, `?` and `#` inside a value stay in
    /// their slot. Segments that are exactly `.` or `..` are dropped by URL path
    /// normalization and the following segments shift left.
    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.root.clone();
        // The root was checked to be a base URL at construction.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(endpoint.segments())
                .push(&self.config.api_key);
        }
        url
    }

    /// Validate the API key and probe the server version
    ///
    /// Only the first call performs the probe; concurrent callers wait for it
    /// and later calls return the stored outcome. On success the client is
    /// [`Ready`](ClientState::Ready) and the version is returned. An empty key
    /// fails with [`Error::MissingConfig`] without any request; a transport
    /// failure, a non-success status or a body without `Resultado` fails with
    /// [`Error::Connectivity`]. Either failure leaves the client
    /// [`Failed`](ClientState::Failed).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use inmostore_client::{Client, ClientConfig};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::new(ClientConfig::new("site-id", "site-key"))?;
    /// let version = client.init().await?;
    /// println!("Connected, version {}", version);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn init(&self) -> Result<&str> {
        let outcome = self
            .handshake
            .get_or_init(|| async {
                let outcome = self.probe_version().await;
                match &outcome {
                    Ok(version) => info!(version = %version, "connected to InmoStore API"),
                    Err(err) => warn!(error = %err, "InmoStore API handshake failed"),
                }
                outcome
            })
            .await;

        outcome.as_deref().map_err(Clone::clone)
    }

    async fn probe_version(&self) -> Result<String> {
        if !self.config.has_api_key() {
            return Err(Error::MissingConfig("api_key".to_string()));
        }

        let endpoint = Endpoint::version();
        let url = self.url_for(&endpoint);
        debug!(endpoint = %endpoint, "probing API version");

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| Error::Connectivity {
                status: None,
                cause: e.to_string(),
                source: Some(e),
            })?;

        if !response.is_success() {
            return Err(Error::Connectivity {
                status: Some(response.status),
                cause: format!("version probe returned HTTP {}", response.status),
                source: None,
            });
        }

        let parsed: VersionResponse =
            serde_json::from_str(&response.body).map_err(|e| Error::Connectivity {
                status: Some(response.status),
                cause: format!("malformed version response: {e}"),
                source: None,
            })?;

        Ok(parsed.resultado)
    }

    async fn fetch_body(&self, endpoint: &Endpoint) -> Result<String> {
        let url = self.url_for(endpoint);
        debug!(operation = endpoint.operation(), endpoint = %endpoint, "sending request");

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|source| Error::RequestError {
                operation: endpoint.operation(),
                endpoint: endpoint.to_string(),
                source,
            })?;

        debug!(
            operation = endpoint.operation(),
            status = response.status,
            "received response"
        );

        if !response.is_success() {
            return Err(Error::ApiError {
                operation: endpoint.operation(),
                endpoint: endpoint.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let body = self.fetch_body(&endpoint).await?;
        let parsed = serde_json::from_str::<T>(&body);

        parsed.map_err(|e| Error::InvalidResponse {
            operation: endpoint.operation(),
            endpoint: endpoint.to_string(),
            message: e.to_string(),
            body,
        })
    }

    /// Get an element by its ID
    pub async fn get_elemento(&self, id: i32) -> Result<SingleResult<Elemento>> {
        self.fetch(Endpoint::get_elemento(id)).await
    }

    /// Get a company; the payload is returned as raw JSON
    pub async fn get_empresa(&self, id: Uuid) -> Result<SingleResult<Value>> {
        self.fetch(Endpoint::get_empresa(id)).await
    }

    /// List the active scenes of a listing or project
    ///
    /// # Arguments
    ///
    /// * `empresa_id` - Company owning the scenes
    /// * `modo` - Context code, usually a [`Modo`]
    /// * `object_id` - Listing or project the scenes belong to
    pub async fn list_escenas(
        &self,
        empresa_id: Uuid,
        modo: impl Into<i32>,
        object_id: Uuid,
    ) -> Result<ListResult<Escena>> {
        self.fetch(Endpoint::list_escenas(empresa_id, modo.into(), object_id)).await
    }

    /// List the hotspots of a scene
    pub async fn list_escena_pins(&self, escena_id: Uuid) -> Result<ListResult<EscenaPin>> {
        self.fetch(Endpoint::list_escena_pins(escena_id)).await
    }

    /// URL for embedding an image elsewhere
    ///
    /// Performs no request and works in every [`ClientState`].
    pub fn get_embedded_image_url(&self, image_id: Uuid) -> String {
        self.url_for(&Endpoint::embedded_image(image_id)).to_string()
    }

    /// List the images of a listing or project
    pub async fn list_imagenes(
        &self,
        modo: impl Into<i32>,
        object_id: Uuid,
    ) -> Result<ListResult<Imagen>> {
        self.fetch(Endpoint::list_imagenes(modo.into(), object_id)).await
    }

    /// Get the cover image of a listing
    pub async fn get_imagen_portada(&self, inmueble_id: Uuid) -> Result<SingleResult<Imagen>> {
        self.fetch(Endpoint::get_imagen_portada(inmueble_id)).await
    }

    /// Get a listing by its ID
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use inmostore_client::{Client, ClientConfig};
    /// # use uuid::Uuid;
    /// # async fn example(client: Client, id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
    /// let result = client.get_inmueble(id).await?;
    /// if let Some(inmueble) = result.resultado {
    ///     println!("{:?}: {} rooms", inmueble.titulo, inmueble.habitaciones);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_inmueble(&self, inmueble_id: Uuid) -> Result<SingleResult<Inmueble>> {
        self.fetch(Endpoint::get_inmueble(inmueble_id)).await
    }

    /// List a company's listings filtered by type, operation and city
    ///
    /// The codes are passed through unchecked; the server decides which are valid.
    pub async fn list_inmuebles_by(
        &self,
        empresa_id: Uuid,
        tipo_inmueble: i32,
        tipo_operacion: i32,
        ciudad: i32,
    ) -> Result<ListResult<Inmueble>> {
        self.fetch(Endpoint::list_inmuebles_by(
            empresa_id,
            tipo_inmueble,
            tipo_operacion,
            ciudad,
        ))
        .await
    }

    /// Property types used by a company, as selection-list entries
    pub async fn list_tipos_inmueble(&self, empresa_id: Uuid) -> Result<ListResult<ComboItem>> {
        self.fetch(Endpoint::list_tipos_inmueble(empresa_id)).await
    }

    /// Operation types (sale, rent, ...) used by a company
    pub async fn list_tipos_operacion(&self, empresa_id: Uuid) -> Result<ListResult<ComboItem>> {
        self.fetch(Endpoint::list_tipos_operacion(empresa_id)).await
    }

    /// Cities where a company has listings
    pub async fn list_ciudades(&self, empresa_id: Uuid) -> Result<ListResult<ComboItem>> {
        self.fetch(Endpoint::list_ciudades(empresa_id)).await
    }

    /// Listings featured on a company's home page
    pub async fn list_inmuebles_portada(&self, empresa_id: Uuid) -> Result<ListResult<Inmueble>> {
        self.fetch(Endpoint::list_inmuebles_portada(empresa_id)).await
    }

    /// Most recent listings of a company
    pub async fn list_inmuebles_recientes(&self, empresa_id: Uuid) -> Result<ListResult<Inmueble>> {
        self.fetch(Endpoint::list_inmuebles_recientes(empresa_id)).await
    }

    /// Get the amenities of a listing
    pub async fn get_inmueble_caracteristicas(
        &self,
        inmueble_id: Uuid,
    ) -> Result<SingleResult<CaracteristicasInmueble>> {
        self.fetch(Endpoint::get_inmueble_caracteristicas(inmueble_id)).await
    }

    /// List the free-form properties of a listing
    pub async fn list_propiedades_inmueble(
        &self,
        inmueble_id: Uuid,
        tipo_propiedad: i32,
    ) -> Result<ListResult<PropiedadInmueble>> {
        self.fetch(Endpoint::list_propiedades_inmueble(inmueble_id, tipo_propiedad)).await
    }

    /// Get a project by its ID
    pub async fn get_proyecto(&self, proyecto_id: Uuid) -> Result<SingleResult<Proyecto>> {
        self.fetch(Endpoint::get_proyecto(proyecto_id)).await
    }

    /// List the active projects of a company
    pub async fn list_proyectos(&self, empresa_id: Uuid) -> Result<ListResult<Proyecto>> {
        self.fetch(Endpoint::list_proyectos(empresa_id)).await
    }

    /// Resolve the project served from `subdomain`
    ///
    /// The server answers with a bare UUID, either as a JSON string or as plain text.
    pub async fn get_proyecto_id_by_subdomain(&self, subdomain: &str) -> Result<Uuid> {
        let endpoint = Endpoint::get_proyecto_id_by_subdomain(subdomain);
        let body = self.fetch_body(&endpoint).await?;

        match parse_uuid_body(&body) {
            Some(id) => Ok(id),
            None => Err(Error::InvalidResponse {
                operation: endpoint.operation(),
                endpoint: endpoint.to_string(),
                message: "expected a project UUID".to_string(),
                body,
            }),
        }
    }

    /// Get a unit model by its ID
    pub async fn get_proyecto_modelo(&self, modelo_id: Uuid) -> Result<SingleResult<Modelo>> {
        self.fetch(Endpoint::get_proyecto_modelo(modelo_id)).await
    }

    /// List the active unit models of a project
    pub async fn list_proyecto_modelos(&self, proyecto_id: Uuid) -> Result<ListResult<Modelo>> {
        self.fetch(Endpoint::list_proyecto_modelos(proyecto_id)).await
    }

    /// Get a company setting by key
    pub async fn get_setting(&self, empresa_id: Uuid, clave: &str) -> Result<SingleResult<String>> {
        self.fetch(Endpoint::get_setting(empresa_id, clave)).await
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("version", &self.current_version())
            .finish_non_exhaustive()
    }
}

fn parse_root(api_root: &str) -> Result<Url> {
    let mut root = Url::parse(api_root.trim())
        .map_err(|e| Error::InvalidConfig(format!("api_root `{api_root}`: {e}")))?;
    if root.cannot_be_a_base() {
        return Err(Error::InvalidConfig(format!(
            "api_root `{api_root}` is not a base URL"
        )));
    }
    root.set_query(None);
    root.set_fragment(None);
    Ok(root)
}

fn parse_uuid_body(body: &str) -> Option<Uuid> {
    let trimmed = body.trim();
    if let Ok(id) = serde_json::from_str::<Uuid>(trimmed) {
        return Some(id);
    }
    Uuid::parse_str(trimmed.trim_matches('"')).ok()
}
