//! Catalog of InmoStore API endpoints
//!
//! Every remote operation is a `GET` on `{root}{resource}/{verb}/{args...}/{apiKey}`.
//! An [`Endpoint`] captures everything but the root and the key: the
//! operation name (used in errors and logs) and the ordered path segments.
//! [`Client::url_for`](crate::Client::url_for) joins it with the configured
//! root and appends the key as the final segment.

use std::fmt;
use uuid::Uuid;

/// Placeholder written instead of the API key in logs and error messages
pub const REDACTED_KEY: &str = "***";

/// One remote operation with its path arguments bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    operation: &'static str,
    segments: Vec<String>,
}

impl Endpoint {
    fn new(operation: &'static str, resource: &str, verb: &str) -> Self {
        Self {
            operation,
            segments: vec![resource.to_string(), verb.to_string()],
        }
    }

    fn arg(mut self, value: impl fmt::Display) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Operation name, e.g. `getInmueble`
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Path segments in request order, without the API key
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path relative to the API root with `api_key` as the last segment.
    ///
    /// Segments are joined verbatim. [`Client::url_for`](crate::Client::url_for)
    /// percent-encodes them and drops segments that are exactly `.` or `..`,
    /// so for such values the two differ.
    pub fn path(&self, api_key: &str) -> String {
        let mut path = self.segments.join("/");
        path.push('/');
        path.push_str(api_key);
        path
    }

    /// Version probe used by the client handshake
    pub fn version() -> Self {
        Self::new("version", "sys", "version")
    }

    /// `elementos/get/{id}`
    pub fn get_elemento(id: i32) -> Self {
        Self::new("getElemento", "elementos", "get").arg(id)
    }

    /// `empresas/get/{id}`
    pub fn get_empresa(id: Uuid) -> Self {
        Self::new("getEmpresa", "empresas", "get").arg(id)
    }

    /// `escenas/active/{empresaId}/{modo}/{objectId}`
    pub fn list_escenas(empresa_id: Uuid, modo: i32, object_id: Uuid) -> Self {
        Self::new("listEscenas", "escenas", "active")
            .arg(empresa_id)
            .arg(modo)
            .arg(object_id)
    }

    /// `pins/list/{escenaId}`
    pub fn list_escena_pins(escena_id: Uuid) -> Self {
        Self::new("listEscenaPins", "pins", "list").arg(escena_id)
    }

    /// `imagenes/list/{modo}/{objectId}`
    pub fn list_imagenes(modo: i32, object_id: Uuid) -> Self {
        Self::new("listImagenes", "imagenes", "list")
            .arg(modo)
            .arg(object_id)
    }

    /// `imagenes/portada/{inmuebleId}`
    pub fn get_imagen_portada(inmueble_id: Uuid) -> Self {
        Self::new("getImagenPortada", "imagenes", "portada").arg(inmueble_id)
    }

    /// `inmuebles/get/{inmuebleId}`
    pub fn get_inmueble(inmueble_id: Uuid) -> Self {
        Self::new("getInmueble", "inmuebles", "get").arg(inmueble_id)
    }

    /// `inmuebles/listweb/{empresaId}/{tipoInmueble}/{tipoOperacion}/{ciudad}`
    pub fn list_inmuebles_by(
        empresa_id: Uuid,
        tipo_inmueble: i32,
        tipo_operacion: i32,
        ciudad: i32,
    ) -> Self {
        Self::new("listInmueblesBy", "inmuebles", "listweb")
            .arg(empresa_id)
            .arg(tipo_inmueble)
            .arg(tipo_operacion)
            .arg(ciudad)
    }

    /// `inmuebles/tiposInmueble/{empresaId}`
    pub fn list_tipos_inmueble(empresa_id: Uuid) -> Self {
        Self::new("listTiposInmueble", "inmuebles", "tiposInmueble").arg(empresa_id)
    }

    /// `inmuebles/tiposOperacion/{empresaId}`
    pub fn list_tipos_operacion(empresa_id: Uuid) -> Self {
        Self::new("listTiposOperacion", "inmuebles", "tiposOperacion").arg(empresa_id)
    }

    /// `inmuebles/ciudades/{empresaId}`
    pub fn list_ciudades(empresa_id: Uuid) -> Self {
        Self::new("listCiudades", "inmuebles", "ciudades").arg(empresa_id)
    }

    /// `inmuebles/portada/{empresaId}`
    pub fn list_inmuebles_portada(empresa_id: Uuid) -> Self {
        Self::new("listInmueblesPortada", "inmuebles", "portada").arg(empresa_id)
    }

    /// `inmuebles/recientes/{empresaId}`
    pub fn list_inmuebles_recientes(empresa_id: Uuid) -> Self {
        Self::new("listInmueblesRecientes", "inmuebles", "recientes").arg(empresa_id)
    }

    /// `caracteristicas/get/{inmuebleId}`
    pub fn get_inmueble_caracteristicas(inmueble_id: Uuid) -> Self {
        Self::new("getInmuebleCaracteristicas", "caracteristicas", "get").arg(inmueble_id)
    }

    /// `properties/list/{inmuebleId}/{tipoPropiedad}`
    pub fn list_propiedades_inmueble(inmueble_id: Uuid, tipo_propiedad: i32) -> Self {
        Self::new("listPropiedadesInmueble", "properties", "list")
            .arg(inmueble_id)
            .arg(tipo_propiedad)
    }

    /// `proyectos/get/{proyectoId}`
    pub fn get_proyecto(proyecto_id: Uuid) -> Self {
        Self::new("getProyecto", "proyectos", "get").arg(proyecto_id)
    }

    /// `proyectos/active/{empresaId}`
    pub fn list_proyectos(empresa_id: Uuid) -> Self {
        Self::new("listProyectos", "proyectos", "active").arg(empresa_id)
    }

    /// `proyectos/pidsubdir/{subdomain}`
    pub fn get_proyecto_id_by_subdomain(subdomain: &str) -> Self {
        Self::new("getProyectoIdBySubdomain", "proyectos", "pidsubdir").arg(subdomain)
    }

    /// `modelos/get/{modeloId}`
    pub fn get_proyecto_modelo(modelo_id: Uuid) -> Self {
        Self::new("getProyectoModelo", "modelos", "get").arg(modelo_id)
    }

    /// `modelos/active/{proyectoId}`
    pub fn list_proyecto_modelos(proyecto_id: Uuid) -> Self {
        Self::new("listProyectoModelos", "modelos", "active").arg(proyecto_id)
    }

    /// `settings/get/{empresaId}/{clave}`
    pub fn get_setting(empresa_id: Uuid, clave: &str) -> Self {
        Self::new("getSetting", "settings", "get")
            .arg(empresa_id)
            .arg(clave)
    }

    /// Embeddable image URL; never requested by the client itself
    pub fn embedded_image(image_id: Uuid) -> Self {
        Self::new("getEmbeddedImageUrl", "images", "embed").arg(image_id)
    }
}

/// Displays the path with the key redacted, safe for logs and errors
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path(REDACTED_KEY))
    }
}
