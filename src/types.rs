//! Types used by the InmoStore client
//!
//! All records are read-only snapshots of server state. Field names follow
//! the wire names of the API (camelCase, Spanish). Numeric, boolean, UUID and
//! timestamp fields are required: a response that omits one, or sends `null`,
//! fails to deserialize instead of being filled with a zero value. Free-text
//! fields are optional because the server sends `null` for unset text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operation envelope embedded in most responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operacion {
    /// Operation result code
    pub codigo: i32,

    /// ID of the item created by the operation, if any
    pub new_item_id: Option<Uuid>,

    /// Number of rows affected by the operation
    pub affected_rows: i32,

    /// Operation message
    pub mensaje: Option<String>,

    /// Operation detail
    pub detalle: Option<String>,
}

/// Response shape for operations returning a single entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleResult<T> {
    /// Operation envelope
    #[serde(rename = "Operacion")]
    pub operacion: Operacion,

    /// Requested entity; `None` when the server sends `null`, in which case
    /// `operacion` carries the reason
    pub resultado: Option<T>,
}

/// Response shape for operations returning a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    /// Operation envelope
    #[serde(rename = "Operacion")]
    pub operacion: Operacion,

    /// Returned entities
    pub items: Vec<T>,
}

/// Body of the version probe
#[derive(Debug, Deserialize)]
pub(crate) struct VersionResponse {
    #[serde(rename = "Resultado")]
    pub resultado: String,
}

/// Context an image or scene belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modo {
    /// Standalone property listing
    Inmueble,
    /// Development project
    Proyecto,
}

impl Modo {
    /// Integer code used on the wire
    pub fn code(self) -> i32 {
        match self {
            Modo::Inmueble => 0,
            Modo::Proyecto => 1,
        }
    }
}

impl From<Modo> for i32 {
    fn from(modo: Modo) -> Self {
        modo.code()
    }
}

/// Catalog element (configurable value with a parent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elemento {
    pub elemento_id: i32,

    /// ID of the parent element
    pub padre: i32,

    pub nombre: Option<String>,

    /// Tooltip text; the API spells this field `tooltiop`
    #[serde(rename = "tooltiop")]
    pub tooltip: Option<String>,

    pub valor: Option<String>,
    pub default_value: Option<String>,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Panoramic scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escena {
    pub escena_id: Uuid,
    pub empresa_id: Uuid,

    /// Scene context code (see [`Modo`])
    pub modo: i32,

    /// ID of the listing or project the scene belongs to
    pub objecto: Uuid,

    pub titulo: Option<String>,

    /// Whether this is the main scene of its object
    pub principal: bool,

    pub image_url: Option<String>,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Interactive hotspot inside a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscenaPin {
    pub pin_id: Uuid,
    pub empresa_id: Uuid,
    pub escena_id: Uuid,

    /// Label shown on the pin
    pub etiqueta: Option<String>,
    pub pitch: Option<String>,
    pub yaw: Option<String>,

    /// Scene the hotspot points to
    pub target: Uuid,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Media asset tied to a listing or project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Imagen {
    pub image_id: Uuid,
    pub empresa_id: Uuid,

    /// Image context code (see [`Modo`])
    pub modo: i32,

    pub object_id: Uuid,

    pub titulo: Option<String>,
    pub image_caption: Option<String>,
    pub image_url: Option<String>,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inmueble {
    pub inmueble_id: Uuid,
    pub empresa_id: Uuid,

    /// Property type code (house, apartment, ...)
    pub tipo_inmueble: i32,

    /// Operation type code (sale, rent, ...)
    pub tipo_operacion: i32,

    /// Internal listing code
    pub codigo: Option<String>,
    pub titulo: Option<String>,
    pub encabezado: Option<String>,
    pub contenido: Option<String>,
    pub habitaciones: i32,
    pub banios: i32,

    /// Land area
    pub terreno: f64,

    /// Built area
    pub construccion: f64,

    /// Currency code of the price
    pub precio_moneda: i32,
    pub precio: f64,
    pub precio_tipo: i32,

    pub pais: i32,
    pub estado: i32,
    pub municipio: i32,
    pub ciudad: i32,

    pub direccion: Option<String>,
    pub referencia: Option<String>,
    pub google_maps_script: Option<String>,
    pub show_direccion_db: i32,
    pub show_mapa_db: i32,
    pub show_direccion: bool,
    pub show_mapa: bool,

    /// 0: inactive, 1: active
    pub status: i32,

    pub status_descr: Option<String>,
}

/// Text/value pair used to fill selection lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboItem {
    pub texto: Option<String>,
    pub valor: Option<String>,
}

/// Amenities and features of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaracteristicasInmueble {
    pub caracteristica_id: Uuid,
    pub empresa_id: Uuid,
    pub inmueble_id: Uuid,
    pub nueva_construccion: bool,
    pub portada: bool,
    pub amoblado: bool,
    pub cocina_empotrada: bool,
    pub aire_acondicionado: bool,
    pub piscina: bool,
    pub area_social: bool,
    pub area_deportiva: bool,
    pub vigilancia: bool,
    pub ascensor: bool,
    pub camaras: bool,
    pub telefono: bool,
    pub internet: bool,
    pub cerco_electrico: bool,
    pub porton_electrico: bool,
    pub asegurado: bool,
    pub financiamiento: bool,
    pub comercial: bool,
    pub residencial: bool,
    pub patio_delantero: bool,
    pub patio_trasero: bool,
    pub calentador: bool,
    pub balcon: bool,
    pub sotano: bool,
    pub armarios: bool,
    pub puestos_estacionamiento: i32,
    pub antiguedad: i32,
    pub pisos: i32,
    pub tipo_piso: i32,
    pub tipo_techo: i32,
    pub estado_actual: i32,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Free-form property attached to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropiedadInmueble {
    pub property_id: Uuid,
    pub empresa_id: Uuid,
    pub inmueble_id: Uuid,
    pub tipo_propiedad: i32,
    pub coleccion_elemento_id: i32,

    pub property: Option<String>,

    /// 0: inactive, 1: active
    pub status: i32,

    /// User that created the record
    pub creado: Uuid,

    #[serde(with = "wire_datetime")]
    pub creado_fecha: DateTime<Utc>,

    /// User that last modified the record
    pub modificado: Uuid,

    #[serde(with = "wire_datetime")]
    pub modificado_fecha: DateTime<Utc>,
}

/// Real-estate development project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proyecto {
    pub proyecto_id: Uuid,
    pub empresa_id: Uuid,

    pub nombre_proyecto: Option<String>,

    pub pais: i32,
    pub estado: i32,
    pub municipio: i32,
    pub ciudad: i32,

    pub direccion: Option<String>,
    pub referencia: Option<String>,
    pub google_maps_script: Option<String>,

    /// Subdomain the project website is served from
    pub subdominio: Option<String>,

    pub website_online: bool,

    /// 0: inactive, 1: active
    pub status: i32,

    pub creado: Uuid,

    #[serde(with = "wire_datetime")]
    pub creado_fecha: DateTime<Utc>,

    pub modificado: Uuid,

    #[serde(with = "wire_datetime")]
    pub modificado_fecha: DateTime<Utc>,
}

/// Unit template within a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modelo {
    pub modelo_id: Uuid,
    pub empresa_id: Uuid,
    pub proyecto_id: Uuid,

    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub nivel1: Option<String>,
    pub nivel2: Option<String>,
    pub nivel3: Option<String>,
    pub nivel4: Option<String>,
    pub nivel5: Option<String>,

    /// 0: inactive, 1: active
    pub status: i32,
}

/// Timestamps as sent by the API.
///
/// The server emits ISO-8601 without an offset; those are read as UTC.
/// RFC 3339 values with an explicit offset are accepted too.
mod wire_datetime {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
