use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::error::CouchDaoError;
use crate::{
    dao::models::GarmentEntity,
    outfit::{Category, Rgb},
};

pub const GARMENT_PREFIX: &str = "garment::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

/// Garment as stored in CouchDB, keyed `garment::<uuid>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchGarmentDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub garment: GarmentBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentBody {
    pub category: Category,
    #[serde(default)]
    pub dominant_color: Option<Rgb>,
    #[serde(default)]
    pub palette: Vec<Rgb>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub image_ref: Option<String>,
    pub added_at: SystemTime,
}

impl From<(GarmentEntity, Option<String>)> for CouchGarmentDocument {
    fn from((garment, rev): (GarmentEntity, Option<String>)) -> Self {
        Self {
            id: garment_doc_id(garment.id),
            rev,
            garment: GarmentBody {
                category: garment.category,
                dominant_color: garment.dominant_color,
                palette: garment.palette,
                label: garment.label,
                image_ref: garment.image_ref,
                added_at: garment.added_at,
            },
        }
    }
}

impl TryFrom<CouchGarmentDocument> for GarmentEntity {
    type Error = CouchDaoError;

    fn try_from(doc: CouchGarmentDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: extract_uuid(&doc.id)?,
            category: doc.garment.category,
            dominant_color: doc.garment.dominant_color,
            palette: doc.garment.palette,
            label: doc.garment.label,
            image_ref: doc.garment.image_ref,
            added_at: doc.garment.added_at,
        })
    }
}

pub fn garment_doc_id(id: Uuid) -> String {
    format!("{}{}", GARMENT_PREFIX, id)
}

pub fn extract_uuid(doc_id: &str) -> Result<Uuid, CouchDaoError> {
    let id = doc_id
        .strip_prefix(GARMENT_PREFIX)
        .ok_or_else(|| CouchDaoError::InvalidDocId {
            doc_id: doc_id.to_string(),
            kind: "missing garment prefix",
        })?;

    Uuid::parse_str(id).map_err(|_| CouchDaoError::InvalidDocId {
        doc_id: doc_id.to_string(),
        kind: "invalid UUID",
    })
}
