//! Iceberg behind a Hive or Hadoop catalog

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const CATALOG_TYPE: FieldSpec = FieldSpec::optional(
    "catalogType",
    FieldKind::Text,
    FieldFormat::OneOf(&["HIVE", "HADOOP"]),
);
const CATALOG_URI: FieldSpec = FieldSpec::optional("catalogUri", FieldKind::Text, FieldFormat::Uri);
const WAREHOUSE: FieldSpec = FieldSpec::required("warehouse", FieldKind::Text, FieldFormat::Uri);
const DB_NAME: FieldSpec = FieldSpec::required("dbName", FieldKind::Text, FieldFormat::Identifier);
const TABLE_NAME: FieldSpec =
    FieldSpec::required("tableName", FieldKind::Text, FieldFormat::Identifier);
const FILE_FORMAT: FieldSpec = FieldSpec::optional(
    "fileFormat",
    FieldKind::Text,
    FieldFormat::OneOf(&["PARQUET", "ORC", "AVRO"]),
);
const PRIMARY_KEY: FieldSpec =
    FieldSpec::optional("primaryKey", FieldKind::Text, FieldFormat::ColumnList);

const FIELDS: &[FieldSpec] = &[
    CATALOG_TYPE,
    CATALOG_URI,
    WAREHOUSE,
    DB_NAME,
    TABLE_NAME,
    FILE_FORMAT,
    PRIMARY_KEY,
];

/// Catalog implementation backing the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CatalogType {
    #[default]
    Hive,
    Hadoop,
}

/// Data file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IcebergFileFormat {
    Parquet,
    Orc,
    Avro,
}

/// Request of an Iceberg sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcebergSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    #[serde(default)]
    pub catalog_type: CatalogType,

    /// Metastore endpoint; required for the Hive catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_uri: Option<String>,

    pub warehouse: String,

    pub db_name: String,

    pub table_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_format: Option<IcebergFileFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

impl IcebergSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        CATALOG_URI.check_text(self.catalog_uri.as_deref())?;
        WAREHOUSE.check_text(Some(&self.warehouse))?;
        DB_NAME.check_text(Some(&self.db_name))?;
        TABLE_NAME.check_text(Some(&self.table_name))?;
        PRIMARY_KEY.check_text(self.primary_key.as_deref())?;

        let has_uri = self
            .catalog_uri
            .as_deref()
            .is_some_and(|uri| !uri.trim().is_empty());
        if self.catalog_type == CatalogType::Hive && !has_uri {
            return Err(SinkError::missing_field(CATALOG_URI.name));
        }
        Ok(())
    }

    pub fn primary_key_columns(&self) -> Vec<&str> {
        super::split_columns(self.primary_key.as_deref())
    }
}

impl SinkVariant for IcebergSinkRequest {
    const SINK_TYPE: SinkType = SinkType::Iceberg;
    const LABEL: &'static str = "Iceberg";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<IcebergSinkRequest> for SinkRequest {
    fn from(request: IcebergSinkRequest) -> Self {
        SinkRequest::Iceberg(request)
    }
}

impl_sink_contract!(IcebergSinkRequest);
