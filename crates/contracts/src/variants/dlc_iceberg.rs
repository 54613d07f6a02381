//! Iceberg on a managed data-lake catalog

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const CATALOG_URI: FieldSpec = FieldSpec::required("catalogUri", FieldKind::Text, FieldFormat::Uri);
const WAREHOUSE: FieldSpec = FieldSpec::required("warehouse", FieldKind::Text, FieldFormat::Uri);
const DB_NAME: FieldSpec = FieldSpec::required("dbName", FieldKind::Text, FieldFormat::Identifier);
const TABLE_NAME: FieldSpec =
    FieldSpec::required("tableName", FieldKind::Text, FieldFormat::Identifier);
const PRIMARY_KEY: FieldSpec =
    FieldSpec::optional("primaryKey", FieldKind::Text, FieldFormat::ColumnList);

const FIELDS: &[FieldSpec] = &[CATALOG_URI, WAREHOUSE, DB_NAME, TABLE_NAME, PRIMARY_KEY];

/// Request of a DLC Iceberg sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DlcIcebergSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    /// Catalog service endpoint (e.g. `thrift://host:9083`)
    pub catalog_uri: String,

    /// Warehouse root location
    pub warehouse: String,

    /// Target database
    pub db_name: String,

    /// Target table
    pub table_name: String,

    /// Comma-separated primary-key columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
}

impl DlcIcebergSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        CATALOG_URI.check_text(Some(&self.catalog_uri))?;
        WAREHOUSE.check_text(Some(&self.warehouse))?;
        DB_NAME.check_text(Some(&self.db_name))?;
        TABLE_NAME.check_text(Some(&self.table_name))?;
        PRIMARY_KEY.check_text(self.primary_key.as_deref())?;
        Ok(())
    }

    /// Primary-key columns, trimmed
    pub fn primary_key_columns(&self) -> Vec<&str> {
        super::split_columns(self.primary_key.as_deref())
    }
}

impl SinkVariant for DlcIcebergSinkRequest {
    const SINK_TYPE: SinkType = SinkType::DlcIceberg;
    const LABEL: &'static str = "DLC Iceberg";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<DlcIcebergSinkRequest> for SinkRequest {
    fn from(request: DlcIcebergSinkRequest) -> Self {
        SinkRequest::DlcIceberg(request)
    }
}

impl_sink_contract!(DlcIcebergSinkRequest);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SinkRequestContract;

    fn sample() -> DlcIcebergSinkRequest {
        DlcIcebergSinkRequest {
            base: SinkRequestBase::new("g1", "s1", "dlc_sink"),
            catalog_uri: "thrift://host:9083".into(),
            warehouse: "s3://bucket/wh".into(),
            db_name: "db1".into(),
            table_name: "t1".into(),
            primary_key: None,
        }
    }

    #[test]
    fn test_valid_request() {
        let request = sample();
        assert!(request.validate().is_ok());
        assert_eq!(request.discriminator(), SinkType::DlcIceberg);
        assert_eq!(request.identity(), "dlc_sink");
        assert!(request.primary_key_columns().is_empty());
    }

    #[test]
    fn test_blank_db_name() {
        let mut request = sample();
        request.db_name = "  ".into();
        let err = request.validate().unwrap_err();
        assert!(matches!(err, SinkError::MissingRequiredField { ref field } if field == "dbName"));
    }

    #[test]
    fn test_invalid_catalog_uri() {
        let mut request = sample();
        request.catalog_uri = "host-without-scheme".into();
        let err = request.validate().unwrap_err();
        assert!(
            matches!(err, SinkError::InvalidFieldFormat { ref field, .. } if field == "catalogUri")
        );
    }

    #[test]
    fn test_primary_key_columns() {
        let mut request = sample();
        request.primary_key = Some("id, tenant_id".into());
        assert!(request.validate().is_ok());
        assert_eq!(request.primary_key_columns(), vec!["id", "tenant_id"]);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["catalogUri"], "thrift://host:9083");
        assert_eq!(json["dbName"], "db1");
        assert_eq!(json["sinkName"], "dlc_sink");
        assert!(json.get("primaryKey").is_none());
    }
}
