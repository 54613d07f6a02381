//! Hive table

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const JDBC_URL: FieldSpec = FieldSpec::required("jdbcUrl", FieldKind::Text, FieldFormat::Uri);
const DB_NAME: FieldSpec = FieldSpec::required("dbName", FieldKind::Text, FieldFormat::Identifier);
const TABLE_NAME: FieldSpec =
    FieldSpec::required("tableName", FieldKind::Text, FieldFormat::Identifier);
const DATA_PATH: FieldSpec = FieldSpec::optional("dataPath", FieldKind::Text, FieldFormat::Uri);
const FILE_FORMAT: FieldSpec = FieldSpec::optional(
    "fileFormat",
    FieldKind::Text,
    FieldFormat::OneOf(&["TEXTFILE", "ORCFILE", "PARQUET", "SEQUENCEFILE"]),
);
const USERNAME: FieldSpec = FieldSpec::optional("username", FieldKind::Text, FieldFormat::Any);
const PASSWORD: FieldSpec = FieldSpec::optional("password", FieldKind::Text, FieldFormat::Any);

const FIELDS: &[FieldSpec] = &[
    JDBC_URL,
    DB_NAME,
    TABLE_NAME,
    DATA_PATH,
    FILE_FORMAT,
    USERNAME,
    PASSWORD,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HiveFileFormat {
    #[default]
    Textfile,
    Orcfile,
    Parquet,
    Sequencefile,
}

/// Request of a Hive sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiveSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    /// HiveServer2 JDBC URL
    pub jdbc_url: String,

    pub db_name: String,

    pub table_name: String,

    /// Table location override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,

    #[serde(default)]
    pub file_format: HiveFileFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl HiveSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        JDBC_URL.check_text(Some(&self.jdbc_url))?;
        DB_NAME.check_text(Some(&self.db_name))?;
        TABLE_NAME.check_text(Some(&self.table_name))?;
        DATA_PATH.check_text(self.data_path.as_deref())?;

        if super::is_set(self.password.as_deref()) && !super::is_set(self.username.as_deref()) {
            return Err(SinkError::missing_field(USERNAME.name));
        }
        Ok(())
    }
}

impl SinkVariant for HiveSinkRequest {
    const SINK_TYPE: SinkType = SinkType::Hive;
    const LABEL: &'static str = "Hive";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<HiveSinkRequest> for SinkRequest {
    fn from(request: HiveSinkRequest) -> Self {
        SinkRequest::Hive(request)
    }
}

impl_sink_contract!(HiveSinkRequest);
