//! Elasticsearch index

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const HOSTS: FieldSpec = FieldSpec::required("hosts", FieldKind::Text, FieldFormat::UriList);
const INDEX_NAME: FieldSpec =
    FieldSpec::required("indexName", FieldKind::Text, FieldFormat::IndexName);
const DOCUMENT_TYPE: FieldSpec =
    FieldSpec::optional("documentType", FieldKind::Text, FieldFormat::Any);
const USERNAME: FieldSpec = FieldSpec::optional("username", FieldKind::Text, FieldFormat::Any);
const PASSWORD: FieldSpec = FieldSpec::optional("password", FieldKind::Text, FieldFormat::Any);

const FIELDS: &[FieldSpec] = &[HOSTS, INDEX_NAME, DOCUMENT_TYPE, USERNAME, PASSWORD];

/// Request of an Elasticsearch sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElasticsearchSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    /// Comma-separated node URLs
    pub hosts: String,

    pub index_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ElasticsearchSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        HOSTS.check_text(Some(&self.hosts))?;
        INDEX_NAME.check_text(Some(&self.index_name))?;

        if super::is_set(self.username.as_deref()) && !super::is_set(self.password.as_deref()) {
            return Err(SinkError::missing_field(PASSWORD.name));
        }
        Ok(())
    }
}

impl SinkVariant for ElasticsearchSinkRequest {
    const SINK_TYPE: SinkType = SinkType::Elasticsearch;
    const LABEL: &'static str = "Elasticsearch";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<ElasticsearchSinkRequest> for SinkRequest {
    fn from(request: ElasticsearchSinkRequest) -> Self {
        SinkRequest::Elasticsearch(request)
    }
}

impl_sink_contract!(ElasticsearchSinkRequest);
