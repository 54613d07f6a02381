//! # Integration Tests
//!
//! 跨 crate 集成测试：registry + decoder + contracts。
//!
//! 覆盖：
//! - Registry 解析与注册失败
//! - 全部内置变体的端到端解码
//! - JSON / TOML 持久化形式往返

#[cfg(test)]
mod registry_tests {
    use contracts::{SinkError, SinkType};
    use sink_registry::{builtin_descriptor, builtin_descriptors, SinkTypeRegistry};

    #[test]
    fn test_resolve_returns_registered_descriptor() {
        let registry = SinkTypeRegistry::builtin();
        for descriptor in builtin_descriptors() {
            let resolved = registry.resolve(descriptor.tag()).unwrap();
            assert_eq!(*resolved, descriptor);
        }
    }

    #[test]
    fn test_duplicate_registration_leaves_builder_unchanged() {
        let mut builder = SinkTypeRegistry::builder();
        builder
            .register(builtin_descriptor(SinkType::DlcIceberg))
            .unwrap();

        let err = builder
            .register_all([
                builtin_descriptor(SinkType::Kafka),
                builtin_descriptor(SinkType::DlcIceberg),
            ])
            .unwrap_err();
        assert!(
            matches!(err, SinkError::DuplicateDiscriminator { ref tag } if tag == "DLC_ICEBERG")
        );

        let registry = builder.build();
        assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["DLC_ICEBERG"]);
        assert!(!registry.contains("KAFKA"));
    }
}

#[cfg(test)]
mod decode_tests {
    use contracts::{SinkError, SinkRequest, SinkRequestContract, SinkType};
    use serde_json::{json, Value};
    use sink_decoder::{SinkDecoder, Strictness};
    use sink_registry::SinkTypeRegistry;

    fn base(sink_type: &str, sink_name: &str) -> serde_json::Map<String, Value> {
        let Value::Object(map) = json!({
            "sinkType": sink_type,
            "inlongGroupId": "group_1",
            "inlongStreamId": "stream_1",
            "sinkName": sink_name
        }) else {
            unreachable!()
        };
        map
    }

    fn with(mut map: serde_json::Map<String, Value>, extra: Value) -> Value {
        if let Value::Object(extra) = extra {
            map.extend(extra);
        }
        Value::Object(map)
    }

    fn dlc_iceberg() -> Value {
        with(
            base("DLC_ICEBERG", "dlc_sink"),
            json!({
                "catalogUri": "thrift://host:9083",
                "warehouse": "s3://bucket/wh",
                "dbName": "db1",
                "tableName": "t1"
            }),
        )
    }

    fn all_variants() -> Vec<Value> {
        vec![
            dlc_iceberg(),
            with(
                base("ICEBERG", "iceberg_sink"),
                json!({
                    "catalogType": "HADOOP",
                    "warehouse": "hdfs://nn:8020/warehouse",
                    "dbName": "ods",
                    "tableName": "orders",
                    "fileFormat": "ORC"
                }),
            ),
            with(
                base("KAFKA", "kafka_sink"),
                json!({
                    "bootstrapServers": "k1:9092,k2:9092",
                    "topicName": "orders.v1",
                    "partitionNum": 6
                }),
            ),
            with(
                base("HIVE", "hive_sink"),
                json!({
                    "jdbcUrl": "jdbc:hive2://hive:10000",
                    "dbName": "dw",
                    "tableName": "orders",
                    "fileFormat": "PARQUET"
                }),
            ),
            with(
                base("CLICKHOUSE", "ck_sink"),
                json!({
                    "jdbcUrl": "jdbc:clickhouse://ck:8123",
                    "dbName": "dw",
                    "tableName": "orders",
                    "isDistributed": true,
                    "partitionStrategy": "BALANCE"
                }),
            ),
            with(
                base("ELASTICSEARCH", "es_sink"),
                json!({
                    "hosts": "http://es1:9200,http://es2:9200",
                    "indexName": "orders"
                }),
            ),
        ]
    }

    #[test]
    fn test_dlc_iceberg_without_primary_key() {
        let registry = SinkTypeRegistry::builtin();
        let request = SinkDecoder::new(&registry).decode(dlc_iceberg()).unwrap();

        assert_eq!(request.discriminator(), SinkType::DlcIceberg);
        match request.into_inner() {
            SinkRequest::DlcIceberg(dlc) => {
                assert_eq!(dlc.catalog_uri, "thrift://host:9083");
                assert_eq!(dlc.warehouse, "s3://bucket/wh");
                assert_eq!(dlc.db_name, "db1");
                assert_eq!(dlc.table_name, "t1");
                assert!(dlc.primary_key.is_none());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_dlc_iceberg_db_name_omitted_or_blank() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);

        let mut omitted = dlc_iceberg();
        omitted.as_object_mut().unwrap().remove("dbName");
        let mut blank = dlc_iceberg();
        blank["dbName"] = json!("  ");

        for payload in [omitted, blank] {
            let err = decoder.decode(payload).unwrap_err();
            assert!(
                matches!(err, SinkError::MissingRequiredField { ref field } if field == "dbName"),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_every_builtin_variant_decodes() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);

        let mut seen: Vec<_> = all_variants()
            .into_iter()
            .map(|payload| {
                let tag = payload["sinkType"].as_str().unwrap().to_string();
                let request = decoder
                    .decode(payload)
                    .unwrap_or_else(|e| panic!("{tag} rejected: {e}"));
                assert_eq!(request.discriminator().as_str(), tag);
                request.discriminator()
            })
            .collect();
        seen.sort();
        assert_eq!(seen, SinkType::ALL.to_vec());
    }

    #[test]
    fn test_missing_and_unknown_discriminator() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);

        let mut missing = dlc_iceberg();
        missing.as_object_mut().unwrap().remove("sinkType");
        assert!(matches!(
            decoder.decode(missing).unwrap_err(),
            SinkError::MissingDiscriminator
        ));

        let mut unknown = dlc_iceberg();
        unknown["sinkType"] = json!("REDIS");
        let err = decoder.decode(unknown).unwrap_err();
        assert!(matches!(err, SinkError::UnknownSinkType { ref tag } if tag == "REDIS"));
    }

    #[test]
    fn test_disabled_sink_type_is_unknown() {
        let registry = SinkTypeRegistry::with_sink_types([SinkType::Kafka]).unwrap();
        let err = SinkDecoder::new(&registry)
            .decode(dlc_iceberg())
            .unwrap_err();
        assert!(matches!(err, SinkError::UnknownSinkType { ref tag } if tag == "DLC_ICEBERG"));
    }

    #[test]
    fn test_field_of_another_variant_is_unrecognized() {
        let registry = SinkTypeRegistry::builtin();
        let mut payload = dlc_iceberg();
        payload["topicName"] = json!("orders");

        let err = SinkDecoder::new(&registry)
            .decode(payload.clone())
            .unwrap_err();
        assert_eq!(err.field(), Some("topicName"));

        let lenient = SinkDecoder::new(&registry).with_strictness(Strictness::Ignore);
        assert!(lenient.decode(payload).is_ok());
    }

    #[test]
    fn test_decoding_is_deterministic() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);
        for payload in all_variants() {
            let first = decoder.decode(payload.clone()).unwrap();
            let second = decoder.decode(payload).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_cross_field_rules() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);

        let ck_hash = with(
            base("CLICKHOUSE", "ck_sink"),
            json!({
                "jdbcUrl": "jdbc:clickhouse://ck:8123",
                "dbName": "dw",
                "tableName": "orders",
                "isDistributed": true,
                "partitionStrategy": "HASH"
            }),
        );
        let err = decoder.decode(ck_hash).unwrap_err();
        assert_eq!(err.field(), Some("partitionFields"));

        let es_user_only = with(
            base("ELASTICSEARCH", "es_sink"),
            json!({
                "hosts": "http://es:9200",
                "indexName": "orders",
                "username": "elastic"
            }),
        );
        let err = decoder.decode(es_user_only).unwrap_err();
        assert!(
            matches!(err, SinkError::MissingRequiredField { ref field } if field == "password")
        );
    }

    #[test]
    fn test_concurrent_decoding_shares_registry() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry);

        std::thread::scope(|scope| {
            for payload in all_variants() {
                scope.spawn(move || {
                    assert!(decoder.decode(payload).is_ok());
                });
            }
        });
    }
}

#[cfg(test)]
mod persistence_tests {
    use contracts::SinkRequest;
    use serde_json::json;
    use sink_decoder::{PayloadFormat, SinkConfigLoader, Strictness};
    use sink_registry::SinkTypeRegistry;

    fn kafka_payload() -> serde_json::Value {
        json!({
            "sinkType": "KAFKA",
            "inlongGroupId": "group_1",
            "inlongStreamId": "stream_1",
            "sinkName": "kafka_sink",
            "enableCreateResource": false,
            "properties": { "acks": "all" },
            "sinkFieldList": [
                { "fieldName": "id", "fieldType": "bigint", "sourceFieldName": "id" }
            ],
            "bootstrapServers": "k1:9092",
            "topicName": "orders",
            "serializationType": "AVRO",
            "autoOffsetReset": "EARLIEST"
        })
    }

    #[test]
    fn test_json_round_trip() {
        let registry = SinkTypeRegistry::builtin();
        let loader = SinkConfigLoader::with_registry(&registry, Strictness::Reject);

        let request = loader
            .load_from_str(&kafka_payload().to_string(), PayloadFormat::Json)
            .unwrap();
        let persisted = SinkConfigLoader::to_json(&request).unwrap();
        let reloaded = loader.load_from_str(&persisted, PayloadFormat::Json).unwrap();

        assert_eq!(request, reloaded);
    }

    #[test]
    fn test_toml_round_trip() {
        let registry = SinkTypeRegistry::builtin();
        let loader = SinkConfigLoader::with_registry(&registry, Strictness::Reject);

        let request = loader
            .load_from_str(&kafka_payload().to_string(), PayloadFormat::Json)
            .unwrap();
        let persisted = SinkConfigLoader::to_toml(&request).unwrap();
        let reloaded = loader.load_from_str(&persisted, PayloadFormat::Toml).unwrap();

        assert_eq!(request, reloaded);
    }

    #[test]
    fn test_toml_field_list_errors_name_entry() {
        let registry = SinkTypeRegistry::builtin();
        let loader = SinkConfigLoader::with_registry(&registry, Strictness::Reject);
        let content = r#"
sinkType = "KAFKA"
inlongGroupId = "group_1"
inlongStreamId = "stream_1"
sinkName = "kafka_sink"
bootstrapServers = "k1:9092"
topicName = "orders"

[[sinkFieldList]]
fieldName = "id"
fieldType = "bigint"

[[sinkFieldList]]
fieldType = "string"
"#;
        let err = loader.load_from_str(content, PayloadFormat::Toml).unwrap_err();
        assert_eq!(err.kind(), "missing_required_field");
        assert_eq!(err.field(), Some("sinkFieldList[1].fieldName"));
    }

    #[test]
    fn test_persisted_form_carries_discriminator() {
        let request: SinkRequest = serde_json::from_value(kafka_payload()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sinkType"], "KAFKA");
        assert_eq!(value["topicName"], "orders");
        assert_eq!(value["properties"]["acks"], "all");
    }
}

#[cfg(test)]
mod stats_tests {
    use observability::DecodeStatsAggregator;
    use sink_decoder::{SinkDecoder, Strictness};
    use sink_registry::SinkTypeRegistry;

    #[test]
    fn test_aggregate_batch_outcomes() {
        let registry = SinkTypeRegistry::builtin();
        let decoder = SinkDecoder::new(&registry).with_strictness(Strictness::Reject);
        let payloads = [
            serde_json::json!({ "sinkType": "KAFKA" }),
            serde_json::json!({ "inlongGroupId": "g1" }),
            serde_json::json!({
                "sinkType": "ELASTICSEARCH",
                "inlongGroupId": "g1",
                "inlongStreamId": "s1",
                "sinkName": "es_sink",
                "hosts": "http://es:9200",
                "indexName": "logs"
            }),
        ];

        let mut stats = DecodeStatsAggregator::new();
        for payload in payloads {
            match decoder.decode(payload) {
                Ok(request) => {
                    use contracts::SinkRequestContract;
                    stats.record_accepted(request.discriminator().as_str());
                }
                Err(e) => stats.record_rejected(e.kind()),
            }
        }

        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.rejected_by_reason.get("missing_required_field"), Some(&1));
        assert_eq!(stats.rejected_by_reason.get("missing_discriminator"), Some(&1));
        assert_eq!(stats.accepted_by_type.get("ELASTICSEARCH"), Some(&1));
    }
}
