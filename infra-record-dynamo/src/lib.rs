use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use scribe_domain::{
    DomainError, RecordStorePort, Transcription, TranscriptSink, Translation, STATUS_COMPLETE,
};

/// Record store over one DynamoDB table keyed by the audio object key.
///
/// Transcriptions create the record (`put_item`); translations update it
/// in place, guarded by a record-existence condition so that a
/// translation against an unknown key surfaces as not-found instead of
/// silently creating a partial record.
pub struct DynamoRecordStore {
    client: Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl RecordStorePort for DynamoRecordStore {
    async fn put_transcription(
        &self,
        key: &str,
        transcription: &Transcription,
    ) -> Result<(), DomainError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(transcription_item(key, transcription)))
            .send()
            .await
            .map_err(|err| {
                DomainError::persistence_error(&format!(
                    "failed to store transcript for {key}: {}",
                    DisplayErrorContext(err)
                ))
            })?;

        tracing::debug!(key, table = %self.table, "transcription record created");
        Ok(())
    }

    async fn attach_translation(
        &self,
        key: &str,
        translation: &Translation,
    ) -> Result<(), DomainError> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("key", AttributeValue::S(key.to_string()))
            .update_expression("SET statusCode = :s, translated = :tr")
            .condition_expression("attribute_exists(#k)")
            .expression_attribute_names("#k", "key")
            .expression_attribute_values(":s", AttributeValue::S(STATUS_COMPLETE.to_string()))
            .expression_attribute_values(":tr", translation_attr(translation))
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(key, table = %self.table, "translation attached to record");
                Ok(())
            }
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    Err(DomainError::not_found(&format!(
                        "no transcription record exists for key {key}"
                    )))
                } else {
                    Err(DomainError::persistence_error(&format!(
                        "failed to attach translation for {key}: {service_error}"
                    )))
                }
            }
        }
    }
}

/// Record-store sink for the transcription pipeline.
pub struct RecordStoreSink {
    records: Arc<dyn RecordStorePort>,
}

impl RecordStoreSink {
    pub fn new(records: Arc<dyn RecordStorePort>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl TranscriptSink for RecordStoreSink {
    async fn persist(&self, key: &str, transcription: &Transcription) -> Result<(), DomainError> {
        self.records.put_transcription(key, transcription).await
    }
}

fn transcription_item(
    key: &str,
    transcription: &Transcription,
) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("key".to_string(), AttributeValue::S(key.to_string())),
        (
            "statusCode".to_string(),
            AttributeValue::S(STATUS_COMPLETE.to_string()),
        ),
        ("transcript".to_string(), transcription_attr(transcription)),
    ])
}

fn transcription_attr(transcription: &Transcription) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            "language".to_string(),
            AttributeValue::S(transcription.language.clone()),
        ),
        (
            "transcript".to_string(),
            AttributeValue::S(transcription.transcript.clone()),
        ),
        (
            "english".to_string(),
            AttributeValue::S(transcription.english.clone()),
        ),
    ]))
}

fn translation_attr(translation: &Translation) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            "language".to_string(),
            AttributeValue::S(translation.language.clone()),
        ),
        (
            "transcript".to_string(),
            AttributeValue::S(translation.transcript.clone()),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcription_item_carries_key_status_and_nested_transcript() {
        let item = transcription_item(
            "a.wav",
            &Transcription {
                language: "de".to_string(),
                transcript: "hallo".to_string(),
                english: "hello".to_string(),
            },
        );

        assert_eq!(item["key"], AttributeValue::S("a.wav".to_string()));
        assert_eq!(item["statusCode"], AttributeValue::S("COMPLETE".to_string()));
        let AttributeValue::M(transcript) = &item["transcript"] else {
            panic!("transcript must be a map attribute");
        };
        assert_eq!(transcript["language"], AttributeValue::S("de".to_string()));
        assert_eq!(transcript["english"], AttributeValue::S("hello".to_string()));
    }

    #[test]
    fn translation_attr_maps_language_and_text() {
        let AttributeValue::M(translated) = translation_attr(&Translation {
            language: "German".to_string(),
            transcript: "hallo welt".to_string(),
        }) else {
            panic!("translation must be a map attribute");
        };

        assert_eq!(
            translated["language"],
            AttributeValue::S("German".to_string())
        );
        assert_eq!(
            translated["transcript"],
            AttributeValue::S("hallo welt".to_string())
        );
    }
}
