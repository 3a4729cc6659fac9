//! Request translation: selected fields + `id` → downstream call.
//!
//! # Responsibilities
//! - Build the `DownstreamRequest` (id forwarded as-is, mask verbatim)
//! - Invoke the injected `DataSource` and hand back its answer untouched
//!
//! # Design Decisions
//! - No validation of `id`; an absent id is the empty string
//! - No retries and no error translation at this layer

use std::sync::Arc;

use crate::downstream::{DataSource, DownstreamRequest, DownstreamResult, FieldMask, Record};

/// Turns a resolved `getData` field into a downstream call.
#[derive(Clone)]
pub struct RequestTranslator {
    source: Arc<dyn DataSource>,
}

impl RequestTranslator {
    /// Create a translator calling `source`.
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Build the downstream request without sending it.
    pub fn build_request(id: Option<String>, fields: Vec<String>) -> DownstreamRequest {
        DownstreamRequest {
            id: id.unwrap_or_default(),
            field_mask: FieldMask::new(fields),
        }
    }

    /// Build the request and perform the call.
    pub async fn fetch(&self, id: Option<String>, fields: Vec<String>) -> DownstreamResult<Record> {
        let request = Self::build_request(id, fields);
        tracing::debug!(
            id = %request.id,
            mask_len = request.field_mask.len(),
            "Translated getData into downstream request"
        );
        self.source.get_data(request).await
    }
}

impl std::fmt::Debug for RequestTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestTranslator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::DownstreamError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        seen: Mutex<Vec<DownstreamRequest>>,
        fail_with: Option<DownstreamError>,
    }

    #[async_trait]
    impl DataSource for RecordingSource {
        async fn get_data(&self, request: DownstreamRequest) -> DownstreamResult<Record> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(Record {
                    id: request.id,
                    ..Record::default()
                }),
            }
        }
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_request_preserves_id_and_mask() {
        let request = RequestTranslator::build_request(
            Some("  weird id ".into()),
            fields(&["name", "id", "name"]),
        );
        assert_eq!(request.id, "  weird id ");
        assert_eq!(request.field_mask.paths(), ["name", "id", "name"]);
    }

    #[test]
    fn test_absent_id_becomes_empty() {
        let request = RequestTranslator::build_request(None, Vec::new());
        assert_eq!(request.id, "");
        assert!(request.field_mask.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_forwards_exact_request() {
        let source = Arc::new(RecordingSource::default());
        let translator = RequestTranslator::new(source.clone());

        let record = translator
            .fetch(Some("42".into()), fields(&["id", "name"]))
            .await
            .unwrap();
        assert_eq!(record.id, "42");

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].field_mask.paths(), ["id", "name"]);
    }

    #[tokio::test]
    async fn test_fetch_propagates_error_unmodified() {
        let failure = DownstreamError::Rpc {
            code: tonic::Code::Unavailable,
            message: "connection refused".into(),
        };
        let source = Arc::new(RecordingSource {
            fail_with: Some(failure.clone()),
            ..RecordingSource::default()
        });
        let translator = RequestTranslator::new(source.clone());

        let err = translator.fetch(None, fields(&["id"])).await.unwrap_err();
        assert_eq!(err, failure);
        assert_eq!(source.seen.lock().unwrap().len(), 1);
    }
}
