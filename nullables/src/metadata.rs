//! Nullable metadata fetcher — serve scripted documents by URI.

use std::collections::HashMap;
use std::sync::Mutex;

use aurum_client::metadata::{is_placeholder_uri, MetadataDocument, MetadataFetcher};
use aurum_client::ClientError;

/// A metadata fetcher that serves pre-registered documents and can mark
/// URIs as unreachable, without any network involvement.
pub struct NullMetadataFetcher {
    documents: Mutex<HashMap<String, MetadataDocument>>,
    unreachable: Mutex<Vec<String>>,
}

impl NullMetadataFetcher {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            unreachable: Mutex::new(Vec::new()),
        }
    }

    /// Serve `document` for requests to `uri`.
    pub fn serve(&self, uri: &str, document: MetadataDocument) {
        self.documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(uri.to_string(), document);
    }

    /// Requests to `uri` fail with a transport error.
    pub fn mark_unreachable(&self, uri: &str) {
        self.unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(uri.to_string());
    }
}

impl Default for NullMetadataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataFetcher for NullMetadataFetcher {
    async fn fetch(&self, uri: &str) -> Result<Option<MetadataDocument>, ClientError> {
        if is_placeholder_uri(uri) {
            return Ok(None);
        }
        if self
            .unreachable
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|u| u == uri)
        {
            return Err(ClientError::Transport(format!("unreachable host: {uri}")));
        }
        Ok(self
            .documents
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(uri)
            .cloned())
    }
}
