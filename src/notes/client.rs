//! Joplin data API client.
//!
//! Talks to the Web Clipper service of a running Joplin desktop app. Every
//! request carries the API token as a `token` query parameter.

use super::{Folder, NewNote, Note, NoteStore, NoteSummary};
use crate::config::Config;
use crate::errors::{AppResult, NoteStoreError};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Fields requested when listing notes or folders.
const LIST_FIELDS: &str = "id,title";
/// Fields requested when fetching a single note.
const NOTE_FIELDS: &str = "id,title,body,parent_id";
/// Body returned by `GET /ping`.
const PING_RESPONSE: &str = "JoplinClipperServer";

/// One page of a Joplin list endpoint.
#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
    #[serde(default)]
    has_more: bool,
}

/// Client for interacting with the Joplin data API.
pub struct JoplinClient {
    base_url: String,
    token: String,
    client: Client,
}

impl std::fmt::Debug for JoplinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoplinClient")
            .field("base_url", &self.base_url)
            .field("token", &crate::constants::REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl JoplinClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the data API (e.g., "http://localhost:41184")
    /// * `token` - Web Clipper API token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Creates a client from the configured base URL and token.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.token.clone())
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Attaches the token, sends, and turns non-2xx statuses into errors.
    fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, NoteStoreError> {
        let response = request
            .query(&[("token", self.token.as_str())])
            .send()
            .map_err(NoteStoreError::Unreachable)?;

        let status = response.status();
        debug!("{} -> {}", endpoint, status);

        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NoteStoreError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T, NoteStoreError> {
        response.json().map_err(|e| {
            NoteStoreError::InvalidResponse(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }

    /// Collects every page of a list endpoint.
    fn list_all<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let request = self
                .client
                .get(self.url(endpoint))
                .query(&[("fields", LIST_FIELDS)])
                .query(&[("page", page)]);
            let response = self.send(request, endpoint)?;
            let current: Page<T> = Self::decode(response, endpoint)?;

            items.extend(current.items);
            if !current.has_more {
                break;
            }
            page += 1;
        }

        debug!("Listed {} items from {} ({} pages)", items.len(), endpoint, page);
        Ok(items)
    }
}

impl NoteStore for JoplinClient {
    fn ping(&self) -> AppResult<()> {
        let endpoint = "/ping";
        let response = self.send(self.client.get(self.url(endpoint)), endpoint)?;
        let body = response
            .text()
            .map_err(|e| NoteStoreError::InvalidResponse(format!("Unreadable ping reply: {}", e)))?;

        if body.trim() != PING_RESPONSE {
            return Err(NoteStoreError::InvalidResponse(format!(
                "Unexpected ping reply '{}'; is this a Joplin Web Clipper service?",
                body.trim()
            ))
            .into());
        }
        Ok(())
    }

    fn list_folders(&self) -> AppResult<Vec<Folder>> {
        self.list_all("/folders")
    }

    fn list_folder_notes(&self, folder_id: &str) -> AppResult<Vec<NoteSummary>> {
        self.list_all(&format!("/folders/{}/notes", folder_id))
    }

    fn create_note(&self, note: &NewNote) -> AppResult<Note> {
        let endpoint = "/notes";
        debug!("Creating note '{}' in {}", note.title, note.parent_id);
        let request = self.client.post(self.url(endpoint)).json(note);
        let response = self.send(request, endpoint)?;
        Ok(Self::decode(response, endpoint)?)
    }

    fn get_note(&self, id: &str) -> AppResult<Note> {
        let endpoint = format!("/notes/{}", id);
        let request = self
            .client
            .get(self.url(&endpoint))
            .query(&[("fields", NOTE_FIELDS)]);
        let response = self.send(request, &endpoint)?;
        Ok(Self::decode(response, &endpoint)?)
    }

    fn delete_note(&self, id: &str) -> AppResult<()> {
        let endpoint = format!("/notes/{}", id);
        debug!("Deleting note {}", id);
        self.send(self.client.delete(self.url(&endpoint)), &endpoint)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_trailing_slash() {
        let client = JoplinClient::new("http://localhost:41184/", "token");
        assert_eq!(client.base_url, "http://localhost:41184");
        assert_eq!(client.url("/notes"), "http://localhost:41184/notes");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = JoplinClient::new("http://localhost:41184", "very-secret");
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_page_without_has_more() {
        let page: Page<NoteSummary> =
            serde_json::from_str(r#"{"items": [{"id": "1", "title": "2025/06/01"}]}"#).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(!page.has_more);
    }
}
