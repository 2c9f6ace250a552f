//! GoFile account client
//!
//! One method per remote endpoint. Each method checks the session state,
//! resolves implicit defaults (upload server, parent folder, token), hands the
//! request to the [`Transport`] and returns the service reply unmodified. A
//! reply whose status is not `"ok"` is returned as data, never as an error.

use std::fmt;
use std::path::Path;

use crate::endpoints::Endpoints;
use crate::envelope::{Envelope, ServerInfo};
use crate::error::{Error, Result};
use crate::session::{AccountMode, Session, SessionOptions};
use crate::transport::{Form, Multipart, Transport};

/// Everything needed to construct a [`GofileClient`]
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub session: SessionOptions,
    pub endpoints: Endpoints,
}

/// File content to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read a file from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                Error::InvalidArgument(format!("'{}' has no file name", path.display()))
            })?
            .to_string();
        let content = tokio::fs::read(path).await?;
        Ok(Self { file_name, content })
    }
}

/// Options accepted by `setFolderOption`
///
/// The client does not restrict the option name; this enum only names the
/// values the service documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderOption {
    /// `"true"` or `"false"`
    Public,
    Password,
    Description,
    /// Unix timestamp
    Expire,
    /// Comma separated tags
    Tags,
}

impl FolderOption {
    pub const ALL: [FolderOption; 5] = [
        FolderOption::Public,
        FolderOption::Password,
        FolderOption::Description,
        FolderOption::Expire,
        FolderOption::Tags,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FolderOption::Public => "public",
            FolderOption::Password => "password",
            FolderOption::Description => "description",
            FolderOption::Expire => "expire",
            FolderOption::Tags => "tags",
        }
    }
}

impl fmt::Display for FolderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FolderOption {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Comma separated content ids as the service expects them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentIds(String);

impl ContentIds {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for ContentIds {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let ids: Vec<String> = iter
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self(ids.join(","))
    }
}

impl fmt::Display for ContentIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentIds {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fail with `InvalidArgument` when a required argument is empty
fn require_arg<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{name} is required")));
    }
    Ok(value)
}

/// Client for the GoFile API bound to one account session
///
/// Methods that can change the session take `&mut self`; share a client
/// between tasks by wrapping it in a mutex.
pub struct GofileClient<T> {
    transport: T,
    endpoints: Endpoints,
    session: Session,
}

impl<T: Transport> GofileClient<T> {
    /// Create a client with default endpoints
    pub fn new(transport: T, session: SessionOptions) -> Self {
        Self::with_options(
            transport,
            ClientOptions {
                session,
                endpoints: Endpoints::default(),
            },
        )
    }

    pub fn with_options(transport: T, options: ClientOptions) -> Self {
        Self {
            transport,
            endpoints: options.endpoints,
            session: Session::new(options.session),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_guest(&self) -> bool {
        self.session.is_guest()
    }

    pub fn mode(&self) -> AccountMode {
        self.session.mode()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.credential()
    }

    /// Last account snapshot stored by [`authenticate`](Self::authenticate)
    pub fn account_details(&self) -> Option<&Envelope> {
        self.session.account_snapshot()
    }

    pub fn guest_upload_destination(&self) -> Option<&str> {
        self.session.guest_upload_destination()
    }

    pub fn root_folder(&self) -> Option<&str> {
        self.session.root_folder()
    }

    fn require_token(&self, operation: &str) -> Result<&str> {
        self.session.credential().ok_or_else(|| {
            Error::PreconditionFailed(format!(
                "cannot {operation} without a token, upload a file first or supply an account token"
            ))
        })
    }

    fn resolve_parent<'a>(
        &'a self,
        parent_id: Option<&'a str>,
        operation: &str,
    ) -> Result<&'a str> {
        match parent_id {
            Some(parent) => require_arg("parent_id", parent),
            None => self.session.root_folder().ok_or_else(|| {
                Error::PreconditionFailed(format!(
                    "cannot {operation} in the root folder before the account details are known, call authenticate first"
                ))
            }),
        }
    }

    /// Query the best available upload server
    pub async fn select_server(&self) -> Result<Envelope> {
        let url = self.endpoints.get_server()?;
        tracing::debug!(%url, "Selecting upload server");
        self.transport.get(&url).await
    }

    /// Name of the best available upload server
    pub async fn best_server(&self) -> Result<String> {
        let response = self.select_server().await?;
        match response.data_as::<ServerInfo>() {
            Ok(info) if response.is_ok() => Ok(info.server),
            _ => {
                tracing::warn!(status = %response.status, "Server selection failed");
                Err(Error::UnexpectedResponse(format!(
                    "server selection returned status '{}' without a server",
                    response.status
                )))
            }
        }
    }

    /// Upload a file
    ///
    /// A guest cannot pick a folder for its first upload. After that upload the
    /// guest token and folder from the reply are kept, later uploads go to
    /// the same folder and the account snapshot is refreshed.
    pub async fn upload(&mut self, file: UploadFile, folder_id: Option<&str>) -> Result<Envelope> {
        if folder_id.is_some() && self.session.is_fresh_guest() {
            return Err(Error::InvalidArgument(
                "guests cannot specify a folder id before their first upload".into(),
            ));
        }
        if let Some(folder) = folder_id {
            require_arg("folder_id", folder)?;
        }
        require_arg("file name", &file.file_name)?;

        let server = self.best_server().await?;
        let url = self.endpoints.upload_file(&server)?;

        let mut body = Multipart::new().file("file", file.file_name, file.content);
        if let Some(token) = self.session.credential() {
            body = body.text("token", token);
        }
        if let Some(folder) = self.session.resolve_upload_folder(folder_id) {
            body = body.text("folderId", folder);
        }

        tracing::debug!(%url, folder = ?body.text_value("folderId"), "Uploading file");
        let response = self.transport.post_multipart(&url, body).await?;

        if self.session.apply_upload_result(&response) {
            tracing::info!(
                folder = ?self.session.guest_upload_destination(),
                "Guest session upgraded with server-issued token"
            );
            // The file is stored at this point; a failed refresh leaves the
            // snapshot unset and the reply still goes back to the caller.
            if let Err(e) = self.authenticate().await {
                tracing::warn!(error = %e, "Account refresh after guest upload failed");
            }
        }

        Ok(response)
    }

    /// Create a folder, in the root folder when no parent is given
    pub async fn create_folder(
        &self,
        parent_id: Option<&str>,
        folder_name: &str,
    ) -> Result<Envelope> {
        let token = self.require_token("create folders")?;
        let folder_name = require_arg("folder_name", folder_name)?;
        let parent = self.resolve_parent(parent_id, "create folders")?;

        let url = self.endpoints.create_folder()?;
        let form = Form::new()
            .field("parentFolderId", parent)
            .field("folderName", folder_name)
            .field("token", token);

        tracing::debug!(%url, parent_id = parent, folder_name, "Creating folder");
        self.transport.put_form(&url, form).await
    }

    /// List a folder, the root folder when no parent is given
    ///
    /// The service restricts this endpoint to premium accounts and answers
    /// other accounts with an error status.
    pub async fn get_children(&self, parent_id: Option<&str>) -> Result<Envelope> {
        let token = self.require_token("list folder contents")?;
        let parent = self.resolve_parent(parent_id, "list folder contents")?;

        let url = self.endpoints.get_content(parent, token)?;
        tracing::debug!(parent_id = parent, "Listing folder contents");
        self.transport.get(&url).await
    }

    /// Set an option on a folder
    ///
    /// `option` is sent verbatim; see [`FolderOption`] for the names the
    /// service accepts.
    pub async fn set_folder_option(
        &self,
        folder_id: &str,
        option: impl AsRef<str>,
        value: &str,
    ) -> Result<Envelope> {
        let folder_id = require_arg("folder_id", folder_id)?;
        let option = require_arg("option", option.as_ref())?;
        let value = require_arg("value", value)?;

        let url = self.endpoints.set_folder_option()?;
        let form = Form::new()
            .field("option", option)
            .field("value", value)
            .field("folderId", folder_id)
            .field_opt("token", self.session.credential());

        tracing::debug!(%url, folder_id, option, "Setting folder option");
        self.transport.put_form(&url, form).await
    }

    /// Copy contents into a folder
    ///
    /// `contents_ids` is a comma separated list of ids.
    pub async fn copy_content(
        &self,
        destination_id: &str,
        contents_ids: impl AsRef<str>,
    ) -> Result<Envelope> {
        let destination_id = require_arg("destination_id", destination_id)?;
        let contents_ids = require_arg("contents_ids", contents_ids.as_ref())?;

        let url = self.endpoints.copy_content()?;
        let form = Form::new()
            .field("contentsId", contents_ids)
            .field("folderIdDest", destination_id)
            .field_opt("token", self.session.credential());

        tracing::debug!(%url, destination_id, contents_ids, "Copying contents");
        self.transport.put_form(&url, form).await
    }

    /// Delete contents
    ///
    /// `contents_ids` is a comma separated list of ids.
    pub async fn delete_content(&self, contents_ids: impl AsRef<str>) -> Result<Envelope> {
        let contents_ids = require_arg("contents_ids", contents_ids.as_ref())?;

        let url = self.endpoints.delete_content()?;
        let form = Form::new()
            .field("contentsId", contents_ids)
            .field_opt("token", self.session.credential());

        tracing::debug!(%url, contents_ids, "Deleting contents");
        self.transport.delete_form(&url, form).await
    }

    /// Fetch the account details without touching the session
    pub async fn get_account_details(&self) -> Result<Envelope> {
        let url = self
            .endpoints
            .get_account_details(self.session.credential())?;
        tracing::debug!("Fetching account details");
        self.transport.get(&url).await
    }

    /// Fetch the account details and store them as the account snapshot
    ///
    /// The snapshot is replaced with whatever the service returns, an
    /// `error-auth` reply included; only transport failures are errors.
    pub async fn authenticate(&mut self) -> Result<&Envelope> {
        let details = self.get_account_details().await?;
        if !details.is_ok() {
            tracing::warn!(status = %details.status, "Account lookup was rejected");
        }
        Ok(self.session.set_account_snapshot(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> Envelope {
        serde_json::from_value(value).unwrap()
    }

    fn server_reply() -> Envelope {
        envelope(json!({"status": "ok", "data": {"server": "store1"}}))
    }

    fn guest_upload_reply() -> Envelope {
        envelope(json!({
            "status": "ok",
            "data": {
                "guestToken": "guest-token",
                "downloadPage": "https://gofile.io/d/Z19n9a",
                "code": "Z19n9a",
                "parentFolder": "guest-folder",
                "fileId": "file-1",
                "fileName": "a.txt",
                "md5": "10c918b1d01aea85864ee65d9e0c2305"
            }
        }))
    }

    fn account_reply(root: &str) -> Envelope {
        envelope(json!({
            "status": "ok",
            "data": {
                "token": "guest-token",
                "tier": "guest",
                "rootFolder": root,
                "foldersCount": 1,
                "filesCount": 1,
                "totalSize": 5,
                "totalDownloadCount": 0
            }
        }))
    }

    fn auth_error() -> Envelope {
        envelope(json!({"status": "error-auth", "data": {}}))
    }

    fn file() -> UploadFile {
        UploadFile::new("a.txt", b"hello".to_vec())
    }

    fn client(mock: MockTransport, session: SessionOptions) -> GofileClient<MockTransport> {
        GofileClient::new(mock, session)
    }

    fn expect_server(mock: &mut MockTransport) {
        mock.expect_get()
            .withf(|url| url.path() == "/getServer")
            .returning(|_| Ok(server_reply()));
    }

    #[test]
    fn test_construction_modes() {
        assert!(client(MockTransport::new(), SessionOptions::default()).is_guest());
        assert!(client(MockTransport::new(), SessionOptions::guest()).is_guest());

        let both = client(
            MockTransport::new(),
            SessionOptions {
                token: Some("testtoken123".into()),
                guest: true,
            },
        );
        assert!(!both.is_guest());
        assert_eq!(both.token(), Some("testtoken123"));
    }

    #[tokio::test]
    async fn test_fresh_guest_cannot_pick_folder() {
        // No expectations: any transport call would panic.
        let mut client = client(MockTransport::new(), SessionOptions::guest());
        let result = client.upload(file(), Some("folder")).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert!(client.session().is_fresh_guest());
    }

    #[tokio::test]
    async fn test_guest_upload_upgrades_session() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        mock.expect_post_multipart()
            .withf(|url, body| {
                url.as_str() == "https://store1.gofile.io/uploadFile"
                    && body.contains("file")
                    && !body.contains("token")
                    && !body.contains("folderId")
            })
            .times(1)
            .returning(|_, _| Ok(guest_upload_reply()));
        mock.expect_get()
            .withf(|url| {
                url.path() == "/getAccountDetails" && url.query() == Some("token=guest-token")
            })
            .times(1)
            .returning(|_| Ok(account_reply("guest-root")));

        let mut client = client(mock, SessionOptions::guest());
        let response = client.upload(file(), None).await.unwrap();

        assert_eq!(response, guest_upload_reply());
        assert!(client.is_guest());
        assert_eq!(client.token(), Some("guest-token"));
        assert_eq!(client.guest_upload_destination(), Some("guest-folder"));
        assert_eq!(client.root_folder(), Some("guest-root"));
    }

    #[tokio::test]
    async fn test_second_guest_upload_reuses_destination() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        mock.expect_get()
            .withf(|url| url.path() == "/getAccountDetails")
            .times(1)
            .returning(|_| Ok(account_reply("guest-root")));

        let mut seq = mockall::Sequence::new();
        mock.expect_post_multipart()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(guest_upload_reply()));
        mock.expect_post_multipart()
            .withf(|_, body| {
                body.text_value("folderId") == Some("guest-folder")
                    && body.text_value("token") == Some("guest-token")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {"fileId": "file-2"}}))));

        let mut client = client(mock, SessionOptions::guest());
        client.upload(file(), None).await.unwrap();
        let second = client.upload(file(), None).await.unwrap();

        assert_eq!(second.data_str("fileId"), Some("file-2"));
        assert_eq!(client.token(), Some("guest-token"));
    }

    #[tokio::test]
    async fn test_upgraded_guest_may_pick_folder() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        mock.expect_get()
            .withf(|url| url.path() == "/getAccountDetails")
            .returning(|_| Ok(account_reply("guest-root")));

        let mut seq = mockall::Sequence::new();
        mock.expect_post_multipart()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(guest_upload_reply()));
        mock.expect_post_multipart()
            .withf(|_, body| body.text_value("folderId") == Some("explicit"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(guest_upload_reply()));

        let mut client = client(mock, SessionOptions::guest());
        client.upload(file(), None).await.unwrap();
        client.upload(file(), Some("explicit")).await.unwrap();

        assert_eq!(client.guest_upload_destination(), Some("guest-folder"));
    }

    #[tokio::test]
    async fn test_authenticated_upload_sends_token_and_folder() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        mock.expect_post_multipart()
            .withf(|_, body| {
                body.text_value("token") == Some("account-token")
                    && body.text_value("folderId") == Some("target")
            })
            .times(1)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {"fileId": "f"}}))));

        let mut client = client(mock, SessionOptions::with_token("account-token"));
        client.upload(file(), Some("target")).await.unwrap();

        assert!(client.account_details().is_none());
        assert_eq!(client.guest_upload_destination(), None);
    }

    #[tokio::test]
    async fn test_upload_error_reply_is_returned_verbatim() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        let reply = envelope(json!({"status": "error-wrongFolder", "data": {}}));
        let expected = reply.clone();
        mock.expect_post_multipart()
            .returning(move |_, _| Ok(reply.clone()));

        let mut client = client(mock, SessionOptions::guest());
        let response = client.upload(file(), None).await.unwrap();

        assert_eq!(response, expected);
        assert!(client.session().is_fresh_guest());
    }

    #[tokio::test]
    async fn test_guest_upload_reply_survives_failed_refresh() {
        let mut mock = MockTransport::new();
        expect_server(&mut mock);
        mock.expect_post_multipart()
            .times(1)
            .returning(|_, _| Ok(guest_upload_reply()));
        mock.expect_get()
            .withf(|url| url.path() == "/getAccountDetails")
            .times(1)
            .returning(|_| Err(Error::Network("connection reset".into())));

        let mut client = client(mock, SessionOptions::guest());
        let response = client.upload(file(), None).await.unwrap();

        assert_eq!(response, guest_upload_reply());
        assert_eq!(client.token(), Some("guest-token"));
        assert_eq!(client.guest_upload_destination(), Some("guest-folder"));
        assert!(client.account_details().is_none());

        let result = client.create_folder(None, "docs").await;
        assert!(matches!(result, Err(Error::PreconditionFailed(_))));
    }

    /// Reply with extra payload keys and an extra top-level field
    fn rich_reply() -> Envelope {
        envelope(json!({
            "status": "ok",
            "data": {"id": "x", "name": "docs", "nested": {"a": [1, 2]}},
            "extra": 1
        }))
    }

    #[tokio::test]
    async fn test_form_operations_return_reply_unchanged() {
        let mut mock = MockTransport::new();
        mock.expect_put_form()
            .times(3)
            .returning(|_, _| Ok(rich_reply()));
        mock.expect_delete_form()
            .times(1)
            .returning(|_, _| Ok(rich_reply()));

        let client = client(mock, SessionOptions::with_token("t"));

        let created = client.create_folder(Some("P"), "docs").await.unwrap();
        assert_eq!(created, rich_reply());
        assert_eq!(created.extra.get("extra"), Some(&json!(1)));

        let option = client
            .set_folder_option("F", FolderOption::Public, "true")
            .await
            .unwrap();
        assert_eq!(option, rich_reply());

        let copied = client.copy_content("D", "a,b").await.unwrap();
        assert_eq!(copied, rich_reply());

        let deleted = client.delete_content("a,b").await.unwrap();
        assert_eq!(deleted, rich_reply());
    }

    #[tokio::test]
    async fn test_upload_fails_without_server() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .returning(|_| Ok(envelope(json!({"status": "noServer", "data": {}}))));

        let mut client = client(mock, SessionOptions::guest());
        let result = client.upload(file(), None).await;
        assert!(matches!(result, Err(Error::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .returning(|_| Err(Error::Network("connection refused".into())));

        let client = client(mock, SessionOptions::guest());
        assert!(matches!(client.select_server().await, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_create_folder_requires_token() {
        let client = client(MockTransport::new(), SessionOptions::guest());

        for parent in [None, Some("parent")] {
            let result = client.create_folder(parent, "docs").await;
            assert!(matches!(result, Err(Error::PreconditionFailed(_))));
        }
    }

    #[tokio::test]
    async fn test_create_folder_requires_root_when_no_parent() {
        let client = client(MockTransport::new(), SessionOptions::with_token("t"));
        let result = client.create_folder(None, "docs").await;
        assert!(matches!(result, Err(Error::PreconditionFailed(_))));
    }

    #[tokio::test]
    async fn test_create_folder_defaults_to_root() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .returning(|_| Ok(account_reply("R")));
        mock.expect_put_form()
            .withf(|url, form| {
                url.path() == "/createFolder"
                    && form.get("parentFolderId") == Some("R")
                    && form.get("folderName") == Some("docs")
                    && form.get("token") == Some("t")
            })
            .times(1)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {}}))));

        let mut client = client(mock, SessionOptions::with_token("t"));
        client.authenticate().await.unwrap();
        let response = client.create_folder(None, "docs").await.unwrap();
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_create_folder_with_explicit_parent_skips_snapshot() {
        let mut mock = MockTransport::new();
        mock.expect_put_form()
            .withf(|_, form| form.get("parentFolderId") == Some("P"))
            .times(1)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {}}))));

        let client = client(mock, SessionOptions::with_token("t"));
        client.create_folder(Some("P"), "docs").await.unwrap();
    }

    #[tokio::test]
    async fn test_create_folder_requires_name() {
        let client = client(MockTransport::new(), SessionOptions::with_token("t"));
        let result = client.create_folder(Some("P"), "  ").await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_get_children_requires_token() {
        let client = client(MockTransport::new(), SessionOptions::default());
        let result = client.get_children(Some("folder")).await;
        assert!(matches!(result, Err(Error::PreconditionFailed(_))));
    }

    #[tokio::test]
    async fn test_get_children_surfaces_permission_error() {
        let mut mock = MockTransport::new();
        let reply = envelope(json!({"status": "error-notPremium", "data": {}}));
        let expected = reply.clone();
        mock.expect_get()
            .withf(|url| {
                url.path() == "/getContent" && url.query() == Some("contentId=folder&token=t")
            })
            .returning(move |_| Ok(reply.clone()));

        let client = client(mock, SessionOptions::with_token("t"));
        assert_eq!(client.get_children(Some("folder")).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_set_folder_option_passes_option_verbatim() {
        let mut mock = MockTransport::new();
        mock.expect_put_form()
            .withf(|url, form| {
                url.path() == "/setFolderOption"
                    && form.get("option") == Some("colour")
                    && form.get("value") == Some("blue")
                    && form.get("folderId") == Some("F")
                    && form.get("token") == Some("t")
            })
            .returning(|_, _| Ok(envelope(json!({"status": "error-noOption", "data": {}}))));

        let client = client(mock, SessionOptions::with_token("t"));
        let response = client.set_folder_option("F", "colour", "blue").await.unwrap();
        assert_eq!(response.status, "error-noOption");
    }

    #[tokio::test]
    async fn test_set_folder_option_requires_arguments() {
        let client = client(MockTransport::new(), SessionOptions::with_token("t"));
        let result = client
            .set_folder_option("F", FolderOption::Description, "")
            .await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_copy_and_delete_bodies() {
        let mut mock = MockTransport::new();
        mock.expect_put_form()
            .withf(|url, form| {
                url.path() == "/copyContent"
                    && form.get("contentsId") == Some("a,b")
                    && form.get("folderIdDest") == Some("D")
                    && form.get("token") == Some("t")
            })
            .times(1)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {}}))));
        mock.expect_delete_form()
            .withf(|url, form| {
                url.path() == "/deleteContent"
                    && form.get("contentsId") == Some("a,b")
                    && form.get("token") == Some("t")
            })
            .times(1)
            .returning(|_, _| Ok(envelope(json!({"status": "ok", "data": {}}))));

        let client = client(mock, SessionOptions::with_token("t"));
        let ids: ContentIds = ["a", "b"].into_iter().collect();
        client.copy_content("D", &ids).await.unwrap();
        client.delete_content(ids).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_requires_ids() {
        let client = client(MockTransport::new(), SessionOptions::with_token("t"));
        let result = client.delete_content(ContentIds::default()).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_authenticate_stores_auth_error() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .withf(|url| url.query() == Some("token=invalid"))
            .returning(|_| Ok(auth_error()));

        let mut client = client(mock, SessionOptions::with_token("invalid"));
        let snapshot = client.authenticate().await.unwrap().clone();

        assert_eq!(snapshot.status, "error-auth");
        assert!(snapshot.data.is_empty());
        assert_eq!(client.account_details(), Some(&snapshot));
        assert_eq!(client.root_folder(), None);
    }

    #[tokio::test]
    async fn test_authenticate_overwrites_snapshot() {
        let mut mock = MockTransport::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(account_reply("R")));
        mock.expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(auth_error()));

        let mut client = client(mock, SessionOptions::with_token("t"));
        client.authenticate().await.unwrap();
        assert_eq!(client.root_folder(), Some("R"));

        client.authenticate().await.unwrap();
        assert_eq!(client.account_details(), Some(&auth_error()));
    }

    #[tokio::test]
    async fn test_get_account_details_leaves_session_alone() {
        let mut mock = MockTransport::new();
        mock.expect_get().returning(|_| Ok(account_reply("R")));

        let client = client(mock, SessionOptions::with_token("t"));
        let details = client.get_account_details().await.unwrap();
        assert_eq!(details, account_reply("R"));
        assert!(client.account_details().is_none());
    }

    #[tokio::test]
    async fn test_select_server_returns_reply_unchanged() {
        let reply = envelope(json!({
            "status": "ok",
            "data": {"server": "store9", "zone": "eu"},
            "notice": "x"
        }));
        let expected = reply.clone();
        let mut mock = MockTransport::new();
        mock.expect_get().returning(move |_| Ok(reply.clone()));

        let client = client(mock, SessionOptions::default());
        assert_eq!(client.select_server().await.unwrap(), expected);
        assert_eq!(client.best_server().await.unwrap(), "store9");
    }

    #[test]
    fn test_content_ids_join() {
        let ids: ContentIds = vec!["a ", "", " b", "c"].into_iter().collect();
        assert_eq!(ids.as_str(), "a,b,c");
    }

    #[test]
    fn test_folder_option_names() {
        let names: Vec<&str> = FolderOption::ALL.iter().map(|o| o.as_str()).collect();
        assert_eq!(names, vec!["public", "password", "description", "expire", "tags"]);
    }

    #[tokio::test]
    async fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, b"data").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "report.txt");
        assert_eq!(file.content, b"data");

        let missing = UploadFile::from_path(dir.path().join("missing.txt")).await;
        assert!(matches!(missing, Err(Error::Io(_))));
    }
}
