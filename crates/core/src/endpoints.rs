//! GoFile endpoint URLs
//!
//! All endpoints live on the API host except `uploadFile`, which is served by
//! a per-request storage server (`https://{server}.gofile.io`).

use url::Url;

use crate::error::{Error, Result};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://api.gofile.io";

/// Default domain the storage servers live under
pub const DEFAULT_UPLOAD_DOMAIN: &str = "gofile.io";

/// URL builder for the GoFile API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: Url,
    upload_domain: String,
}

impl Endpoints {
    /// Create endpoints for a custom API base and upload domain
    pub fn new(api_base: &str, upload_domain: impl Into<String>) -> Result<Self> {
        let mut api_base = Url::parse(api_base)?;
        if api_base.cannot_be_a_base() {
            return Err(Error::InvalidArgument(format!(
                "API base '{api_base}' cannot be used as a base URL"
            )));
        }
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        let upload_domain = upload_domain.into();
        if upload_domain.is_empty() {
            return Err(Error::InvalidArgument("upload domain cannot be empty".into()));
        }

        Ok(Self {
            api_base,
            upload_domain,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn upload_domain(&self) -> &str {
        &self.upload_domain
    }

    fn api(&self, endpoint: &str) -> Result<Url> {
        Ok(self.api_base.join(endpoint)?)
    }

    pub fn get_server(&self) -> Result<Url> {
        self.api("getServer")
    }

    /// Upload URL on the given storage server
    ///
    /// The scheme follows the API base so a plain-http test server works.
    pub fn upload_file(&self, server: &str) -> Result<Url> {
        if server.is_empty() || server.contains(['/', ':', '@', '?', '#']) {
            return Err(Error::UnexpectedResponse(format!(
                "invalid upload server name '{server}'"
            )));
        }
        let url = format!(
            "{}://{}.{}/uploadFile",
            self.api_base.scheme(),
            server,
            self.upload_domain
        );
        Ok(Url::parse(&url)?)
    }

    pub fn create_folder(&self) -> Result<Url> {
        self.api("createFolder")
    }

    pub fn get_content(&self, content_id: &str, token: &str) -> Result<Url> {
        let mut url = self.api("getContent")?;
        url.query_pairs_mut()
            .append_pair("contentId", content_id)
            .append_pair("token", token);
        Ok(url)
    }

    pub fn set_folder_option(&self) -> Result<Url> {
        self.api("setFolderOption")
    }

    pub fn copy_content(&self) -> Result<Url> {
        self.api("copyContent")
    }

    pub fn delete_content(&self) -> Result<Url> {
        self.api("deleteContent")
    }

    /// Account lookup; a missing token is sent as an empty value
    pub fn get_account_details(&self, token: Option<&str>) -> Result<Url> {
        let mut url = self.api("getAccountDetails")?;
        url.query_pairs_mut()
            .append_pair("token", token.unwrap_or_default());
        Ok(url)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: Url::parse(&format!("{DEFAULT_API_BASE}/")).expect("valid default API base"),
            upload_domain: DEFAULT_UPLOAD_DOMAIN.to_string(),
        }
    }
}
