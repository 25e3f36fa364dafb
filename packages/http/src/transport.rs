use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use kvtree_core::{Config, Entry, KvTransport, PutOptions};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Header carrying the access token.
pub const TOKEN_HEADER: &str = "X-Consul-Token";

fn token_header() -> Result<HeaderName, Error> {
    Ok(HeaderName::from_bytes(TOKEN_HEADER.as_bytes())?)
}

/// One element of a `GET /v1/kv/...` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct KvPair {
    key: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    modify_index: u64,
    #[serde(default)]
    flags: u64,
}

impl From<KvPair> for Entry {
    fn from(pair: KvPair) -> Self {
        Entry {
            key: pair.key,
            value: pair.value.map(Bytes::from),
            modify_index: pair.modify_index,
            flags: pair.flags,
        }
    }
}

/// A KV transport backed by a blocking HTTP client.
///
/// # Example
///
/// ```ignore
/// use kvtree_core::{Config, KvTransport};
/// use kvtree_http::HttpTransport;
///
/// let mut transport = HttpTransport::new(&Config::default())?;
/// let entry = transport.get("app/db/host")?;
/// ```
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    separator: char,
}

impl HttpTransport {
    /// Create a transport for `config.address`, attaching `config.token`
    /// to every request when set.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(token)?;
            value.set_sensitive(true);
            headers.insert(token_header()?, value);
        }
        let client = Client::builder().default_headers(headers).build()?;
        Self::with_client(client, config)
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(client: Client, config: &Config) -> Result<Self, Error> {
        let mut base_url = Url::parse(&config.address)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            separator: config.separator,
        })
    }

    /// Build `{base}/v1/kv/{key}`, keeping a trailing `/` on directory keys.
    fn kv_url(&self, key: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join("v1/kv/")?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(key.split('/'));
        Ok(url)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, Error> {
        let response = request.send()?;
        debug!(url = %response.url(), status = %response.status(), "kv request");
        Ok(response)
    }

    /// Fail on anything but success; callers deal with 404 first.
    fn check(response: Response) -> Result<Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Error::Status {
            status: response.status().as_u16(),
            body: response.text().unwrap_or_default(),
        })
    }

    /// Parse the `true` / `false` body returned by writes.
    fn boolean(response: Response) -> Result<bool, Error> {
        let text = Self::check(response)?.text()?;
        Ok(serde_json::from_str(text.trim())?)
    }

    fn get_kv(&self, key: &str) -> Result<Option<Entry>, Error> {
        let response = self.send(self.client.get(self.kv_url(key)?))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let pairs: Vec<KvPair> = Self::check(response)?.json()?;
        Ok(pairs.into_iter().next().map(Entry::from))
    }

    fn list_kv(&self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, Error> {
        let url = self.kv_url(prefix)?;
        let request = if recursive {
            self.client.get(url).query(&[("recurse", "")])
        } else {
            let separator = self.separator.to_string();
            self.client
                .get(url)
                .query(&[("keys", ""), ("separator", separator.as_str())])
        };

        let response = self.send(request)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = Self::check(response)?;

        if recursive {
            let pairs: Vec<KvPair> = response.json()?;
            Ok(pairs.into_iter().map(Entry::from).collect())
        } else {
            let keys: Vec<String> = response.json()?;
            Ok(keys.into_iter().map(Entry::empty).collect())
        }
    }

    fn put_kv(&self, key: &str, payload: &[u8], options: &PutOptions) -> Result<bool, Error> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(cas) = options.cas {
            query.push(("cas", cas.to_string()));
        }
        if let Some(flags) = options.flags {
            query.push(("flags", flags.to_string()));
        }

        let request = self
            .client
            .put(self.kv_url(key)?)
            .query(&query)
            .body(payload.to_vec());
        Self::boolean(self.send(request)?)
    }

    fn delete_kv(&self, key: &str, recursive: bool) -> Result<bool, Error> {
        let mut request = self.client.delete(self.kv_url(key)?);
        if recursive {
            request = request.query(&[("recurse", "")]);
        }
        Self::boolean(self.send(request)?)
    }
}

impl KvTransport for HttpTransport {
    fn get(&mut self, key: &str) -> Result<Option<Entry>, kvtree_core::Error> {
        Ok(self.get_kv(key)?)
    }

    fn list(&mut self, prefix: &str, recursive: bool) -> Result<Vec<Entry>, kvtree_core::Error> {
        Ok(self.list_kv(prefix, recursive)?)
    }

    fn put(
        &mut self,
        key: &str,
        payload: &[u8],
        options: &PutOptions,
    ) -> Result<bool, kvtree_core::Error> {
        Ok(self.put_kv(key, payload, options)?)
    }

    fn delete(&mut self, key: &str, recursive: bool) -> Result<bool, kvtree_core::Error> {
        Ok(self.delete_kv(key, recursive)?)
    }
}
