use http::Method;
use http::Uri;
use percent_encoding::utf8_percent_encode;

use urlsign_core::{Error, Result, DEFAULT_ACCOUNT};

use crate::constants::{DEFAULT_BASE_URL, GOOG_URI_ENCODE_SET};

/// Value of an extension header.
///
/// Extension values nest: a [`Value::Group`] under `meta` turns into
/// `x-goog-meta-<key>` headers, a [`Value::List`] into a comma joined value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A plain string, used as is.
    String(String),
    /// A symbolic value such as `public_read`, rendered dasherized (`public-read`).
    Symbol(String),
    /// A boolean, rendered as `true` or `false`.
    Bool(bool),
    /// An integer, rendered in decimal.
    Int(i64),
    /// Several values for the same key.
    List(Vec<Value>),
    /// Nested key/value pairs, flattened into `<parent>-<child>` keys.
    Group(Vec<(String, Value)>),
    /// No value. The key is dropped.
    Null,
}

impl Value {
    /// Build a symbolic value.
    pub fn symbol(v: impl Into<String>) -> Self {
        Value::Symbol(v.into())
    }

    /// Build a group from key/value pairs.
    pub fn group<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Group(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list from values.
    pub fn list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

/// Resource describes everything needed to sign a URL for one object.
///
/// A resource is never mutated: [`Resource::with_expires_at`] and friends
/// return a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    bucket: String,
    object: String,
    method: Method,
    base_url: Option<String>,
    content_type: Option<String>,
    content_md5: Option<String>,
    expires_at: Option<i64>,
    account: String,
    extensions: Vec<(String, Value)>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl Resource {
    /// Start building a resource for `bucket` and `object`.
    ///
    /// ```
    /// use urlsign_google::{Resource, Value};
    ///
    /// let resource = Resource::builder("downloads", "movie.mp4")
    ///     .method(http::Method::PUT)
    ///     .content_type("video/mp4")
    ///     .extension("acl", Value::symbol("public_read"))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(resource.path(), "/downloads/movie.mp4");
    /// ```
    pub fn builder(bucket: impl Into<String>, object: impl Into<String>) -> ResourceBuilder {
        ResourceBuilder::new(bucket, object)
    }

    /// The bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object name.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// The HTTP verb the URL grants.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The base URL, `https://storage.googleapis.com` unless set.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Check if the base URL was set explicitly.
    pub fn has_base_url(&self) -> bool {
        self.base_url.is_some()
    }

    /// Content type the request will carry, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Base64 encoded MD5 of the content the request will carry, if any.
    pub fn content_md5(&self) -> Option<&str> {
        self.content_md5.as_deref()
    }

    /// Expiration as unix seconds, if set.
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Account used to look up credentials, or the resolved access id.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Extension headers in insertion order.
    pub fn extensions(&self) -> &[(String, Value)] {
        &self.extensions
    }

    /// Extra raw headers, only signed by V4.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Extra query parameters, only signed by V4.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Percent encoded resource path: `/<bucket>/<object>`.
    pub fn path(&self) -> String {
        format!(
            "/{}/{}",
            utf8_percent_encode(&self.bucket, &GOOG_URI_ENCODE_SET),
            utf8_percent_encode(&self.object, &GOOG_URI_ENCODE_SET)
        )
    }

    /// The host (and port, if any) of the base URL.
    pub fn host(&self) -> Result<String> {
        let (_, authority) = parse_base_url(self.base_url())?;
        Ok(authority)
    }

    /// The base URL without trailing slash followed by [`Resource::path`].
    pub fn url_without_query(&self) -> String {
        format!("{}{}", self.base_url().trim_end_matches('/'), self.path())
    }

    /// Return a copy expiring at `expires_at` unix seconds.
    pub fn with_expires_at(&self, expires_at: i64) -> Self {
        Self {
            expires_at: Some(expires_at),
            ..self.clone()
        }
    }

    /// Return a copy using `account`.
    pub fn with_account(&self, account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..self.clone()
        }
    }

    /// Return a copy using `base_url`.
    pub fn with_base_url(&self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        parse_base_url(&base_url)?;
        Ok(Self {
            base_url: Some(base_url),
            ..self.clone()
        })
    }
}

/// Builder for [`Resource`].
#[derive(Debug, Clone)]
pub struct ResourceBuilder {
    resource: Resource,
}

impl ResourceBuilder {
    fn new(bucket: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            resource: Resource {
                bucket: bucket.into(),
                object: object.into(),
                method: Method::GET,
                base_url: None,
                content_type: None,
                content_md5: None,
                expires_at: None,
                account: DEFAULT_ACCOUNT.to_string(),
                extensions: Vec::new(),
                headers: Vec::new(),
                query: Vec::new(),
            },
        }
    }

    /// Set the HTTP verb. Defaults to `GET`.
    pub fn method(mut self, method: Method) -> Self {
        self.resource.method = method;
        self
    }

    /// Set the base URL. Defaults to `https://storage.googleapis.com`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.resource.base_url = Some(base_url.into());
        self
    }

    /// Set the content type.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.resource.content_type = Some(content_type.into());
        self
    }

    /// Set the base64 encoded content MD5.
    pub fn content_md5(mut self, content_md5: impl Into<String>) -> Self {
        self.resource.content_md5 = Some(content_md5.into());
        self
    }

    /// Set the expiration as unix seconds.
    pub fn expires_at(mut self, expires_at: i64) -> Self {
        self.resource.expires_at = Some(expires_at);
        self
    }

    /// Set the account used to look up credentials. Defaults to `default`.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.resource.account = account.into();
        self
    }

    /// Add an extension header like `acl` or `meta`.
    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.resource.extensions.push((key.into(), value.into()));
        self
    }

    /// Add a raw header to sign with V4.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter to sign with V4.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.resource.query.push((key.into(), value.into()));
        self
    }

    /// Validate and build the resource.
    pub fn build(self) -> Result<Resource> {
        let resource = self.resource;

        if resource.bucket.trim().is_empty() {
            return Err(Error::validation_failure(
                "bucket",
                "bucket must not be empty",
            ));
        }
        if resource.object.trim().is_empty() {
            return Err(Error::validation_failure(
                "object",
                "object name must not be empty",
            ));
        }
        if ![
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::POST,
            Method::DELETE,
        ]
        .contains(&resource.method)
        {
            return Err(Error::validation_failure(
                "method",
                format!("{} is not a supported verb", resource.method),
            ));
        }
        if let Some(base_url) = &resource.base_url {
            parse_base_url(base_url)?;
        }

        Ok(resource)
    }
}

/// Split a base URL into scheme and authority.
fn parse_base_url(base_url: &str) -> Result<(String, String)> {
    let uri: Uri = base_url.parse().map_err(|e| {
        Error::validation_failure("base_url", format!("{base_url} is not a valid url"))
            .with_source(e)
    })?;

    match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) => Ok((scheme.to_string(), authority.to_string())),
        _ => Err(Error::validation_failure(
            "base_url",
            format!("{base_url} must contain scheme and host"),
        )),
    }
}
