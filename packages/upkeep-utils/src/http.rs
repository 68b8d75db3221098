use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{StatusCode, Uri};
#[cfg(not(feature = "rustls-platform-verifier"))]
use hyper_rustls::ConfigBuilderExt;
use hyper_util::{
    client::legacy::{
        connect::{Connect, HttpConnector},
        Client,
    },
    rt::TokioExecutor,
};
use once_cell::sync::Lazy;
use rustls::ClientConfig;
#[cfg(feature = "rustls-platform-verifier")]
use rustls_platform_verifier::BuilderVerifierExt;
use std::{collections::HashMap, fmt};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub struct ResponseData {
    pub status: u16,
    pub body: Option<Bytes>,
}

impl ResponseData {
    pub fn is_ok(&self) -> bool {
        http_status_is_ok(self.status)
    }
}

/// Issue a GET request, picking the TLS connector when the scheme is https.
pub async fn get(url: Uri, header_map: &HashMap<String, String>) -> Result<ResponseData, BoxError> {
    if url.scheme_str() == Some("https") {
        https_get(url, header_map).await
    } else {
        http_get(url, header_map).await
    }
}

pub async fn http_get(
    url: Uri,
    header_map: &HashMap<String, String>,
) -> Result<ResponseData, BoxError> {
    let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
    send(client, url, header_map).await
}

pub async fn https_get(
    url: Uri,
    header_map: &HashMap<String, String>,
) -> Result<ResponseData, BoxError> {
    let https = https_config()?;
    let client = Client::builder(TokioExecutor::new()).build(https);
    send(client, url, header_map).await
}

async fn send<C>(
    client: Client<C, Empty<Bytes>>,
    url: Uri,
    header_map: &HashMap<String, String>,
) -> Result<ResponseData, BoxError>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    tracing::debug!(%url, "sending GET request");
    let mut req = hyper::Request::builder().method("GET").uri(url);
    for (key, value) in header_map {
        req = req.header(key, value);
    }
    let req = req.body(Empty::<Bytes>::new())?;

    let res = client.request(req).await?;
    let status = res.status().as_u16();
    let body = res.into_body().collect().await?.to_bytes();
    tracing::debug!(status, bytes = body.len(), "received response");
    Ok(ResponseData {
        status,
        body: Some(body),
    })
}

static PROVIDER: Lazy<std::sync::Arc<rustls::crypto::CryptoProvider>> =
    Lazy::new(|| std::sync::Arc::new(rustls::crypto::ring::default_provider()));

#[derive(Debug)]
struct HttpsConfigError {
    error: BoxError,
}

impl fmt::Display for HttpsConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpsConfigError: {}", self.error)
    }
}

impl std::error::Error for HttpsConfigError {}

fn https_config() -> Result<hyper_rustls::HttpsConnector<HttpConnector>, HttpsConfigError> {
    let provider = PROVIDER.clone();
    let tls: ClientConfig;
    #[cfg(feature = "rustls-platform-verifier")]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpsConfigError { error: Box::new(e) })?
            .with_platform_verifier()
            .map_err(|e| HttpsConfigError { error: Box::new(e) })?
            .with_no_client_auth();
    }
    #[cfg(all(feature = "webpki-roots", not(feature = "rustls-platform-verifier")))]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpsConfigError { error: Box::new(e) })?
            .with_webpki_roots()
            .with_no_client_auth();
    }
    #[cfg(all(
        feature = "native-tokio",
        not(feature = "webpki-roots"),
        not(feature = "rustls-platform-verifier")
    ))]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpsConfigError { error: Box::new(e) })?
            .with_native_roots()
            .map_err(|e| HttpsConfigError { error: Box::new(e) })?
            .with_no_client_auth();
    }
    #[cfg(all(
        not(feature = "native-tokio"),
        not(feature = "webpki-roots"),
        not(feature = "rustls-platform-verifier")
    ))]
    {
        compile_error!("No TLS backend enabled");
    }
    Ok(hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .build())
}

pub fn http_status_is_ok(status: u16) -> bool {
    if let Ok(status) = StatusCode::from_u16(status) {
        !(status.is_client_error() || status.is_server_error())
    } else {
        false
    }
}
