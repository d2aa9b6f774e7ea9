use std::time::Duration;
use webhdfs_http::{ResponseError, ResponseErrorKind, ResponseResult, Transport, TransportHandle};

mod handle;
mod utils;

pub use handle::CurlHandle;

/// 基于 Curl 的 HTTP 传输引擎
///
/// 每次打开句柄都会创建一个新的 Curl Easy 句柄，句柄之间不共享连接
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
    verify_host: Option<bool>,
    verify_peer: Option<bool>,
    appended_user_agent: Option<String>,
}

impl CurlTransport {
    /// 获取连接超时时长
    #[inline]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// 获取请求超时时长
    #[inline]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// 是否校验 SSL 证书中的主机名
    #[inline]
    pub fn verify_host(&self) -> Option<bool> {
        self.verify_host
    }

    /// 是否校验 SSL 证书
    #[inline]
    pub fn verify_peer(&self) -> Option<bool> {
        self.verify_peer
    }

    /// 获取追加的 UserAgent
    #[inline]
    pub fn appended_user_agent(&self) -> Option<&str> {
        self.appended_user_agent.as_deref()
    }

    /// 创建基于 Curl 的 HTTP 传输引擎构建器
    #[inline]
    pub fn builder() -> CurlTransportBuilder {
        CurlTransportBuilder::default()
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: None,
            verify_host: None,
            verify_peer: None,
            appended_user_agent: None,
        }
    }
}

impl Transport for CurlTransport {
    fn open(&self) -> ResponseResult<Box<dyn TransportHandle>> {
        let mut handle = CurlHandle::new()?;
        utils::easy::set_options(handle.easy_mut(), self).map_err(into_init_error)?;
        Ok(Box::new(handle))
    }
}

/// 打开句柄期间不会发生网络访问，所有错误都归类为初始化失败
fn into_init_error(err: ResponseError) -> ResponseError {
    match err.kind() {
        ResponseErrorKind::InitError => err,
        _ => ResponseError::new(ResponseErrorKind::InitError, err),
    }
}

/// 基于 Curl 的 HTTP 传输引擎构建器
#[derive(Default)]
pub struct CurlTransportBuilder {
    inner: CurlTransport,
}

impl CurlTransportBuilder {
    /// 设置连接超时时长，默认为 5 秒
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.inner.connect_timeout = timeout;
        self
    }

    /// 设置请求超时时长，默认不超时
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.inner.request_timeout = timeout;
        self
    }

    /// 设置是否校验 SSL 证书中的主机名，默认使用 Curl 的默认行为
    pub fn verify_host(mut self, verify: bool) -> Self {
        self.inner.verify_host = Some(verify);
        self
    }

    /// 设置是否校验 SSL 证书，默认使用 Curl 的默认行为
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.inner.verify_peer = Some(verify);
        self
    }

    /// 设置追加的 UserAgent
    pub fn appended_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.inner.appended_user_agent = Some(user_agent.into());
        self
    }

    /// 构建基于 Curl 的 HTTP 传输引擎
    pub fn build(self) -> CurlTransport {
        self.inner
    }
}
