use super::{buffer::BufferError, response::RemoteException};
use anyhow::Error as AnyError;
use std::{
    error::Error as StdError,
    fmt::{self, Debug, Display},
    result,
};
use webhdfs_http::{ResponseError as HttpResponseError, ResponseErrorKind as HttpResponseErrorKind, StatusCode};

/// WebHDFS 请求错误类型
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 构建请求 URL 失败，请求没有发出
    BuildError,

    /// 传输句柄初始化失败，请求没有发出
    InitError,

    /// 传输失败
    TransportError(HttpResponseErrorKind),

    /// 上传请求的第一阶段没有返回可用的重定向地址
    MissingRedirect,
}

/// WebHDFS 请求错误
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    error: AnyError,
    url: Option<String>,
    status_code: StatusCode,
    response_body_sample: Vec<u8>,
}

/// WebHDFS 请求结果
pub type Result<T> = result::Result<T, Error>;

const RESPONSE_BODY_SAMPLE_LEN_LIMIT: usize = 1024;

impl Error {
    /// 创建 WebHDFS 请求错误
    #[inline]
    pub fn new(kind: ErrorKind, err: impl Into<AnyError>) -> Self {
        Error {
            kind,
            error: err.into(),
            url: None,
            status_code: 0,
            response_body_sample: Default::default(),
        }
    }

    /// 创建 WebHDFS 请求错误
    #[inline]
    pub fn new_with_msg(kind: ErrorKind, msg: impl Display + Debug + Send + Sync + 'static) -> Self {
        Self::new(kind, AnyError::msg(msg))
    }

    /// 设置出错时正在访问的 URL
    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// 设置出错时获取到的 HTTP 状态码
    #[inline]
    #[must_use]
    pub fn status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    /// 设置响应体样本，超过 1 KB 的部分将被丢弃
    #[inline]
    #[must_use]
    pub fn response_body_sample(mut self, body: &[u8]) -> Self {
        let len = body.len().min(RESPONSE_BODY_SAMPLE_LEN_LIMIT);
        self.response_body_sample = body[..len].to_vec();
        self
    }

    /// 获取错误类型
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// 获取出错时正在访问的 URL
    #[inline]
    pub fn accessed_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// 获取 HTTP 状态码
    ///
    /// 连接从未建立时为 `0`
    #[inline]
    pub fn http_status_code(&self) -> StatusCode {
        self.status_code
    }

    /// 获取响应体样本
    #[inline]
    pub fn body_sample(&self) -> &[u8] {
        &self.response_body_sample
    }

    /// 从响应体样本中解析 WebHDFS 远程异常
    #[inline]
    pub fn remote_exception(&self) -> Option<RemoteException> {
        RemoteException::from_slice(&self.response_body_sample)
    }

    #[inline]
    pub fn into_inner(self) -> AnyError {
        self.error
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.error, f)?;
        if let Some(url) = self.url.as_ref() {
            write!(f, " (url: {})", url)?;
        }
        Ok(())
    }
}

impl StdError for Error {
    #[inline]
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.error.as_ref())
    }
}

impl From<HttpResponseError> for Error {
    #[inline]
    fn from(error: HttpResponseError) -> Self {
        match error.kind() {
            HttpResponseErrorKind::InitError => Self::new(ErrorKind::InitError, error),
            kind => Self::new(ErrorKind::TransportError(kind), error),
        }
    }
}

impl From<HttpResponseErrorKind> for ErrorKind {
    #[inline]
    fn from(kind: HttpResponseErrorKind) -> Self {
        ErrorKind::TransportError(kind)
    }
}

impl From<BufferError> for Error {
    #[inline]
    fn from(error: BufferError) -> Self {
        Self::new(ErrorKind::BuildError, error)
    }
}

#[allow(dead_code)]
fn ignore() {
    assert_impl::assert_impl!(Send: Error);
    assert_impl::assert_impl!(Sync: Error);
}
