use std::{error::Error, fmt, str::FromStr};

/// HTTP 方法
///
/// WebHDFS 只用到了这四种方法，其中 PUT 和 POST 可以携带请求体
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET 方法
    GET,
    /// PUT 方法
    PUT,
    /// POST 方法
    POST,
    /// DELETE 方法
    DELETE,
}

impl Method {
    /// 将 HTTP 方法转换成字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::PUT => "PUT",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
        }
    }

    /// 该方法是否可以携带请求体
    ///
    /// 只有可以携带请求体的方法才会走先重定向再上传的两阶段流程
    #[inline]
    pub fn allows_body(&self) -> bool {
        matches!(self, Method::PUT | Method::POST)
    }
}

impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "GET" => Ok(Method::GET),
            "PUT" => Ok(Method::PUT),
            "POST" => Ok(Method::POST),
            "DELETE" => Ok(Method::DELETE),
            method => Err(InvalidMethod(method.into())),
        }
    }
}

impl AsRef<str> for Method {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Method {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Display for Method {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Method {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 非法的 HTTP 方法
#[derive(Debug, Clone)]
pub struct InvalidMethod(Box<str>);

impl fmt::Display for InvalidMethod {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Invalid HTTP Method: {}", self.0)
    }
}

impl Error for InvalidMethod {}
