use super::buffer::Buffer;
use log::warn;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;
use webhdfs_http::StatusCode;

/// WebHDFS 响应
///
/// 由执行完毕的请求产生，拥有完整的响应体
#[derive(Debug, Clone)]
pub struct Response {
    status_code: StatusCode,
    body: Buffer,
}

/// 响应体解析错误
#[derive(Error, Debug)]
#[error("response-parse: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    #[inline]
    pub fn into_inner(self) -> serde_json::Error {
        self.0
    }
}

impl Response {
    #[inline]
    pub(crate) fn new(status_code: StatusCode, body: Buffer) -> Self {
        Self { status_code, body }
    }

    /// 获取 HTTP 状态码
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    /// 获取响应体
    #[inline]
    pub fn body(&self) -> &[u8] {
        self.body.as_bytes()
    }

    /// 获取响应体
    #[inline]
    pub fn into_body(self) -> Vec<u8> {
        self.body.into_vec()
    }

    /// 将响应体解析为 JSON
    ///
    /// 响应体为空时返回 `None`，解析失败时记录警告日志并返回 `None`
    pub fn decode(&self) -> Option<Value> {
        match self.try_decode() {
            Ok(value) => value,
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    /// 将响应体解析为 JSON，解析失败时返回错误
    ///
    /// 响应体为空时返回 `Ok(None)`
    pub fn try_decode(&self) -> Result<Option<Value>, DecodeError> {
        if self.body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(self.body.as_bytes())?))
    }

    /// 将响应体反序列化为指定类型
    #[inline]
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_slice(self.body.as_bytes())?)
    }

    /// 从响应体中解析 WebHDFS 远程异常
    #[inline]
    pub fn remote_exception(&self) -> Option<RemoteException> {
        RemoteException::from_slice(self.body.as_bytes())
    }
}

/// WebHDFS 远程异常
///
/// 服务端以 `{"RemoteException": {...}}` 的形式返回
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteException {
    exception: String,
    #[serde(default)]
    java_class_name: String,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct RemoteExceptionEnvelope {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

impl RemoteException {
    pub(crate) fn from_slice(body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        serde_json::from_slice::<RemoteExceptionEnvelope>(body)
            .ok()
            .map(|envelope| envelope.remote_exception)
    }

    /// 异常名称，例如 `FileNotFoundException`
    #[inline]
    pub fn exception(&self) -> &str {
        &self.exception
    }

    /// 异常的 Java 类名
    #[inline]
    pub fn java_class_name(&self) -> &str {
        &self.java_class_name
    }

    /// 异常信息
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &[u8]) -> Response {
        Response::new(200, Buffer::from(body.to_vec()))
    }

    #[test]
    fn test_decode_empty_body() {
        let response = Response::new(201, Buffer::new());
        assert_eq!(response.decode(), None);
        assert!(response.try_decode().unwrap().is_none());
    }

    #[test]
    fn test_decode_json_body() {
        let response = response(br#"{"k":1}"#);
        let value = response.decode().unwrap();
        assert_eq!(value["k"], 1);
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_decode_malformed_body() {
        let _ = env_logger::builder().is_test(true).try_init();
        let response = response(b"{\"k\":");
        assert_eq!(response.decode(), None);
        let err = response.try_decode().unwrap_err();
        assert!(err.to_string().starts_with("response-parse: "));
    }

    #[test]
    fn test_deserialize_body() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct FileChecksum {
            algorithm: String,
            length: u64,
        }

        let response = response(br#"{"algorithm":"MD5-of-1MD5-of-512CRC32","bytes":"00","length":28}"#);
        let checksum: FileChecksum = response.deserialize().unwrap();
        assert_eq!(checksum.algorithm, "MD5-of-1MD5-of-512CRC32");
        assert_eq!(checksum.length, 28);
        assert!(response.remote_exception().is_none());
    }

    #[test]
    fn test_remote_exception() {
        let response = response(
            br#"{"RemoteException":{"exception":"FileNotFoundException","javaClassName":"java.io.FileNotFoundException","message":"File does not exist: /foo/a.patch"}}"#,
        );
        let exception = response.remote_exception().unwrap();
        assert_eq!(exception.exception(), "FileNotFoundException");
        assert_eq!(exception.java_class_name(), "java.io.FileNotFoundException");
        assert_eq!(exception.message(), "File does not exist: /foo/a.patch");
        assert!(!response.into_body().is_empty());
    }
}
