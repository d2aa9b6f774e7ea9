//! WebHDFS 客户端请求层
//!
//! 负责构建 WebHDFS 请求 URL，执行请求（包括上传时先向 NameNode 请求重定向地址，
//! 再以分块传输编码向 DataNode 上传数据的两阶段流程），并解析 JSON 响应

mod bridge;
mod buffer;
mod client;
pub mod config;
mod error;
mod executor;
mod request;
mod response;
mod upload;

#[cfg(test)]
mod test_utils;

pub use buffer::{Buffer, BufferError};
pub use client::WebHdfs;
pub use config::{Config, ConfigBuilder, ConfigError};
pub use error::{Error, ErrorKind, Result};
pub use request::Request;
pub use response::{DecodeError, RemoteException, Response};
pub use upload::{ReaderSource, UploadSource};
pub use webhdfs_http::{Method, ResponseError as TransportError, ResponseErrorKind as TransportErrorKind, StatusCode};

#[cfg(feature = "curl")]
pub use webhdfs_curl::{CurlTransport, CurlTransportBuilder};

pub use webhdfs_http as http;
