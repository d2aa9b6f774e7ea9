mod error;
mod method;
mod transport;

pub use error::{Error as ResponseError, ErrorKind as ResponseErrorKind, Result as ResponseResult};
pub use method::{InvalidMethod, Method};
pub use transport::{Header, TransferHandler, Transport, TransportHandle};

/// HTTP 状态码
///
/// 连接从未建立时为 `0`
pub type StatusCode = u16;
