use super::{Method, ResponseResult, StatusCode};
use std::io::Result as IOResult;

/// HTTP 头
///
/// 由头名称和头的值组成
pub type Header<'h> = (&'h str, &'h str);

/// HTTP 传输引擎
///
/// 实现该接口，即可为 WebHDFS 请求提供底层传输能力。
/// 每次请求执行都会打开一个新的句柄，句柄不会在多个请求之间共享，也不会被复用。
pub trait Transport: Send + Sync {
    /// 打开一个新的传输句柄
    ///
    /// 无法初始化时应返回 [`crate::ResponseErrorKind::InitError`] 类型的错误
    fn open(&self) -> ResponseResult<Box<dyn TransportHandle>>;
}

/// HTTP 传输句柄
///
/// 句柄在被 `Drop` 时释放所有底层资源
pub trait TransportHandle {
    /// 设置请求 URL
    fn set_url(&mut self, url: &str) -> ResponseResult<()>;

    /// 设置 HTTP 方法
    fn set_method(&mut self, method: Method) -> ResponseResult<()>;

    /// 设置是否自动跟随重定向
    fn set_follow_redirection(&mut self, follow: bool) -> ResponseResult<()>;

    /// 设置额外的 HTTP 头，替换之前设置过的所有额外 HTTP 头
    fn set_headers(&mut self, headers: &[Header<'_>]) -> ResponseResult<()>;

    /// 开启请求体上传
    ///
    /// 请求体将通过 [`TransferHandler::read`] 按需拉取，`method` 决定上传语义（PUT 或 POST）
    fn set_upload(&mut self, method: Method) -> ResponseResult<()>;

    /// 发送请求，阻塞直到传输结束
    ///
    /// 传输过程中，响应体数据通过 [`TransferHandler::write`] 传出，
    /// 请求体数据通过 [`TransferHandler::read`] 拉取
    fn perform(&mut self, handler: &mut dyn TransferHandler) -> ResponseResult<()>;

    /// 获取最近一次响应中的重定向目标 URL
    fn redirect_url(&mut self) -> ResponseResult<Option<String>>;

    /// 获取最近一次响应的状态码，连接从未建立时返回 `0`
    fn response_code(&mut self) -> ResponseResult<StatusCode>;
}

/// 传输数据处理器
///
/// 由传输引擎在传输过程中按需调用，可能被调用任意多次
pub trait TransferHandler {
    /// 接收响应体数据
    ///
    /// 返回接受的字节数，返回值与 `data.len()` 不同将导致传输中止
    fn write(&mut self, data: &[u8]) -> usize;

    /// 读取请求体数据
    ///
    /// 返回写入 `buf` 的字节数，返回 `Ok(0)` 表示请求体已经结束，返回错误将导致传输中止
    fn read(&mut self, buf: &mut [u8]) -> IOResult<usize>;
}
