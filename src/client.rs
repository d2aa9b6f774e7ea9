use super::{config::Config, error::Result, request::Request};
use std::{fmt, sync::Arc};
use webhdfs_http::Transport;

/// WebHDFS 客户端
///
/// 持有文件系统配置和 HTTP 传输引擎，负责创建请求。
/// 可以被廉价地复制，并在多个线程之间共享，每个线程各自执行自己的请求
#[derive(Clone)]
pub struct WebHdfs {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl WebHdfs {
    /// 使用基于 Curl 的 HTTP 传输引擎创建客户端
    #[cfg(feature = "curl")]
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, webhdfs_curl::CurlTransport::default())
    }

    /// 使用指定的 HTTP 传输引擎创建客户端
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// 获取文件系统配置
    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 为 `path` 创建请求
    ///
    /// 路径开头的一个 `/` 会被去掉，空路径表示根目录
    #[inline]
    pub fn request<'u>(&self, path: &str) -> Result<Request<'u>> {
        Request::new(self.transport.to_owned(), &self.config, path)
    }
}

impl fmt::Debug for WebHdfs {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("WebHdfs").field("config", &self.config).finish()
    }
}
