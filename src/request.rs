use super::{
    buffer::Buffer,
    config::Config,
    error::{Error, ErrorKind, Result},
    executor,
    response::Response,
    upload::UploadSource,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::{
    fmt::{self, Display},
    sync::Arc,
};
use webhdfs_http::{Method, Transport};

const PATH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// WebHDFS 请求
///
/// 创建时即构建好完整的请求 URL，包括用户身份和委托令牌参数。
/// 调用方可以继续追加操作参数，并为上传操作绑定数据源，最后调用 [`Request::execute`] 发送请求。
/// 请求只能被执行一次。
pub struct Request<'u> {
    transport: Arc<dyn Transport>,
    buffer: Buffer,
    upload: Option<Box<dyn UploadSource + 'u>>,
}

impl<'u> Request<'u> {
    pub(crate) fn new(transport: Arc<dyn Transport>, config: &Config, path: &str) -> Result<Self> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let mut buffer = Buffer::new();
        buffer.append_fmt(format_args!(
            "{}://{}:{}/webhdfs/v1/{}?",
            config.scheme(),
            config.host(),
            config.webhdfs_port(),
            utf8_percent_encode(path, PATH_ENCODE_SET),
        ))?;
        if let Some(user) = config.user() {
            buffer.append_fmt(format_args!("user.name={}&", utf8_percent_encode(user, QUERY_ENCODE_SET)))?;
        }
        if let Some(token) = config.token() {
            buffer.append_fmt(format_args!("delegation={}&", utf8_percent_encode(token, QUERY_ENCODE_SET)))?;
        }
        Ok(Self {
            transport,
            buffer,
            upload: None,
        })
    }

    /// 追加格式化的查询参数
    ///
    /// 内容原样追加到 URL 末尾，调用方负责转义，例如 `format_args!("op=CREATE&overwrite={}&", true)`
    #[inline]
    pub fn append_args(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        Ok(self.buffer.append_fmt(args)?)
    }

    /// 追加一个转义后的 `key=value&` 查询参数
    pub fn append_param(&mut self, key: &str, value: impl Display) -> Result<()> {
        let value = value.to_string();
        self.append_args(format_args!(
            "{}={}&",
            utf8_percent_encode(key, QUERY_ENCODE_SET),
            utf8_percent_encode(&value, QUERY_ENCODE_SET),
        ))
    }

    /// 绑定上传数据源
    ///
    /// 仅对 PUT 和 POST 请求有效，数据源只会在获取到 DataNode 的重定向地址后才被调用
    #[inline]
    pub fn set_upload(&mut self, source: impl UploadSource + 'u) {
        self.upload = Some(Box::new(source));
    }

    /// 是否已经绑定上传数据源
    #[inline]
    pub fn has_upload(&self) -> bool {
        self.upload.is_some()
    }

    /// 获取当前构建的请求 URL
    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.buffer.as_str().ok()
    }

    /// 发送请求，阻塞直到传输结束
    ///
    /// 未绑定上传数据源时只发送一次请求，并自动跟随重定向。
    /// 绑定了上传数据源的 PUT 或 POST 请求先发送不带请求体的请求，
    /// 再以分块传输编码将数据上传到响应中的重定向地址
    pub fn execute(self, method: Method) -> Result<Response> {
        let Self {
            transport,
            buffer,
            mut upload,
        } = self;
        let url = buffer
            .as_str()
            .map_err(|err| Error::new(ErrorKind::BuildError, err))?
            .to_owned();
        executor::execute(transport.as_ref(), &url, buffer, upload.as_deref_mut(), method)
    }
}

impl fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Request")
            .field("url", &String::from_utf8_lossy(self.buffer.as_bytes()))
            .field("upload", &self.upload.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockTransport;
    use anyhow::Result;

    fn request(config: &Config, path: &str) -> Result<Request<'static>> {
        Ok(Request::new(Arc::new(MockTransport::default()), config, path)?)
    }

    #[test]
    fn test_build_url() -> Result<()> {
        let config = Config::builder()
            .host("namenode")
            .webhdfs_port(50070)
            .user("alice")
            .build()?;
        let request = request(&config, "/tmp/a.txt")?;
        assert_eq!(
            request.url(),
            Some("http://namenode:50070/webhdfs/v1/tmp/a.txt?user.name=alice&")
        );
        Ok(())
    }

    #[test]
    fn test_build_url_with_ssl_and_token() -> Result<()> {
        let config = Config::builder()
            .use_ssl(true)
            .host("namenode")
            .webhdfs_port(50470)
            .user("alice")
            .token("tok")
            .build()?;
        let url = request(&config, "tmp/a.txt")?.url().map(ToOwned::to_owned);
        assert_eq!(
            url.as_deref(),
            Some("https://namenode:50470/webhdfs/v1/tmp/a.txt?user.name=alice&delegation=tok&")
        );
        let url = url.unwrap();
        assert_eq!(url.matches("user.name=").count(), 1);
        assert_eq!(url.matches("delegation=").count(), 1);
        Ok(())
    }

    #[test]
    fn test_build_root_url() -> Result<()> {
        let config = Config::default();
        assert_eq!(
            request(&config, "")?.url(),
            Some("http://localhost:50070/webhdfs/v1/?")
        );
        assert_eq!(
            request(&config, "/")?.url(),
            Some("http://localhost:50070/webhdfs/v1/?")
        );
        Ok(())
    }

    #[test]
    fn test_strip_only_one_leading_slash() -> Result<()> {
        let config = Config::default();
        assert_eq!(
            request(&config, "//a")?.url(),
            Some("http://localhost:50070/webhdfs/v1//a?")
        );
        Ok(())
    }

    #[test]
    fn test_escape_path_and_params() -> Result<()> {
        let config = Config::builder().user("dr who").token("a+b/c=").build()?;
        let mut request = request(&config, "/data/中文 file#1.txt")?;
        request.append_args(format_args!("op={}&", "CREATE"))?;
        request.append_param("overwrite", true)?;
        request.append_param("renewer", "x&y")?;
        assert_eq!(
            request.url(),
            Some(
                "http://localhost:50070/webhdfs/v1/data/%E4%B8%AD%E6%96%87%20file%231.txt\
                 ?user.name=dr%20who&delegation=a%2Bb%2Fc%3D&op=CREATE&overwrite=true&renewer=x%26y&"
            )
        );
        assert!(!request.has_upload());
        request.set_upload(|_: &mut [u8]| -> std::io::Result<usize> { Ok(0) });
        assert!(request.has_upload());
        Ok(())
    }
}
