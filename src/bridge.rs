use super::{buffer::Buffer, upload::UploadSource};
use log::warn;
use std::io::{Error as IOError, ErrorKind as IOErrorKind, Result as IOResult};
use webhdfs_http::TransferHandler;

/// 连接传输句柄与请求的回调适配器
///
/// 响应体写入请求缓冲区，请求体从上传数据源中拉取
pub(crate) struct Bridge<'b, 'u> {
    body: &'b mut Buffer,
    upload: Option<&'b mut (dyn UploadSource + 'u)>,
}

impl<'b, 'u> Bridge<'b, 'u> {
    /// 仅接收响应体，不提供请求体
    #[inline]
    pub(crate) fn receiving(body: &'b mut Buffer) -> Self {
        Self { body, upload: None }
    }

    /// 接收响应体，同时从 `upload` 拉取请求体
    #[inline]
    pub(crate) fn uploading(body: &'b mut Buffer, upload: &'b mut (dyn UploadSource + 'u)) -> Self {
        Self {
            body,
            upload: Some(upload),
        }
    }
}

impl TransferHandler for Bridge<'_, '_> {
    fn write(&mut self, data: &[u8]) -> usize {
        match self.body.append(data) {
            Ok(()) => data.len(),
            Err(err) => {
                warn!("failed to buffer {} bytes of response body: {}", data.len(), err);
                0
            }
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> IOResult<usize> {
        let upload = match self.upload.as_mut() {
            Some(upload) => upload,
            None => return Ok(0),
        };
        let produced = upload.produce(buf)?;
        if produced > buf.len() {
            return Err(IOError::new(
                IOErrorKind::InvalidData,
                format!(
                    "upload source produced {} bytes into a {} bytes buffer",
                    produced,
                    buf.len()
                ),
            ));
        }
        Ok(produced)
    }
}
