use super::utils::easy::handle;
use curl::easy::{Easy, List, ReadError};
use log::debug;
use std::{cell::RefCell, panic};
use webhdfs_http::{
    Header, Method, ResponseError, ResponseErrorKind, ResponseResult, StatusCode, TransferHandler,
    TransportHandle,
};

/// 基于 Curl Easy 句柄的 HTTP 传输句柄
#[derive(Debug)]
pub struct CurlHandle {
    easy: Easy,
}

impl CurlHandle {
    /// 创建新的 Curl Easy 句柄
    pub fn new() -> ResponseResult<Self> {
        // libcurl 无法分配句柄时 Easy::new() 会直接 panic
        let easy = panic::catch_unwind(Easy::new).map_err(|_| {
            ResponseError::new(ResponseErrorKind::InitError, "failed to initialize curl easy handle")
        })?;
        Ok(Self { easy })
    }

    #[inline]
    pub(crate) fn easy_mut(&mut self) -> &mut Easy {
        &mut self.easy
    }
}

impl TransportHandle for CurlHandle {
    #[inline]
    fn set_url(&mut self, url: &str) -> ResponseResult<()> {
        handle(self.easy.url(url))
    }

    fn set_method(&mut self, method: Method) -> ResponseResult<()> {
        match method {
            Method::GET => handle(self.easy.get(true)),
            method => handle(self.easy.custom_request(method.as_str())),
        }
    }

    #[inline]
    fn set_follow_redirection(&mut self, follow: bool) -> ResponseResult<()> {
        handle(self.easy.follow_location(follow))
    }

    fn set_headers(&mut self, headers: &[Header<'_>]) -> ResponseResult<()> {
        let mut header_list = List::new();
        handle(header_list.append("Expect:"))?;
        for (header_name, header_value) in headers {
            let line = format!("{}: {}", header_name, header_value);
            handle(header_list.append(&line))?;
        }
        handle(self.easy.http_headers(header_list))
    }

    fn set_upload(&mut self, method: Method) -> ResponseResult<()> {
        match method {
            Method::PUT => handle(self.easy.upload(true)),
            Method::POST => handle(self.easy.post(true)),
            method => Err(ResponseError::new(
                ResponseErrorKind::ProtocolError,
                format!("{} request cannot carry a body", method),
            )),
        }
    }

    fn perform(&mut self, handler: &mut dyn TransferHandler) -> ResponseResult<()> {
        let handler = RefCell::new(handler);
        let mut transfer = self.easy.transfer();
        handle(transfer.write_function(|data| Ok(handler.borrow_mut().write(data))))?;
        handle(transfer.read_function(|buf| {
            handler.borrow_mut().read(buf).map_err(|err| {
                debug!("request body source failed: {}", err);
                ReadError::Abort
            })
        }))?;
        handle(transfer.perform())
    }

    #[inline]
    fn redirect_url(&mut self) -> ResponseResult<Option<String>> {
        handle(self.easy.redirect_url()).map(|url| url.map(ToOwned::to_owned))
    }

    #[inline]
    fn response_code(&mut self) -> ResponseResult<StatusCode> {
        handle(self.easy.response_code()).map(|code| code as StatusCode)
    }
}
