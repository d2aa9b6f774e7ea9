use super::super::CurlTransport;
use curl::{
    easy::{Easy, HttpVersion},
    Error as CurlError, Version,
};
use lazy_static::lazy_static;
use std::result::Result;
use webhdfs_http::{ResponseError, ResponseErrorKind, ResponseResult};

lazy_static! {
    static ref USER_AGENT: Box<str> = format!(
        "WebHdfsRust/webhdfs-curl-{}/rust-{}/libcurl-{}",
        env!("CARGO_PKG_VERSION"),
        env!("WEBHDFS_RUSTC_VERSION"),
        Version::get().version(),
    )
    .into();
}

pub(crate) fn user_agent(transport: &CurlTransport) -> String {
    let mut user_agent = USER_AGENT.to_string();
    if let Some(appended) = transport.appended_user_agent() {
        user_agent.push_str(appended);
    }
    user_agent
}

pub(crate) fn set_options(easy: &mut Easy, transport: &CurlTransport) -> ResponseResult<()> {
    handle(easy.useragent(&user_agent(transport)))?;
    handle(easy.http_version(HttpVersion::Any))?;
    handle(easy.show_header(false))?;
    handle(easy.signal(false))?;
    handle(easy.verbose(false))?;
    if let Some(verify_host) = transport.verify_host() {
        handle(easy.ssl_verify_host(verify_host))?;
    }
    if let Some(verify_peer) = transport.verify_peer() {
        handle(easy.ssl_verify_peer(verify_peer))?;
    }
    handle(easy.max_redirections(3))?;
    handle(easy.connect_timeout(transport.connect_timeout()))?;
    if let Some(timeout) = transport.request_timeout() {
        handle(easy.timeout(timeout))?;
    }
    handle(easy.tcp_keepalive(true))?;
    Ok(())
}

pub(crate) fn handle<T>(result: Result<T, CurlError>) -> Result<T, ResponseError> {
    result.map_err(|err| {
        if err.is_failed_init() {
            ResponseError::new(ResponseErrorKind::InitError, err)
        } else if err.is_unsupported_protocol()
            || err.is_bad_content_encoding()
            || err.is_filesize_exceeded()
            || err.is_http2_error()
            || err.is_http2_stream_error()
        {
            ResponseError::new(ResponseErrorKind::ProtocolError, err)
        } else if err.is_url_malformed() {
            ResponseError::new(ResponseErrorKind::InvalidURL, err)
        } else if err.is_couldnt_resolve_proxy() {
            ResponseError::new(ResponseErrorKind::ProxyError, err)
        } else if err.is_couldnt_resolve_host() {
            ResponseError::new(ResponseErrorKind::UnknownHostError, err)
        } else if err.is_couldnt_connect() {
            ResponseError::new(ResponseErrorKind::ConnectError, err)
        } else if err.is_send_error() {
            ResponseError::new(ResponseErrorKind::SendError, err)
        } else if err.is_recv_error() {
            ResponseError::new(ResponseErrorKind::ReceiveError, err)
        } else if err.is_read_error() || err.is_write_error() || err.is_send_fail_rewind() {
            ResponseError::new(ResponseErrorKind::LocalIOError, err)
        } else if err.is_aborted_by_callback() {
            ResponseError::new(ResponseErrorKind::CallbackAborted, err)
        } else if err.is_operation_timedout() {
            ResponseError::new(ResponseErrorKind::TimeoutError, err)
        } else if err.is_too_many_redirects() {
            ResponseError::new(ResponseErrorKind::TooManyRedirect, err)
        } else if err.is_ssl_connect_error()
            || err.is_peer_failed_verification()
            || err.is_ssl_engine_initfailed()
            || err.is_ssl_engine_notfound()
            || err.is_ssl_engine_setfailed()
            || err.is_ssl_certproblem()
            || err.is_ssl_cipher()
            || err.is_use_ssl_failed()
            || err.is_ssl_cacert_badfile()
            || err.is_ssl_crl_badfile()
            || err.is_ssl_shutdown_failed()
            || err.is_ssl_issuer_error()
        {
            ResponseError::new(ResponseErrorKind::SSLError, err)
        } else {
            ResponseError::new(ResponseErrorKind::UnknownError, err)
        }
    })
}
