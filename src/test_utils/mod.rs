use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};
use webhdfs_http::{
    Header, Method, ResponseError, ResponseErrorKind, ResponseResult, StatusCode, TransferHandler, Transport,
    TransportHandle,
};

const READ_CHUNK_SIZE: usize = 16;
const WRITE_CHUNK_SIZE: usize = 3;

/// 一次 `perform` 的预设结果
#[derive(Clone, Debug, Default)]
pub(crate) struct MockPhase {
    status_code: StatusCode,
    body: Vec<u8>,
    redirect: Option<String>,
    error: Option<ResponseErrorKind>,
    echo: bool,
}

impl MockPhase {
    pub(crate) fn ok(status_code: StatusCode, body: &[u8]) -> Self {
        Self {
            status_code,
            body: body.to_vec(),
            ..Default::default()
        }
    }

    pub(crate) fn redirect(status_code: StatusCode, location: &str) -> Self {
        Self {
            status_code,
            redirect: Some(location.to_owned()),
            ..Default::default()
        }
    }

    pub(crate) fn fail(status_code: StatusCode, kind: ResponseErrorKind) -> Self {
        Self {
            status_code,
            error: Some(kind),
            ..Default::default()
        }
    }

    /// 将上传的请求体原样作为响应体返回
    pub(crate) fn echo(status_code: StatusCode) -> Self {
        Self {
            status_code,
            echo: true,
            ..Default::default()
        }
    }

    pub(crate) fn body(mut self, body: &[u8]) -> Self {
        self.body = body.to_vec();
        self
    }
}

/// 所有句柄上发生过的调用
#[derive(Clone, Debug, Default)]
pub(crate) struct Journal {
    pub(crate) opened: usize,
    pub(crate) released: usize,
    pub(crate) urls: Vec<String>,
    pub(crate) methods: Vec<Method>,
    pub(crate) follow_redirection: Vec<bool>,
    pub(crate) headers: Vec<Vec<(String, String)>>,
    pub(crate) uploads: Vec<Method>,
    pub(crate) performs: usize,
    pub(crate) request_bodies: Vec<Vec<u8>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    fail_to_open: bool,
    phases: Mutex<VecDeque<MockPhase>>,
    journal: Mutex<Journal>,
}

/// 按预设脚本响应的传输引擎
///
/// 克隆出的副本共享同一份脚本和调用记录
#[derive(Clone, Debug, Default)]
pub(crate) struct MockTransport {
    inner: Arc<MockTransportInner>,
}

impl MockTransport {
    pub(crate) fn new(phases: Vec<MockPhase>) -> Self {
        Self {
            inner: Arc::new(MockTransportInner {
                fail_to_open: false,
                phases: Mutex::new(phases.into()),
                journal: Default::default(),
            }),
        }
    }

    pub(crate) fn failing_to_open() -> Self {
        Self {
            inner: Arc::new(MockTransportInner {
                fail_to_open: true,
                ..Default::default()
            }),
        }
    }

    /// 获取调用记录的快照
    pub(crate) fn journal(&self) -> Journal {
        Journal::clone(&self.inner.journal())
    }
}

impl MockTransportInner {
    fn journal(&self) -> MutexGuard<'_, Journal> {
        self.journal.lock().unwrap()
    }
}

impl Transport for MockTransport {
    fn open(&self) -> ResponseResult<Box<dyn TransportHandle>> {
        if self.inner.fail_to_open {
            return Err(ResponseError::new(
                ResponseErrorKind::InitError,
                "mock transport refuses to open handles",
            ));
        }
        self.inner.journal().opened += 1;
        Ok(Box::new(MockHandle {
            transport: self.inner.to_owned(),
            last_phase: None,
        }))
    }
}

struct MockHandle {
    transport: Arc<MockTransportInner>,
    last_phase: Option<MockPhase>,
}

impl MockHandle {
    fn next_phase(&self) -> MockPhase {
        self.transport
            .phases
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockPhase::ok(200, b""))
    }
}

impl TransportHandle for MockHandle {
    fn set_url(&mut self, url: &str) -> ResponseResult<()> {
        self.transport.journal().urls.push(url.to_owned());
        Ok(())
    }

    fn set_method(&mut self, method: Method) -> ResponseResult<()> {
        self.transport.journal().methods.push(method);
        Ok(())
    }

    fn set_follow_redirection(&mut self, follow: bool) -> ResponseResult<()> {
        self.transport.journal().follow_redirection.push(follow);
        Ok(())
    }

    fn set_headers(&mut self, headers: &[Header<'_>]) -> ResponseResult<()> {
        let headers = headers
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        self.transport.journal().headers.push(headers);
        Ok(())
    }

    fn set_upload(&mut self, method: Method) -> ResponseResult<()> {
        if !method.allows_body() {
            return Err(ResponseError::new(
                ResponseErrorKind::ProtocolError,
                format!("{} request cannot carry a body", method),
            ));
        }
        self.transport.journal().uploads.push(method);
        Ok(())
    }

    fn perform(&mut self, handler: &mut dyn TransferHandler) -> ResponseResult<()> {
        let phase = self.next_phase();
        self.transport.journal().performs += 1;
        self.last_phase = Some(phase.to_owned());

        // 未开启上传时同样拉取请求体，以便观察到多余的数据源调用
        let mut request_body = Vec::new();
        let mut buf = [0u8; READ_CHUNK_SIZE];
        loop {
            match handler.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => request_body.extend_from_slice(&buf[..n]),
                Err(err) => {
                    self.transport.journal().request_bodies.push(request_body);
                    return Err(ResponseError::new(ResponseErrorKind::CallbackAborted, err));
                }
            }
        }
        self.transport.journal().request_bodies.push(request_body.to_owned());

        let body = if phase.echo { request_body } else { phase.body };
        for chunk in body.chunks(WRITE_CHUNK_SIZE) {
            if handler.write(chunk) != chunk.len() {
                return Err(ResponseError::new(
                    ResponseErrorKind::LocalIOError,
                    "failed writing received data to disk/application",
                ));
            }
        }

        match phase.error {
            Some(kind) => Err(ResponseError::new(kind, format!("mock {:?}", kind))),
            None => Ok(()),
        }
    }

    fn redirect_url(&mut self) -> ResponseResult<Option<String>> {
        Ok(self.last_phase.as_ref().and_then(|phase| phase.redirect.to_owned()))
    }

    fn response_code(&mut self) -> ResponseResult<StatusCode> {
        Ok(self.last_phase.as_ref().map_or(0, |phase| phase.status_code))
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        self.transport.journal().released += 1;
    }
}
