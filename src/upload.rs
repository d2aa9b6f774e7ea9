use std::{
    fmt,
    io::{Read, Result as IOResult},
};

/// 上传数据源
///
/// 在上传请求的第二阶段由传输引擎按需拉取数据，每次最多填充 `buf.len()` 个字节。
/// 返回 `Ok(0)` 表示数据已经结束，返回错误将中止上传。
///
/// 任何 `FnMut(&mut [u8]) -> io::Result<usize>` 闭包都实现了该接口，
/// 任何实现了 [`Read`] 的类型都可以通过 [`ReaderSource`] 作为数据源
pub trait UploadSource: Send {
    /// 填充上传数据，返回填充的字节数
    fn produce(&mut self, buf: &mut [u8]) -> IOResult<usize>;
}

impl<F> UploadSource for F
where
    F: FnMut(&mut [u8]) -> IOResult<usize> + Send,
{
    #[inline]
    fn produce(&mut self, buf: &mut [u8]) -> IOResult<usize> {
        self(buf)
    }
}

/// 基于 [`Read`] 的上传数据源
pub struct ReaderSource<R>(R);

impl<R: Read + Send> ReaderSource<R> {
    /// 创建基于 [`Read`] 的上传数据源
    #[inline]
    pub fn new(reader: R) -> Self {
        Self(reader)
    }

    /// 获取内部的 [`Read`]
    #[inline]
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read + Send> UploadSource for ReaderSource<R> {
    #[inline]
    fn produce(&mut self, buf: &mut [u8]) -> IOResult<usize> {
        self.0.read(buf)
    }
}

impl<R> fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ReaderSource").finish_non_exhaustive()
    }
}
