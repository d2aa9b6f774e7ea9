use std::{
    collections::TryReserveError,
    fmt::{self, Write as _},
    str::{self, Utf8Error},
};
use thiserror::Error;

/// 可增长的字节缓冲区
///
/// 所有的追加操作在内存不足时都会返回错误而不是中止进程，追加失败时缓冲区内容保持不变
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Buffer {
    bytes: Vec<u8>,
}

/// 缓冲区追加错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BufferError {
    /// 内存分配失败
    #[error("failed to grow buffer by {additional} bytes: {source}")]
    Alloc {
        additional: usize,
        #[source]
        source: TryReserveError,
    },

    /// 格式化失败
    #[error("failed to format text into buffer")]
    Format,
}

impl Buffer {
    /// 创建空的缓冲区
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// 追加二进制数据
    pub fn append(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.bytes
            .try_reserve(data.len())
            .map_err(|source| BufferError::Alloc {
                additional: data.len(),
                source,
            })?;
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// 追加格式化文本
    ///
    /// 一般配合 [`format_args!`] 使用
    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), BufferError> {
        struct Appender<'b> {
            buffer: &'b mut Buffer,
            error: Option<BufferError>,
        }

        impl fmt::Write for Appender<'_> {
            fn write_str(&mut self, s: &str) -> fmt::Result {
                self.buffer.append(s.as_bytes()).map_err(|err| {
                    self.error = Some(err);
                    fmt::Error
                })
            }
        }

        let len = self.bytes.len();
        let mut appender = Appender {
            buffer: self,
            error: None,
        };
        if appender.write_fmt(args).is_err() {
            let err = appender.error.take().unwrap_or(BufferError::Format);
            self.bytes.truncate(len);
            return Err(err);
        }
        Ok(())
    }

    /// 清空缓冲区，保留已分配的内存
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear()
    }

    /// 获取缓冲区内容
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 以 UTF-8 字符串形式获取缓冲区内容
    #[inline]
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.bytes)
    }

    /// 获取缓冲区长度
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 缓冲区是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 获取缓冲区容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// 转换为字节数组
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Buffer {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.bytes.len())
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}
