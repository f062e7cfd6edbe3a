//! 解码错误
//!
//! 容器级别的结构错误都是终止性的；协议无法识别不是错误（见各层的 `Unclassified`）。

use thiserror::Error;

/// 抓包文件解码错误
#[derive(Debug, Error)]
pub enum DecodeError {
    /// 全局头不足 24 字节
    #[error("malformed capture: global header needs 24 bytes, have {have}")]
    MalformedCapture { have: usize },

    /// 记录声明的字节数超过缓冲区剩余部分
    #[error(
        "truncated record #{index} at offset {offset}: needs {needed} bytes, {remaining} remain"
    )]
    TruncatedRecord {
        index: usize,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// 读取抓包文件失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
