//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义归档读取路径上的全部失败语义，调用方通过 `match` 分支处理，无需解析消息文本；
//! - 每种错误都携带结构化上下文（长度、位置、总量或浮点宽度），便于日志与告警直接引用。
//!
//! ## 设计要求（What）
//! - 所有错误均视为“当前消息已损坏”：调用方应丢弃缓冲，不尝试在同一游标上继续解码；
//! - 错误类型是 `Copy + Eq`，可在测试中直接比较。

use core::fmt;

use thiserror::Error;

/// 触发越界的访问方式。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Access {
    /// 读取字节或标量。
    Read,
    /// 跳过字节。
    Skip,
    /// 重新定位游标。
    Seek,
}

impl Access {
    /// 返回用于日志字段的稳定名称。
    pub const fn as_str(self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Skip => "skip",
            Access::Seek => "seek",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 浮点数宽度。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    /// 32 位单精度。
    F32,
    /// 64 位双精度。
    F64,
}

impl FloatWidth {
    /// 返回类型名称（`f32`/`f64`）。
    pub const fn as_str(self) -> &'static str {
        match self {
            FloatWidth::F32 => "f32",
            FloatWidth::F64 => "f64",
        }
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 归档解码错误。
///
/// # 教案式说明
/// - **意图 (Why)**：截断或被篡改的输入必须“响亮地失败”，并把足以复现问题的上下文交给调用方；
/// - **契约 (What)**：
///   - 任何返回该错误的读取都不会移动游标；
///   - 错误是终止性的，库内不做部分恢复或重同步；
/// - **风险 (Trade-offs)**：`InvalidUtf8` 只在以 `String` 读取时出现，
///   需要保留任意字节的调用方应改用 `read_bytes`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// 越界访问：`pos + len` 超过缓冲总长度 `size`。
    #[error("attempted to {access} {len} bytes in archive (pos: {pos} size: {size})")]
    PositionOverflow {
        /// 访问方式。
        access: Access,
        /// 请求的字节数；对 `Seek` 而言是目标位置与当前位置之差。
        len: usize,
        /// 发生越界时的位置。
        pos: usize,
        /// 缓冲总长度。
        size: usize,
    },

    /// 解码得到的浮点数为 `±inf` 或 `NaN`。
    #[error("non-finite {width} value in archive")]
    NonFiniteFloat {
        /// 目标浮点宽度。
        width: FloatWidth,
    },

    /// 以字符串读取的载荷不是合法 UTF-8。
    #[error("invalid UTF-8 string of {len} bytes in archive (pos: {pos})")]
    InvalidUtf8 {
        /// 载荷起始位置。
        pos: usize,
        /// 载荷长度。
        len: usize,
    },
}

/// 归档操作的结果别名。
pub type Result<T, E = ArchiveError> = core::result::Result<T, E>;
