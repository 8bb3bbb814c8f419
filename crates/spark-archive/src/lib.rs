#![deny(unsafe_code)]
#![warn(missing_docs)]

//! # spark-archive
//!
//! ## 设计动机（Why）
//! - 为网络消息提供紧凑、确定的二进制表示：定长标量按小端序编码，字符串与字节串带长度前缀；
//! - 截断或被篡改的输入必须以结构化错误终止解码，绝不静默接受越界数据或非有限浮点数。
//!
//! ## 核心契约（What）
//! - [`LeArchive`]：可增长字节序列加单一读取游标；写入追加到尾部，读取从游标消费；
//! - 长度前缀：长度小于 255 时为 1 字节，否则为 `0xFF` 标记加 4 字节小端 `u32`；
//! - 失败的读取、跳过与定位不会移动游标，错误类型见 [`ArchiveError`]；
//! - [`Encode`]/[`Decode`]：由类型决定线格式，配合 [`LeArchive::put`] 与 [`LeArchive::get`] 使用。
//!
//! ## 并发模型
//! 归档实例是同步、单所有者的内存结构，不做内部加锁；跨任务共享由上层负责。

mod archive;
mod codec;
mod error;
mod options;
mod prefix;

pub use archive::LeArchive;
pub use codec::{Decode, Encode};
pub use error::{Access, ArchiveError, FloatWidth, Result};
pub use options::ArchiveOptions;
pub use prefix::{LONG_PREFIX_MARKER, prefix_len};
