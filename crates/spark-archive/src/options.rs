//! 归档构造选项。

use serde::{Deserialize, Serialize};

/// [`LeArchive`](crate::LeArchive) 的构造参数。
///
/// 可以直接从 TOML/JSON 配置段反序列化，缺省字段取 [`Default`] 中的值。
///
/// ```
/// use spark_archive::{ArchiveOptions, LeArchive};
///
/// let archive = LeArchive::with_options(&ArchiveOptions { initial_capacity: 256 });
/// assert!(archive.capacity() >= 256);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveOptions {
    /// 新建归档时预分配的字节数。
    pub initial_capacity: usize,
}

impl ArchiveOptions {
    /// 默认预分配容量。
    pub const DEFAULT_INITIAL_CAPACITY: usize = 64;
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
        }
    }
}
