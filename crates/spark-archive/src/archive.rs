use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Access, ArchiveError, FloatWidth, Result};
use crate::options::ArchiveOptions;

/// 小端字节序的二进制归档：一段可增长的字节序列加一个读取游标。
///
/// # 教案式说明
/// - **意图 (Why)**：为消息编解码提供“写入即追加、读取即消费”的最小抽象，
///   同一实例既可以先写后 [`rewind`](Self::rewind) 再读，也可以直接包装收到的字节只读消费。
/// - **契约 (What)**：
///   - 写操作只追加到尾部，从不参考游标；
///   - 读操作从游标处消费并前移游标，读取前先校验剩余字节是否足够；
///   - 游标永远不超过序列长度，任何失败的读取、跳过或定位都不会移动游标，
///     对“长度前缀 + 载荷”这类组合读取同样成立；
///   - 所有多字节标量按小端序编码，浮点数按原始位模式编码，读取时拒绝非有限值。
/// - **执行逻辑 (How)**：底层使用 [`BytesMut`] 存储，借助 [`BufMut`] 的 `put_*_le` 写入，
///   读取时先截出定长切片再用 [`Buf`] 的 `get_*_le` 解码。
/// - **风险 (Trade-offs)**：实例不提供并发访问保护，同一时刻只能有一个所有者。
///
/// ```
/// use spark_archive::LeArchive;
///
/// let mut archive = LeArchive::new();
/// archive.write_u32(42);
/// archive.write_str("hello");
/// archive.rewind();
/// assert_eq!(archive.read_u32()?, 42);
/// assert_eq!(archive.read_string()?, "hello");
/// assert_eq!(archive.remaining(), 0);
/// # Ok::<(), spark_archive::ArchiveError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeArchive {
    buf: BytesMut,
    pos: usize,
}

impl LeArchive {
    /// 以默认选项创建空归档。
    pub fn new() -> Self {
        Self::with_options(&ArchiveOptions::default())
    }

    /// 创建预分配 `capacity` 字节的空归档。
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            pos: 0,
        }
    }

    /// 按配置创建空归档。
    pub fn with_options(options: &ArchiveOptions) -> Self {
        Self::with_capacity(options.initial_capacity)
    }

    /// 已写入的字节总数。
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// 是否没有任何字节。
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// 当前底层存储的容量。
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// 当前游标位置。
    pub fn position(&self) -> usize {
        self.pos
    }

    /// 游标之后尚未消费的字节数。
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// 借用全部字节（不受游标影响）。
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// 将游标移回起点。
    pub fn rewind(&mut self) {
        tracing::trace!(from = self.pos, "archive rewound");
        self.pos = 0;
    }

    /// 将游标移动到 `pos`。
    ///
    /// # 错误
    /// `pos` 超过长度时返回 `PositionOverflow { access: Seek, .. }`，游标保持不变。
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(self.overflow(Access::Seek, pos - self.pos));
        }
        tracing::trace!(from = self.pos, to = pos, "archive repositioned");
        self.pos = pos;
        Ok(())
    }

    /// 清空全部字节并重置游标，保留已分配容量。
    pub fn clear(&mut self) {
        self.buf.clear();
        self.pos = 0;
    }

    /// 冻结为只读的 [`Bytes`]。
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// 转换为 `Vec<u8>`。
    pub fn into_vec(self) -> Vec<u8> {
        self.buf.into()
    }

    /// 追加原始字节，不带长度前缀。
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// 读取恰好 `dst.len()` 个原始字节。
    pub fn read_exact(&mut self, dst: &mut [u8]) -> Result<()> {
        let src = self.take(dst.len())?;
        dst.copy_from_slice(src);
        Ok(())
    }

    /// 跳过 `len` 个字节。
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.ensure(Access::Skip, len)?;
        self.pos += len;
        Ok(())
    }

    /// 校验从游标起还能访问 `len` 个字节。
    pub(crate) fn ensure(&self, access: Access, len: usize) -> Result<()> {
        match self.pos.checked_add(len) {
            Some(end) if end <= self.buf.len() => Ok(()),
            _ => Err(self.overflow(access, len)),
        }
    }

    fn overflow(&self, access: Access, len: usize) -> ArchiveError {
        let size = self.buf.len();
        tracing::debug!(
            access = access.as_str(),
            len,
            pos = self.pos,
            size,
            "archive access out of range"
        );
        ArchiveError::PositionOverflow {
            access,
            len,
            pos: self.pos,
            size,
        }
    }

    /// 消费 `len` 个字节并返回对应切片。
    pub(crate) fn take(&mut self, len: usize) -> Result<&[u8]> {
        self.ensure(Access::Read, len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }

    /// 执行一组读取；任一步失败时把游标恢复到调用前的位置。
    ///
    /// 为多字段消息实现 [`Decode`](crate::Decode) 时用它包裹字段读取，
    /// 保证整条消息要么完整读出，要么不消费任何字节。
    pub fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }
}

macro_rules! scalar_codec {
    ($($write:ident, $read:ident, $ty:ty, $put:ident, $get:ident;)*) => {
        impl LeArchive {
            $(
                #[doc = concat!("以小端序写入 `", stringify!($ty), "`。")]
                pub fn $write(&mut self, value: $ty) {
                    self.buf.$put(value);
                }

                #[doc = concat!("以小端序读取 `", stringify!($ty), "`。")]
                pub fn $read(&mut self) -> Result<$ty> {
                    let mut raw = self.take(size_of::<$ty>())?;
                    Ok(raw.$get())
                }
            )*
        }
    };
}

scalar_codec! {
    write_u8, read_u8, u8, put_u8, get_u8;
    write_u16, read_u16, u16, put_u16_le, get_u16_le;
    write_u32, read_u32, u32, put_u32_le, get_u32_le;
    write_u64, read_u64, u64, put_u64_le, get_u64_le;
    write_i8, read_i8, i8, put_i8, get_i8;
    write_i16, read_i16, i16, put_i16_le, get_i16_le;
    write_i32, read_i32, i32, put_i32_le, get_i32_le;
    write_i64, read_i64, i64, put_i64_le, get_i64_le;
}

impl LeArchive {
    /// 写入 `bool`，编码为单字节 `0`/`1`。
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// 读取 `bool`，任何非零字节均视为 `true`。
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// 以小端序写入 `f32` 的原始位模式。
    ///
    /// 写入端不校验有限性，非有限值会在读取端被拒绝。
    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    /// 以小端序写入 `f64` 的原始位模式。
    pub fn write_f64(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    /// 读取 `f32`。
    ///
    /// # 错误
    /// - 剩余字节不足：`PositionOverflow`；
    /// - 位模式为 `±inf` 或 `NaN`：`NonFiniteFloat { width: F32 }`，游标保持不变。
    pub fn read_f32(&mut self) -> Result<f32> {
        self.transaction(|archive| {
            let value = f32::from_bits(archive.read_u32()?);
            finite(value.is_finite(), FloatWidth::F32).map(|()| value)
        })
    }

    /// 读取 `f64`，错误语义同 [`read_f32`](Self::read_f32)。
    pub fn read_f64(&mut self) -> Result<f64> {
        self.transaction(|archive| {
            let value = f64::from_bits(archive.read_u64()?);
            finite(value.is_finite(), FloatWidth::F64).map(|()| value)
        })
    }
}

fn finite(is_finite: bool, width: FloatWidth) -> Result<()> {
    if is_finite {
        Ok(())
    } else {
        tracing::debug!(width = width.as_str(), "non-finite float rejected");
        Err(ArchiveError::NonFiniteFloat { width })
    }
}

impl From<&[u8]> for LeArchive {
    fn from(bytes: &[u8]) -> Self {
        Self {
            buf: BytesMut::from(bytes),
            pos: 0,
        }
    }
}

impl From<Vec<u8>> for LeArchive {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            buf: BytesMut::from(Bytes::from(bytes)),
            pos: 0,
        }
    }
}

impl From<Bytes> for LeArchive {
    fn from(bytes: Bytes) -> Self {
        Self {
            buf: BytesMut::from(bytes),
            pos: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn scalars_are_little_endian() {
        let mut archive = LeArchive::new();
        archive.write_u16(0x0102);
        archive.write_i32(-2);
        archive.write_u64(1);
        assert_eq!(
            archive.as_slice(),
            &[0x02, 0x01, 0xFE, 0xFF, 0xFF, 0xFF, 1, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(archive.read_u16().expect("u16"), 0x0102);
        assert_eq!(archive.read_i32().expect("i32"), -2);
        assert_eq!(archive.read_u64().expect("u64"), 1);
        assert_eq!(archive.remaining(), 0);
    }

    #[test]
    fn writes_ignore_cursor() {
        let mut archive = LeArchive::from(&[1u8, 2][..]);
        assert_eq!(archive.read_u8().expect("首字节"), 1);
        archive.write_u8(3);
        assert_eq!(archive.position(), 1, "写入不应移动游标");
        assert_eq!(archive.as_slice(), &[1, 2, 3]);
        assert_eq!(archive.read_u16().expect("剩余两字节"), 0x0302);
    }

    #[test]
    fn short_read_leaves_cursor_in_place() {
        let mut archive = LeArchive::from(vec![7u8, 0, 0]);
        archive.skip(1).expect("跳过一字节");
        let err = archive.read_u32().expect_err("仅剩两字节");
        assert_eq!(
            err,
            ArchiveError::PositionOverflow {
                access: Access::Read,
                len: 4,
                pos: 1,
                size: 3,
            }
        );
        assert_eq!(archive.position(), 1);
    }

    #[test]
    fn skip_and_seek_report_access_kind() {
        let mut archive = LeArchive::from(vec![0u8; 4]);
        assert_eq!(
            archive.skip(5),
            Err(ArchiveError::PositionOverflow {
                access: Access::Skip,
                len: 5,
                pos: 0,
                size: 4,
            })
        );
        archive.set_position(4).expect("定位到末尾是合法的");
        assert_eq!(archive.remaining(), 0);
        archive.set_position(2).expect("可以回退");
        assert_eq!(
            archive.set_position(9),
            Err(ArchiveError::PositionOverflow {
                access: Access::Seek,
                len: 7,
                pos: 2,
                size: 4,
            })
        );
        assert_eq!(archive.position(), 2);
    }

    #[test]
    fn oversized_length_does_not_overflow() {
        let mut archive = LeArchive::from(vec![0u8; 2]);
        archive.skip(1).expect("跳过一字节");
        assert!(matches!(
            archive.skip(usize::MAX),
            Err(ArchiveError::PositionOverflow { len: usize::MAX, .. })
        ));
        assert_eq!(archive.position(), 1);
    }

    #[test]
    fn non_finite_floats_are_rejected_without_consuming() {
        let mut archive = LeArchive::new();
        archive.write_f32(f32::NAN);
        archive.write_f64(f64::NEG_INFINITY);
        archive.rewind();
        assert_eq!(
            archive.read_f32(),
            Err(ArchiveError::NonFiniteFloat {
                width: FloatWidth::F32
            })
        );
        assert_eq!(archive.position(), 0);
        archive.skip(4).expect("跳过 f32");
        assert_eq!(
            archive.read_f64(),
            Err(ArchiveError::NonFiniteFloat {
                width: FloatWidth::F64
            })
        );
        assert_eq!(archive.position(), 4);
    }

    #[test]
    fn read_exact_copies_raw_bytes() {
        let mut archive = LeArchive::new();
        archive.append(b"spark");
        archive.rewind();
        let mut head = [0u8; 3];
        archive.read_exact(&mut head).expect("前三字节");
        assert_eq!(&head, b"spa");
        let mut tail = [0u8; 3];
        assert!(archive.read_exact(&mut tail).is_err());
        assert_eq!(archive.position(), 3);
    }

    #[test]
    fn clear_resets_buffer_and_cursor() {
        let mut archive = LeArchive::with_capacity(16);
        archive.write_u32(9);
        archive.skip(2).expect("跳过两字节");
        archive.clear();
        assert!(archive.is_empty());
        assert_eq!(archive.position(), 0);
        assert!(archive.capacity() >= 16);
    }

    #[test]
    fn conversions_preserve_bytes() {
        let mut archive = LeArchive::new();
        archive.write_bool(true);
        archive.write_i8(-1);
        assert_eq!(archive.clone().into_vec(), vec![1, 0xFF]);
        let frozen = archive.into_bytes();
        assert_eq!(&frozen[..], &[1, 0xFF]);
        let mut reread = LeArchive::from(frozen);
        assert!(reread.read_bool().expect("bool"));
        assert_eq!(reread.read_i8().expect("i8"), -1);
    }

    #[traced_test]
    #[test]
    fn failed_reads_emit_debug_event() {
        let mut archive = LeArchive::new();
        assert!(archive.read_u8().is_err());
        assert!(logs_contain("archive access out of range"));
    }
}
