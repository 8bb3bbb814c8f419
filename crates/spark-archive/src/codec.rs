//! 类型驱动的编解码入口。
//!
//! # 设计动机（Why）
//! - 消息结构体的序列化代码通常是一串“按字段顺序写入、按相同顺序读出”，
//!   通过 [`Encode`]/[`Decode`] 让字段类型决定线格式，调用方只需 `put`/`get`；
//! - 同一类型的写入与读取格式定义在一处，避免两端不一致。
//!
//! # 契约说明（What）
//! - 定长标量按小端序编码，`bool` 为单字节，浮点数读取时拒绝非有限值；
//! - `str`/`String`/`[u8]`/`Vec<u8>`/`Bytes` 使用长度前缀编码；
//! - `Decode` 失败时游标保持在调用前的位置。

use bytes::Bytes;

use crate::archive::LeArchive;
use crate::error::Result;

/// 可写入归档的类型。
pub trait Encode {
    /// 将自身追加到归档尾部。
    fn encode(&self, archive: &mut LeArchive);
}

/// 可从归档读取的类型。
pub trait Decode: Sized {
    /// 从游标处读取一个值。
    fn decode(archive: &mut LeArchive) -> Result<Self>;
}

impl LeArchive {
    /// 写入任意 [`Encode`] 值，返回自身以便链式调用。
    ///
    /// ```
    /// use spark_archive::LeArchive;
    ///
    /// let mut archive = LeArchive::new();
    /// archive.put(&7u16).put("id").put(&true);
    /// archive.rewind();
    /// assert_eq!(archive.get::<u16>()?, 7);
    /// assert_eq!(archive.get::<String>()?, "id");
    /// assert!(archive.get::<bool>()?);
    /// # Ok::<(), spark_archive::ArchiveError>(())
    /// ```
    pub fn put<T: Encode + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(self);
        self
    }

    /// 读取任意 [`Decode`] 值。
    pub fn get<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, archive: &mut LeArchive) {
        (**self).encode(archive);
    }
}

macro_rules! scalar_impls {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, archive: &mut LeArchive) {
                    archive.$write(*self);
                }
            }

            impl Decode for $ty {
                fn decode(archive: &mut LeArchive) -> Result<Self> {
                    archive.$read()
                }
            }
        )*
    };
}

scalar_impls! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i8 => write_i8, read_i8;
    i16 => write_i16, read_i16;
    i32 => write_i32, read_i32;
    i64 => write_i64, read_i64;
    f32 => write_f32, read_f32;
    f64 => write_f64, read_f64;
    bool => write_bool, read_bool;
}

impl Encode for str {
    fn encode(&self, archive: &mut LeArchive) {
        archive.write_str(self);
    }
}

impl Encode for String {
    fn encode(&self, archive: &mut LeArchive) {
        archive.write_str(self);
    }
}

impl Decode for String {
    fn decode(archive: &mut LeArchive) -> Result<Self> {
        archive.read_string()
    }
}

impl Encode for [u8] {
    fn encode(&self, archive: &mut LeArchive) {
        archive.write_bytes(self);
    }
}

impl Encode for Vec<u8> {
    fn encode(&self, archive: &mut LeArchive) {
        archive.write_bytes(self);
    }
}

impl Decode for Vec<u8> {
    fn decode(archive: &mut LeArchive) -> Result<Self> {
        archive.read_bytes()
    }
}

impl Encode for Bytes {
    fn encode(&self, archive: &mut LeArchive) {
        archive.write_bytes(self);
    }
}

impl Decode for Bytes {
    fn decode(archive: &mut LeArchive) -> Result<Self> {
        archive.read_bytes().map(Bytes::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArchiveError;

    #[derive(Debug, PartialEq)]
    struct Login {
        account: String,
        session: u64,
        token: Bytes,
    }

    impl Encode for Login {
        fn encode(&self, archive: &mut LeArchive) {
            archive.put(&self.account).put(&self.session).put(&self.token);
        }
    }

    impl Decode for Login {
        fn decode(archive: &mut LeArchive) -> Result<Self> {
            archive.transaction(|archive| {
                Ok(Self {
                    account: archive.get()?,
                    session: archive.get()?,
                    token: archive.get()?,
                })
            })
        }
    }

    #[test]
    fn composite_messages_roundtrip() {
        let login = Login {
            account: "operator".to_owned(),
            session: 0xDEAD_BEEF,
            token: Bytes::from_static(b"\x00\x01\x02"),
        };
        let mut archive = LeArchive::new();
        archive.put(&login);
        archive.rewind();
        assert_eq!(archive.get::<Login>().expect("完整消息"), login);
        assert_eq!(archive.remaining(), 0);
    }

    #[test]
    fn truncated_composite_leaves_cursor_at_start() {
        let mut archive = LeArchive::new();
        archive.put("operator").put(&1u64);
        let mut truncated = LeArchive::from(archive.as_slice());
        assert!(matches!(
            truncated.get::<Login>(),
            Err(ArchiveError::PositionOverflow { .. })
        ));
        assert_eq!(truncated.position(), 0);
    }

    #[test]
    fn byte_payload_types_share_wire_format() {
        let mut archive = LeArchive::new();
        archive.put(&b"abc"[..]).put(&vec![1u8, 2]).put(&Bytes::from_static(b"z"));
        assert_eq!(archive.as_slice(), &[3, b'a', b'b', b'c', 2, 1, 2, 1, b'z']);
        archive.rewind();
        assert_eq!(archive.get::<Bytes>().expect("Bytes"), Bytes::from_static(b"abc"));
        assert_eq!(archive.get::<Vec<u8>>().expect("Vec"), vec![1, 2]);
        assert_eq!(archive.get::<String>().expect("String"), "z");
    }
}
