//! 长度前缀编码。
//!
//! # 线格式（What）
//! | 载荷长度 | 前缀 |
//! |---|---|
//! | `< 255` | 1 字节，值即长度 |
//! | `>= 255` | 标记字节 `0xFF`，随后 4 字节小端 `u32` 长度 |
//!
//! 前缀之后紧跟原始字节，不带终止符。解码时读到 `0xFF` 一律按 `u32` 长度处理，
//! 即便随后的长度小于 255 也照常接受。

use crate::archive::LeArchive;
use crate::error::{ArchiveError, Result};

/// 单字节前缀能表示的长度上界（不含），同时也是长前缀的标记字节。
pub const LONG_PREFIX_MARKER: u8 = 0xFF;

/// 给定载荷长度对应的前缀字节数。
pub const fn prefix_len(len: usize) -> usize {
    if len < LONG_PREFIX_MARKER as usize { 1 } else { 5 }
}

impl LeArchive {
    /// 写入长度前缀。
    ///
    /// # Panics
    /// `len` 超过 `u32::MAX` 时 panic，线格式无法表示这样的长度。
    pub fn write_len(&mut self, len: usize) {
        if len < usize::from(LONG_PREFIX_MARKER) {
            self.write_u8(len as u8);
        } else {
            assert!(
                u32::try_from(len).is_ok(),
                "payload of {len} bytes exceeds the u32 length prefix"
            );
            self.write_u8(LONG_PREFIX_MARKER);
            self.write_u32(len as u32);
        }
    }

    /// 读取长度前缀。
    pub fn read_len(&mut self) -> Result<usize> {
        self.transaction(|archive| match archive.read_u8()? {
            LONG_PREFIX_MARKER => Ok(archive.read_u32()? as usize),
            short => Ok(usize::from(short)),
        })
    }

    /// 写入带长度前缀的字节串。
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.write_len(bytes.len());
        self.append(bytes);
    }

    /// 写入带长度前缀的 UTF-8 字符串。
    pub fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    /// 读取带长度前缀的字节串。
    ///
    /// # 错误
    /// 载荷被截断时返回 `PositionOverflow`，其中 `pos` 为载荷起点（前缀之后），
    /// `len` 为前缀声明的载荷长度；游标恢复到前缀之前。
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        self.transaction(|archive| {
            let len = archive.read_len()?;
            archive.take(len).map(<[u8]>::to_vec)
        })
    }

    /// 读取带长度前缀的字符串，载荷必须是合法 UTF-8。
    pub fn read_string(&mut self) -> Result<String> {
        self.transaction(|archive| {
            let len = archive.read_len()?;
            let pos = archive.position();
            let raw = archive.take(len)?;
            match core::str::from_utf8(raw) {
                Ok(text) => Ok(text.to_owned()),
                Err(_) => {
                    tracing::debug!(pos, len, "archive string is not valid UTF-8");
                    Err(ArchiveError::InvalidUtf8 { pos, len })
                }
            }
        })
    }

    /// 跳过一个带长度前缀的载荷。
    pub fn skip_prefixed(&mut self) -> Result<()> {
        self.transaction(|archive| {
            let len = archive.read_len()?;
            archive.skip(len)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Access;

    #[test]
    fn prefix_switches_at_255() {
        assert_eq!(prefix_len(0), 1);
        assert_eq!(prefix_len(254), 1);
        assert_eq!(prefix_len(255), 5);

        let mut archive = LeArchive::new();
        archive.write_len(254);
        archive.write_len(255);
        archive.write_len(0x0102_0304);
        assert_eq!(
            archive.as_slice(),
            &[254, 0xFF, 255, 0, 0, 0, 0xFF, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(archive.read_len().expect("短前缀"), 254);
        assert_eq!(archive.read_len().expect("长前缀"), 255);
        assert_eq!(archive.read_len().expect("长前缀"), 0x0102_0304);
    }

    #[test]
    fn long_marker_with_small_length_is_accepted() {
        let mut archive = LeArchive::from(vec![0xFF, 2, 0, 0, 0, b'o', b'k']);
        assert_eq!(archive.read_string().expect("合法载荷"), "ok");
    }

    #[test]
    fn truncated_long_prefix_restores_cursor() {
        let mut archive = LeArchive::from(vec![0xFF, 1, 0]);
        assert_eq!(
            archive.read_len(),
            Err(ArchiveError::PositionOverflow {
                access: Access::Read,
                len: 4,
                pos: 1,
                size: 3,
            })
        );
        assert_eq!(archive.position(), 0);
    }

    #[test]
    fn truncated_payload_reports_offset_after_prefix() {
        let mut archive = LeArchive::new();
        archive.write_u8(9);
        archive.write_u8(10);
        archive.append(b"short");
        archive.skip(1).expect("跳过首字节");
        assert_eq!(
            archive.read_bytes(),
            Err(ArchiveError::PositionOverflow {
                access: Access::Read,
                len: 10,
                pos: 2,
                size: 7,
            })
        );
        assert_eq!(archive.position(), 1, "游标应回到前缀之前");
    }

    #[test]
    fn invalid_utf8_is_reported_but_bytes_remain_readable() {
        let mut archive = LeArchive::new();
        archive.write_bytes(&[0xC3, 0x28]);
        assert_eq!(
            archive.read_string(),
            Err(ArchiveError::InvalidUtf8 { pos: 1, len: 2 })
        );
        assert_eq!(archive.position(), 0);
        assert_eq!(archive.read_bytes().expect("按字节读取"), vec![0xC3, 0x28]);
    }

    #[test]
    fn skip_prefixed_moves_past_payload() {
        let mut archive = LeArchive::new();
        archive.write_str("skip me");
        archive.write_u8(7);
        archive.skip_prefixed().expect("跳过字符串");
        assert_eq!(archive.read_u8().expect("后续字节"), 7);

        let mut truncated = LeArchive::from(vec![3u8, 0]);
        assert!(matches!(
            truncated.skip_prefixed(),
            Err(ArchiveError::PositionOverflow {
                access: Access::Skip,
                len: 3,
                pos: 1,
                ..
            })
        ));
        assert_eq!(truncated.position(), 0);
    }
}
