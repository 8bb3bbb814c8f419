#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use spark_archive::{ArchiveError, LeArchive};

/// Fuzz 输入：一段不可信字节加一串读取指令。
///
/// - **Why**：归档直接包装网络收到的字节，任何长度前缀或浮点位模式都可能被篡改，
///   需要确认解码路径只会返回结构化错误，不会 panic，也不会让游标越过末尾。
/// - **How**：对同一段字节依次执行指令，成功与失败都检查游标不变式。
/// - **What**：失败的读取必须保持游标不动；成功的读取必须恰好前移所消费的字节数。
#[derive(Debug, Arbitrary)]
struct DecodeCase {
    bytes: Vec<u8>,
    ops: Vec<ReadOp>,
}

/// 单条读取指令；可变长读取只校验失败路径。
#[derive(Debug, Arbitrary)]
enum ReadOp {
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Len,
    Text,
    Blob,
    SkipPrefixed,
    Skip { len: u16 },
    Seek { pos: u16 },
}

fn apply(archive: &mut LeArchive, op: &ReadOp) -> Result<Option<usize>, ArchiveError> {
    Ok(match op {
        ReadOp::U8 => archive.read_u8().map(|_| Some(1))?,
        ReadOp::U16 => archive.read_u16().map(|_| Some(2))?,
        ReadOp::U32 => archive.read_u32().map(|_| Some(4))?,
        ReadOp::U64 => archive.read_u64().map(|_| Some(8))?,
        ReadOp::F32 => archive.read_f32().map(|v| {
            assert!(v.is_finite());
            Some(4)
        })?,
        ReadOp::F64 => archive.read_f64().map(|v| {
            assert!(v.is_finite());
            Some(8)
        })?,
        ReadOp::Bool => archive.read_bool().map(|_| Some(1))?,
        ReadOp::Len => archive.read_len().map(|_| None)?,
        ReadOp::Text => archive.read_string().map(|_| None)?,
        ReadOp::Blob => archive.read_bytes().map(|_| None)?,
        ReadOp::SkipPrefixed => archive.skip_prefixed().map(|_| None)?,
        ReadOp::Skip { len } => archive.skip(usize::from(*len)).map(|_| Some(usize::from(*len)))?,
        ReadOp::Seek { pos } => {
            archive.set_position(usize::from(*pos))?;
            None
        }
    })
}

fuzz_target!(|case: DecodeCase| {
    let mut archive = LeArchive::from(case.bytes);
    for op in &case.ops {
        let before = archive.position();
        match apply(&mut archive, op) {
            Ok(Some(consumed)) => {
                assert_eq!(archive.position(), before + consumed);
            }
            Ok(_) => {}
            Err(_) => assert_eq!(archive.position(), before, "失败的读取移动了游标"),
        }
        assert!(archive.position() <= archive.len());
    }
});
