use core::fmt;

/// 动态值的七种类型标签。
///
/// # 契约说明（What）
/// - 声明顺序 `Null < Integer < Real < String < Boolean < Array < Object` 即跨类型比较顺序，
///   [`Value`](crate::Value) 的 `PartialOrd` 直接依赖本类型派生的 `Ord`；
/// - 调整变体顺序属于破坏性变更，会改变所有跨类型比较结果。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    /// 空值。
    Null,
    /// 64 位有符号整数。
    Integer,
    /// 64 位浮点数。
    Real,
    /// 字符串。
    String,
    /// 布尔值。
    Boolean,
    /// 有序数组。
    Array,
    /// 键唯一的映射。
    Object,
}

impl ValueKind {
    /// 全部类型，按比较顺序排列。
    pub const ALL: [ValueKind; 7] = [
        ValueKind::Null,
        ValueKind::Integer,
        ValueKind::Real,
        ValueKind::String,
        ValueKind::Boolean,
        ValueKind::Array,
        ValueKind::Object,
    ];

    /// 返回小写类型名，用于日志字段与错误描述。
    pub const fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::String => "string",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
