use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Index;

use crate::kind::ValueKind;

/// Array 类型的载荷：按插入顺序保存的值序列。
pub type Array = Vec<Value>;

/// Object 类型的载荷：键唯一且按字典序排列的映射。
///
/// 采用 `BTreeMap` 而非插入序映射，保证两个 Object 的比较结果只取决于内容。
pub type Object = BTreeMap<String, Value>;

/// 共享的 Null 实例，供索引未命中时返回引用。
static NULL: Value = Value::Null;

/// 自描述的动态值。
///
/// # 设计目标（Why）
/// - 为配置、日志属性与消息载荷提供统一的树状数据表示，语义上对齐 JSON 文档树；
/// - 以封闭枚举代替运行时类型擦除，所有操作都能在编译期做穷尽检查。
///
/// # 契约说明（What）
/// - 任一时刻只持有一种类型及其载荷；
/// - Array/Object 由 `Value` 递归组成，模型本身不提供引用祖先节点的手段，因此不会形成环；
/// - 值语义：`clone` 深拷贝容器载荷；默认值为 [`Value::Null`]。
///
/// # 风险提示（Trade-offs）
/// - `Real` 使用 IEEE 754 比较，`NaN` 与任何值（包括自身）都不相等也无序；
///   需要全序的调用方应在入库前拒绝非有限值。
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// 空值。
    #[default]
    Null,
    /// 64 位有符号整数。
    Integer(i64),
    /// 64 位浮点数。
    Real(f64),
    /// 字符串。
    String(String),
    /// 布尔值。
    Boolean(bool),
    /// 有序数组。
    Array(Array),
    /// 键唯一的映射。
    Object(Object),
}

/// `i64` 可表示区间的下界（含）。
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
/// `i64` 可表示区间的上界（不含），即 2^63。
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

impl Value {
    /// 返回当前值的类型标签。
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// 是否为 Null。
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// 是否为 Boolean。
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// 是否“恰好可以用整数表示”。
    ///
    /// # 契约说明（What）
    /// - Integer 恒为 `true`；
    /// - Real 仅当数值位于 `i64` 可表示区间且小数部分为零时为 `true`（“整值实数”）；
    /// - 其余类型为 `false`。
    ///
    /// 该谓词与 [`Value::is_real`] 的区别被上层用于判断数值字段是“计数”还是“度量”，不可合并。
    pub fn is_integer(&self) -> bool {
        match self {
            Value::Integer(_) => true,
            Value::Real(v) => is_integral_real(*v),
            _ => false,
        }
    }

    /// 是否为数值（Integer 或 Real）。
    pub fn is_real(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Real(_))
    }

    /// [`Value::is_real`] 的别名。
    pub fn is_numeric(&self) -> bool {
        self.is_real()
    }

    /// 是否为 String。
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// 是否为 Array。
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// 是否为 Object。
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// 变为 Null。
    pub fn set_null(&mut self) {
        if !self.is_null() {
            *self = Value::Null;
        }
    }

    /// 变为 Array。
    ///
    /// 已是 Array 时保留现有元素；否则丢弃原载荷并置为空数组。
    pub fn set_array(&mut self) {
        if !self.is_array() {
            *self = Value::Array(Array::new());
        }
    }

    /// 变为 Object。
    ///
    /// 已是 Object 时保留现有成员；否则丢弃原载荷并置为空映射。
    pub fn set_object(&mut self) {
        if !self.is_object() {
            *self = Value::Object(Object::new());
        }
    }

    /// 借用字符串载荷。
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// 借用数组载荷。
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// 可变借用数组载荷。
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// 借用映射载荷。
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// 可变借用映射载荷。
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(members) => Some(members),
            _ => None,
        }
    }

    /// 返回载荷规模：Array/Object 为元素数，String 为字节数，其余为 0。
    pub fn len(&self) -> usize {
        match self {
            Value::Array(items) => items.len(),
            Value::Object(members) => members.len(),
            Value::String(s) => s.len(),
            Value::Null | Value::Integer(_) | Value::Real(_) | Value::Boolean(_) => 0,
        }
    }

    /// `len() == 0`。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按键查找 Object 成员；非 Object 或未命中时返回 `None`。
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|members| members.get(key))
    }

    /// 按键可变查找 Object 成员。
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut().and_then(|members| members.get_mut(key))
    }

    /// 按下标查找 Array 元素；非 Array 或越界时返回 `None`。
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// 在数组尾部追加元素。
    ///
    /// 当前值不是 Array 时先调用 [`Value::set_array`]，原载荷被丢弃。
    pub fn push(&mut self, value: impl Into<Value>) {
        self.set_array();
        if let Value::Array(items) = self {
            items.push(value.into());
        }
    }

    /// 插入或替换 Object 成员，返回被替换的旧值。
    ///
    /// 当前值不是 Object 时先调用 [`Value::set_object`]，原载荷被丢弃。
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.set_object();
        match self {
            Value::Object(members) => members.insert(key.into(), value.into()),
            _ => None,
        }
    }
}

/// 判断浮点数是否为位于 `i64` 区间内的整值。
pub(crate) fn is_integral_real(v: f64) -> bool {
    (I64_LOWER..I64_UPPER).contains(&v) && v.fract() == 0.0
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

macro_rules! from_lossless {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::Real(v as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(v: Cow<'_, str>) -> Self {
        Value::String(v.into_owned())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
