#![deny(unsafe_code)]
#![warn(missing_docs)]

//! `spark-value` 提供框架内部统一使用的自描述动态值模型。
//!
//! # 模块定位（Why）
//! - 配置加载、日志属性存储与网络消息载荷都需要一种“形如 JSON 文档树”的动态值，
//!   本 crate 以封闭的七种类型（Null、Integer、Real、String、Boolean、Array、Object）承载这些数据；
//! - 上层只需面向 [`Value`] 编程，不必关心数据来源于 TOML、JSON 还是二进制消息。
//!
//! # 设计概要（How）
//! - [`Value`] 是显式的和类型（enum），所有操作均通过穷尽匹配实现，新增类型会在编译期暴露遗漏；
//! - [`ValueKind`] 的声明顺序即跨类型排序顺序，这一顺序属于可观测契约而非实现细节；
//! - 类型转换（`as_*`）全部为全函数：无法解析时退化为零值，而不是返回错误；
//! - 实数渲染由 [`FormatOptions`] 控制精度与非有限值的表示方式，默认 17 位有效数字以保证往返一致。
//!
//! # 契约说明（What）
//! - `Integer(1) < Real(1.0)` 且二者不相等：先比较类型，再比较载荷；
//! - Object 的键按字典序保存（`BTreeMap`），Object 之间的比较因此是确定的；
//! - 值语义：克隆会深拷贝 Array/Object。
//!
//! # 风险提示（Trade-offs）
//! - 不提供 Schema 校验、查询或补丁语言；
//! - 不做任何内部同步，跨线程共享时应视为不可变快照。

mod cmp;
mod coerce;
mod format;
mod kind;
mod serde_impl;
mod value;

pub use format::FormatOptions;
pub use kind::ValueKind;
pub use value::{Array, Object, Value};
