//! 全函数类型转换。
//!
//! # 契约说明（What）
//! - 七种类型到六种目标（`i32`/`i64`/`f32`/`f64`/`bool`/`String`）的转换矩阵是完整的，
//!   任何组合都返回一个“尽力而为”的标量，从不失败；
//! - Real → 整数：向零截断，越界时饱和到目标类型边界，`NaN` 得到 0；
//! - String → 数值：去除首尾空白后解析，无法解析时退化为零值；
//! - Array/Object → 标量：数值为元素个数，布尔为“非空”，字符串为紧凑 JSON 文本。

use crate::format::{FormatOptions, format_real, render_json};
use crate::value::Value;

impl Value {
    /// 转换为 `i32`，越界时饱和。
    pub fn as_int(&self) -> i32 {
        let wide = self.as_long();
        wide.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// 转换为 `i64`。
    pub fn as_long(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Integer(v) => *v,
            Value::Real(v) => real_to_long(*v),
            Value::String(s) => parse_long(s),
            Value::Boolean(b) => i64::from(*b),
            Value::Array(items) => items.len() as i64,
            Value::Object(members) => members.len() as i64,
        }
    }

    /// 转换为 `f32`。
    pub fn as_float(&self) -> f32 {
        match self {
            Value::Integer(v) => *v as f32,
            Value::Real(v) => *v as f32,
            other => other.as_double() as f32,
        }
    }

    /// 转换为 `f64`。
    pub fn as_double(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Integer(v) => *v as f64,
            Value::Real(v) => *v,
            Value::String(s) => parse_double(s),
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Array(items) => items.len() as f64,
            Value::Object(members) => members.len() as f64,
        }
    }

    /// 转换为 `bool`。
    ///
    /// - 数值：非零为 `true`（`NaN` 视为非零）；
    /// - String：忽略大小写的 `true`/`false`，否则按数值解析判断非零，仍失败则为 `false`；
    /// - Array/Object：非空为 `true`。
    pub fn as_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Integer(v) => *v != 0,
            Value::Real(v) => *v != 0.0,
            Value::String(s) => parse_bool(s),
            Value::Boolean(b) => *b,
            Value::Array(items) => !items.is_empty(),
            Value::Object(members) => !members.is_empty(),
        }
    }

    /// 以默认 [`FormatOptions`] 转换为字符串。
    pub fn as_string(&self) -> String {
        self.as_string_with(&FormatOptions::default())
    }

    /// 以指定选项转换为字符串。
    ///
    /// Null 渲染为空串，String 原样返回，Array/Object 渲染为紧凑 JSON 文本。
    pub fn as_string_with(&self, options: &FormatOptions) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(v) => v.to_string(),
            Value::Real(v) => format_real(*v, options),
            Value::String(s) => s.clone(),
            Value::Boolean(b) => String::from(if *b { "true" } else { "false" }),
            Value::Array(_) | Value::Object(_) => render_json(self, options),
        }
    }
}

/// Real → `i64`：向零截断，饱和到边界，`NaN` 为 0。
///
/// `as` 转换本身即为该语义，这里单独成函数以固定契约。
pub(crate) fn real_to_long(v: f64) -> i64 {
    v as i64
}

fn parse_long(text: &str) -> i64 {
    let trimmed = text.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return v;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => real_to_long(v),
        Err(_) => {
            tracing::trace!(
                text = trimmed,
                target_kind = "integer",
                "non-numeric string coerced to zero"
            );
            0
        }
    }
}

fn parse_double(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            tracing::trace!(
                text = trimmed,
                target_kind = "real",
                "non-numeric string coerced to zero"
            );
            0.0
        }
    }
}

fn parse_bool(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return true;
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed.is_empty() {
        return false;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => v != 0.0,
        Err(_) => {
            tracing::trace!(
                text = trimmed,
                target_kind = "boolean",
                "non-numeric string coerced to false"
            );
            false
        }
    }
}
