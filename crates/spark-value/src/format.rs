//! 实数渲染与紧凑 JSON 文本输出。
//!
//! # 设计要点（Why）
//! - `as_string` 对 Real 的渲染必须可逆：默认 17 位有效数字足以让任意 `f64`
//!   经 `parse` 后还原出相同的位模式；
//! - 渲染规则对齐 printf 的 `%.{p}g`：指数小于 -4 或不小于精度时使用科学计数法，否则使用定点表示，
//!   并去除尾随零；结果既无小数点也无指数时补上 `.0`，保证文本仍被识别为实数。
//!
//! # 配置（What）
//! - [`FormatOptions`] 可以直接从配置文件反序列化，缺省字段取默认值。

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// 实数渲染选项。
///
/// # 契约说明（What）
/// - `precision`：有效数字位数，实际生效值被限制在 `1..=17`；
/// - `special_floats`：为 `true` 时非有限值渲染为 `NaN`/`Infinity`/`-Infinity`，
///   否则渲染为 `null`/`1e+9999`/`-1e+9999`，后者仍是合法 JSON 文本。
///
/// # 使用方式（How）
/// ```
/// use spark_value::{FormatOptions, Value};
///
/// let opts = FormatOptions::default().with_precision(3);
/// assert_eq!(Value::from(1.23456).as_string_with(&opts), "1.23");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// 有效数字位数。
    pub precision: u32,
    /// 是否使用 `NaN`/`Infinity` 字面量渲染非有限值。
    pub special_floats: bool,
}

impl FormatOptions {
    /// 默认精度，保证 `f64` 往返不丢失位模式。
    pub const DEFAULT_PRECISION: u32 = 17;

    /// 设置有效数字位数。
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// 设置非有限值的渲染方式。
    pub fn with_special_floats(mut self, special_floats: bool) -> Self {
        self.special_floats = special_floats;
        self
    }

    /// 返回限制到 `1..=17` 之后的精度。
    pub fn effective_precision(&self) -> usize {
        self.precision.clamp(1, Self::DEFAULT_PRECISION) as usize
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            special_floats: false,
        }
    }
}

/// 按选项渲染实数。
pub(crate) fn format_real(v: f64, options: &FormatOptions) -> String {
    if !v.is_finite() {
        return non_finite(v, options.special_floats).to_owned();
    }
    let mut out = format_general(v, options.effective_precision());
    if !out.contains(['.', 'e']) {
        out.push_str(".0");
    }
    out
}

fn non_finite(v: f64, special_floats: bool) -> &'static str {
    match (v.is_nan(), v.is_sign_negative(), special_floats) {
        (true, _, true) => "NaN",
        (true, _, false) => "null",
        (false, false, true) => "Infinity",
        (false, false, false) => "1e+9999",
        (false, true, true) => "-Infinity",
        (false, true, false) => "-1e+9999",
    }
}

/// `%.{precision}g` 的等价实现，`precision >= 1`，`v` 为有限值。
fn format_general(v: f64, precision: usize) -> String {
    if v == 0.0 {
        return String::from(if v.is_sign_negative() { "-0" } else { "0" });
    }
    // 先按科学计数法舍入，得到舍入后的十进制指数，再决定表示形式。
    let scientific = format!("{:.*e}", precision - 1, v);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{v:.decimals$}")).to_owned()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// 以紧凑 JSON 文本渲染值。
///
/// Null 写作 `null`（与 `as_string` 返回空串不同），Object 按键序输出；
/// 字符串与键的转义交给 `serde_json`，实数仍按 [`FormatOptions`] 渲染。
pub(crate) fn render_json(value: &Value, options: &FormatOptions) -> String {
    let mut out = String::new();
    push_json(&mut out, value, options);
    out
}

fn push_json(out: &mut String, value: &Value, options: &FormatOptions) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Integer(v) => out.push_str(&v.to_string()),
        Value::Real(v) => out.push_str(&format_real(*v, options)),
        Value::String(s) => push_quoted(out, s),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Array(items) => {
            out.push('[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                push_json(out, item, options);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (idx, (key, item)) in members.iter().enumerate() {
                if idx > 0 {
                    out.push(',');
                }
                push_quoted(out, key);
                out.push(':');
                push_json(out, item, options);
            }
            out.push('}');
        }
    }
}

fn push_quoted(out: &mut String, text: &str) {
    out.push_str(&serde_json::Value::from(text).to_string());
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_json(self, &FormatOptions::default()))
    }
}
