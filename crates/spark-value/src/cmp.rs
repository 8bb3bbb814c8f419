//! 先比较类型、再比较载荷的相等与排序。
//!
//! # 契约说明（What）
//! - 类型不同的两个值按 [`ValueKind`](crate::ValueKind) 的声明顺序排序，且永不相等；
//!   `Integer(1)` 严格小于 `Real(1.0)`，即便二者数值相同；
//! - 同类型时使用载荷的自然顺序：数值序、字节字典序、`false < true`、
//!   数组逐元素字典序、Object 按（键，值）逐对字典序；
//! - Real 之间遵循 IEEE 754，`NaN` 与任何值比较都返回 `None`。
//!
//! 该规则不向“数值等价”靠拢，上层依赖它区分计数与度量。

use core::cmp::Ordering;

use crate::value::Value;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.as_bytes().partial_cmp(b.as_bytes()),
            (Value::Boolean(a), Value::Boolean(b)) => a.partial_cmp(b),
            (Value::Array(a), Value::Array(b)) => a.partial_cmp(b),
            (Value::Object(a), Value::Object(b)) => a.iter().partial_cmp(b.iter()),
            _ => Some(self.kind().cmp(&other.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;

    #[test]
    fn kind_precedes_numeric_equivalence() {
        let int_one = Value::from(1);
        let real_one = Value::from(1.0);
        assert!(int_one < real_one);
        assert_ne!(int_one, real_one);
        assert!(Value::from(100) < Value::from(-5.0), "类型顺序优先于数值大小");
        assert!(Value::from(true) > Value::from("zzz"));
        assert!(Value::Null < Value::from(i64::MIN));
    }

    #[test]
    fn same_kind_uses_payload_order() {
        assert!(Value::from(false) < Value::from(true));
        assert!(Value::from("abc") < Value::from("abd"));
        assert!(Value::from("Z") < Value::from("a"), "字符串按字节序比较");
        assert!(Value::from(-1.5) < Value::from(2.0));
        assert_eq!(Value::from(true), Value::from(true));
    }

    #[test]
    fn arrays_compare_lexicographically() {
        let short: Value = vec![Value::from(1)].into();
        let long: Value = vec![Value::from(1), Value::Null].into();
        let bigger: Value = vec![Value::from(2)].into();
        assert!(short < long);
        assert!(long < bigger);
    }

    #[test]
    fn objects_compare_by_key_then_value() {
        let mut a = Object::new();
        a.insert("k".into(), Value::from(1));
        let mut b = Object::new();
        b.insert("k".into(), Value::from(2));
        let mut c = Object::new();
        c.insert("j".into(), Value::from(9));
        assert!(Value::from(a.clone()) < Value::from(b));
        assert!(Value::from(c) < Value::from(a), "键先于值参与比较");
    }

    #[test]
    fn nan_is_unordered() {
        let nan = Value::from(f64::NAN);
        assert_ne!(nan, nan.clone());
        assert_eq!(nan.partial_cmp(&Value::from(0.0)), None);
        assert!(Value::from(1) < nan, "跨类型比较不受 NaN 影响");
    }
}
