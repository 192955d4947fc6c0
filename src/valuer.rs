//! SqlValuer：延迟求值的参数。
//!
//! 编译（生成占位符）时不会调用 `value()`，值原样交给驱动；
//! 只有在插值成字面量或 Display 调试输出时才会求值。

use crate::value::SqlValue;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sql template valuer error: {0}")]
pub struct ValuerError(pub String);

/// 可在插值阶段动态计算实际值的 trait。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
