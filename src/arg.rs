//! 模板参数模型：Literal / Param / Splat 以及组装 `Query` 时使用的 `Arg`。

use crate::query::Query;
use crate::value::SqlValue;
use crate::valuer::SqlValuer;
use std::fmt;

/// Literal：原样拼入 SQL 的文本，永远不会成为参数占位符。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(pub(crate) String);

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 把任意可显示的值字符串化后原样嵌入 SQL（不是绑定参数）。
///
/// 只应用于可信内容，例如表名或排序方向：
///
/// ```
/// use halo_space::{literal, sql};
///
/// let q = sql!("select * from $table", table = literal("users")).unwrap();
/// assert_eq!(q.compile().0, "select * from users");
/// ```
pub fn literal(x: impl fmt::Display) -> Arg {
    Arg::Literal(Literal(x.to_string()))
}

/// Splat：把一组值展开成逗号分隔的多个参数，例如 `values($(xs...))`。
pub fn splat<I>(items: I) -> Arg
where
    I: IntoIterator,
    I::Item: Into<Arg>,
{
    Arg::Splat(items.into_iter().map(Into::into).collect())
}

/// 一个真正会绑定到驱动的参数。
#[derive(Clone)]
pub enum Param {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(v) => f.debug_tuple("Valuer").field(v).finish(),
        }
    }
}

/// Valuer 无法比较，任何与 Valuer 的比较都视为不相等。
impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Valuer(v) => match v.value() {
                Ok(v) => write!(f, "{v}"),
                Err(e) => write!(f, "<{e}>"),
            },
        }
    }
}

impl From<SqlValue> for Param {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

/// 组装 `Query` 时的原始元素：一个封闭的 sum type，由 `flatten` 统一展开。
#[derive(Clone)]
pub enum Arg {
    Literal(Literal),
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
    /// 嵌套的查询片段，展开时原位拼接。
    Query(Query),
    /// 逗号分隔展开的一组元素。
    Splat(Vec<Arg>),
}

impl Arg {
    /// 绑定到 `$(xs...)` 位置时的元素：Splat 取其成员，其他值视为只含自身的一组。
    pub(crate) fn into_splat_items(self) -> Vec<Arg> {
        match self {
            Self::Splat(items) => items,
            other => vec![other],
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => f.debug_tuple("Literal").field(&v.0).finish(),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(_) => f.write_str("Valuer(..)"),
            Self::Query(q) => f.debug_tuple("Query").field(q).finish(),
            Self::Splat(items) => f.debug_tuple("Splat").field(items).finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Query(a), Self::Query(b)) => a == b,
            (Self::Splat(a), Self::Splat(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Literal> for Arg {
    fn from(v: Literal) -> Self {
        Self::Literal(v)
    }
}

impl From<Query> for Arg {
    fn from(v: Query) -> Self {
        Self::Query(v)
    }
}

impl From<&Query> for Arg {
    fn from(v: &Query) -> Self {
        Self::Query(v.clone())
    }
}

impl From<Param> for Arg {
    fn from(v: Param) -> Self {
        match v {
            Param::Value(v) => Self::Value(v),
            Param::Valuer(v) => Self::Valuer(v),
        }
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! impl_arg_from_value {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Self::Value(SqlValue::from(v))
                }
            }
        )+
    };
}

impl_arg_from_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    &'static str,
    String,
    Vec<u8>,
    time::OffsetDateTime,
    crate::value::SqlDateTime,
);

impl<T> From<Option<T>> for Arg
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}
