//! SQL 参数值类型：模板里 `$x` 绑定的具体值。

use std::borrow::Cow;
use std::fmt;

/// SQL 参数值。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(SqlDateTime),
}

/// 带可选时区缩写的时间值（插值为 PostgreSQL 字面量时会用到缩写）。
#[derive(Debug, Clone, PartialEq)]
pub struct SqlDateTime {
    pub dt: time::OffsetDateTime,
    pub tz_abbr: Option<Cow<'static, str>>,
}

impl SqlDateTime {
    pub fn new(dt: time::OffsetDateTime) -> Self {
        Self { dt, tz_abbr: None }
    }

    pub fn with_tz_abbr(mut self, abbr: impl Into<Cow<'static, str>>) -> Self {
        self.tz_abbr = Some(abbr.into());
        self
    }
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// 调试输出：字符串带双引号，字节串输出十六进制，便于在 `Query` 的 Display 中辨认。
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I64(n) => write!(f, "{n}"),
            Self::U64(n) => write!(f, "{n}"),
            Self::F64(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{:?}", s.as_ref()),
            Self::Bytes(b) => {
                f.write_str("0x")?;
                for byte in b {
                    write!(f, "{byte:02X}")?;
                }
                Ok(())
            }
            Self::DateTime(v) => {
                write!(f, "{}", v.dt)?;
                if let Some(abbr) = &v.tz_abbr {
                    write!(f, " {abbr}")?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty; $($t:ty),+) => {
        $(
            impl From<$t> for SqlValue {
                fn from(v: $t) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )+
    };
}

impl_from_int!(I64, i64; i8, i16, i32, i64);
impl_from_int!(U64, u64; u8, u16, u32, u64);
impl_from_int!(F64, f64; f32, f64);

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(SqlDateTime::new(v))
    }
}

impl From<SqlDateTime> for SqlValue {
    fn from(v: SqlDateTime) -> Self {
        Self::DateTime(v)
    }
}
