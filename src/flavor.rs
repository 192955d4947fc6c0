//! SQL Flavor（方言）：决定占位符风格与字面量插值规则。

use std::fmt;

/// 支持的数据库方言。默认是 PostgreSQL，即 `$1, $2, ...` 占位符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    MySQL,
    #[default]
    PostgreSQL,
    SQLite,
    SQLServer,
    Oracle,
}

impl Flavor {
    /// 生成第 `index` 个参数（从 1 开始）的占位符。
    pub fn placeholder(self, index: usize) -> String {
        let mut out = String::new();
        self.write_placeholder(index, &mut out);
        out
    }

    pub(crate) fn write_placeholder(self, index: usize, out: &mut String) {
        match self {
            Self::MySQL | Self::SQLite => out.push('?'),
            Self::PostgreSQL => {
                out.push('$');
                out.push_str(&index.to_string());
            }
            Self::SQLServer => {
                out.push_str("@p");
                out.push_str(&index.to_string());
            }
            Self::Oracle => {
                out.push(':');
                out.push_str(&index.to_string());
            }
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::Oracle => "Oracle",
        };
        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InterpolateError {
    #[error("sql template unsupported args when interpolating")]
    UnsupportedArgs,
    #[error("{0}")]
    ValuerError(#[from] crate::valuer::ValuerError),
}
