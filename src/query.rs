//! Query：不可变、可组合的 SQL 片段，由 Literal 与参数按顺序组成。

use crate::arg::{Arg, Literal, Param};
use crate::flatten::flatten;
use std::fmt;
use std::ops::Add;

/// 展开后的 Query 元素。
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Literal(Literal),
    Param(Param),
}

/// 一个（可能不完整的）SQL 语句及其待绑定参数。
///
/// 构造时立即展开嵌套的 Query 与 Splat，所以存储的元素只有 Literal 和参数。
/// 空 Query 表示"没有任何 SQL"。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    elements: Vec<Element>,
}

impl Query {
    /// 由一组原始参数构造，嵌套的 Query 原位拼接，Splat 逗号展开。
    pub fn new<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Arg>,
    {
        Self {
            elements: flatten(args.into_iter().map(Into::into)),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// 只包含一段原样文本的 Query。
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            elements: vec![Element::Literal(Literal::new(sql))],
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// 参数个数。
    pub fn param_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, Element::Param(_)))
            .count()
    }

    /// 连接两个 Query，中间插入一个空格。
    ///
    /// 即使某一侧是空 Query 也会插入空格。
    pub fn concat(&self, other: &Query) -> Query {
        let mut elements = Vec::with_capacity(self.elements.len() + other.elements.len() + 1);
        elements.extend(self.elements.iter().cloned());
        elements.push(Element::Literal(Literal::new(" ")));
        elements.extend(other.elements.iter().cloned());
        Query { elements }
    }
}

impl Add for Query {
    type Output = Query;

    fn add(mut self, rhs: Query) -> Query {
        self.elements.push(Element::Literal(Literal::new(" ")));
        self.elements.extend(rhs.elements);
        self
    }
}

impl Add<&Query> for &Query {
    type Output = Query;

    fn add(self, rhs: &Query) -> Query {
        self.concat(rhs)
    }
}

impl FromIterator<Arg> for Query {
    fn from_iter<I: IntoIterator<Item = Arg>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// 调试输出：编译后的 SQL，然后每行一个参数 `$i = value`。
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sql, args) = self.compile();
        f.write_str(&sql)?;
        for (i, arg) in args.iter().enumerate() {
            write!(f, "\n  ${} = {}", i + 1, arg)?;
        }
        Ok(())
    }
}
