//! 模板内嵌表达式的边界解析。
//!
//! 只识别一个很小的语法，用来确定 `$` 之后的表达式在哪里结束：
//!
//! - 标识符路径：`name`、`user.name`、`rows[0].id`
//! - 括号表达式：`(任意内容)`，内部的 `()`/`[]`/`{}` 需要配对，`"..."` 字符串会被跳过
//! - 展开：`(xs...)`，括号内以 `...` 结尾
//!
//! 表达式本身不会被求值，求值交给调用方的 `Bindings`。

use crate::template::TemplateError;
use std::fmt;

/// 路径中的一段访问。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Field(String),
    /// `[...]` 中的原始文本（已去掉首尾空白）。
    Index(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    Path(Vec<Accessor>),
    /// 括号内的原始文本（已去掉首尾空白与展开用的 `...`）。
    Group(String),
}

/// 一个从模板中解析出的表达式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    source: String,
    kind: ExprKind,
    splat: bool,
}

impl Expr {
    /// 模板中的原始文本（不含 `$`）。
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// 是否是 `$(xs...)` 形式。
    pub fn is_splat(&self) -> bool {
        self.splat
    }

    /// 查找绑定值时使用的 key：路径取原文，括号表达式取括号内的内容。
    pub fn key(&self) -> &str {
        match &self.kind {
            ExprKind::Path(_) => &self.source,
            ExprKind::Group(inner) => inner,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// 从 `start`（字节偏移）开始解析一个表达式，返回表达式与其后的偏移。
pub fn parse_expr(text: &str, start: usize) -> Result<(Expr, usize), TemplateError> {
    match text[start..].chars().next() {
        None => Err(malformed(start, "expected an expression after the marker")),
        Some('(') => parse_group(text, start),
        Some(c) if is_ident_start(c) => parse_path(text, start),
        Some(c) => Err(malformed(
            start,
            format!("unexpected character {c:?} at the start of an expression"),
        )),
    }
}

fn parse_group(text: &str, start: usize) -> Result<(Expr, usize), TemplateError> {
    let close = find_closing(text, start)?;
    let end = close + 1;
    let inner = text[start + 1..close].trim();

    let (inner, splat) = match inner.strip_suffix("...") {
        Some(rest) => (rest.trim_end(), true),
        None => (inner, false),
    };
    if inner.is_empty() {
        let reason = if splat {
            "nothing to splat before `...`"
        } else {
            "empty parenthesized expression"
        };
        return Err(malformed(start, reason));
    }

    let expr = Expr {
        source: text[start..end].to_string(),
        kind: ExprKind::Group(inner.to_string()),
        splat,
    };
    Ok((expr, end))
}

fn parse_path(text: &str, start: usize) -> Result<(Expr, usize), TemplateError> {
    let mut accessors = Vec::new();
    let mut pos = scan_ident(text, start);
    accessors.push(Accessor::Field(text[start..pos].to_string()));

    loop {
        let mut chars = text[pos..].chars();
        match (chars.next(), chars.next()) {
            // `.` 后必须紧跟标识符，否则视为 SQL 文本（例如句末的点）。
            (Some('.'), Some(c)) if is_ident_start(c) => {
                let field_start = pos + 1;
                pos = scan_ident(text, field_start);
                accessors.push(Accessor::Field(text[field_start..pos].to_string()));
            }
            (Some('['), _) => {
                let close = find_closing(text, pos)?;
                let index = text[pos + 1..close].trim();
                if index.is_empty() {
                    return Err(malformed(pos, "empty index expression"));
                }
                accessors.push(Accessor::Index(index.to_string()));
                pos = close + 1;
            }
            _ => break,
        }
    }

    let expr = Expr {
        source: text[start..pos].to_string(),
        kind: ExprKind::Path(accessors),
        splat: false,
    };
    Ok((expr, pos))
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn scan_ident(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !is_ident_continue(c))
        .map_or(text.len(), |(i, _)| start + i)
}

/// 从 `open`（一个开括号的位置）出发，返回与之配对的闭括号位置。
fn find_closing(text: &str, open: usize) -> Result<usize, TemplateError> {
    let mut stack: Vec<char> = Vec::new();
    let mut in_string = false;
    let mut escaping = false;

    for (i, c) in text[open..].char_indices() {
        if in_string {
            match c {
                _ if escaping => escaping = false,
                '\\' => escaping = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '(' => stack.push(')'),
            '[' => stack.push(']'),
            '{' => stack.push('}'),
            ')' | ']' | '}' => {
                if stack.pop() != Some(c) {
                    return Err(malformed(open + i, format!("mismatched {c:?}")));
                }
                if stack.is_empty() {
                    return Ok(open + i);
                }
            }
            _ => {}
        }
    }

    Err(malformed(open, "unbalanced brackets in expression"))
}

fn malformed(offset: usize, reason: impl Into<String>) -> TemplateError {
    TemplateError::MalformedExpression {
        offset,
        reason: reason.into(),
    }
}
