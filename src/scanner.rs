//! Scanner：逐字符扫描模板文本，区分 SQL 文本与 `$` 插值位置。
//!
//! 只跟踪单引号：每个 `'` 翻转一次引号状态，SQL 的 `''` 转义翻转两次后自然回到原状态。

use crate::arg::Literal;
use crate::expr::{Expr, parse_expr};
use crate::template::TemplateError;
use tracing::{debug, trace};

/// 扫描选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// 插值标记，默认 `$`。
    pub marker: char,
    /// 转义字符，引号外的 `\$` 输出一个普通的 `$`；引号内不做转义。
    pub escape: char,
    /// 为 `true` 时，引号内的标记按普通文本处理；
    /// 为 `false` 时直接报错（引号内的 `$x` 多半是手工拼接 SQL 的遗留）。
    pub allow_markers_in_strings: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            marker: '$',
            escape: '\\',
            allow_markers_in_strings: false,
        }
    }
}

impl ScanOptions {
    /// 引号内的标记按普通文本处理。
    pub fn lenient() -> Self {
        Self {
            allow_markers_in_strings: true,
            ..Self::default()
        }
    }
}

/// 扫描结果中的一段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Literal),
    /// 一个参数位置。
    Expr(Expr),
    /// `$(xs...)`：逗号展开的一组参数。
    Splat(Expr),
}

/// 扫描模板文本。
pub fn scan(source: &str, options: &ScanOptions) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut in_quote = false;
    let mut prev_was_escape = false;
    let mut literal_start = 0usize;
    let mut pos = 0usize;

    while let Some(c) = source[pos..].chars().next() {
        if c == options.marker && prev_was_escape && !in_quote {
            // 去掉转义字符，标记本身作为下一段文本的开头。
            let escape_at = pos - options.escape.len_utf8();
            push_literal(&mut segments, &source[literal_start..escape_at]);
            literal_start = pos;
            prev_was_escape = false;
            pos += c.len_utf8();
            continue;
        }

        if c == options.marker && !in_quote {
            push_literal(&mut segments, &source[literal_start..pos]);
            let (expr, end) = parse_expr(source, pos + c.len_utf8())?;
            segments.push(if expr.is_splat() {
                Segment::Splat(expr)
            } else {
                Segment::Expr(expr)
            });
            pos = end;
            literal_start = end;
            continue;
        }

        if c == options.marker && !options.allow_markers_in_strings {
            let expr = offending_source(source, pos, options.marker);
            debug!(offset = pos, %expr, "marker inside quoted SQL string");
            return Err(TemplateError::QuotingViolation { expr, offset: pos });
        }

        if c == '\'' {
            in_quote = !in_quote;
        }
        prev_was_escape = c == options.escape;
        pos += c.len_utf8();
    }
    push_literal(&mut segments, &source[literal_start..]);

    trace!(
        len = source.len(),
        segments = segments.len(),
        "scanned sql template"
    );
    Ok(segments)
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::Literal(Literal::new(text)));
    }
}

/// 报错时展示的子表达式：能解析就用解析结果，否则截取到引号结束为止。
fn offending_source(source: &str, pos: usize, marker: char) -> String {
    let after = pos + marker.len_utf8();
    match parse_expr(source, after) {
        Ok((expr, _)) => format!("{marker}{expr}"),
        Err(_) => {
            let rest = &source[pos..];
            let end = rest.find('\'').unwrap_or(rest.len());
            rest[..end].to_string()
        }
    }
}
