//! 插值：把参数按 flavor 的字面量语法直接写进 SQL。
//!
//! 安全警告：插值永远不如预编译参数安全；仅用于不支持参数化的驱动或日志输出。
//! 这里直接遍历 Query 的元素，不会重新解析 SQL 文本。

use crate::arg::Param;
use crate::flavor::{Flavor, InterpolateError};
use crate::query::{Element, Query};
use crate::string_builder::StringBuilder;
use crate::value::{SqlDateTime, SqlValue};
use time::format_description::FormatItem;
use time::macros::format_description;

impl Query {
    /// 生成不带占位符的 SQL：每个参数被替换为 `flavor` 下的字面量。
    pub fn interpolate(&self, flavor: Flavor) -> Result<String, InterpolateError> {
        let mut buf = StringBuilder::with_capacity(self.elements().len() * 16);
        for e in self.elements() {
            match e {
                Element::Literal(lit) => buf.write_str(lit.as_str()),
                Element::Param(p) => encode_param(buf.as_mut_string(), p, flavor)?,
            }
        }
        Ok(buf.into_string())
    }
}

fn encode_param(out: &mut String, param: &Param, flavor: Flavor) -> Result<(), InterpolateError> {
    match param {
        Param::Value(v) => encode_sql_value(out, v, flavor),
        Param::Valuer(v) => {
            let vv = v.value()?;
            encode_sql_value(out, &vv, flavor)
        }
    }
}

fn encode_sql_value(
    out: &mut String,
    v: &SqlValue,
    flavor: Flavor,
) -> Result<(), InterpolateError> {
    match v {
        SqlValue::Null => out.push_str("NULL"),
        SqlValue::Bool(b) => match flavor {
            Flavor::Oracle | Flavor::SQLServer => out.push_str(if *b { "1" } else { "0" }),
            _ => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        },
        SqlValue::I64(n) => out.push_str(&n.to_string()),
        SqlValue::U64(n) => out.push_str(&n.to_string()),
        SqlValue::F64(n) => {
            if !n.is_finite() {
                return Err(InterpolateError::UnsupportedArgs);
            }
            out.push_str(&n.to_string());
        }
        SqlValue::String(s) => quote_string(out, s.as_ref(), flavor),
        SqlValue::Bytes(b) => encode_bytes(out, b, flavor),
        SqlValue::DateTime(dt) => encode_datetime(out, dt, flavor)?,
    }
    Ok(())
}

fn encode_bytes(out: &mut String, data: &[u8], flavor: Flavor) {
    match flavor {
        Flavor::MySQL | Flavor::SQLite => {
            out.push_str("X'");
            push_hex(out, data);
            out.push('\'');
        }
        Flavor::PostgreSQL => {
            out.push_str("'\\x");
            push_hex(out, data);
            out.push_str("'::bytea");
        }
        Flavor::SQLServer => {
            out.push_str("0x");
            push_hex(out, data);
        }
        Flavor::Oracle => {
            out.push_str("hextoraw('");
            push_hex(out, data);
            out.push_str("')");
        }
    }
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

/// 单引号内的字符串字面量。
///
/// 单引号一律双写；MySQL 额外转义反斜杠（默认 sql_mode 下反斜杠是转义符），
/// SQLServer 加 `N` 前缀。
fn quote_string(out: &mut String, s: &str, flavor: Flavor) {
    if flavor == Flavor::SQLServer {
        out.push('N');
    }
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' if flavor == Flavor::MySQL => out.push_str("\\\\"),
            '\u{0000}' if flavor == Flavor::MySQL => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

const DATETIME_MICROS: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");
const DATETIME_MILLIS: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
const OFFSET: &[FormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

fn encode_datetime(
    out: &mut String,
    v: &SqlDateTime,
    flavor: Flavor,
) -> Result<(), InterpolateError> {
    // 四舍五入到微秒：+500ns
    let dt = round_dt(v, time::Duration::nanoseconds(500))?;

    match flavor {
        Flavor::MySQL => {
            out.push('\'');
            format_dt(out, &dt, DATETIME_MICROS)?;
            out.push('\'');
        }
        Flavor::PostgreSQL => {
            out.push('\'');
            format_dt(out, &dt, DATETIME_MICROS)?;
            out.push(' ');
            match &v.tz_abbr {
                Some(abbr) => out.push_str(abbr),
                None => format_dt(out, &dt, OFFSET)?,
            }
            out.push('\'');
        }
        Flavor::SQLite => {
            let dt = round_dt(v, time::Duration::microseconds(500))?;
            out.push('\'');
            format_dt(out, &dt, DATETIME_MILLIS)?;
            out.push('\'');
        }
        Flavor::SQLServer => {
            out.push('\'');
            format_dt(out, &dt, DATETIME_MICROS)?;
            out.push(' ');
            format_dt(out, &dt, OFFSET)?;
            out.push('\'');
        }
        Flavor::Oracle => {
            out.push_str("to_timestamp('");
            format_dt(out, &dt, DATETIME_MICROS)?;
            out.push_str("', 'YYYY-MM-DD HH24:MI:SS.FF')");
        }
    }

    Ok(())
}

/// 超出 `time` 的可表示范围时报错而不是溢出。
fn round_dt(
    v: &SqlDateTime,
    half_unit: time::Duration,
) -> Result<time::OffsetDateTime, InterpolateError> {
    v.dt.checked_add(half_unit)
        .ok_or(InterpolateError::UnsupportedArgs)
}

fn format_dt(
    out: &mut String,
    dt: &time::OffsetDateTime,
    fmt: &[FormatItem<'_>],
) -> Result<(), InterpolateError> {
    let s = dt
        .format(fmt)
        .map_err(|_| InterpolateError::UnsupportedArgs)?;
    out.push_str(&s);
    Ok(())
}
