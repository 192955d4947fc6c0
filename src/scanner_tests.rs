#[cfg(test)]
mod tests {
    use crate::arg::Literal;
    use crate::expr::parse_expr;
    use crate::scanner::{ScanOptions, Segment, scan};
    use crate::template::TemplateError;
    use pretty_assertions::assert_eq;

    fn lit(s: &str) -> Segment {
        Segment::Literal(Literal::new(s))
    }

    fn expr(src: &str) -> Segment {
        Segment::Expr(parse_expr(src, 0).unwrap().0)
    }

    fn splat(src: &str) -> Segment {
        Segment::Splat(parse_expr(src, 0).unwrap().0)
    }

    fn strict(src: &str) -> Result<Vec<Segment>, TemplateError> {
        scan(src, &ScanOptions::default())
    }

    fn lenient(src: &str) -> Result<Vec<Segment>, TemplateError> {
        scan(src, &ScanOptions::lenient())
    }

    #[test]
    fn empty_template_has_no_segments() {
        assert_eq!(strict("").unwrap(), Vec::<Segment>::new());
    }

    #[test]
    fn plain_text_is_one_literal() {
        assert_eq!(
            strict("select * from t where a = 'x'").unwrap(),
            vec![lit("select * from t where a = 'x'")]
        );
    }

    #[test]
    fn markers_split_literals() {
        assert_eq!(
            strict("select $a, $(b + 1)from t where c = $c").unwrap(),
            vec![
                lit("select "),
                expr("a"),
                lit(", "),
                expr("(b + 1)"),
                lit("from t where c = "),
                expr("c"),
            ]
        );
    }

    #[test]
    fn adjacent_markers_emit_no_empty_literal() {
        assert_eq!(strict("$a$b").unwrap(), vec![expr("a"), expr("b")]);
    }

    #[test]
    fn splat_site() {
        assert_eq!(
            strict("insert into foo values($(xs...))").unwrap(),
            vec![lit("insert into foo values("), splat("(xs...)"), lit(")")]
        );
    }

    #[test]
    fn escaped_marker_is_plain_text() {
        assert_eq!(
            strict("some literal \\$a").unwrap(),
            vec![lit("some literal "), lit("$a")]
        );
    }

    #[test]
    fn double_escape_still_escapes_marker() {
        assert_eq!(strict("a \\\\$b").unwrap(), vec![lit("a \\"), lit("$b")]);
    }

    #[test]
    fn escape_char_without_marker_is_kept() {
        assert_eq!(strict("a \\n $b").unwrap(), vec![lit("a \\n "), expr("b")]);
    }

    #[test]
    fn lenient_marker_in_quotes_is_text() {
        assert_eq!(
            lenient("select $y where x = '$x'").unwrap(),
            vec![lit("select "), expr("y"), lit(" where x = '$x'")]
        );
    }

    #[test]
    fn strict_marker_in_quotes_fails() {
        let err = strict("select $y where x = '$x'").unwrap_err();
        assert_eq!(
            err,
            TemplateError::QuotingViolation {
                expr: "$x".to_string(),
                offset: 21,
            }
        );
    }

    #[test]
    fn strict_violation_reports_text_when_expression_is_malformed() {
        let err = strict("x = 'price: $ 5'").unwrap_err();
        assert_eq!(
            err,
            TemplateError::QuotingViolation {
                expr: "$ 5".to_string(),
                offset: 12,
            }
        );
    }

    #[test]
    fn escaped_marker_in_quotes_is_still_a_violation() {
        let err = strict("x = 'cost: \\$5'").unwrap_err();
        assert_eq!(
            err,
            TemplateError::QuotingViolation {
                expr: "$5".to_string(),
                offset: 12,
            }
        );
    }

    #[test]
    fn lenient_keeps_escape_char_in_quotes() {
        let src = r"select $y where p = 'C:\$dir'";
        assert_eq!(
            lenient(src).unwrap(),
            vec![lit("select "), expr("y"), lit(r" where p = 'C:\$dir'")]
        );
    }

    #[test]
    fn doubled_quotes_keep_quote_state() {
        assert_eq!(
            strict("where a = 'it''s' and b = $b").unwrap(),
            vec![lit("where a = 'it''s' and b = "), expr("b")]
        );
    }

    #[test]
    fn marker_after_closed_quote_is_interpolated() {
        assert_eq!(
            strict("'a' || $x || 'b'").unwrap(),
            vec![lit("'a' || "), expr("x"), lit(" || 'b'")]
        );
    }

    #[test]
    fn marker_at_end_is_malformed() {
        let err = strict("select $").unwrap_err();
        assert!(matches!(
            err,
            TemplateError::MalformedExpression { offset: 8, .. }
        ));
    }

    #[test]
    fn unbalanced_group_is_malformed() {
        let err = strict("select $(a + (b) from t").unwrap_err();
        assert!(matches!(err, TemplateError::MalformedExpression { .. }));
    }

    #[test]
    fn custom_marker_and_escape() {
        let options = ScanOptions {
            marker: '#',
            escape: '!',
            allow_markers_in_strings: false,
        };
        assert_eq!(
            scan("select #a, !#b, $c", &options).unwrap(),
            vec![lit("select "), expr("a"), lit(", "), lit("#b, $c")]
        );
    }

    #[test]
    fn multibyte_text_around_markers() {
        assert_eq!(
            strict("名字 = $名 and é = 'ü'").unwrap(),
            vec![lit("名字 = "), expr("名"), lit(" and é = 'ü'")]
        );
    }
}
