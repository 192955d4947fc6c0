#[cfg(test)]
mod tests {
    use crate::arg::{Arg, Literal, Param, literal, splat};
    use crate::query::{Element, Query};
    use crate::value::SqlValue;
    use crate::{Template, sql};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn params(values: Vec<SqlValue>) -> Vec<Param> {
        values.into_iter().map(Param::Value).collect()
    }

    fn bind_one(template: &str, name: &str, value: impl Into<Arg>) -> Query {
        let mut m = HashMap::new();
        m.insert(name.to_string(), value.into());
        Template::parse(template).unwrap().bind(&m).unwrap()
    }

    #[test]
    fn concat_inserts_single_space() {
        let x = bind_one("where b=$x", "x", 10_i64);
        let q = Query::raw("select a") + x;
        let (s, args) = q.compile();
        assert_eq!(s, "select a where b=$1");
        assert_eq!(args, params(vec![SqlValue::I64(10)]));
    }

    #[test]
    fn concat_by_reference_leaves_operands_usable() {
        let a = Query::raw("select 1");
        let b = Query::raw("union select 2");
        let q = &a + &b;
        assert_eq!(q.compile().0, "select 1 union select 2");
        assert_eq!(a.concat(&b), q);
        assert_eq!(a.compile().0, "select 1");
    }

    #[test]
    fn concat_with_empty_still_inserts_space() {
        let q = Query::raw("select 1") + Query::empty();
        assert_eq!(q.compile().0, "select 1 ");
        let q = Query::empty() + Query::raw("select 1");
        assert_eq!(q.compile().0, " select 1");
    }

    #[test]
    fn concat_is_associative_in_output() {
        let a = bind_one("a = $v", "v", 1_i64);
        let b = bind_one("b = $v", "v", 2_i64);
        let c = bind_one("c = $v", "v", 3_i64);
        let left = (a.clone() + b.clone()) + c.clone();
        let right = a + (b + c);
        assert_eq!(left.compile(), right.compile());
        assert_eq!(left.compile().0, "a = $1 b = $2 c = $3");
    }

    #[test]
    fn nested_queries_are_spliced() {
        let where_b = bind_one("where b=$x", "x", "x");
        let and_c = bind_one("and c=$y", "y", "y");
        let q = Query::new([
            literal("select a "),
            where_b.into(),
            literal(" "),
            and_c.into(),
            literal(" "),
            Query::empty().into(),
        ]);
        let (s, args) = q.compile();
        assert_eq!(s, "select a where b=$1 and c=$2 ");
        assert_eq!(args, params(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn nested_empty_query_contributes_nothing() {
        let cond = Query::empty();
        let q = sql!("select * from t $cond", cond = cond).unwrap();
        let (s, args) = q.compile();
        assert_eq!(s, "select * from t ");
        assert!(args.is_empty());
    }

    #[test]
    fn fragments_compose_through_templates() {
        let filter = sql!("status = $s", s = "active").unwrap();
        let q = sql!(
            "select * from users where $filter and id > $min",
            filter = filter,
            min = 100,
        )
        .unwrap();
        let (s, args) = q.compile();
        assert_eq!(s, "select * from users where status = $1 and id > $2");
        assert_eq!(args, params(vec!["active".into(), SqlValue::I64(100)]));
    }

    #[test]
    fn splat_expands_comma_separated() {
        let q = sql!(
            "insert into foo values($(xs...))",
            xs = splat(vec![Arg::from(1_i64), Arg::from("hi")]),
        )
        .unwrap();
        let (s, args) = q.compile();
        assert_eq!(s, "insert into foo values($1,$2)");
        assert_eq!(args, params(vec![SqlValue::I64(1), "hi".into()]));
    }

    #[test]
    fn empty_splat_compiles_to_nothing() {
        let q = sql!(
            "insert into foo values($(xs...))",
            xs = splat(Vec::<i64>::new())
        )
        .unwrap();
        let (s, args) = q.compile();
        assert_eq!(s, "insert into foo values()");
        assert!(args.is_empty());
    }

    #[test]
    fn splat_of_queries_and_literals() {
        let now = Query::raw("now()");
        let q = sql!(
            "insert into t values ($(row...))",
            row = splat(vec![Arg::from(5_i64), now.into(), literal("DEFAULT")]),
        )
        .unwrap();
        assert_eq!(q.compile().0, "insert into t values ($1,now(),DEFAULT)");
    }

    #[test]
    fn compile_is_idempotent() {
        let q = sql!("select $a, $b", a = 1, b = "two").unwrap();
        assert_eq!(q.compile(), q.compile());
        let f = |i: usize| format!("?{i}");
        assert_eq!(q.compile_with(f), q.compile_with(f));
    }

    #[test]
    fn elements_keep_source_order() {
        let q = sql!("a $x b", x = 1).unwrap();
        assert_eq!(
            q.elements(),
            &[
                Element::Literal(Literal::new("a ")),
                Element::Param(Param::Value(SqlValue::I64(1))),
                Element::Literal(Literal::new(" b")),
            ]
        );
        assert_eq!(q.param_count(), 1);
        assert!(!q.is_empty());
        assert!(Query::default().is_empty());
    }

    #[test]
    fn collect_args_into_query() {
        let q: Query = vec![literal("id = "), Arg::from(3_i64)].into_iter().collect();
        assert_eq!(q.compile().0, "id = $1");
    }

    #[test]
    fn display_lists_bound_values() {
        let q = sql!("select $a, $b", a = 1, b = "hi").unwrap();
        assert_eq!(q.to_string(), "select $1, $2\n  $1 = 1\n  $2 = \"hi\"");
    }

    #[test]
    fn display_without_params_is_just_sql() {
        assert_eq!(Query::raw("select 1").to_string(), "select 1");
    }
}
