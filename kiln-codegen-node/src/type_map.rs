//! IR field types mapped to Zod and SQL spellings.

use kiln_ir::{DatabaseKind, FieldType, ResolvedField};

/// Zod schema expression for a field, constraints included.
pub fn zod_expr(field: &ResolvedField) -> String {
    let mut expr = base_zod_expr(field);

    if let Some(min) = field.constraints.min {
        expr.push_str(&format!(".min({})", format_number(min)));
    }
    if let Some(max) = field.constraints.max {
        expr.push_str(&format!(".max({})", format_number(max)));
    }
    if let Some(default) = &field.default {
        expr.push_str(&format!(".default({})", default.to_js_literal()));
    }
    if !field.required {
        expr.push_str(".nullish()");
    }

    expr
}

fn base_zod_expr(field: &ResolvedField) -> String {
    if let Some(values) = &field.constraints.one_of {
        let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
        return format!("z.enum([{}])", quoted.join(", "));
    }

    match field.ty {
        FieldType::Id => "z.string()".to_string(),
        FieldType::Text => {
            let mut expr = "z.string()".to_string();
            if field.constraints.email {
                expr.push_str(".email()");
            }
            if field.constraints.url {
                expr.push_str(".url()");
            }
            expr
        }
        FieldType::Number => {
            let mut expr = "z.number()".to_string();
            if field.constraints.integer {
                expr.push_str(".int()");
            }
            if field.constraints.positive {
                expr.push_str(".positive()");
            }
            expr
        }
        FieldType::Boolean => "z.boolean()".to_string(),
        FieldType::Date => "z.coerce.date()".to_string(),
    }
}

/// SQL column type for a field under the given engine.
pub fn sql_type(field: &ResolvedField, engine: DatabaseKind) -> &'static str {
    match engine {
        DatabaseKind::Sqlite => match field.ty {
            FieldType::Id | FieldType::Text | FieldType::Date => "TEXT",
            FieldType::Number => {
                if field.constraints.integer {
                    "INTEGER"
                } else {
                    "REAL"
                }
            }
            FieldType::Boolean => "INTEGER",
        },
        DatabaseKind::Postgres => match field.ty {
            FieldType::Id | FieldType::Text => "TEXT",
            FieldType::Number => {
                if field.constraints.integer {
                    "BIGINT"
                } else {
                    "DOUBLE PRECISION"
                }
            }
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "TIMESTAMPTZ",
        },
        DatabaseKind::Mysql => match field.ty {
            FieldType::Id => "VARCHAR(64)",
            FieldType::Text => "TEXT",
            FieldType::Number => {
                if field.constraints.integer {
                    "BIGINT"
                } else {
                    "DOUBLE"
                }
            }
            FieldType::Boolean => "TINYINT(1)",
            FieldType::Date => "DATETIME",
        },
    }
}

/// Render a numeric constraint without a trailing `.0` for whole numbers.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_ir::{Constraints, FieldOrigin};

    fn field(ty: FieldType) -> ResolvedField {
        ResolvedField {
            name: "f".into(),
            column: "f".into(),
            ty,
            origin: FieldOrigin::Declared,
            required: true,
            unique: false,
            default: None,
            label: None,
            constraints: Constraints::default(),
        }
    }

    #[test]
    fn test_zod_email_with_bounds() {
        let mut f = field(FieldType::Text);
        f.constraints.email = true;
        f.constraints.min = Some(3.0);
        assert_eq!(zod_expr(&f), "z.string().email().min(3)");
    }

    #[test]
    fn test_zod_optional_integer() {
        let mut f = field(FieldType::Number);
        f.constraints.integer = true;
        f.constraints.positive = true;
        f.required = false;
        assert_eq!(zod_expr(&f), "z.number().int().positive().nullish()");
    }

    #[test]
    fn test_zod_enum_wins_over_type() {
        let mut f = field(FieldType::Text);
        f.constraints.one_of = Some(vec!["draft".into(), "published".into()]);
        assert_eq!(zod_expr(&f), "z.enum([\"draft\", \"published\"])");
    }

    #[test]
    fn test_sql_types_per_engine() {
        let mut n = field(FieldType::Number);
        assert_eq!(sql_type(&n, DatabaseKind::Sqlite), "REAL");
        n.constraints.integer = true;
        assert_eq!(sql_type(&n, DatabaseKind::Sqlite), "INTEGER");
        assert_eq!(sql_type(&n, DatabaseKind::Postgres), "BIGINT");
        assert_eq!(
            sql_type(&field(FieldType::Date), DatabaseKind::Postgres),
            "TIMESTAMPTZ"
        );
        assert_eq!(
            sql_type(&field(FieldType::Boolean), DatabaseKind::Mysql),
            "TINYINT(1)"
        );
    }
}
