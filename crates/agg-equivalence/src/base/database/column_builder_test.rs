use super::{batch_utility::*, Column, ColumnBuilder, ColumnError, ColumnType, Value};

#[test]
fn we_can_build_a_column_from_values_and_nulls() {
    let mut builder = ColumnBuilder::new(ColumnType::BigInt, 3);
    assert!(builder.is_empty());
    builder.append(Value::BigInt(1)).unwrap();
    builder.append(Value::Null).unwrap();
    builder.append_null();
    assert_eq!(builder.len(), 3);
    assert_eq!(builder.column_type(), ColumnType::BigInt);
    assert_eq!(builder.build(), nullable_bigint([Some(1), None, None]));
}

#[test]
fn we_can_build_columns_of_every_type() {
    for (column_type, value) in [
        (ColumnType::Boolean, Value::Boolean(true)),
        (ColumnType::BigInt, Value::BigInt(-1)),
        (ColumnType::Real, Value::Real(0.5)),
        (ColumnType::Double, Value::Double(0.25)),
        (ColumnType::VarChar, Value::VarChar("x".to_string())),
        (ColumnType::VarBinary, Value::VarBinary(vec![0xab])),
    ] {
        let mut builder = column_type.create_builder(1);
        builder.append(value.clone()).unwrap();
        let column = builder.build();
        assert!(!column.is_constant());
        assert_eq!(column.column_type(), column_type);
        assert_eq!(column.value_at(0), Ok(value));
    }
}

#[test]
fn we_cannot_append_a_value_of_another_type() {
    let mut builder = ColumnBuilder::new(ColumnType::Double, 1);
    assert_eq!(
        builder.append(Value::BigInt(1)),
        Err(ColumnError::ValueTypeMismatch {
            column_type: ColumnType::Double,
            value: Value::BigInt(1)
        })
    );
    assert!(builder.is_empty());
    assert_eq!(builder.build(), Column::Double(vec![]));
}
