use super::{as_integer, int_value, R};
use crate::builtin::Builtin;
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    let x = as_integer(b, &args[0])?;
    let y = as_integer(b, &args[1])?;
    match b {
        AddInteger => Ok(int_value(x + y)),
        SubtractInteger => Ok(int_value(x - y)),
        MultiplyInteger => Ok(int_value(x * y)),
        DivideInteger => checked_div(b, x, y, Integer::div_floor),
        ModInteger => checked_div(b, x, y, Integer::mod_floor),
        QuotientInteger => checked_div(b, x, y, |a: &BigInt, c: &BigInt| a / c),
        RemainderInteger => checked_div(b, x, y, |a: &BigInt, c: &BigInt| a % c),
        EqualsInteger => Ok(Value::bool(x == y)),
        LessThanInteger => Ok(Value::bool(x < y)),
        LessThanEqualsInteger => Ok(Value::bool(x <= y)),
        _ => unreachable!("non-integer builtin routed to integer::apply"),
    }
}

fn checked_div(
    b: Builtin,
    x: &BigInt,
    y: &BigInt,
    f: impl FnOnce(&BigInt, &BigInt) -> BigInt,
) -> R<Value> {
    if y.is_zero() {
        Err(MachineError::BuiltinError {
            builtin: b,
            message: "division by zero".into(),
        })
    } else {
        Ok(int_value(f(x, y)))
    }
}
