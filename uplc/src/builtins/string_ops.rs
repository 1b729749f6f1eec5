use super::{as_bytestring, as_string, bytes_value, string_value, R};
use crate::builtin::Builtin;
use crate::machine::error::MachineError;
use crate::machine::value::Value;

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    match b {
        AppendString => {
            let x = as_string(b, &args[0])?;
            let y = as_string(b, &args[1])?;
            Ok(string_value(format!("{x}{y}")))
        }
        EqualsString => {
            let x = as_string(b, &args[0])?;
            let y = as_string(b, &args[1])?;
            Ok(Value::bool(x == y))
        }
        EncodeUtf8 => {
            let s = as_string(b, &args[0])?;
            Ok(bytes_value(s.as_bytes().to_vec()))
        }
        DecodeUtf8 => {
            let bytes = as_bytestring(b, &args[0])?;
            let s = std::str::from_utf8(bytes).map_err(|e| MachineError::BuiltinError {
                builtin: b,
                message: format!("invalid utf-8: {e}"),
            })?;
            Ok(string_value(s.to_string()))
        }
        _ => unreachable!("non-string builtin routed to string_ops::apply"),
    }
}
