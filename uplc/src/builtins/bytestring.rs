use super::{as_bytestring, as_integer, bytes_value, R};
use crate::builtin::Builtin;
use crate::machine::error::MachineError;
use crate::machine::value::Value;
use num_traits::ToPrimitive;

pub(crate) fn apply(b: Builtin, args: &[Value]) -> R<Value> {
    use Builtin::*;
    match b {
        AppendByteString => {
            let x = as_bytestring(b, &args[0])?;
            let y = as_bytestring(b, &args[1])?;
            Ok(bytes_value([x, y].concat()))
        }
        ConsByteString => {
            let byte = as_integer(b, &args[0])?;
            let rest = as_bytestring(b, &args[1])?;
            let byte = byte
                .to_u8()
                .ok_or_else(|| out_of_range(b, "byte must be in 0..=255"))?;
            let mut out = Vec::with_capacity(rest.len() + 1);
            out.push(byte);
            out.extend_from_slice(rest);
            Ok(bytes_value(out))
        }
        SliceByteString => {
            let start = as_integer(b, &args[0])?
                .to_i64()
                .ok_or_else(|| out_of_range(b, "start index out of range"))?;
            let len = as_integer(b, &args[1])?
                .to_i64()
                .ok_or_else(|| out_of_range(b, "length out of range"))?;
            let bytes = as_bytestring(b, &args[2])?;
            let start = start.max(0) as usize;
            let end = (start as i64 + len.max(0)).min(bytes.len() as i64).max(start as i64) as usize;
            let start = start.min(bytes.len());
            let end = end.min(bytes.len()).max(start);
            Ok(bytes_value(bytes[start..end].to_vec()))
        }
        LengthOfByteString => {
            let bytes = as_bytestring(b, &args[0])?;
            Ok(super::int_value(bytes.len() as i64))
        }
        IndexByteString => {
            let bytes = as_bytestring(b, &args[0])?;
            let ix = as_integer(b, &args[1])?
                .to_i64()
                .ok_or_else(|| out_of_range(b, "index out of range"))?;
            if ix < 0 || ix as usize >= bytes.len() {
                return Err(out_of_range(b, "index out of bounds"));
            }
            Ok(super::int_value(bytes[ix as usize] as i64))
        }
        EqualsByteString => {
            let x = as_bytestring(b, &args[0])?;
            let y = as_bytestring(b, &args[1])?;
            Ok(Value::bool(x == y))
        }
        LessThanByteString => {
            let x = as_bytestring(b, &args[0])?;
            let y = as_bytestring(b, &args[1])?;
            Ok(Value::bool(x < y))
        }
        LessThanEqualsByteString => {
            let x = as_bytestring(b, &args[0])?;
            let y = as_bytestring(b, &args[1])?;
            Ok(Value::bool(x <= y))
        }
        _ => unreachable!("non-bytestring builtin routed to bytestring::apply"),
    }
}

fn out_of_range(b: Builtin, message: &str) -> MachineError {
    MachineError::BuiltinError {
        builtin: b,
        message: message.to_string(),
    }
}
