use super::{as_bool, as_string, R};
use crate::builtin::Builtin;
use crate::machine::value::Value;

pub(crate) fn apply(b: Builtin, args: &[Value], traces: &mut Vec<String>) -> R<Value> {
    use Builtin::*;
    match b {
        IfThenElse => {
            let cond = as_bool(b, &args[0])?;
            Ok(if cond { args[1].clone() } else { args[2].clone() })
        }
        ChooseUnit => Ok(args[1].clone()),
        Trace => {
            let message = as_string(b, &args[0])?;
            traces.push(message.to_string());
            Ok(args[1].clone())
        }
        _ => unreachable!("non-control builtin routed to control::apply"),
    }
}
