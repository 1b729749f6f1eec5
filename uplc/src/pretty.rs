//! A Wadler-style pretty-printer for [`Term`] (spec §6's "human-readable
//! surface for debugging"), built on the `pretty` crate the way a
//! Haskell-descended toolchain would — grounded directly on
//! `pretty::RcDoc`'s documented combinators.

use crate::constant::Constant;
use crate::term::Term;
use pretty::RcDoc;

const WIDTH: usize = 80;

pub fn pretty_print(term: &Term) -> String {
    let mut buf = Vec::new();
    doc_for(term).render(WIDTH, &mut buf).expect("writing to a Vec<u8> cannot fail");
    String::from_utf8(buf).expect("the printer only ever emits UTF-8")
}

fn doc_for(term: &Term) -> RcDoc<'static> {
    match term {
        Term::Var(v) => match &v.debug_name {
            Some(name) => RcDoc::text(name.to_string()),
            None => RcDoc::text(format!("#{}", v.index)),
        },
        Term::LamAbs { debug_name, body } => {
            let name = debug_name
                .as_ref()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "_".to_string());
            paren(
                RcDoc::text("lam")
                    .append(RcDoc::space())
                    .append(RcDoc::text(name))
                    .append(RcDoc::line())
                    .append(doc_for(body))
                    .nest(2)
                    .group(),
            )
        }
        Term::Apply(f, a) => paren(
            RcDoc::text("[")
                .append(doc_for(f))
                .append(RcDoc::line())
                .append(doc_for(a))
                .append(RcDoc::text("]"))
                .nest(2)
                .group(),
        ),
        Term::Force(t) => paren(
            RcDoc::text("force")
                .append(RcDoc::line())
                .append(doc_for(t))
                .nest(2)
                .group(),
        ),
        Term::Delay(t) => paren(
            RcDoc::text("delay")
                .append(RcDoc::line())
                .append(doc_for(t))
                .nest(2)
                .group(),
        ),
        Term::Constant(c) => paren(RcDoc::text("con").append(RcDoc::space()).append(constant_doc(c))),
        Term::Builtin(b) => paren(RcDoc::text("builtin").append(RcDoc::space()).append(RcDoc::text(b.name()))),
        Term::Error => paren(RcDoc::text("error")),
        Term::Constr(tag, args) => paren(
            RcDoc::text("constr")
                .append(RcDoc::space())
                .append(RcDoc::text(tag.to_string()))
                .append(RcDoc::line())
                .append(RcDoc::intersperse(args.iter().map(doc_for), RcDoc::line()))
                .nest(2)
                .group(),
        ),
        Term::Case(scrutinee, branches) => paren(
            RcDoc::text("case")
                .append(RcDoc::space())
                .append(doc_for(scrutinee))
                .append(RcDoc::line())
                .append(RcDoc::intersperse(branches.iter().map(doc_for), RcDoc::line()))
                .nest(2)
                .group(),
        ),
    }
}

fn constant_doc(c: &Constant) -> RcDoc<'static> {
    match c {
        Constant::Integer(i) => RcDoc::text(i.to_string()),
        Constant::ByteString(b) => RcDoc::text(format!("#{}", hex::encode(b.as_slice()))),
        Constant::String(s) => RcDoc::text(format!("{s:?}")),
        Constant::Unit => RcDoc::text("()"),
        Constant::Bool(b) => RcDoc::text(b.to_string()),
        Constant::Data(d) => RcDoc::text(plutus_data::to_hex(d)),
        Constant::ProtoList(_, items) => RcDoc::text("[")
            .append(RcDoc::intersperse(
                items.iter().map(constant_doc),
                RcDoc::text(", "),
            ))
            .append(RcDoc::text("]")),
        Constant::ProtoPair(_, _, a, b) => RcDoc::text("(")
            .append(constant_doc(a))
            .append(RcDoc::text(", "))
            .append(constant_doc(b))
            .append(RcDoc::text(")")),
        Constant::Bls12_381G1Element(e) => RcDoc::text(format!("g1:{}", hex::encode(e.compress()))),
        Constant::Bls12_381G2Element(e) => RcDoc::text(format!("g2:{}", hex::encode(e.compress()))),
        Constant::Bls12_381MlResult(_) => RcDoc::text("<miller-loop-result>"),
    }
}

fn paren(doc: RcDoc<'static>) -> RcDoc<'static> {
    RcDoc::text("(").append(doc).append(RcDoc::text(")"))
}
