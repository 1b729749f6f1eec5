//! SIR → UPLC lowering (spec §4.1 — "the hardest part").
//!
//! The context carries exactly what spec §4.1's "State and invariants"
//! names: a map of declarations in scope, a `needsZ` flag, and a
//! unique-name generator for synthesized binders — threaded explicitly
//! through `&mut self`, no global mutable state (per spec §9's "no
//! singletons" guidance). It never mutates the `Sir` it is given; each
//! `lower` call returns a fresh `Term`.
//!
//! Two simplifications, recorded here and in `DESIGN.md`, follow directly
//! from how the reference evaluator (`uplc::machine::cek`) actually
//! dispatches `Case`: it only matches `Value::Constr`, never a bare
//! primitive constant. So:
//!
//! - Primitive matches (`Bool`/`Integer`/`ByteString`/`String`) always
//!   lower through `equals*` + `ifThenElse`, at every [`LanguageVersion`] —
//!   there is no machine-level "native case on a primitive" to target.
//! - Matches on the runtime `Data` tagged sum always lower through
//!   `chooseData`, for the same reason.
//!
//! Only matches on a user-declared algebraic type (true `Constr`/`Case`
//! values once lowered) actually branch on [`LanguageVersion::supports_case_constr`].

use crate::ast::{Binding, MatchCase, MatchPattern, Sir, SirConst};
use crate::decl::{data_pseudo_decl, DataDecl, DATA_DECL_NAME};
use crate::error::LoweringError;
use indexmap::IndexMap;
use std::rc::Rc;
use uplc::{Builtin, Constant, LanguageVersion, Term};

pub use crate::ast::LoweringOptions;

#[derive(Debug)]
pub struct LoweringOutput {
    pub term: Term,
    /// Whether a recursive `let` was lowered, requiring the Z-combinator
    /// (spec §8 scenario 4: "the `needsZ` flag was set").
    pub needs_z: bool,
}

pub fn lower(sir: &Sir, version: LanguageVersion, options: LoweringOptions) -> Result<LoweringOutput, LoweringError> {
    let floated;
    let sir_ref: &Sir = if options.optimize {
        floated = crate::optimize::float_lets(sir);
        &floated
    } else {
        sir
    };
    let mut ctx = LoweringContext::new(version, options);
    let term = ctx.lower(sir_ref)?;
    Ok(LoweringOutput {
        term,
        needs_z: ctx.needs_z,
    })
}

pub struct LoweringContext {
    version: LanguageVersion,
    options: LoweringOptions,
    decls: IndexMap<Rc<str>, Rc<DataDecl>>,
    externals: IndexMap<(Rc<str>, Rc<str>), Term>,
    /// Lexical scope: SIR names in binding order, nearest last. Converted
    /// to a de Bruijn index on every `Var` lookup.
    env: Vec<Rc<str>>,
    needs_z: bool,
    gensym: u32,
}

impl LoweringContext {
    pub fn new(version: LanguageVersion, options: LoweringOptions) -> Self {
        LoweringContext {
            version,
            options,
            decls: IndexMap::new(),
            externals: IndexMap::new(),
            env: Vec::new(),
            needs_z: false,
            gensym: 0,
        }
    }

    /// Pre-resolve an `ExternalVar` reference. Without one, referencing it
    /// is a [`LoweringError::UnresolvedExternal`] — this toolkit takes SIR
    /// as input and does not itself perform cross-module linking.
    pub fn with_external(mut self, module: impl Into<Rc<str>>, name: impl Into<Rc<str>>, term: Term) -> Self {
        self.externals.insert((module.into(), name.into()), term);
        self
    }

    fn fresh(&mut self, prefix: &str) -> Rc<str> {
        self.gensym += 1;
        Rc::from(format!("{prefix}#{}", self.gensym))
    }

    fn resolve_var(&self, name: &str) -> Option<u32> {
        self.env.iter().rev().position(|n| &**n == name).map(|p| p as u32)
    }

    pub fn lower(&mut self, sir: &Sir) -> Result<Term, LoweringError> {
        match sir {
            Sir::Var(name) => {
                let index = self
                    .resolve_var(name)
                    .ok_or_else(|| LoweringError::UnboundVariable {
                        name: name.to_string(),
                        span: None,
                    })?;
                Ok(if self.options.debug {
                    Term::named_var(index, name.clone())
                } else {
                    Term::var(index)
                })
            }
            Sir::ExternalVar { module, name } => self
                .externals
                .get(&(module.clone(), name.clone()))
                .cloned()
                .ok_or_else(|| LoweringError::UnresolvedExternal {
                    module: module.to_string(),
                    name: name.to_string(),
                    span: None,
                }),
            Sir::LamAbs { param, body } => {
                self.env.push(param.clone());
                let body_term = self.lower(body)?;
                self.env.pop();
                Ok(if self.options.debug {
                    Term::named_lambda(param.clone(), body_term)
                } else {
                    Term::lambda(body_term)
                })
            }
            Sir::Apply(f, a) => {
                let f_term = self.lower(f)?;
                let a_term = self.lower(a)?;
                Ok(f_term.apply(a_term))
            }
            Sir::Let {
                bindings,
                body,
                recursive,
            } => self.lower_let(bindings, body, *recursive),
            Sir::Match {
                scrutinee,
                decl,
                cases,
                unchecked,
            } => self.lower_match(scrutinee, decl, cases, *unchecked),
            Sir::Constr {
                decl,
                constructor,
                args,
            } => self.lower_constr(decl, constructor, args),
            Sir::Select {
                scrutinee,
                decl,
                field,
            } => self.lower_select(scrutinee, decl, field),
            Sir::IfThenElse {
                cond,
                then_branch,
                else_branch,
            } => {
                let c = self.lower(cond)?;
                let t = self.lower(then_branch)?;
                let e = self.lower(else_branch)?;
                Ok(if_then_else(c, t, e))
            }
            Sir::And(a, b) => {
                let a_term = self.lower(a)?;
                let b_term = self.lower(b)?;
                Ok(if_then_else(a_term, b_term, Term::boolean(false)))
            }
            Sir::Or(a, b) => {
                let a_term = self.lower(a)?;
                let b_term = self.lower(b)?;
                Ok(if_then_else(a_term, Term::boolean(true), b_term))
            }
            Sir::Not(a) => {
                let a_term = self.lower(a)?;
                Ok(if_then_else(a_term, Term::boolean(false), Term::boolean(true)))
            }
            Sir::Cast(inner) => self.lower(inner),
            Sir::Const(k) => Ok(Term::constant(const_to_constant(k))),
            Sir::Builtin(b) => Ok(Term::Builtin(*b)),
            Sir::Error { message } => self.lower_error(message),
            Sir::Decl { decl, body } => {
                let previous = self.decls.insert(decl.name.clone(), decl.clone());
                let result = self.lower(body);
                match previous {
                    Some(p) => {
                        self.decls.insert(decl.name.clone(), p);
                    }
                    None => {
                        self.decls.shift_remove(&decl.name);
                    }
                }
                result
            }
        }
    }

    fn lower_error(&mut self, message: &Option<String>) -> Result<Term, LoweringError> {
        if self.options.error_traces {
            if let Some(msg) = message {
                // `trace` hands back its second argument unforced (it's a
                // plain `args[1].clone()` in the builtin table) — delay the
                // error so evaluating the *argument* doesn't fire it before
                // the message is ever recorded, then force twice: once to
                // saturate the builtin, once to open the `Delay` it returns.
                let traced = Term::Builtin(Builtin::Trace)
                    .apply(Term::constant(Constant::string(msg.clone())))
                    .apply(Term::Error.delay());
                return Ok(traced.force().force());
            }
        }
        Ok(Term::Error)
    }

    fn lower_let(&mut self, bindings: &[Binding], body: &Sir, recursive: bool) -> Result<Term, LoweringError> {
        if recursive {
            if bindings.len() != 1 {
                return Err(LoweringError::MutualRecursion { span: None });
            }
            let b = &bindings[0];
            self.needs_z = true;

            // `f = Z (λf. value)`: push `f`'s own name as the Z parameter
            // binder before lowering `value`, so ordinary name resolution
            // turns self-references into the right de Bruijn index — no
            // separate substitution pass needed.
            self.env.push(b.name.clone());
            let value_term = self.lower(&b.value)?;
            self.env.pop();
            let fixed = z_combinator().apply(Term::lambda(value_term));

            self.env.push(b.name.clone());
            let body_term = self.lower(body)?;
            self.env.pop();
            Ok(Term::lambda(body_term).apply(fixed))
        } else if bindings.is_empty() {
            self.lower(body)
        } else {
            let (first, rest) = bindings.split_first().expect("checked non-empty above");
            let value_term = self.lower(&first.value)?;
            self.env.push(first.name.clone());
            let inner = self.lower_let(rest, body, false);
            self.env.pop();
            Ok(Term::lambda(inner?).apply(value_term))
        }
    }

    fn lower_constr(&mut self, decl: &str, constructor: &str, args: &[Sir]) -> Result<Term, LoweringError> {
        let d = self
            .decls
            .get(decl)
            .cloned()
            .ok_or_else(|| LoweringError::UnknownDeclaration {
                name: decl.to_string(),
                span: None,
            })?;
        let cdecl = d
            .constructor(constructor)
            .cloned()
            .ok_or_else(|| LoweringError::UnknownConstructor {
                decl: decl.to_string(),
                constructor: constructor.to_string(),
                span: None,
            })?;
        if args.len() != cdecl.fields.len() {
            return Err(LoweringError::ArityMismatch {
                constructor: constructor.to_string(),
                expected: cdecl.fields.len(),
                got: args.len(),
                span: None,
            });
        }
        if self.version.supports_case_constr() {
            let arg_terms = args.iter().map(|a| self.lower(a)).collect::<Result<Vec<_>, _>>()?;
            Ok(Term::Constr(cdecl.tag, arg_terms))
        } else {
            self.lower_constr_scott(&d, cdecl.tag as usize, args)
        }
    }

    /// `λf0…f_{n-1}. f_tag a1…ak` (spec §4.1 Scott encoding).
    fn lower_constr_scott(&mut self, d: &DataDecl, tag: usize, args: &[Sir]) -> Result<Term, LoweringError> {
        let n = d.constructors.len();
        let mut names = Vec::with_capacity(n);
        for i in 0..n {
            names.push(self.fresh(&format!("$k{i}")));
        }
        for name in &names {
            self.env.push(name.clone());
        }
        let arg_terms = args.iter().map(|a| self.lower(a)).collect::<Result<Vec<_>, _>>();
        for _ in 0..n {
            self.env.pop();
        }
        let branch_var = Term::var((n - 1 - tag) as u32);
        let body = branch_var.multi_apply(arg_terms?);
        let lambda_names: Vec<Option<Rc<str>>> = names.into_iter().map(Some).collect();
        Ok(Term::multi_lambda(&lambda_names, body))
    }

    fn lower_select(&mut self, scrutinee: &Sir, decl: &str, field: &str) -> Result<Term, LoweringError> {
        let scrutinee_term = self.lower(scrutinee)?;
        if decl == DATA_DECL_NAME {
            let destructor = |b: Builtin| Term::Builtin(b).apply(scrutinee_term.clone());
            return Ok(match field {
                "tag" => Term::Builtin(Builtin::FstPair).apply(destructor(Builtin::UnConstrData)),
                "args" => Term::Builtin(Builtin::SndPair).apply(destructor(Builtin::UnConstrData)),
                "entries" => destructor(Builtin::UnMapData),
                "elems" => destructor(Builtin::UnListData),
                "int" => destructor(Builtin::UnIData),
                "bytes" => destructor(Builtin::UnBData),
                other => {
                    return Err(LoweringError::UnknownField {
                        decl: decl.to_string(),
                        field: other.to_string(),
                        span: None,
                    })
                }
            });
        }

        let d = self
            .decls
            .get(decl)
            .cloned()
            .ok_or_else(|| LoweringError::UnknownDeclaration {
                name: decl.to_string(),
                span: None,
            })?;
        if !d.is_single_constructor() {
            return Err(LoweringError::SelectOnMultiConstructor {
                decl: decl.to_string(),
                span: None,
            });
        }
        let cdecl = &d.constructors[0];
        let k = cdecl.fields.len();
        let idx = cdecl
            .fields
            .iter()
            .position(|f| &**f == field)
            .ok_or_else(|| LoweringError::UnknownField {
                decl: decl.to_string(),
                field: field.to_string(),
                span: None,
            })?;
        let selected = Term::var((k - 1 - idx) as u32);
        let branch = Term::multi_lambda(&vec![None; k], selected);
        Ok(if self.version.supports_case_constr() {
            Term::Case(Box::new(scrutinee_term), vec![branch])
        } else {
            scrutinee_term.apply(branch)
        })
    }

    fn lower_match(
        &mut self,
        scrutinee: &Sir,
        decl: &str,
        cases: &[MatchCase],
        unchecked: bool,
    ) -> Result<Term, LoweringError> {
        if cases.is_empty() {
            return Err(LoweringError::EmptyMatch { span: None });
        }
        for (i, c) in cases.iter().enumerate() {
            if matches!(c.pattern, MatchPattern::Wildcard) && i + 1 != cases.len() {
                return Err(LoweringError::WildcardNotLast { span: None });
            }
        }
        let has_constr_pattern = cases.iter().any(|c| matches!(c.pattern, MatchPattern::Constr { .. }));
        if has_constr_pattern && decl == DATA_DECL_NAME {
            self.lower_data_match(scrutinee, cases, unchecked)
        } else if has_constr_pattern {
            self.lower_adt_match(scrutinee, decl, cases, unchecked)
        } else {
            self.lower_primitive_match(scrutinee, cases, unchecked)
        }
    }

    fn lower_adt_match(
        &mut self,
        scrutinee: &Sir,
        decl: &str,
        cases: &[MatchCase],
        unchecked: bool,
    ) -> Result<Term, LoweringError> {
        let d = self
            .decls
            .get(decl)
            .cloned()
            .ok_or_else(|| LoweringError::UnknownDeclaration {
                name: decl.to_string(),
                span: None,
            })?;
        let n = d.constructors.len();
        let mut branches: Vec<Option<Term>> = vec![None; n];
        let mut wildcard_body: Option<&Sir> = None;

        for c in cases {
            match &c.pattern {
                MatchPattern::Constr { constructor, bindings } => {
                    let cdecl = d
                        .constructor(constructor)
                        .cloned()
                        .ok_or_else(|| LoweringError::UnknownConstructor {
                            decl: decl.to_string(),
                            constructor: constructor.to_string(),
                            span: None,
                        })?;
                    if bindings.len() != cdecl.fields.len() {
                        return Err(LoweringError::PatternArityMismatch {
                            decl: decl.to_string(),
                            bound: bindings.len(),
                            expected: cdecl.fields.len(),
                            span: None,
                        });
                    }
                    for name in bindings {
                        self.env.push(name.clone());
                    }
                    let body_term = self.lower(&c.body);
                    for _ in bindings {
                        self.env.pop();
                    }
                    let names: Vec<Option<Rc<str>>> = bindings.iter().map(|n| Some(n.clone())).collect();
                    branches[cdecl.tag as usize] = Some(Term::multi_lambda(&names, body_term?));
                }
                MatchPattern::Const(_) => {
                    return Err(LoweringError::ConstPatternOnNonPrimitive {
                        decl: decl.to_string(),
                        span: None,
                    })
                }
                MatchPattern::Wildcard => wildcard_body = Some(&c.body),
            }
        }

        for (tag, slot) in branches.iter_mut().enumerate() {
            if slot.is_some() {
                continue;
            }
            let cdecl = &d.constructors[tag];
            let k = cdecl.fields.len();
            if let Some(wbody) = wildcard_body {
                let names: Vec<Rc<str>> = (0..k).map(|i| self.fresh(&format!("$_{i}"))).collect();
                for name in &names {
                    self.env.push(name.clone());
                }
                let body_term = self.lower(wbody);
                for _ in 0..k {
                    self.env.pop();
                }
                let lambda_names: Vec<Option<Rc<str>>> = names.into_iter().map(Some).collect();
                *slot = Some(Term::multi_lambda(&lambda_names, body_term?));
            } else if unchecked {
                let err_term = self.lower_error(&None)?;
                *slot = Some(Term::multi_lambda(&vec![None; k], err_term));
            } else {
                return Err(LoweringError::NonExhaustiveMatch {
                    decl: decl.to_string(),
                    missing: cdecl.name.to_string(),
                    span: None,
                });
            }
        }

        let branch_terms: Vec<Term> = branches.into_iter().map(|b| b.expect("every slot filled above")).collect();
        let scrutinee_term = self.lower(scrutinee)?;
        Ok(if self.version.supports_case_constr() {
            Term::Case(Box::new(scrutinee_term), branch_terms)
        } else {
            scrutinee_term.multi_apply(branch_terms)
        })
    }

    /// Dispatches on the runtime `Data` tagged sum via `chooseData`, since
    /// the reference machine's native `Case` only ever matches
    /// `Value::Constr` (see module docs).
    fn lower_data_match(&mut self, scrutinee: &Sir, cases: &[MatchCase], unchecked: bool) -> Result<Term, LoweringError> {
        let decl = data_pseudo_decl();
        let scrutinee_term = self.lower(scrutinee)?;
        let scrut_name = self.fresh("$data");
        self.env.push(scrut_name.clone());
        let scrut_var = Term::var(self.resolve_var(&scrut_name).expect("just pushed"));

        let mut branches: Vec<Option<Term>> = vec![None; decl.constructors.len()];
        let mut wildcard_body: Option<&Sir> = None;

        for c in cases {
            match &c.pattern {
                MatchPattern::Constr { constructor, bindings } => {
                    let cdecl = decl
                        .constructor(constructor)
                        .cloned()
                        .ok_or_else(|| LoweringError::UnknownConstructor {
                            decl: DATA_DECL_NAME.to_string(),
                            constructor: constructor.to_string(),
                            span: None,
                        })?;
                    if bindings.len() != cdecl.fields.len() {
                        return Err(LoweringError::PatternArityMismatch {
                            decl: DATA_DECL_NAME.to_string(),
                            bound: bindings.len(),
                            expected: cdecl.fields.len(),
                            span: None,
                        });
                    }
                    let body_term = self.lower_data_destructure(&cdecl.name, &scrut_var, bindings, &c.body)?;
                    branches[cdecl.tag as usize] = Some(body_term);
                }
                MatchPattern::Const(_) => {
                    return Err(LoweringError::ConstPatternOnNonPrimitive {
                        decl: DATA_DECL_NAME.to_string(),
                        span: None,
                    })
                }
                MatchPattern::Wildcard => wildcard_body = Some(&c.body),
            }
        }

        for (tag, slot) in branches.iter_mut().enumerate() {
            if slot.is_some() {
                continue;
            }
            if let Some(wbody) = wildcard_body {
                *slot = Some(self.lower(wbody)?);
            } else if unchecked {
                *slot = Some(self.lower_error(&None)?);
            } else {
                self.env.pop();
                return Err(LoweringError::NonExhaustiveMatch {
                    decl: DATA_DECL_NAME.to_string(),
                    missing: decl.constructors[tag].name.to_string(),
                    span: None,
                });
            }
        }
        self.env.pop();

        let branch_values: Vec<Term> = branches.into_iter().map(|b| b.expect("every slot filled above")).collect();
        let mut call = Term::Builtin(Builtin::ChooseData).force().apply(scrut_var);
        for b in branch_values {
            call = call.apply(b.delay());
        }
        let dispatch = call.force();
        Ok(Term::lambda(dispatch).apply(scrutinee_term))
    }

    fn lower_data_destructure(
        &mut self,
        constructor_name: &str,
        scrut_var: &Term,
        bindings: &[Rc<str>],
        body: &Sir,
    ) -> Result<Term, LoweringError> {
        match constructor_name {
            "Constr" => {
                let pair = Term::Builtin(Builtin::UnConstrData).apply(scrut_var.clone());
                let pair_name = self.fresh("$pr");
                self.env.push(pair_name.clone());
                let pair_var = Term::var(self.resolve_var(&pair_name).expect("just pushed"));
                let tag_val = Term::Builtin(Builtin::FstPair).apply(pair_var);

                // `args_val` ends up one binder deeper than `tag_val` (inside
                // the `tag` lambda introduced below), so `pair`'s index
                // shifts by one there. Push a placeholder for that binder
                // before resolving `pair` again instead of reusing the index
                // computed above.
                let tag_name = self.fresh("$tag");
                self.env.push(tag_name);
                let pair_var_under_tag = Term::var(self.resolve_var(&pair_name).expect("still in scope"));
                let args_val = Term::Builtin(Builtin::SndPair).apply(pair_var_under_tag);
                self.env.pop();

                self.env.push(bindings[0].clone());
                self.env.push(bindings[1].clone());
                let body_term = self.lower(body);
                self.env.pop();
                self.env.pop();
                self.env.pop();
                let with_args = Term::lambda(body_term?).apply(args_val);
                let with_tag = Term::lambda(with_args).apply(tag_val);
                Ok(Term::lambda(with_tag).apply(pair))
            }
            "Map" => self.bind(bindings[0].clone(), Term::Builtin(Builtin::UnMapData).apply(scrut_var.clone()), body),
            "List" => self.bind(bindings[0].clone(), Term::Builtin(Builtin::UnListData).apply(scrut_var.clone()), body),
            "I" => self.bind(bindings[0].clone(), Term::Builtin(Builtin::UnIData).apply(scrut_var.clone()), body),
            "B" => self.bind(bindings[0].clone(), Term::Builtin(Builtin::UnBData).apply(scrut_var.clone()), body),
            other => unreachable!("the Data pseudo-declaration has no constructor `{other}`"),
        }
    }

    fn bind(&mut self, name: Rc<str>, value: Term, body: &Sir) -> Result<Term, LoweringError> {
        self.env.push(name);
        let body_term = self.lower(body);
        self.env.pop();
        Ok(Term::lambda(body_term?).apply(value))
    }

    fn lower_primitive_match(&mut self, scrutinee: &Sir, cases: &[MatchCase], unchecked: bool) -> Result<Term, LoweringError> {
        let (explicit, fallback): (&[MatchCase], Option<&Sir>) = match cases.last() {
            Some(c) if matches!(c.pattern, MatchPattern::Wildcard) => (&cases[..cases.len() - 1], Some(&c.body)),
            _ => (cases, None),
        };

        let scrutinee_term = self.lower(scrutinee)?;
        let scrut_name = self.fresh("$scrut");
        self.env.push(scrut_name.clone());
        let scrut_var = Term::var(self.resolve_var(&scrut_name).expect("just pushed"));

        let fallback_term = match fallback {
            Some(body) => self.lower(body),
            None if unchecked => self.lower_error(&None),
            None => {
                self.env.pop();
                return Err(LoweringError::NonExhaustiveMatch {
                    decl: "<primitive>".to_string(),
                    missing: "<no wildcard>".to_string(),
                    span: None,
                });
            }
        };

        let mut acc = fallback_term?;
        for c in explicit.iter().rev() {
            let MatchPattern::Const(k) = &c.pattern else {
                self.env.pop();
                return Err(LoweringError::ConstPatternOnNonPrimitive {
                    decl: "<primitive>".to_string(),
                    span: None,
                });
            };
            let body_term = self.lower(&c.body)?;
            let cond = equals_const(&scrut_var, k);
            acc = if_then_else(cond, body_term, acc);
        }
        self.env.pop();
        Ok(Term::lambda(acc).apply(scrutinee_term))
    }
}

fn equals_const(scrutinee: &Term, k: &SirConst) -> Term {
    match k {
        SirConst::Bool(true) => scrutinee.clone(),
        SirConst::Bool(false) => if_then_else(scrutinee.clone(), Term::boolean(false), Term::boolean(true)),
        SirConst::Integer(i) => Term::Builtin(Builtin::EqualsInteger)
            .apply(scrutinee.clone())
            .apply(Term::constant(Constant::integer(i.clone()))),
        SirConst::ByteString(b) => Term::Builtin(Builtin::EqualsByteString)
            .apply(scrutinee.clone())
            .apply(Term::constant(Constant::byte_string(b.clone()))),
        SirConst::String(s) => Term::Builtin(Builtin::EqualsString)
            .apply(scrutinee.clone())
            .apply(Term::constant(Constant::string(s.clone()))),
        // Unit has exactly one inhabitant; a pattern on it always matches.
        SirConst::Unit => Term::boolean(true),
        SirConst::Data(d) => Term::Builtin(Builtin::EqualsData)
            .apply(scrutinee.clone())
            .apply(Term::constant(Constant::data(d.clone()))),
    }
}

fn const_to_constant(k: &SirConst) -> Constant {
    match k {
        SirConst::Integer(i) => Constant::integer(i.clone()),
        SirConst::ByteString(b) => Constant::byte_string(b.clone()),
        SirConst::String(s) => Constant::string(s.clone()),
        SirConst::Bool(b) => Constant::Bool(*b),
        SirConst::Unit => Constant::Unit,
        SirConst::Data(d) => Constant::data(d.clone()),
    }
}

/// `ifThenElse cond (Delay t) (Delay e)`, forced twice — spec §4.1's V1–V3
/// desugaring, used uniformly (see module docs: the machine's `Case` can't
/// dispatch on a bare `Bool` value, so there is no cheaper native form to
/// reach for at later versions). The first `force` saturates the builtin
/// (it needs one type-level force before its three arguments); the builtin
/// then hands back whichever branch's `Delay` was selected, unopened, so a
/// second `force` is what actually runs it.
fn if_then_else(cond: Term, then_branch: Term, else_branch: Term) -> Term {
    Term::Builtin(Builtin::IfThenElse)
        .apply(cond)
        .apply(then_branch.delay())
        .apply(else_branch.delay())
        .force()
        .force()
}

/// The strict fixed-point combinator (spec §4.1, GLOSSARY):
/// `Z = λf. (λx. f (λv. x x v)) (λx. f (λv. x x v))`.
fn z_combinator() -> Term {
    let self_apply_v = Term::var(1).apply(Term::var(1)).apply(Term::var(0));
    let inner = Term::lambda(Term::var(1).apply(Term::lambda(self_apply_v)));
    Term::lambda(inner.clone().apply(inner))
}
