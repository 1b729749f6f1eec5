//! Data declarations: the constructor families a [`crate::ast::Sir`] tree
//! can build and match on (spec §3.3 "Decl(data-declaration, body)
//! introduces a constructor family in scope").

use std::rc::Rc;

/// One constructor of a [`DataDecl`], in declared order. `tag` is its
/// index within the declaration — the Scott branch index *and* the native
/// `Constr` tag (spec §4.1: both strategies use "declared constructor
/// order").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstrDecl {
    pub name: Rc<str>,
    pub tag: u64,
    /// Field names, in order. Arity is `fields.len()`.
    pub fields: Vec<Rc<str>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDecl {
    pub name: Rc<str>,
    pub constructors: Vec<ConstrDecl>,
}

impl DataDecl {
    pub fn new(name: impl Into<Rc<str>>, constructors: Vec<ConstrDecl>) -> Self {
        DataDecl {
            name: name.into(),
            constructors,
        }
    }

    pub fn constructor(&self, name: &str) -> Option<&ConstrDecl> {
        self.constructors.iter().find(|c| &*c.name == name)
    }

    pub fn is_single_constructor(&self) -> bool {
        self.constructors.len() == 1
    }
}

/// The reserved declaration name naming the runtime [`plutus_data::Data`]
/// tagged sum itself, so `Match`/`Select` on `Data` reuses the ordinary
/// declaration-scope machinery instead of a parallel code path. Its five
/// pseudo-constructors follow `Data::variant_index`'s fixed order.
pub const DATA_DECL_NAME: &str = "Data";

pub fn data_pseudo_decl() -> DataDecl {
    DataDecl::new(
        DATA_DECL_NAME,
        vec![
            ConstrDecl {
                name: "Constr".into(),
                tag: 0,
                fields: vec!["tag".into(), "args".into()],
            },
            ConstrDecl {
                name: "Map".into(),
                tag: 1,
                fields: vec!["entries".into()],
            },
            ConstrDecl {
                name: "List".into(),
                tag: 2,
                fields: vec!["elems".into()],
            },
            ConstrDecl {
                name: "I".into(),
                tag: 3,
                fields: vec!["int".into()],
            },
            ConstrDecl {
                name: "B".into(),
                tag: 4,
                fields: vec!["bytes".into()],
            },
        ],
    )
}
