//! Attribute schema declarations
//!
//! Each resource and data source declares its attributes as data, and the
//! provider validates incoming state against the declaration before any
//! control plane call is made.

use crate::diag::Diagnostics;
use crate::state::{DynamicValue, ResourceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    String,
    Int,
    Bool,
    StringList,
}

impl AttrKind {
    fn name(self) -> &'static str {
        match self {
            AttrKind::String => "string",
            AttrKind::Int => "integer",
            AttrKind::Bool => "bool",
            AttrKind::StringList => "list of strings",
        }
    }

    fn matches(self, value: &DynamicValue) -> bool {
        match self {
            AttrKind::String => value.as_str().is_some(),
            AttrKind::Int => value.as_i64().is_some(),
            AttrKind::Bool => value.as_bool().is_some(),
            AttrKind::StringList => value
                .as_list()
                .is_some_and(|items| items.iter().all(|v| v.as_str().is_some())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: &'static str,
    pub kind: AttrKind,
    pub required: bool,
    pub computed: bool,
    pub sensitive: bool,
}

impl Attribute {
    fn new(name: &'static str, kind: AttrKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            computed: false,
            sensitive: false,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, AttrKind::String)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, AttrKind::Int)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, AttrKind::Bool)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, AttrKind::StringList)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Declared shape of one resource or data source
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn new(type_name: &'static str, attributes: Vec<Attribute>) -> Self {
        Self {
            type_name,
            attributes,
        }
    }

    /// Check required attributes are present and every present attribute has
    /// the declared type. Computed attributes are filled by the API and are
    /// never required on input.
    pub fn validate(&self, state: &ResourceState) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for attr in &self.attributes {
            match state.get(attr.name) {
                Some(value) => {
                    if !attr.kind.matches(value) {
                        diags.push_error(
                            format!("invalid attribute {:?}", attr.name),
                            format!(
                                "{}: attribute {:?} must be a {}",
                                self.type_name,
                                attr.name,
                                attr.kind.name()
                            ),
                        );
                    }
                }
                None => {
                    if attr.required && !attr.computed {
                        diags.push_error(
                            format!("missing attribute {:?}", attr.name),
                            format!(
                                "{}: attribute {:?} is required",
                                self.type_name, attr.name
                            ),
                        );
                    }
                }
            }
        }

        diags
    }
}
