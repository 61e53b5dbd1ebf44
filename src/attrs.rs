// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The declarative attribute tree handed over by the configuration front-end.
//!
//! Values are a closed set of variants, so codec lookups are exhaustive
//! matches instead of duck-typed assertions. Nested blocks are ordered; the
//! order is significant for list-valued fields such as access rules.

use crate::error::{Result, TetherError};
use std::collections::BTreeMap;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Str(String),
    Bool(bool),
    Int(i64),
    /// Flat string-keyed map (annotations, labels, quotas)
    Map(BTreeMap<String, String>),
    /// Ordered list of plain strings (users, teams, parameter options)
    StrList(Vec<String>),
    /// Ordered list of nested blocks
    Blocks(Vec<Attributes>),
}

/// An ordered mapping from attribute name to value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(BTreeMap<String, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: &str, value: AttrValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.0.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.0.iter()
    }

    pub fn set_str(&mut self, name: &str, value: impl Into<String>) {
        self.insert(name, AttrValue::Str(value.into()));
    }

    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.insert(name, AttrValue::Bool(value));
    }

    pub fn set_int(&mut self, name: &str, value: i64) {
        self.insert(name, AttrValue::Int(value));
    }

    pub fn set_map(&mut self, name: &str, value: BTreeMap<String, String>) {
        self.insert(name, AttrValue::Map(value));
    }

    pub fn set_str_list(&mut self, name: &str, value: Vec<String>) {
        self.insert(name, AttrValue::StrList(value));
    }

    pub fn set_blocks(&mut self, name: &str, value: Vec<Attributes>) {
        self.insert(name, AttrValue::Blocks(value));
    }

    /// Store a single nested block as a one-element block list.
    pub fn set_block(&mut self, name: &str, value: Attributes) {
        self.set_blocks(name, vec![value]);
    }

    /// String attribute; an absent or empty string counts as "not set".
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::Str(s)) if s.is_empty() => Ok(None),
            Some(AttrValue::Str(s)) => Ok(Some(s)),
            Some(_) => Err(mismatch(name, "string")),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::Bool(b)) => Ok(Some(*b)),
            Some(_) => Err(mismatch(name, "bool")),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::Int(i)) => Ok(Some(*i)),
            Some(_) => Err(mismatch(name, "int")),
        }
    }

    pub fn get_map(&self, name: &str) -> Result<Option<&BTreeMap<String, String>>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::Map(m)) => Ok(Some(m)),
            Some(_) => Err(mismatch(name, "string map")),
        }
    }

    pub fn get_str_list(&self, name: &str) -> Result<Option<&[String]>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::StrList(l)) => Ok(Some(l)),
            Some(_) => Err(mismatch(name, "string list")),
        }
    }

    pub fn get_blocks(&self, name: &str) -> Result<Option<&[Attributes]>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(AttrValue::Blocks(b)) => Ok(Some(b)),
            Some(_) => Err(mismatch(name, "block list")),
        }
    }

    /// Single nested block, stored as a block list of at most one element.
    pub fn get_block(&self, name: &str) -> Result<Option<&Attributes>> {
        match self.get_blocks(name)? {
            None | Some([]) => Ok(None),
            Some([block]) => Ok(Some(block)),
            Some(_) => Err(mismatch(name, "single block")),
        }
    }
}

fn mismatch(attribute: &str, expected: &'static str) -> TetherError {
    TetherError::InvalidAttributeType {
        attribute: attribute.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_str_present() {
        let mut attrs = Attributes::new();
        attrs.set_str("user", "alice");
        assert_eq!(attrs.get_str("user").unwrap(), Some("alice"));
    }

    #[test]
    fn test_get_str_empty_is_not_set() {
        let mut attrs = Attributes::new();
        attrs.set_str("user", "");
        assert_eq!(attrs.get_str("user").unwrap(), None);
    }

    #[test]
    fn test_get_str_absent() {
        let attrs = Attributes::new();
        assert_eq!(attrs.get_str("user").unwrap(), None);
    }

    #[test]
    fn test_get_str_wrong_variant() {
        let mut attrs = Attributes::new();
        attrs.set_bool("user", true);
        let err = attrs.get_str("user").unwrap_err();
        assert!(matches!(
            err,
            TetherError::InvalidAttributeType { expected: "string", .. }
        ));
    }

    #[test]
    fn test_get_map_wrong_variant() {
        let mut attrs = Attributes::new();
        attrs.set_str("labels", "oops");
        assert!(attrs.get_map("labels").is_err());
    }

    #[test]
    fn test_get_block_single() {
        let mut inner = Attributes::new();
        inner.set_str("name", "my-template");
        let mut attrs = Attributes::new();
        attrs.set_block("template_ref", inner.clone());
        assert_eq!(attrs.get_block("template_ref").unwrap(), Some(&inner));
    }

    #[test]
    fn test_get_block_rejects_multiple() {
        let mut attrs = Attributes::new();
        attrs.set_blocks("owner", vec![Attributes::new(), Attributes::new()]);
        assert!(attrs.get_block("owner").is_err());
    }

    #[test]
    fn test_blocks_preserve_order() {
        let mut first = Attributes::new();
        first.set_str("name", "first");
        let mut second = Attributes::new();
        second.set_str("name", "second");
        let mut attrs = Attributes::new();
        attrs.set_blocks("access", vec![first.clone(), second.clone()]);

        let blocks = attrs.get_blocks("access").unwrap().unwrap();
        assert_eq!(blocks, &[first, second]);
    }
}
