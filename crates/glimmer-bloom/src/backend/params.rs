//! Named parameter values bound to a program for one pass.

use std::collections::BTreeMap;

use super::types::ProgramInfo;
use crate::error::BloomError;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Floats(Vec<f32>),
    Vec2s(Vec<[f32; 2]>),
}

/// Parameter values keyed by the program's declared names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramParameters {
    values: BTreeMap<String, ParamValue>,
}

impl ProgramParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_owned(), ParamValue::Float(value));
    }

    pub fn set_floats(&mut self, name: &str, values: &[f32]) {
        self.values
            .insert(name.to_owned(), ParamValue::Floats(values.to_vec()));
    }

    pub fn set_vec2s(&mut self, name: &str, values: &[[f32; 2]]) {
        self.values
            .insert(name.to_owned(), ParamValue::Vec2s(values.to_vec()));
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.values.get(name)? {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn floats(&self, name: &str) -> Option<&[f32]> {
        match self.values.get(name)? {
            ParamValue::Floats(v) => Some(v),
            _ => None,
        }
    }

    pub fn vec2s(&self, name: &str) -> Option<&[[f32; 2]]> {
        match self.values.get(name)? {
            ParamValue::Vec2s(v) => Some(v),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fail if any set parameter is not declared by `info`.
    pub fn check_declared(&self, info: &ProgramInfo) -> Result<(), BloomError> {
        match self.values.keys().find(|name| info.parameter(name).is_none()) {
            Some(name) => Err(BloomError::MissingParameter {
                program: info.name.clone(),
                parameter: name.clone(),
            }),
            None => Ok(()),
        }
    }
}
