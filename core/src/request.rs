// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::{Error, Result};
use http::Method;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// ParameterMap holds the query parameters of an RPC request.
///
/// Keys are unique. Iteration always yields keys in ascending ordinal byte
/// order (`String`'s `Ord`), never in insertion order and never locale-aware.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap(BTreeMap<String, String>);

impl ParameterMap {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from values that may be absent.
    ///
    /// Returns a request invalid error naming the first key without a value.
    /// Use this at the boundary where untyped values enter so that a signature
    /// is never computed over silently substituted data.
    pub fn try_from_optional<K, V, I>(iter: I) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        let mut params = Self::new();
        for (k, v) in iter {
            let k = k.into();
            let Some(v) = v else {
                return Err(Error::request_invalid(format!(
                    "value of parameter {k} is absent"
                )));
            };
            params.insert(k, v);
        }
        Ok(params)
    }

    /// Build a map from values that may be absent, coercing absence to `""`.
    pub fn from_optional_lossy<K, V, I>(iter: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.map(Into::into).unwrap_or_default()))
            .collect()
    }

    /// Parse an `application/x-www-form-urlencoded` query string.
    ///
    /// Later duplicates of a key overwrite earlier ones.
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Insert a parameter, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Get the value of a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a parameter, returning its value if any.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Check whether a parameter exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ParameterMap {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Extend<(String, String)> for ParameterMap {
    fn extend<T: IntoIterator<Item = (String, String)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

/// SigningRequest is the unit a request signer works on: the HTTP method
/// plus every query parameter that will be transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// Query parameters.
    pub params: ParameterMap,
}

impl SigningRequest {
    /// Create a request with no parameters.
    pub fn new(method: Method) -> Self {
        Self {
            method,
            params: ParameterMap::new(),
        }
    }

    /// Create a request from a method token such as `GET`.
    pub fn from_method_str(method: &str) -> Result<Self> {
        if method.is_empty() {
            return Err(Error::request_invalid("method must not be empty"));
        }
        Ok(Self::new(Method::from_bytes(method.as_bytes())?))
    }

    /// Add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }
}
