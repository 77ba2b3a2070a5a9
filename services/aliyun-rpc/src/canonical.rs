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

//! Canonicalization of RPC request parameters.

use crate::constants::{SEPARATOR, SIGNATURE};
use crate::encode::percent_encode;
use log::debug;
use rpcsign_core::{Error, ParameterMap, Result};
use std::fmt::Write;

/// Build the canonicalized query string.
///
/// Every parameter is rendered as `encode(key)=encode(value)`, keys in
/// ascending ordinal byte order, joined by `&`. A `Signature` parameter left
/// over from a previous signing is skipped so re-signing the same map is
/// idempotent.
pub fn canonical_query_string(params: &ParameterMap) -> String {
    let mut s = String::new();
    // ParameterMap iterates in ordinal key order already.
    for (k, v) in params.iter().filter(|(k, _)| *k != SIGNATURE) {
        s.push_str(SEPARATOR);
        s.push_str(&percent_encode(k));
        s.push('=');
        s.push_str(&percent_encode(v));
    }

    match s.strip_prefix(SEPARATOR) {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Build the string to sign.
///
/// The result is `METHOD&%2F&encode(canonical_query_string)`. The resource
/// path of an RPC request is always `/`.
///
/// ```
/// use rpcsign_aliyun_rpc::build_string_to_sign;
/// use rpcsign_core::ParameterMap;
///
/// let params = ParameterMap::from([("Action", "Describe")]);
/// let sts = build_string_to_sign("GET", &params).unwrap();
/// assert_eq!(sts, "GET&%2F&Action%3DDescribe");
/// ```
pub fn build_string_to_sign(method: &str, params: &ParameterMap) -> Result<String> {
    if method.is_empty() {
        return Err(Error::request_invalid("method must not be empty"));
    }

    let canonical = canonical_query_string(params);
    debug!("calculated canonical query string: {canonical}");

    let mut s = String::with_capacity(method.len() + canonical.len() * 2 + 8);
    write!(
        s,
        "{method}{SEPARATOR}{}{SEPARATOR}{}",
        percent_encode("/"),
        percent_encode(&canonical)
    )?;
    debug!("calculated string to sign: {s}");

    Ok(s)
}

/// Serialize parameters into the query string transmitted on the wire.
///
/// Unlike [`canonical_query_string`], this keeps the `Signature` parameter.
/// Keys and values are percent-encoded independently with the same encoder.
pub fn to_query_string(params: &ParameterMap) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rpcsign_core::ErrorKind;

    #[test]
    fn test_canonical_query_string_sorted() {
        let params = ParameterMap::from([("B", "2"), ("A", "1")]);
        assert_eq!(canonical_query_string(&params), "A=1&B=2");
    }

    #[test]
    fn test_canonical_query_string_ordinal_not_case_insensitive() {
        let params = ParameterMap::from([("a", "3"), ("B", "2"), ("A", "1")]);
        assert_eq!(canonical_query_string(&params), "A=1&B=2&a=3");
    }

    #[test]
    fn test_canonical_query_string_encodes_keys_and_values() {
        let params = ParameterMap::from([("Tag.1 Key", "a=b&c"), ("Name", "中")]);
        assert_eq!(
            canonical_query_string(&params),
            "Name=%E4%B8%AD&Tag.1%20Key=a%3Db%26c"
        );
    }

    #[test]
    fn test_canonical_query_string_empty() {
        assert_eq!(canonical_query_string(&ParameterMap::new()), "");
    }

    #[test]
    fn test_canonical_query_string_skips_signature() {
        let mut params = ParameterMap::from([("Action", "Describe")]);
        let before = canonical_query_string(&params);
        params.insert(SIGNATURE, "abc=");
        assert_eq!(canonical_query_string(&params), before);
    }

    #[test]
    fn test_build_string_to_sign() {
        let params = ParameterMap::from([("Action", "Describe")]);
        assert_eq!(
            build_string_to_sign("GET", &params).unwrap(),
            "GET&%2F&Action%3DDescribe"
        );
    }

    #[test]
    fn test_build_string_to_sign_double_encodes_values() {
        let params = ParameterMap::from([("Timestamp", "2016-02-23T12:46:24Z"), ("Action", "A")]);
        assert_eq!(
            build_string_to_sign("POST", &params).unwrap(),
            "POST&%2F&Action%3DA%26Timestamp%3D2016-02-23T12%253A46%253A24Z"
        );
    }

    #[test]
    fn test_build_string_to_sign_without_params() {
        assert_eq!(
            build_string_to_sign("GET", &ParameterMap::new()).unwrap(),
            "GET&%2F&"
        );
    }

    #[test]
    fn test_build_string_to_sign_empty_method() {
        let err = build_string_to_sign("", &ParameterMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_to_query_string_keeps_signature() {
        let params = ParameterMap::from([
            ("Signature", "OLeaidS1JvxuMvnyHOwuJ+uX5qY="),
            ("Action", "DescribeRegions"),
        ]);
        assert_eq!(
            to_query_string(&params),
            "Action=DescribeRegions&Signature=OLeaidS1JvxuMvnyHOwuJ%2BuX5qY%3D"
        );
    }
}
