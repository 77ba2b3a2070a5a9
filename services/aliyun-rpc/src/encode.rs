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

//! Percent-encoding used by the RPC signature.

use crate::constants::RPC_ENCODE_SET;
use percent_encoding::utf8_percent_encode;
use rpcsign_core::Result;

/// Percent-encode a string for the RPC signature.
///
/// The UTF-8 bytes of `value` are encoded one at a time. ASCII letters,
/// digits and `-`, `_`, `.`, `~` pass through, every other byte becomes
/// `%XX` with uppercase hex. A multi-byte character therefore yields one
/// triplet per byte.
///
/// Space is always `%20` (never `+`), `*` is always `%2A` and `~` is never
/// escaped, so the output is already in the normalized form the service
/// expects and needs no post-processing.
///
/// ```
/// use rpcsign_aliyun_rpc::percent_encode;
///
/// assert_eq!(percent_encode("Hello World"), "Hello%20World");
/// assert_eq!(percent_encode("a=b&c"), "a%3Db%26c");
/// ```
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, &RPC_ENCODE_SET).to_string()
}

/// Percent-encode a value that may be absent.
///
/// Absence passes through as absence rather than becoming an empty string.
pub fn percent_encode_opt(value: Option<&str>) -> Option<String> {
    value.map(percent_encode)
}

/// Percent-encode raw bytes that must be valid UTF-8.
///
/// Invalid UTF-8 is rejected with an encoding error instead of being
/// replaced, since replacement characters would corrupt the signature.
pub fn percent_encode_bytes(value: &[u8]) -> Result<String> {
    let value = std::str::from_utf8(value)?;
    Ok(percent_encode(value))
}
