// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The annotation surface that drives generation.
//!
//! Every setting exists object-wide (`<key>`) and per field (`<key>.<field>`).
//! [`cascade`] yields the candidates in priority order; callers fall back to
//! their global default once it is exhausted.

use std::collections::BTreeMap;

/// Annotation map of a managed object.
pub type Annotations = BTreeMap<String, String>;

/// Prefix shared by every warden annotation.
pub const ANNOTATION_PREFIX: &str = "secrets.warden.dev/";

/// Comma separated list of fields to populate.
pub const AUTOGENERATE: &str = "secrets.warden.dev/autogenerate";

/// Generation type (`string`, `bytes`, `rsa`, `ecdsa`, `ed25519`).
pub const TYPE: &str = "secrets.warden.dev/type";

/// Length of strings and byte values, bit size of RSA keys.
pub const LENGTH: &str = "secrets.warden.dev/length";

/// ECDSA curve name.
pub const CURVE: &str = "secrets.warden.dev/curve";

/// Rotation interval, e.g. `24h` or `30d`.
pub const ROTATE: &str = "secrets.warden.dev/rotate";

/// RFC3339 time of the last generate-or-rotate write.
pub const GENERATED_AT: &str = "secrets.warden.dev/generated-at";

/// Suffix of the data entry holding a keypair's public half.
pub const PUBLIC_KEY_SUFFIX: &str = ".pub";

/// `<base>.<field>`
pub fn field_key(base: &str, field: &str) -> String {
	format!("{base}.{field}")
}

/// Data key of a keypair field's public key.
pub fn public_key_entry(field: &str) -> String {
	format!("{field}{PUBLIC_KEY_SUFFIX}")
}

/// Split the `autogenerate` value into field names, dropping blanks.
pub fn parse_fields(value: &str) -> Vec<String> {
	value
		.split(',')
		.map(str::trim)
		.filter(|f| !f.is_empty())
		.map(str::to_string)
		.collect()
}

/// Non-empty values of `<base>.<field>` then `<base>`, in priority order.
pub fn cascade<'a>(
	annotations: &'a Annotations,
	base: &str,
	field: &str,
) -> impl Iterator<Item = &'a str> {
	let field_specific = annotations.get(&field_key(base, field));
	let object_wide = annotations.get(base);
	field_specific
		.into_iter()
		.chain(object_wide)
		.map(String::as_str)
		.filter(|v| !v.is_empty())
}
