// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Matches index names against a comma-separated list of names and `*` globs
pub(crate) fn index_list_matches(index_list: &str, index_name: &str) -> bool {
    index_list
        .split(',')
        .any(|pattern| glob_matches(pattern.trim(), index_name))
}

/// Only `*` is a wildcard; every other character matches itself
pub(crate) fn glob_matches(pattern: &str, name: &str) -> bool {
    let escaped = pattern
        .split('*')
        .map(glob::Pattern::escape)
        .collect::<Vec<_>>()
        .join("*");

    glob::Pattern::new(&escaped).is_ok_and(|pattern| pattern.matches(name))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Evaluates the subset of the query DSL the in-memory store understands:
/// `match_all`, `term` and `bool.must`
pub(crate) fn query_matches(query: &Value, source: &Value) -> Result<bool, String> {
    let clause = match query {
        Value::Null => return Ok(true),
        Value::Object(clause) if clause.is_empty() => return Ok(true),
        Value::Object(clause) if clause.len() == 1 => clause,
        other => return Err(format!("Unsupported query: {other}")),
    };

    let Some((kind, body)) = clause.iter().next() else {
        return Ok(true);
    };

    match kind.as_str() {
        "match_all" => Ok(true),
        "term" => term_matches(body, source),
        "bool" => {
            let must = body.get("must").and_then(Value::as_array);
            match must {
                Some(clauses) => {
                    for clause in clauses {
                        if !query_matches(clause, source)? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                None => Ok(true),
            }
        }
        other => Err(format!("Unsupported query kind: {other}")),
    }
}

fn term_matches(body: &Value, source: &Value) -> Result<bool, String> {
    let Some((field, expected)) = body.as_object().and_then(|term| term.iter().next()) else {
        return Err(format!("Malformed term query: {body}"));
    };

    // Both {"field": value} and {"field": {"value": value}} forms
    let expected = expected.get("value").unwrap_or(expected);

    Ok(source.get(field) == Some(expected))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
