//! Logical request description and wire encoding.
//!
//! An [`ApiRequest`] is transport-agnostic: a method, an API-relative path,
//! ordered query parameters, extra headers, and an optional JSON body. The
//! encoding rules here turn it into wire form — percent-encoded query
//! strings and, in upload mode, recursively flattened form fields.

use serde_json::Value;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Uppercase method name.
    pub fn as_str(self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Put => "PUT",
            RequestMethod::Delete => "DELETE",
        }
    }
}

/// One named query parameter with a scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParam {
    pub name: String,
    pub value: Value,
}

impl QueryParam {
    /// Create a query parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Whether this parameter makes it into the query string.
    ///
    /// A parameter is dropped when its name is empty, or its value is empty
    /// and not the literal number 0. "Empty" follows the platform's
    /// convention for scalars: null, `false`, `""`, `"0"`, and numeric zero
    /// — so `{name: "page", value: 0}` is kept while `{value: "0"}` is not.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && (is_literal_zero(&self.value) || !is_empty_value(&self.value))
    }

    /// Render the value for the query string.
    pub fn render_value(&self) -> String {
        scalar_to_string(&self.value)
    }
}

fn is_literal_zero(value: &Value) -> bool {
    matches!(value, Value::Number(n) if n.as_f64() == Some(0.0))
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Build the query string for a parameter list.
///
/// Parameters are kept in caller order, invalid ones dropped (see
/// [`QueryParam::is_valid`]), names and values percent-encoded, joined with
/// `&` and prefixed with `?`. An empty parameter set yields no query string.
pub fn encode_query(params: &[QueryParam]) -> String {
    let encoded: Vec<String> = params
        .iter()
        .filter(|p| p.is_valid())
        .map(|p| {
            format!(
                "{}={}",
                urlencoding::encode(&p.name),
                urlencoding::encode(&p.render_value())
            )
        })
        .collect();

    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

/// Flatten a JSON body into ordered form-field pairs for upload mode.
///
/// Scalars pass through unchanged; objects and arrays expand into
/// `parent[key]` / `parent[index]` entries. Expansion is reapplied until no
/// composite values remain, so nesting of any finite depth ends up fully
/// flat (`{a: {c: {d: 2}}}` becomes `a[c][d]=2`).
pub fn flatten_form(body: &Value) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, Value)> = match body {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v.clone()))
            .collect(),
        _ => Vec::new(),
    };

    loop {
        let mut expanded = Vec::with_capacity(pairs.len());
        let mut saw_composite = false;

        for (key, value) in pairs {
            match value {
                Value::Object(map) => {
                    saw_composite = true;
                    for (sub, v) in map {
                        expanded.push((format!("{key}[{sub}]"), v));
                    }
                }
                Value::Array(items) => {
                    saw_composite = true;
                    for (idx, v) in items.into_iter().enumerate() {
                        expanded.push((format!("{key}[{idx}]"), v));
                    }
                }
                scalar => expanded.push((key, scalar)),
            }
        }

        pairs = expanded;
        if !saw_composite {
            break;
        }
    }

    pairs
        .into_iter()
        .map(|(key, value)| (key, scalar_to_string(&value)))
        .collect()
}

/// A logical API request, before transport encoding.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: RequestMethod,
    pub path: String,
    pub query: Vec<QueryParam>,
    /// Extra headers, appended after the default set (not deduplicated).
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request for the given method and API-relative path.
    pub fn new(method: RequestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, path)
    }

    /// Create a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Post, path)
    }

    /// Create a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Patch, path)
    }

    /// Add a query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.push(QueryParam::new(name, value));
        self
    }

    /// Append a slice of query parameters, preserving order.
    pub fn query_params(mut self, params: &[QueryParam]) -> Self {
        self.query.extend_from_slice(params);
        self
    }

    /// Add an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}
