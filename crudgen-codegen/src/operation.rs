//! Generated operation records.

use std::fmt;

/// HTTP method bound to an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Name of the express router method (`router.get`, ...).
    pub fn router_method(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four CRUD operations, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    /// All operations in generation order.
    pub const ALL: [OperationKind; 4] = [Self::Read, Self::Create, Self::Update, Self::Delete];

    /// Prefix of the exported symbol (`get`, `create`, ...).
    pub fn symbol_prefix(&self) -> &'static str {
        match self {
            Self::Read => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub fn http_method(&self) -> HttpMethod {
        match self {
            Self::Read => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    pub fn route_path(&self) -> &'static str {
        match self {
            Self::Read => "/",
            Self::Create => "/add",
            Self::Update => "/update",
            Self::Delete => "/delete",
        }
    }

    /// Exported symbol name for `table_type` (the UpperCamelCase table name).
    pub fn symbol_name(&self, table_type: &str) -> String {
        format!("{}{}", self.symbol_prefix(), table_type)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// One rendered handler with its routing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOperation {
    pub kind: OperationKind,
    pub symbol_name: String,
    pub source_text: String,
    pub http_method: HttpMethod,
    pub route_path: String,
}

/// Settings that shape generated handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSettings {
    /// HTTP status answered when request validation fails.
    pub validation_status: u16,
}

impl GenerationSettings {
    /// Status answered when the data store rejects a query.
    pub const DATA_ACCESS_STATUS: u16 = 500;

    /// Status answered by Update/Delete on tables without a key.
    pub const NO_KEY_STATUS: u16 = 405;

    pub const SUCCESS_STATUS: u16 = 200;
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            validation_status: 400,
        }
    }
}
